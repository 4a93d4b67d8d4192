//! Page to priority-section mapping.
//!
//! The section a page displays is translated first when the language
//! changes. Keep this table in sync with the site's pages and with
//! `SectionId`.

use crate::content::SectionId;

/// Pages grouped by the section they render, matched by exact id or by
/// family prefix (`admissions-*`).
const PAGE_FAMILIES: &[(&str, SectionId)] = &[
    ("admissions", SectionId::Admissions),
    ("apply", SectionId::Admissions),
    ("tuition", SectionId::Admissions),
    ("financial-aid", SectionId::Admissions),
    ("academics", SectionId::Academics),
    ("curriculum", SectionId::Academics),
    ("courses", SectionId::Academics),
    ("bar-passage", SectionId::Academics),
    ("faculty", SectionId::Faculty),
    ("weekly-dicta", SectionId::WeeklyDicta),
    ("dicta", SectionId::WeeklyDicta),
    ("notices", SectionId::Notices),
    ("announcements", SectionId::Notices),
];

/// Priority section for a page id such as `"admissions-requirements"`.
///
/// Home and any unmapped page fall back to the home content.
pub fn priority_section(page: &str) -> SectionId {
    let page = page.trim().trim_matches('/').to_ascii_lowercase();

    PAGE_FAMILIES
        .iter()
        .find(|(family, _)| {
            page == *family
                || page
                    .strip_prefix(*family)
                    .is_some_and(|rest| rest.starts_with(['-', '/']))
        })
        .map(|(_, section)| *section)
        .unwrap_or(SectionId::HomeContent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_and_unmapped_pages() {
        assert_eq!(priority_section("home"), SectionId::HomeContent);
        assert_eq!(priority_section(""), SectionId::HomeContent);
        assert_eq!(priority_section("contact"), SectionId::HomeContent);
    }

    #[test]
    fn test_admissions_family() {
        for page in ["admissions", "admissions-requirements", "apply", "tuition", "financial-aid"] {
            assert_eq!(priority_section(page), SectionId::Admissions, "{}", page);
        }
    }

    #[test]
    fn test_academics_family() {
        for page in ["academics", "curriculum", "academics/clinics", "bar-passage"] {
            assert_eq!(priority_section(page), SectionId::Academics, "{}", page);
        }
    }

    #[test]
    fn test_faculty_pages() {
        assert_eq!(priority_section("faculty"), SectionId::Faculty);
        assert_eq!(priority_section("faculty-profile"), SectionId::Faculty);
    }

    #[test]
    fn test_other_sections() {
        assert_eq!(priority_section("weekly-dicta"), SectionId::WeeklyDicta);
        assert_eq!(priority_section("notices"), SectionId::Notices);
    }

    #[test]
    fn test_prefix_must_end_at_word_boundary() {
        // "facultyclub" is not a faculty page
        assert_eq!(priority_section("facultyclub"), SectionId::HomeContent);
    }

    #[test]
    fn test_normalizes_case_and_slashes() {
        assert_eq!(priority_section("/Admissions/"), SectionId::Admissions);
    }

    #[test]
    fn test_every_family_maps_to_a_known_section() {
        for (family, section) in PAGE_FAMILIES {
            assert_eq!(priority_section(family), *section);
        }
    }
}
