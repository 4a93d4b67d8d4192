//! Content sections and the store that holds them.
//!
//! Each section is an arbitrarily nested JSON value made of objects, arrays
//! and string leaves. The store keeps the English source value of every
//! section next to the value currently shown, and only ever replaces the
//! shown value as a whole.

use crate::error::TranslationError;
use anyhow::{bail, Context, Result};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

/// A named, independently translatable slice of site content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    HomeContent,
    Admissions,
    Academics,
    Faculty,
    WeeklyDicta,
    Notices,
}

impl SectionId {
    pub const ALL: [SectionId; 6] = [
        SectionId::HomeContent,
        SectionId::Admissions,
        SectionId::Academics,
        SectionId::Faculty,
        SectionId::WeeklyDicta,
        SectionId::Notices,
    ];

    /// Stable display name, also the key used in content files.
    pub fn name(&self) -> &'static str {
        match self {
            SectionId::HomeContent => "Home Content",
            SectionId::Admissions => "Admissions",
            SectionId::Academics => "Academics",
            SectionId::Faculty => "Faculty",
            SectionId::WeeklyDicta => "Weekly Dicta",
            SectionId::Notices => "Notices",
        }
    }

    /// Look up a section by name. Accepts the display name or a slug
    /// ("weekly-dicta"), case-insensitively.
    pub fn from_name(name: &str) -> Option<SectionId> {
        let normalized = name.trim().replace(['-', '_'], " ");
        SectionId::ALL
            .into_iter()
            .find(|section| section.name().eq_ignore_ascii_case(&normalized))
            .or_else(|| {
                // "home" is accepted for "Home Content"
                normalized
                    .eq_ignore_ascii_case("home")
                    .then_some(SectionId::HomeContent)
            })
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for SectionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Setter interface the orchestrator is handed for the sections it translates.
///
/// The orchestrator holds no copy of any section; it reads through this trait
/// and writes whole replacement values back.
pub trait ContentSetter: Send + Sync {
    /// English source value of a section, if the section is known.
    fn source(&self, section: SectionId) -> Option<Value>;

    /// Value currently shown for a section.
    fn current(&self, section: SectionId) -> Option<Value>;

    /// Replace the shown value of a section.
    fn replace(&self, section: SectionId, value: Value);

    /// Sections this setter holds content for.
    fn sections(&self) -> Vec<SectionId>;
}

#[derive(Debug, Clone)]
struct SectionState {
    source: Value,
    current: Value,
}

/// In-memory content store seeded with English defaults.
#[derive(Debug, Default)]
pub struct ContentStore {
    sections: RwLock<HashMap<SectionId, SectionState>>,
}

impl ContentStore {
    /// Create a store whose shown values start as the given English defaults.
    pub fn new(defaults: HashMap<SectionId, Value>) -> Self {
        let sections = defaults
            .into_iter()
            .map(|(id, value)| {
                (
                    id,
                    SectionState {
                        source: value.clone(),
                        current: value,
                    },
                )
            })
            .collect();
        Self {
            sections: RwLock::new(sections),
        }
    }

    /// Parse a JSON object keyed by section name.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(json).context("Content file is not valid JSON")?;
        let Value::Object(entries) = root else {
            bail!("Content file must be a JSON object keyed by section name");
        };

        let mut defaults = HashMap::new();
        for (name, value) in entries {
            let Some(section) = SectionId::from_name(&name) else {
                bail!("Unknown content section '{}'", name);
            };
            if defaults.insert(section, value).is_some() {
                bail!("Content section '{}' is defined more than once", section);
            }
        }

        Ok(Self::new(defaults))
    }

    /// Load English defaults from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read content file {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Failed to load content file {}", path.display()))
    }

    /// All shown values, keyed by section name.
    pub fn snapshot(&self) -> serde_json::Map<String, Value> {
        let sections = self.sections.read().unwrap_or_else(|e| e.into_inner());
        SectionId::ALL
            .into_iter()
            .filter_map(|id| {
                sections
                    .get(&id)
                    .map(|state| (id.name().to_string(), state.current.clone()))
            })
            .collect()
    }
}

impl ContentSetter for ContentStore {
    fn source(&self, section: SectionId) -> Option<Value> {
        let sections = self.sections.read().unwrap_or_else(|e| e.into_inner());
        sections.get(&section).map(|state| state.source.clone())
    }

    fn current(&self, section: SectionId) -> Option<Value> {
        let sections = self.sections.read().unwrap_or_else(|e| e.into_inner());
        sections.get(&section).map(|state| state.current.clone())
    }

    fn replace(&self, section: SectionId, value: Value) {
        let mut sections = self.sections.write().unwrap_or_else(|e| e.into_inner());
        if let Some(state) = sections.get_mut(&section) {
            state.current = value;
        }
    }

    fn sections(&self) -> Vec<SectionId> {
        let sections = self.sections.read().unwrap_or_else(|e| e.into_inner());
        SectionId::ALL
            .into_iter()
            .filter(|id| sections.contains_key(id))
            .collect()
    }
}

/// Check that `translated` has exactly the structure of `original`.
///
/// Object key sets, array lengths and container types must match; string
/// leaves may differ, any other leaf must be identical.
pub fn check_shape(original: &Value, translated: &Value) -> Result<(), TranslationError> {
    check_shape_at("$", original, translated)
}

fn check_shape_at(path: &str, original: &Value, translated: &Value) -> Result<(), TranslationError> {
    let mismatch = |detail: String| TranslationError::ShapeMismatch {
        path: path.to_string(),
        detail,
    };

    match (original, translated) {
        (Value::Object(orig), Value::Object(trans)) => {
            if let Some(key) = orig.keys().find(|key| !trans.contains_key(*key)) {
                return Err(mismatch(format!("missing key '{}'", key)));
            }
            if let Some(key) = trans.keys().find(|key| !orig.contains_key(*key)) {
                return Err(mismatch(format!("unexpected key '{}'", key)));
            }
            for (key, value) in orig {
                if let Some(other) = trans.get(key) {
                    check_shape_at(&format!("{}.{}", path, key), value, other)?;
                }
            }
            Ok(())
        }
        (Value::Array(orig), Value::Array(trans)) => {
            if orig.len() != trans.len() {
                return Err(mismatch(format!(
                    "array length {} became {}",
                    orig.len(),
                    trans.len()
                )));
            }
            for (i, (value, other)) in orig.iter().zip(trans).enumerate() {
                check_shape_at(&format!("{}[{}]", path, i), value, other)?;
            }
            Ok(())
        }
        (Value::String(_), Value::String(_)) => Ok(()),
        (orig, trans) if orig == trans => Ok(()),
        (orig, trans) => Err(mismatch(format!(
            "expected {}, found {}",
            type_name(orig),
            type_name(trans)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
