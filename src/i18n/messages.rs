//! Localized messages shown when a translation fails.
//!
//! The table is static and total: every supported language carries an entry
//! for every `ErrorKind`. Lookups for a language missing from the table fall
//! back to English.

use crate::error::ErrorKind;
use crate::i18n::Language;
use serde::Serialize;

/// A user-facing error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorMessage {
    pub title: &'static str,
    pub message: &'static str,
    /// What the visitor can do about it
    pub action: &'static str,
}

/// One message per error kind, for a single language.
#[derive(Debug)]
pub struct ErrorMessages {
    pub network_error: ErrorMessage,
    pub api_key_missing: ErrorMessage,
    pub api_key_invalid: ErrorMessage,
    pub timeout: ErrorMessage,
    pub rate_limit: ErrorMessage,
    pub unknown: ErrorMessage,
}

impl ErrorMessages {
    pub fn get(&self, kind: ErrorKind) -> &ErrorMessage {
        match kind {
            ErrorKind::NetworkError => &self.network_error,
            ErrorKind::ApiKeyMissing => &self.api_key_missing,
            ErrorKind::ApiKeyInvalid => &self.api_key_invalid,
            ErrorKind::Timeout => &self.timeout,
            ErrorKind::RateLimit => &self.rate_limit,
            ErrorKind::Unknown => &self.unknown,
        }
    }
}

/// Get the localized message for an error kind.
pub fn get_error_message(kind: ErrorKind, language: Language) -> &'static ErrorMessage {
    messages_for_code(language.code()).get(kind)
}

/// Messages for a language code, English when the code has no entry.
fn messages_for_code(code: &str) -> &'static ErrorMessages {
    MESSAGE_TABLE
        .iter()
        .find(|(table_code, _)| *table_code == code)
        .map(|(_, messages)| *messages)
        .unwrap_or(&ENGLISH_MESSAGES)
}

static MESSAGE_TABLE: [(&str, &ErrorMessages); 6] = [
    ("en", &ENGLISH_MESSAGES),
    ("ko", &KOREAN_MESSAGES),
    ("es", &SPANISH_MESSAGES),
    ("zh", &CHINESE_MESSAGES),
    ("ja", &JAPANESE_MESSAGES),
    ("vi", &VIETNAMESE_MESSAGES),
];

// ==================== English ====================

pub static ENGLISH_MESSAGES: ErrorMessages = ErrorMessages {
    network_error: ErrorMessage {
        title: "Connection problem",
        message: "We couldn't reach the translation service.",
        action: "Check your internet connection and try again.",
    },
    api_key_missing: ErrorMessage {
        title: "Translation unavailable",
        message: "The translation service has not been configured.",
        action: "Please contact the site administrator.",
    },
    api_key_invalid: ErrorMessage {
        title: "Translation unavailable",
        message: "The translation service rejected our credentials.",
        action: "Please contact the site administrator.",
    },
    timeout: ErrorMessage {
        title: "Translation timed out",
        message: "The translation service took too long to respond.",
        action: "Please try again in a moment.",
    },
    rate_limit: ErrorMessage {
        title: "Too many requests",
        message: "The translation service is receiving too many requests right now.",
        action: "Please wait a minute and try again.",
    },
    unknown: ErrorMessage {
        title: "Translation failed",
        message: "Something went wrong while translating this page.",
        action: "Content is shown in its previous language. Please try again later.",
    },
};

// ==================== Korean ====================

pub static KOREAN_MESSAGES: ErrorMessages = ErrorMessages {
    network_error: ErrorMessage {
        title: "연결 문제",
        message: "번역 서비스에 연결할 수 없습니다.",
        action: "인터넷 연결을 확인한 후 다시 시도해 주세요.",
    },
    api_key_missing: ErrorMessage {
        title: "번역을 사용할 수 없음",
        message: "번역 서비스가 설정되지 않았습니다.",
        action: "사이트 관리자에게 문의해 주세요.",
    },
    api_key_invalid: ErrorMessage {
        title: "번역을 사용할 수 없음",
        message: "번역 서비스가 인증 정보를 거부했습니다.",
        action: "사이트 관리자에게 문의해 주세요.",
    },
    timeout: ErrorMessage {
        title: "번역 시간 초과",
        message: "번역 서비스의 응답이 너무 오래 걸립니다.",
        action: "잠시 후 다시 시도해 주세요.",
    },
    rate_limit: ErrorMessage {
        title: "요청이 너무 많음",
        message: "현재 번역 서비스에 요청이 너무 많습니다.",
        action: "1분 정도 기다린 후 다시 시도해 주세요.",
    },
    unknown: ErrorMessage {
        title: "번역 실패",
        message: "페이지를 번역하는 중 문제가 발생했습니다.",
        action: "내용은 이전 언어로 표시됩니다. 나중에 다시 시도해 주세요.",
    },
};

// ==================== Spanish ====================

pub static SPANISH_MESSAGES: ErrorMessages = ErrorMessages {
    network_error: ErrorMessage {
        title: "Problema de conexión",
        message: "No pudimos conectar con el servicio de traducción.",
        action: "Verifique su conexión a internet e inténtelo de nuevo.",
    },
    api_key_missing: ErrorMessage {
        title: "Traducción no disponible",
        message: "El servicio de traducción no está configurado.",
        action: "Comuníquese con el administrador del sitio.",
    },
    api_key_invalid: ErrorMessage {
        title: "Traducción no disponible",
        message: "El servicio de traducción rechazó nuestras credenciales.",
        action: "Comuníquese con el administrador del sitio.",
    },
    timeout: ErrorMessage {
        title: "Tiempo de espera agotado",
        message: "El servicio de traducción tardó demasiado en responder.",
        action: "Inténtelo de nuevo en un momento.",
    },
    rate_limit: ErrorMessage {
        title: "Demasiadas solicitudes",
        message: "El servicio de traducción está recibiendo demasiadas solicitudes en este momento.",
        action: "Espere un minuto e inténtelo de nuevo.",
    },
    unknown: ErrorMessage {
        title: "Error de traducción",
        message: "Algo salió mal al traducir esta página.",
        action: "El contenido se muestra en su idioma anterior. Inténtelo más tarde.",
    },
};

// ==================== Chinese ====================

pub static CHINESE_MESSAGES: ErrorMessages = ErrorMessages {
    network_error: ErrorMessage {
        title: "连接问题",
        message: "无法连接到翻译服务。",
        action: "请检查您的网络连接后重试。",
    },
    api_key_missing: ErrorMessage {
        title: "翻译不可用",
        message: "翻译服务尚未配置。",
        action: "请联系网站管理员。",
    },
    api_key_invalid: ErrorMessage {
        title: "翻译不可用",
        message: "翻译服务拒绝了我们的凭据。",
        action: "请联系网站管理员。",
    },
    timeout: ErrorMessage {
        title: "翻译超时",
        message: "翻译服务响应时间过长。",
        action: "请稍后重试。",
    },
    rate_limit: ErrorMessage {
        title: "请求过多",
        message: "翻译服务当前收到的请求过多。",
        action: "请等待一分钟后重试。",
    },
    unknown: ErrorMessage {
        title: "翻译失败",
        message: "翻译此页面时出现问题。",
        action: "内容将以之前的语言显示。请稍后重试。",
    },
};

// ==================== Japanese ====================

pub static JAPANESE_MESSAGES: ErrorMessages = ErrorMessages {
    network_error: ErrorMessage {
        title: "接続の問題",
        message: "翻訳サービスに接続できませんでした。",
        action: "インターネット接続を確認してから、もう一度お試しください。",
    },
    api_key_missing: ErrorMessage {
        title: "翻訳を利用できません",
        message: "翻訳サービスが設定されていません。",
        action: "サイト管理者にお問い合わせください。",
    },
    api_key_invalid: ErrorMessage {
        title: "翻訳を利用できません",
        message: "翻訳サービスが認証情報を拒否しました。",
        action: "サイト管理者にお問い合わせください。",
    },
    timeout: ErrorMessage {
        title: "翻訳がタイムアウトしました",
        message: "翻訳サービスの応答に時間がかかりすぎています。",
        action: "しばらくしてからもう一度お試しください。",
    },
    rate_limit: ErrorMessage {
        title: "リクエストが多すぎます",
        message: "現在、翻訳サービスへのリクエストが集中しています。",
        action: "1分ほど待ってから、もう一度お試しください。",
    },
    unknown: ErrorMessage {
        title: "翻訳に失敗しました",
        message: "このページの翻訳中に問題が発生しました。",
        action: "コンテンツは以前の言語で表示されます。後でもう一度お試しください。",
    },
};

// ==================== Vietnamese ====================

pub static VIETNAMESE_MESSAGES: ErrorMessages = ErrorMessages {
    network_error: ErrorMessage {
        title: "Sự cố kết nối",
        message: "Không thể kết nối với dịch vụ dịch thuật.",
        action: "Vui lòng kiểm tra kết nối internet và thử lại.",
    },
    api_key_missing: ErrorMessage {
        title: "Không thể dịch",
        message: "Dịch vụ dịch thuật chưa được cấu hình.",
        action: "Vui lòng liên hệ quản trị viên trang web.",
    },
    api_key_invalid: ErrorMessage {
        title: "Không thể dịch",
        message: "Dịch vụ dịch thuật đã từ chối thông tin xác thực.",
        action: "Vui lòng liên hệ quản trị viên trang web.",
    },
    timeout: ErrorMessage {
        title: "Hết thời gian dịch",
        message: "Dịch vụ dịch thuật phản hồi quá lâu.",
        action: "Vui lòng thử lại sau giây lát.",
    },
    rate_limit: ErrorMessage {
        title: "Quá nhiều yêu cầu",
        message: "Dịch vụ dịch thuật đang nhận quá nhiều yêu cầu.",
        action: "Vui lòng đợi một phút rồi thử lại.",
    },
    unknown: ErrorMessage {
        title: "Dịch thất bại",
        message: "Đã xảy ra lỗi khi dịch trang này.",
        action: "Nội dung được hiển thị bằng ngôn ngữ trước đó. Vui lòng thử lại sau.",
    },
};
