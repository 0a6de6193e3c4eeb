//! Supported portal languages.

/// Language used when a record has no translation for the active language.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Languages the portal ships translations for, in display order.
pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "zh-CN", "es", "fr", "de", "ru", "ja"];

/// Check whether a language code is one the portal supports.
pub fn is_supported(code: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&code)
}
