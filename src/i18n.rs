//! Internationalization (i18n) module
//!
//! Picks the UI language from the system locale. English and Chinese
//! Simplified are bundled under `locales/`. Log messages stay in English.

/// Locales bundled with the binary
pub const SUPPORTED_LOCALES: &[&str] = &["en", "zh-CN"];

/// Detect the system locale and make it current for `t!`
pub fn init_locale() {
    let detected = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
    rust_i18n::set_locale(normalize_locale(&detected));
}

/// Map an arbitrary locale tag onto one of [`SUPPORTED_LOCALES`]
pub fn normalize_locale(tag: &str) -> &'static str {
    let tag = tag.to_lowercase();
    if tag.starts_with("zh") {
        "zh-CN"
    } else {
        "en"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("zh-CN"), "zh-CN");
        assert_eq!(normalize_locale("zh_Hans_CN.UTF-8"), "zh-CN");
        assert_eq!(normalize_locale("en-US"), "en");
        assert_eq!(normalize_locale("de-DE"), "en");
        assert_eq!(normalize_locale(""), "en");
    }

    #[test]
    fn test_supported_locales_cover_normalized() {
        for tag in ["zh-TW", "fr", "en-GB"] {
            assert!(SUPPORTED_LOCALES.contains(&normalize_locale(tag)));
        }
    }
}
