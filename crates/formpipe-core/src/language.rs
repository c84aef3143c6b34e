//! Fixed language-name → language-code mapping
//!
//! The set of supported additional languages is a domain constant of
//! the consent-form programme, not configuration. The table is closed:
//! exactly these 11 names resolve, everything else is an unknown
//! language and the record is skipped.

/// Language-name → code table. "Marati" is the spelling used by the
/// sheet, so it is the spelling used here.
pub const LANGUAGE_MAP: [(&str, &str); 11] = [
    ("English", "en"),
    ("Kannada", "kn"),
    ("Hindi", "hi"),
    ("Tamil", "ta"),
    ("Telugu", "te"),
    ("Marati", "mr"),
    ("Odia", "or"),
    ("Assamese", "as"),
    ("Gujarati", "gu"),
    ("Malayalam", "ml"),
    ("Bengali", "bn"),
];

/// Resolve a language name to its template code (case-sensitive)
pub fn language_code(name: &str) -> Option<&'static str> {
    LANGUAGE_MAP
        .iter()
        .find(|(lang_name, _)| *lang_name == name)
        .map(|(_, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_known_languages_resolve() {
        assert_eq!(language_code("English"), Some("en"));
        assert_eq!(language_code("Kannada"), Some("kn"));
        assert_eq!(language_code("Hindi"), Some("hi"));
        assert_eq!(language_code("Tamil"), Some("ta"));
        assert_eq!(language_code("Telugu"), Some("te"));
        assert_eq!(language_code("Marati"), Some("mr"));
        assert_eq!(language_code("Odia"), Some("or"));
        assert_eq!(language_code("Assamese"), Some("as"));
        assert_eq!(language_code("Gujarati"), Some("gu"));
        assert_eq!(language_code("Malayalam"), Some("ml"));
        assert_eq!(language_code("Bengali"), Some("bn"));
    }

    #[test]
    fn test_unknown_language_is_none() {
        assert_eq!(language_code("Klingon"), None);
        assert_eq!(language_code(""), None);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(language_code("hindi"), None);
        assert_eq!(language_code("HINDI"), None);
    }

    #[test]
    fn test_table_is_closed_at_eleven() {
        assert_eq!(LANGUAGE_MAP.len(), 11);
    }
}
