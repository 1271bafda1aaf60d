//! Shared utility functions.

/// Returns true if `stem` can be used as a single file-name component.
///
/// Rejects empty stems, `.` and `..`, and anything containing a path
/// separator or a NUL byte, so a stem joined onto a directory never leaves it.
#[must_use]
pub fn is_safe_file_stem(stem: &str) -> bool {
    !stem.is_empty()
        && stem != "."
        && stem != ".."
        && !stem.chars().any(|c| matches!(c, '/' | '\\' | '\0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_locale_codes() {
        assert!(is_safe_file_stem("EN"));
        assert!(is_safe_file_stem("zh-Hans"));
        assert!(is_safe_file_stem("pt_BR"));
    }

    #[test]
    fn test_rejects_traversal() {
        assert!(!is_safe_file_stem(""));
        assert!(!is_safe_file_stem("."));
        assert!(!is_safe_file_stem(".."));
        assert!(!is_safe_file_stem("../EN"));
        assert!(!is_safe_file_stem("a\\b"));
        assert!(!is_safe_file_stem("EN\0"));
    }
}
