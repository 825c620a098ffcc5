// ============================================================
// VALUE ESCAPER
// ============================================================
// Render one cell as a SQL literal for its resolved column type

use super::type_detector::is_decimal;

/// Dialect type name prefixes that take unquoted literals
const NUMERIC_TYPE_PREFIXES: [&str; 8] = [
    "int", "decimal", "numeric", "real", "number", "float", "double", "bigint",
];

/// Whether a resolved dialect type is numeric-family, by name prefix
pub fn is_numeric_type(dialect_type: &str) -> bool {
    let lower = dialect_type.trim().to_ascii_lowercase();
    NUMERIC_TYPE_PREFIXES.iter().any(|p| lower.starts_with(p))
}

/// Escape a raw cell value as a SQL literal.
///
/// NULL-equivalent values (absent or empty after trim) become the
/// unquoted literal `NULL`. Numeric-family columns emit the trimmed
/// value unquoted; by default no numeric validation happens at this
/// stage, so a mistyped value produces malformed SQL rather than a
/// silently altered one. With `strict_numeric`, such values are
/// emitted as NULL instead. Everything else is single-quoted with
/// embedded quotes doubled.
pub fn escape_value(raw: Option<&str>, dialect_type: &str, strict_numeric: bool) -> String {
    let trimmed = match raw {
        Some(v) => v.trim(),
        None => return "NULL".to_string(),
    };
    if trimmed.is_empty() {
        return "NULL".to_string();
    }

    if is_numeric_type(dialect_type) {
        if strict_numeric && !is_decimal(trimmed) {
            return "NULL".to_string();
        }
        return trimmed.to_string();
    }

    format!("'{}'", trimmed.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_equivalents() {
        assert_eq!(escape_value(None, "VARCHAR(50)", false), "NULL");
        assert_eq!(escape_value(Some(""), "INTEGER", false), "NULL");
        assert_eq!(escape_value(Some("   "), "DATE", false), "NULL");
    }

    #[test]
    fn test_numeric_unquoted() {
        assert_eq!(escape_value(Some(" 42 "), "INTEGER", false), "42");
        assert_eq!(escape_value(Some("3.14"), "NUMERIC(10,2)", false), "3.14");
        assert_eq!(escape_value(Some("-1"), "NUMBER(10)", false), "-1");
    }

    #[test]
    fn test_quote_doubling() {
        assert_eq!(
            escape_value(Some("O'Brien"), "VARCHAR(50)", false),
            "'O''Brien'"
        );
        assert_eq!(
            escape_value(Some("it''s"), "TEXT", false),
            "'it''''s'"
        );
    }

    #[test]
    fn test_lenient_numeric_passthrough() {
        // Known gap: lenient mode emits the raw value even when it is
        // not numeric.
        assert_eq!(escape_value(Some("abc"), "INTEGER", false), "abc");
    }

    #[test]
    fn test_strict_numeric_emits_null() {
        assert_eq!(escape_value(Some("abc"), "INTEGER", true), "NULL");
        assert_eq!(escape_value(Some("42"), "INTEGER", true), "42");
    }

    #[test]
    fn test_numeric_type_prefix_match() {
        assert!(is_numeric_type("INT"));
        assert!(is_numeric_type("numeric(10,2)"));
        assert!(is_numeric_type("REAL"));
        assert!(!is_numeric_type("VARCHAR(50)"));
        assert!(!is_numeric_type("TEXT"));
        assert!(!is_numeric_type("DATE"));
    }
}
