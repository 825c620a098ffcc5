// ============================================================
// DIALECT MAPPER
// ============================================================
// Translate generic type tags into dialect-specific type strings

use crate::domain::error::{AppError, Result};
use crate::domain::{Dialect, GenericType};

/// Render a generic type for a target dialect. Pure and total: every
/// (type, dialect) combination maps to some string.
pub fn to_dialect_type(generic: GenericType, dialect: Dialect) -> String {
    match generic {
        GenericType::Integer => match dialect {
            Dialect::Postgresql | Dialect::Sqlite => "INTEGER".to_string(),
            Dialect::Mysql | Dialect::Sqlserver => "INT".to_string(),
            Dialect::Oracle => "NUMBER(10)".to_string(),
        },
        GenericType::Decimal { precision } => match dialect {
            // SQLite has no fixed-point type; precision is discarded
            Dialect::Sqlite => "REAL".to_string(),
            Dialect::Postgresql => decimal_with_precision("NUMERIC", precision),
            Dialect::Mysql | Dialect::Sqlserver => decimal_with_precision("DECIMAL", precision),
            Dialect::Oracle => decimal_with_precision("NUMBER", precision),
        },
        GenericType::Date => match dialect {
            // SQLite stores dates as ISO-8601 text
            Dialect::Sqlite => "TEXT".to_string(),
            _ => "DATE".to_string(),
        },
        GenericType::Varchar { width } => match dialect {
            // SQLite has no fixed-width text type; the width is discarded
            Dialect::Sqlite => "TEXT".to_string(),
            Dialect::Oracle => format!("VARCHAR2({})", width),
            _ => format!("VARCHAR({})", width),
        },
    }
}

fn decimal_with_precision(base: &str, precision: Option<(u16, u16)>) -> String {
    match precision {
        Some((p, s)) => format!("{}({},{})", base, p, s),
        None => base.to_string(),
    }
}

/// Resolve the generic type for a column, honoring a user override.
/// Override strings are validated against the generic-type grammar and
/// then flow through the same dialect mapping as detected types; they
/// are never emitted verbatim.
pub fn resolve_generic_type(detected: GenericType, override_str: Option<&str>) -> Result<GenericType> {
    match override_str {
        None => Ok(detected),
        Some(raw) => GenericType::parse(raw).ok_or_else(|| {
            AppError::ValidationError(format!(
                "Invalid type override '{}': expected INTEGER, DECIMAL(p,s), DATE or VARCHAR(n)",
                raw
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(spec: &str, dialect: &str) -> String {
        to_dialect_type(
            GenericType::parse(spec).expect("valid generic type"),
            Dialect::from_token(dialect),
        )
    }

    #[test]
    fn test_integer_mappings() {
        assert_eq!(map("INTEGER", "sqlite"), "INTEGER");
        assert_eq!(map("INTEGER", "postgresql"), "INTEGER");
        assert_eq!(map("INTEGER", "mysql"), "INT");
        assert_eq!(map("INTEGER", "oracle"), "NUMBER(10)");
    }

    #[test]
    fn test_decimal_mappings() {
        assert_eq!(map("DECIMAL(10,2)", "sqlite"), "REAL");
        assert_eq!(map("DECIMAL(10,2)", "postgresql"), "NUMERIC(10,2)");
        assert_eq!(map("DECIMAL", "mysql"), "DECIMAL");
        assert_eq!(map("DECIMAL(8,3)", "oracle"), "NUMBER(8,3)");
    }

    #[test]
    fn test_varchar_mappings() {
        assert_eq!(map("VARCHAR(50)", "oracle"), "VARCHAR2(50)");
        assert_eq!(map("VARCHAR(50)", "sqlite"), "TEXT");
        assert_eq!(map("VARCHAR(50)", "sqlserver"), "VARCHAR(50)");
        // bare VARCHAR defaults the width to 255
        assert_eq!(map("VARCHAR", "postgresql"), "VARCHAR(255)");
    }

    #[test]
    fn test_date_mappings() {
        assert_eq!(map("DATE", "sqlite"), "TEXT");
        assert_eq!(map("DATE", "mysql"), "DATE");
    }

    #[test]
    fn test_unknown_dialect_uses_postgresql_table() {
        assert_eq!(map("VARCHAR(10)", "no-such-db"), "VARCHAR(10)");
        assert_eq!(map("DECIMAL(6,2)", "no-such-db"), "NUMERIC(6,2)");
    }

    #[test]
    fn test_override_resolution() {
        let detected = GenericType::Integer;
        assert_eq!(
            resolve_generic_type(detected, None).unwrap(),
            GenericType::Integer
        );
        assert_eq!(
            resolve_generic_type(detected, Some("VARCHAR(10)")).unwrap(),
            GenericType::varchar(10)
        );
        assert!(resolve_generic_type(detected, Some("TEXT; DROP TABLE x")).is_err());
    }
}
