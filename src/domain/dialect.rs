// ============================================================
// SQL DIALECT
// ============================================================
// Target database variants supported by the converter

use serde::{Deserialize, Serialize};

/// Target SQL dialect for schema and insert generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Postgresql,
    Mysql,
    Sqlserver,
    Sqlite,
    Oracle,
}

impl Dialect {
    /// All accepted dialect tokens, in the order they are advertised
    pub const ALL: [Dialect; 5] = [
        Dialect::Postgresql,
        Dialect::Mysql,
        Dialect::Sqlserver,
        Dialect::Sqlite,
        Dialect::Oracle,
    ];

    /// Resolve a dialect token. Unknown tokens fall back to PostgreSQL
    /// rather than failing; the mapper is total by design.
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "mysql" => Dialect::Mysql,
            "sqlserver" | "mssql" => Dialect::Sqlserver,
            "sqlite" => Dialect::Sqlite,
            "oracle" => Dialect::Oracle,
            _ => Dialect::Postgresql,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Postgresql => "postgresql",
            Dialect::Mysql => "mysql",
            Dialect::Sqlserver => "sqlserver",
            Dialect::Sqlite => "sqlite",
            Dialect::Oracle => "oracle",
        }
    }

    /// Extra options appended after the closing parenthesis of CREATE TABLE
    pub fn table_options(&self) -> Option<&'static str> {
        match self {
            Dialect::Mysql => Some("ENGINE=InnoDB DEFAULT CHARSET=utf8mb4"),
            _ => None,
        }
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Dialect::Postgresql
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
