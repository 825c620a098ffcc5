// ============================================================
// GENERIC COLUMN TYPE
// ============================================================
// Dialect-neutral type tags inferred from column data, and the
// grammar used to validate user-supplied type overrides

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Grammar for override strings: INTEGER | DECIMAL[(p,s)] | DATE | VARCHAR[(n)]
static OVERRIDE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:(INTEGER)|(DATE)|DECIMAL(?:\(\s*(\d+)\s*,\s*(\d+)\s*\))?|VARCHAR(?:\(\s*(\d+)\s*\))?)\s*$")
        .unwrap()
});

/// A dialect-neutral column type inferred by the type detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GenericType {
    Integer,
    Decimal {
        precision: Option<(u16, u16)>,
    },
    Date,
    Varchar {
        width: u32,
    },
}

impl GenericType {
    pub fn decimal() -> Self {
        GenericType::Decimal { precision: None }
    }

    pub fn varchar(width: u32) -> Self {
        GenericType::Varchar { width }
    }

    /// Parse a user-supplied override string against the generic-type
    /// grammar. Free-form text is rejected here so nothing injection-shaped
    /// ever reaches the dialect mapper.
    pub fn parse(input: &str) -> Option<Self> {
        let caps = OVERRIDE_RE.captures(input)?;

        if caps.get(1).is_some() {
            return Some(GenericType::Integer);
        }
        if caps.get(2).is_some() {
            return Some(GenericType::Date);
        }
        if let (Some(p), Some(s)) = (caps.get(3), caps.get(4)) {
            let precision = p.as_str().parse().ok()?;
            let scale = s.as_str().parse().ok()?;
            return Some(GenericType::Decimal {
                precision: Some((precision, scale)),
            });
        }

        let upper = input.trim().to_ascii_uppercase();
        if upper.starts_with("DECIMAL") {
            return Some(GenericType::decimal());
        }

        // VARCHAR width defaults to 255 when the parenthesized part is
        // absent; a supplied width that overflows the type is rejected,
        // not rewritten.
        let width = match caps.get(5) {
            Some(m) => m.as_str().parse().ok()?,
            None => 255,
        };
        Some(GenericType::Varchar { width })
    }
}

impl std::fmt::Display for GenericType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenericType::Integer => write!(f, "INTEGER"),
            GenericType::Decimal { precision: None } => write!(f, "DECIMAL"),
            GenericType::Decimal {
                precision: Some((p, s)),
            } => write!(f, "DECIMAL({},{})", p, s),
            GenericType::Date => write!(f, "DATE"),
            GenericType::Varchar { width } => write!(f, "VARCHAR({})", width),
        }
    }
}
