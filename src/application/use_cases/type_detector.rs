// ============================================================
// TYPE DETECTOR
// ============================================================
// Infer a generic SQL type from a bounded sample of column values

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::GenericType;

static INTEGER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?\d+$").unwrap());

static DECIMAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(?:\d+(?:\.\d+)?|\.\d+)$").unwrap());

/// Locale-independent date formats accepted by the detector and by the
/// validator's calendar check. Order matters only for performance.
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%m-%d-%Y", "%d %b %Y", "%b %d %Y",
];

/// Parse a value as a calendar date using the fixed format list.
/// Returns None for surface-plausible but invalid dates (2024-13-45).
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Whether a trimmed value matches the signed-integer pattern
pub fn is_integer(value: &str) -> bool {
    INTEGER_RE.is_match(value)
}

/// Whether a trimmed value matches the signed-decimal pattern
/// (every integer string also matches).
pub fn is_decimal(value: &str) -> bool {
    DECIMAL_RE.is_match(value)
}

/// Heuristic type inference over a bounded sample of column values
pub struct TypeDetector {
    /// Maximum non-empty values inspected per column
    sample_size: usize,
}

impl TypeDetector {
    pub fn new(sample_size: usize) -> Self {
        Self { sample_size }
    }

    /// Infer a generic type for a column. Inference is sample-based:
    /// anomalous values past the sample boundary are silently mistyped,
    /// an accepted tradeoff for large inputs.
    ///
    /// Priority on tie is INTEGER > DECIMAL > DATE > VARCHAR. Integers
    /// must be tested before decimals because every integer string also
    /// satisfies the decimal pattern.
    pub fn detect(&self, values: &[&str]) -> GenericType {
        let sample: Vec<&str> = values
            .iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .take(self.sample_size)
            .collect();

        if sample.is_empty() {
            return GenericType::varchar(255);
        }

        if sample.iter().all(|v| is_integer(v)) {
            return GenericType::Integer;
        }
        if sample.iter().all(|v| is_decimal(v)) {
            return GenericType::decimal();
        }
        if sample.iter().all(|v| parse_calendar_date(v).is_some()) {
            return GenericType::Date;
        }

        let max_len = sample.iter().map(|v| v.len()).max().unwrap_or(0);
        GenericType::varchar(Self::fallback_width(max_len))
    }

    /// VARCHAR width for the fallback case: 1.5x headroom over the
    /// longest sampled value, clamped to [50, 255].
    fn fallback_width(max_len: usize) -> u32 {
        ((max_len as f64 * 1.5).ceil() as u32).clamp(50, 255)
    }
}

impl Default for TypeDetector {
    fn default() -> Self {
        Self::new(1000)
    }
}
