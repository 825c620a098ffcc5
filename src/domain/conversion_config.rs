// ============================================================
// CONVERSION CONFIGURATION
// ============================================================
// Tunable bounds for sampling, batching and output size

use serde::{Deserialize, Serialize};

/// Configuration for a conversion run. Sampling bounds affect inference
/// fidelity; batch size and row cap affect only the rendered output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Maximum non-empty values inspected per column for type inference
    /// (default: 1000)
    pub type_sample_size: usize,

    /// Maximum rows inspected by the data-quality validator (default: 1000)
    pub validation_sample_size: usize,

    /// Rows per multi-row INSERT statement (default: 500)
    pub insert_batch_size: usize,

    /// Optional cap on rows rendered into INSERT statements. Exceeding
    /// rows are dropped and noted in a trailing SQL comment.
    pub max_insert_rows: Option<usize>,

    /// When set, a value in a numeric column that fails the numeric
    /// pattern is emitted as NULL instead of an unquoted raw literal.
    /// Off by default for compatibility with lenient output.
    pub strict_numeric: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            type_sample_size: 1000,
            validation_sample_size: 1000,
            insert_batch_size: 500,
            max_insert_rows: None,
            strict_numeric: false,
        }
    }
}

impl ConversionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.type_sample_size == 0 {
            return Err("type_sample_size must be > 0".to_string());
        }
        if self.validation_sample_size == 0 {
            return Err("validation_sample_size must be > 0".to_string());
        }
        if self.insert_batch_size == 0 {
            return Err("insert_batch_size must be > 0".to_string());
        }
        if let Some(cap) = self.max_insert_rows {
            if cap == 0 {
                return Err("max_insert_rows must be > 0 when set".to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ConversionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_bounds_rejected() {
        let mut config = ConversionConfig::default();
        config.insert_batch_size = 0;
        assert!(config.validate().is_err());

        let mut config = ConversionConfig::default();
        config.max_insert_rows = Some(0);
        assert!(config.validate().is_err());
    }
}
