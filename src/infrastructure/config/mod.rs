// ============================================================
// APP CONFIGURATION
// ============================================================
// Layered configuration: serialized defaults, then csvforge.toml,
// then CSVFORGE_-prefixed environment variables.

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};
use crate::domain::ConversionConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP bind address
    pub host: String,

    /// HTTP bind port
    pub port: u16,

    /// Optional cap on parsed data rows per upload
    pub max_upload_rows: Option<usize>,

    /// Core conversion bounds
    pub conversion: ConversionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            max_upload_rows: None,
            conversion: ConversionConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration, later layers overriding earlier ones.
    /// Nested conversion fields come from env as e.g.
    /// `CSVFORGE_CONVERSION__INSERT_BATCH_SIZE=200`.
    pub fn load() -> Result<Self> {
        let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file("csvforge.toml"))
            .merge(Env::prefixed("CSVFORGE_").split("__"))
            .extract()
            .map_err(|e| AppError::ConfigError(e.to_string()))?;

        config
            .conversion
            .validate()
            .map_err(AppError::ConfigError)?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.port, 3001);
        assert_eq!(config.conversion.insert_batch_size, 500);
        assert!(config.conversion.validate().is_ok());
    }
}
