// ============================================================
// CONVERTER
// ============================================================
// Orchestrates profiling, validation and rendering for the preview
// and convert operations exposed at the boundary

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::dialect_mapper::resolve_generic_type;
use super::sanitizer::sanitize_headers;
use super::sql_renderer::SqlRenderer;
use super::type_detector::TypeDetector;
use super::validator::DataValidator;
use crate::domain::error::{AppError, Result};
use crate::domain::{
    ColumnProfile, ConversionConfig, DataTable, Dialect, ValidationReport,
};

/// Number of sample values surfaced per column in previews
const PROFILE_SAMPLES: usize = 3;

/// Inference preview for one table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewResult {
    pub columns: Vec<ColumnProfile>,
    pub report: ValidationReport,
    pub row_count: usize,
    pub column_count: usize,
}

/// Rendered SQL plus metadata for one conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertResult {
    pub create_table: String,
    pub insert: String,
    pub row_count: usize,
    pub column_count: usize,
    pub dialect: Dialect,
    pub truncated: bool,
}

/// Stateless conversion engine; one instance per request is fine
pub struct Converter {
    config: ConversionConfig,
}

impl Converter {
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Profile every column: sanitized (collision-free) names, inferred
    /// types, and up to 3 sample values
    pub fn profile(&self, table: &DataTable) -> Vec<ColumnProfile> {
        let detector = TypeDetector::new(self.config.type_sample_size);
        let sanitized = sanitize_headers(&table.headers);

        table
            .headers
            .iter()
            .zip(sanitized)
            .map(|(header, sanitized_name)| {
                let values: Vec<&str> = table
                    .rows
                    .iter()
                    .filter_map(|r| r.get(header))
                    .collect();
                let generic_type = detector.detect(&values);
                let samples = table
                    .non_empty_values(header, PROFILE_SAMPLES)
                    .into_iter()
                    .map(String::from)
                    .collect();

                ColumnProfile {
                    original_name: header.clone(),
                    sanitized_name,
                    generic_type,
                    samples,
                }
            })
            .collect()
    }

    /// Preview operation: profiles plus the validation report
    pub fn preview(&self, table: &DataTable) -> Result<PreviewResult> {
        self.check_structure(table)?;

        let columns = self.profile(table);
        let report = DataValidator::new(self.config.validation_sample_size).validate(table);

        Ok(PreviewResult {
            row_count: table.row_count(),
            column_count: table.column_count(),
            columns,
            report,
        })
    }

    /// Convert operation: render CREATE TABLE and batched INSERTs.
    /// `overrides` maps sanitized column names to generic-type strings
    /// and replaces auto-detection for those columns.
    pub fn convert(
        &self,
        table: &DataTable,
        table_name: &str,
        dialect: Dialect,
        overrides: &HashMap<String, String>,
    ) -> Result<ConvertResult> {
        self.check_structure(table)?;

        let mut profiles = self.profile(table);
        for profile in &mut profiles {
            let override_str = overrides.get(&profile.sanitized_name).map(|s| s.as_str());
            profile.generic_type = resolve_generic_type(profile.generic_type, override_str)?;
        }

        let renderer = SqlRenderer::new(
            self.config.insert_batch_size,
            self.config.max_insert_rows,
            self.config.strict_numeric,
        );
        let rendered = renderer.render(table, &profiles, table_name, dialect);

        info!(
            dialect = %dialect,
            rows = table.row_count(),
            columns = table.column_count(),
            truncated = rendered.truncated,
            "conversion complete"
        );

        Ok(ConvertResult {
            create_table: rendered.create_table,
            insert: rendered.insert,
            row_count: table.row_count(),
            column_count: table.column_count(),
            dialect,
            truncated: rendered.truncated,
        })
    }

    /// Structural pre-checks. Per-value anomalies are validation
    /// findings, never errors; only an unusable table shape rejects.
    fn check_structure(&self, table: &DataTable) -> Result<()> {
        if table.headers.is_empty() {
            return Err(AppError::ValidationError(
                "CSV has no columns".to_string(),
            ));
        }
        if table.rows.is_empty() {
            return Err(AppError::ValidationError(
                "CSV has no data rows".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConversionConfig::default())
    }
}
