// ============================================================
// DOMAIN LAYER
// ============================================================
// Core types and value objects for CSV-to-SQL conversion
// No I/O, no async, no external services

mod conversion_config;
mod dialect;
pub mod error;
mod finding;
mod generic_type;
mod table;

pub use conversion_config::ConversionConfig;
pub use dialect::Dialect;
pub use error::{AppError, Result};
pub use finding::{FindingCategory, Severity, ValidationFinding, ValidationReport};
pub use generic_type::GenericType;
pub use table::{ColumnProfile, DataTable, TableRow};
