pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use application::{ConvertResult, Converter, PreviewResult};
pub use domain::{
    AppError, ColumnProfile, ConversionConfig, DataTable, Dialect, GenericType, Result, TableRow,
    ValidationFinding, ValidationReport,
};
pub use infrastructure::config::AppConfig;
pub use infrastructure::csv::CsvParser;
