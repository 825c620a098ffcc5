pub mod converter;
pub mod dialect_mapper;
pub mod sanitizer;
pub mod sql_renderer;
pub mod type_detector;
pub mod validator;
pub mod value_escaper;

pub use converter::{ConvertResult, Converter, PreviewResult};
pub use sql_renderer::{RenderedSql, SqlRenderer};
pub use type_detector::TypeDetector;
pub use validator::DataValidator;
