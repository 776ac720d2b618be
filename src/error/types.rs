use thiserror::Error;

use crate::engine::WidgetId;
use crate::logging::LoggingError;

/// Unified result type for the rowpack crate.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors surfaced by the layout engine. Running a layout never fails; only
/// the inputs fed into it are checked.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("minimum {dimension} must be finite and non-negative, got {value}")]
    InvalidMinimum { dimension: &'static str, value: f64 },
    #[error("widget `{0}` not found")]
    WidgetNotFound(WidgetId),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
