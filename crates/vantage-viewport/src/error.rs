//! Error types for vantage-viewport
//!
//! Coordinate conversions never fail: without a render surface they leave
//! their input unchanged. Errors only arise when loading or validating a
//! viewport configuration.

use thiserror::Error;

use crate::types::ViewportRect;

/// Main error type for viewport operations
#[derive(Error, Debug)]
pub enum ViewportError {
    /// Viewport rectangle outside [0, 1] or with inverted bounds
    #[error("Invalid viewport rectangle: {0:?}")]
    InvalidRect(ViewportRect),

    /// Pixel aspect components must be positive and finite
    #[error("Invalid pixel aspect: ({0}, {1})")]
    InvalidPixelAspect(f64, f64),

    /// Configuration could not be parsed or serialized
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ViewportError {
    fn from(err: serde_json::Error) -> Self {
        ViewportError::Config(err.to_string())
    }
}

/// Result type alias for viewport operations
pub type ViewportResult<T> = Result<T, ViewportError>;
