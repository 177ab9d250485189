//! Error types for vantage-transfer
//!
//! Every failure is local to one execution: the inputs are never modified
//! and the caller can reconfigure the filter and run it again.

use std::fmt;

use thiserror::Error;

use crate::array::ArrayType;
use crate::data_object::FieldAssociation;

/// Which input of the filter an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Source => write!(f, "source"),
            Side::Target => write!(f, "target"),
        }
    }
}

/// Errors that can occur during attribute transfer
#[derive(Debug, Error)]
pub enum TransferError {
    /// Input kind does not offer the requested association
    #[error("{side} input is a {kind}, which has no {association} attributes")]
    UnsupportedAssociation {
        side: Side,
        kind: &'static str,
        association: FieldAssociation,
    },

    /// Source or target array name not configured
    #[error("Must specify source and target array names for the transfer")]
    MissingArrayName,

    /// Input has no pedigree id array
    #[error("{side} input pedigree id array not found")]
    MissingPedigreeIds { side: Side },

    /// Named array absent from the input
    #[error("{side} array '{name}' not found")]
    ArrayNotFound { side: Side, name: String },

    /// Direct mapping needs at least as many target elements as source elements
    #[error("Cannot have more source tuples ({source_len}) than target tuples ({target_len}) using direct mapping")]
    DirectMappingSize { source_len: usize, target_len: usize },

    /// Value cannot be stored in an array of this element type
    #[error("Cannot convert {value} to {dtype}")]
    ValueConversion { value: String, dtype: ArrayType },

    /// Arrays of different element type or component count
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Flat storage length not a multiple of the component count
    #[error("Array of {len} values cannot hold tuples of {components} components")]
    InvalidComponents { len: usize, components: usize },

    /// Tuple or value index past the end of an array
    #[error("Out of bounds: index {index}, size {size}")]
    OutOfBounds { index: usize, size: usize },

    /// Configuration could not be parsed or serialized
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for TransferError {
    fn from(err: serde_json::Error) -> Self {
        TransferError::Config(err.to_string())
    }
}

/// Result type for transfer operations
pub type TransferResult<T> = Result<T, TransferError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_mapping_size_display() {
        let err = TransferError::DirectMappingSize {
            source_len: 5,
            target_len: 3,
        };
        let message = err.to_string();
        assert!(message.contains('5'));
        assert!(message.contains('3'));
    }

    #[test]
    fn test_unsupported_association_display() {
        let err = TransferError::UnsupportedAssociation {
            side: Side::Target,
            kind: "table",
            association: FieldAssociation::Points,
        };
        assert_eq!(err.to_string(), "target input is a table, which has no points attributes");
    }
}
