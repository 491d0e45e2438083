//! Error types for circle construction and polygon intersection.

use thiserror::Error;

/// Errors returned by the transformation functions.
///
/// An intersection with no common area is `Ok(None)`, never an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// A required argument is absent or unusable (missing geometry,
    /// non-finite coordinates, wrong coordinate count).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The length unit name is not one of the supported units.
    #[error("Unsupported unit: {0}")]
    UnsupportedUnit(String),

    /// The geometry kind does not fit the operation.
    #[error("Invalid geometry type: expected {expected}, found {found}")]
    InvalidGeometryType {
        expected: &'static str,
        found: String,
    },

    /// A coordinate array inside a geometry is malformed.
    #[error("Invalid coordinate format: {0}")]
    CoordinateFormat(String),

    /// JSON or TOML text could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, TransformError>;

impl TransformError {
    pub(crate) fn geometry_type(expected: &'static str, found: impl Into<String>) -> Self {
        Self::InvalidGeometryType {
            expected,
            found: found.into(),
        }
    }
}
