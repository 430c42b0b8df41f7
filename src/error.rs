//! Errors raised by feature queries and model construction.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GeoQueryError {
    /// A collection that must hold at least one feature holds none.
    #[error("invalid GeoJSON input: {operand} collection has no features")]
    InvalidInput { operand: &'static str },

    /// Accessor-style query on a collection with no features.
    #[error("feature collection is empty")]
    EmptyCollection,

    #[error("expected {expected} geometry, found {found}")]
    WrongGeometryType {
        expected: &'static str,
        found: String,
    },

    #[error("malformed coordinates: {0}")]
    MalformedCoordinates(String),

    #[error("feature {index} has no geometry")]
    MissingGeometry { index: usize },

    #[error("feature index {index} out of range for collection of {len}")]
    FeatureIndexOutOfRange { index: usize, len: usize },
}
