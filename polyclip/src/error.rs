//! Error types for polygon validation and batch operations.
use thiserror::Error;

/// Reason a single polygon was rejected by [validate](crate::polygon::validate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("polygon has {count} vertexes, at least 3 are required")]
    TooFewVertices { count: usize },
    #[error("vertex {vertex_index} has an infinite or NaN coordinate")]
    InvalidCoordinate { vertex_index: usize },
    #[error("the first three vertexes are collinear")]
    DegenerateLeadingTriplet,
    #[error("polygon is not simple")]
    NotSimple,
}

/// Error returned when a batch of polygons cannot be processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    #[error("polygon {index} is invalid: {source}")]
    InvalidPolygon {
        index: usize,
        #[source]
        source: ValidationError,
    },
    #[error("at least 2 non empty polygons are required, got {non_empty}")]
    InsufficientInputs { non_empty: usize },
    #[error("unsupported operation: {0:?}")]
    UnsupportedOperation(String),
}

pub type Result<T> = std::result::Result<T, BatchError>;
