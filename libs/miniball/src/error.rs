//! # Error Types
//!
//! Errors raised by point set adapters and query helpers. The enclosing ball
//! iteration itself has no error path: empty input yields an empty ball and
//! broken internal preconditions are contract failures.

use config::constants::ConfigError;
use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while preparing input for the solver.
///
/// ## Example
///
/// ```rust
/// use miniball::{FlatPointSet, MiniballError};
///
/// match FlatPointSet::new(&[0.0, 1.0, 2.0], 2) {
///     Ok(_) => unreachable!(),
///     Err(MiniballError::RaggedBuffer { len, dim }) => assert_eq!((len, dim), (3, 2)),
///     Err(e) => panic!("unexpected error: {e}"),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MiniballError {
    /// A flat coordinate buffer was declared with zero dimensions.
    #[error("Point dimension must be at least 1")]
    ZeroDimension,

    /// A flat coordinate buffer does not hold a whole number of points.
    #[error("Buffer of {len} coordinates is not a multiple of dimension {dim}")]
    RaggedBuffer {
        /// Number of coordinates in the buffer
        len: usize,
        /// Declared dimension
        dim: usize,
    },

    /// A flat buffer holds fewer points than requested.
    #[error("Buffer holds {available} points, {requested} requested")]
    NotEnoughPoints {
        /// Number of whole points in the buffer
        available: usize,
        /// Requested point count
        requested: usize,
    },

    /// A coordinate is NaN or infinite.
    #[error("Coordinate {axis} of point {point} is not finite")]
    NonFiniteCoordinate {
        /// Global index of the offending point
        point: usize,
        /// Axis of the offending coordinate
        axis: usize,
    },

    /// A query point does not match the dimension of the ball.
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Dimension of the ball
        expected: usize,
        /// Dimension of the query point
        found: usize,
    },

    /// Solver configuration was rejected.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for miniball operations.
pub type MiniballResult<T> = Result<T, MiniballError>;

// =============================================================================
// TESTS
// =============================================================================
