//! Rejection outcomes for geometry mutations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a geometry mutation was rejected.
///
/// None of these are fatal: a rejected mutation leaves the shape in its
/// previous valid state, and callers are free to ignore the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GeometryError {
    /// Operation is invalid for the shape's current completion state.
    #[error("operation invalid for the shape's current state")]
    InvalidState,
    /// The point is closer than `CLOSE_POINT_DISTANCE` to an existing corner.
    #[error("point too close to an existing corner")]
    TooClose,
    /// The mutation would produce a non-convex quadrilateral.
    #[error("quadrilateral would not be convex")]
    NotConvex,
    /// Corner or shape index out of range.
    #[error("index out of range")]
    BadIndex,
}

/// Result type for geometry mutations.
pub type GeometryResult<T> = Result<T, GeometryError>;
