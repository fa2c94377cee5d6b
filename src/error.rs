//! Error types for raster2d.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeometryError>;

/// Errors raised while constructing geometry or writing pixels.
///
/// Degenerate results (parallel lines, fully clipped segments) are not
/// errors; those come back as `None` from the operation itself.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid coordinate ({x}, {y}): pixel coordinates must be integers")]
    InvalidCoordinate { x: f64, y: f64 },
}

impl GeometryError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        GeometryError::InvalidGeometry(msg.into())
    }
}
