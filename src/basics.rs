//! Rounding, conversion and validation helpers.
//!
//! Every coordinate entering the crate passes through `round_half_up` so
//! that geometry built from the same floats always lands on the same pixel.

use crate::error::{GeometryError, Result};

// ============================================================================
// Rounding and conversion functions
// ============================================================================

/// Round to the nearest integer, halves toward positive infinity.
///
/// `round_half_up(2.5) == 3.0`, `round_half_up(-2.5) == -2.0`.
#[inline]
pub fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// `round_half_up` converted to `i32`.
#[inline]
pub fn iround(v: f64) -> i32 {
    round_half_up(v) as i32
}

/// Floor toward negative infinity as an integer.
#[inline]
pub fn ifloor(v: f64) -> i32 {
    let i = v as i32;
    i - (i as f64 > v) as i32
}

/// Convert degrees to radians.
#[inline]
pub fn deg2rad(deg: f64) -> f64 {
    deg * std::f64::consts::PI / 180.0
}

/// Convert radians to degrees.
#[inline]
pub fn rad2deg(rad: f64) -> f64 {
    rad * 180.0 / std::f64::consts::PI
}

// ============================================================================
// Validation
// ============================================================================

/// Reject NaN and infinities with an `InvalidGeometry` error naming `what`.
#[inline]
pub fn ensure_finite(what: &str, v: f64) -> Result<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(GeometryError::invalid(format!("{what} must be finite, got {v}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.4999), 2.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.51), -3.0);
        assert_eq!(iround(7.5), 8);
        assert_eq!(iround(-0.5), 0);
    }

    #[test]
    fn test_ifloor() {
        assert_eq!(ifloor(1.9), 1);
        assert_eq!(ifloor(-1.1), -2);
        assert_eq!(ifloor(-2.0), -2);
        assert_eq!(ifloor(0.0), 0);
    }

    #[test]
    fn test_angles() {
        assert!((deg2rad(180.0) - std::f64::consts::PI).abs() < 1e-12);
        assert!((rad2deg(std::f64::consts::FRAC_PI_2) - 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("x", 3.0), Ok(3.0));
        assert!(ensure_finite("x", f64::NAN).is_err());
        assert!(ensure_finite("y", f64::NEG_INFINITY).is_err());
    }
}
