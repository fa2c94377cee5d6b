//! Integer raster point.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::basics::{ensure_finite, round_half_up};
use crate::color::Color;
use crate::error::{GeometryError, Result};
use crate::surface::{Draw, Surface};

// ============================================================================
// Point
// ============================================================================

/// A pixel-space point with an optional colour.
///
/// Coordinates are rounded half up at construction. Equality and hashing
/// look at `(x, y)` only; the colour is carried along for drawing.
#[derive(Debug, Clone, Copy)]
pub struct Point {
    pub x: i32,
    pub y: i32,
    pub color: Option<Color>,
}

impl Point {
    /// Round `(x, y)` onto the integer grid.
    ///
    /// Fails with `InvalidGeometry` for NaN, infinities, and values that do
    /// not fit the `i32` pixel space.
    pub fn new(x: f64, y: f64) -> Result<Self> {
        let x = round_half_up(ensure_finite("x", x)?);
        let y = round_half_up(ensure_finite("y", y)?);
        let range = i32::MIN as f64..=i32::MAX as f64;
        if !range.contains(&x) || !range.contains(&y) {
            return Err(GeometryError::invalid(format!(
                "point ({x}, {y}) is outside the representable pixel space"
            )));
        }
        Ok(Self {
            x: x as i32,
            y: y as i32,
            color: None,
        })
    }

    /// Build a point from coordinates that are already integral.
    #[inline]
    pub const fn from_ints(x: i32, y: i32) -> Self {
        Self { x, y, color: None }
    }

    pub fn new_colored(x: f64, y: f64, color: Color) -> Result<Self> {
        Ok(Self::new(x, y)?.with_color(color))
    }

    #[inline]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[inline]
    pub fn xf(&self) -> f64 {
        self.x as f64
    }

    #[inline]
    pub fn yf(&self) -> f64 {
        self.y as f64
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = other.xf() - self.xf();
        let dy = other.yf() - self.yf();
        (dx * dx + dy * dy).sqrt()
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.hash(state);
        self.y.hash(state);
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Draw for Point {
    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.draw_point(self.x, self.y, self.color.unwrap_or(Color::WHITE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Image;

    #[test]
    fn test_new_rounds() {
        let p = Point::new(1.4, 2.5).unwrap();
        assert_eq!((p.x, p.y), (1, 3));
        let p = Point::new(-1.5, -0.4).unwrap();
        assert_eq!((p.x, p.y), (-1, 0));
    }

    #[test]
    fn test_new_rejects_non_finite() {
        assert!(Point::new(f64::NAN, 0.0).is_err());
        assert!(Point::new(0.0, f64::INFINITY).is_err());
        assert!(Point::new(1e12, 0.0).is_err());
    }

    #[test]
    fn test_equality_ignores_color() {
        let a = Point::from_ints(3, 4).with_color(Color::RED);
        let b = Point::from_ints(3, 4);
        assert_eq!(a, b);
        assert_ne!(a, Point::from_ints(4, 3));
    }

    #[test]
    fn test_distance_and_display() {
        let a = Point::from_ints(0, 0);
        let b = Point::from_ints(3, 4);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.to_string(), "(3, 4)");
    }

    #[test]
    fn test_draw_defaults_to_white() {
        let mut img = Image::new(4, 4);
        Point::from_ints(1, 2).draw(&mut img);
        Point::from_ints(2, 2).with_color(Color::RED).draw(&mut img);
        assert_eq!(img.pixel(1, 2), Some(Color::WHITE));
        assert_eq!(img.pixel(2, 2), Some(Color::RED));
    }
}
