//! Axis-aligned clip window.

use crate::basics::ensure_finite;
use crate::error::{GeometryError, Result};
use crate::point::Point;

/// `[x.0, x.1] × [y.0, y.1]` with `min ≤ max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl Range {
    pub fn new(x: (f64, f64), y: (f64, f64)) -> Result<Self> {
        for v in [x.0, x.1, y.0, y.1] {
            ensure_finite("range bound", v)?;
        }
        if x.0 > x.1 || y.0 > y.1 {
            return Err(GeometryError::invalid(format!(
                "range bounds must satisfy min <= max, got x={x:?} y={y:?}"
            )));
        }
        Ok(Self { x, y })
    }

    /// `[0, width] × [0, height]`, the window used to extend lines across a
    /// whole surface.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self {
            x: (0.0, width as f64),
            y: (0.0, height as f64),
        }
    }

    #[inline]
    pub fn x_min(&self) -> f64 {
        self.x.0
    }

    #[inline]
    pub fn x_max(&self) -> f64 {
        self.x.1
    }

    #[inline]
    pub fn y_min(&self) -> f64 {
        self.y.0
    }

    #[inline]
    pub fn y_max(&self) -> f64 {
        self.y.1
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: &Point) -> bool {
        let (x, y) = (p.xf(), p.yf());
        x >= self.x.0 && x <= self.x.1 && y >= self.y.0 && y <= self.y.1
    }

    /// Corners in the order `(x0,y0) (x1,y0) (x1,y1) (x0,y1)`.
    pub fn corners(&self) -> Result<[Point; 4]> {
        Ok([
            Point::new(self.x.0, self.y.0)?,
            Point::new(self.x.1, self.y.0)?,
            Point::new(self.x.1, self.y.1)?,
            Point::new(self.x.0, self.y.1)?,
        ])
    }
}
