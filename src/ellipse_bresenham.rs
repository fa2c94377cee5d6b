//! Midpoint circle and ellipse rasterization.
//!
//! Both work on integer offsets from the centre and mirror each computed
//! offset into the other octants/quadrants.

use crate::color::Color;
use crate::point::Point;
use crate::surface::{Draw, Surface};

// ============================================================================
// Circle
// ============================================================================

/// Offsets `(x, y)` of one circle octant, from `(0, r)` while `x < y`.
///
/// Decision starts at `5 - 4r`; a non-negative decision moves diagonally
/// (`+8(x - y) + 20`), a negative one moves along x (`+8x + 12`).
#[derive(Debug, Clone)]
pub struct CircleOctant {
    x: i64,
    y: i64,
    decision: i64,
}

impl CircleOctant {
    pub fn new(radius: u32) -> Self {
        let r = radius as i64;
        Self {
            x: 0,
            y: r,
            decision: 5 - 4 * r,
        }
    }
}

impl Iterator for CircleOctant {
    type Item = (i64, i64);

    fn next(&mut self) -> Option<(i64, i64)> {
        if self.x >= self.y {
            return None;
        }
        let current = (self.x, self.y);
        if self.decision >= 0 {
            self.decision += 8 * (self.x - self.y) + 20;
            self.y -= 1;
        } else {
            self.decision += 8 * self.x + 12;
        }
        self.x += 1;
        Some(current)
    }
}

/// Plot the 8 symmetric points of every octant offset.
pub fn draw_circle<S: Surface + ?Sized>(surface: &mut S, cx: i32, cy: i32, radius: u32, color: Color) {
    for (x, y) in CircleOctant::new(radius) {
        for (dx, dy) in [
            (x, y),
            (-x, y),
            (x, -y),
            (-x, -y),
            (y, x),
            (-y, x),
            (y, -x),
            (-y, -x),
        ] {
            plot_offset(surface, cx, cy, dx, dy, color);
        }
    }
}

#[inline]
fn plot_offset<S: Surface + ?Sized>(surface: &mut S, cx: i32, cy: i32, dx: i64, dy: i64, c: Color) {
    let x = cx as i64 + dx;
    let y = cy as i64 + dy;
    if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
        surface.draw_point(x, y, c);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Circle {
    pub center: Point,
    pub radius: u32,
    pub color: Option<Color>,
}

impl Circle {
    pub fn new(center: Point, radius: u32) -> Self {
        Self {
            center,
            radius,
            color: None,
        }
    }

    #[inline]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

impl Draw for Circle {
    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let c = self.color.unwrap_or(Color::WHITE);
        draw_circle(surface, self.center.x, self.center.y, self.radius, c);
    }
}

// ============================================================================
// Ellipse
// ============================================================================

/// One region of a quadrant of the ellipse with semi-axes `a` (along the
/// stepped axis) and `b`.
///
/// Yields offsets from `(0, b)` while `x² < a⁴ / (a² + b²)`, the point
/// where the slope magnitude reaches 1. A full ellipse needs this run twice
/// with the semi-axes swapped.
///
/// Decision terms grow with `a²·b` and are kept in `i128`.
#[derive(Debug, Clone)]
pub struct EllipseRegion {
    a2: i128,
    b2: i128,
    x: i128,
    y: i128,
    decision: i128,
    breakpoint: f64,
}

impl EllipseRegion {
    pub fn new(a: u32, b: u32) -> Self {
        let a2 = (a as i128) * (a as i128);
        let b2 = (b as i128) * (b as i128);
        Self {
            a2,
            b2,
            x: 0,
            y: b as i128,
            decision: 4 * a2 - 4 * a2 * b as i128 + a2,
            breakpoint: (a2 as f64).powi(2) / (a2 + b2) as f64,
        }
    }
}

impl Iterator for EllipseRegion {
    type Item = (i64, i64);

    fn next(&mut self) -> Option<(i64, i64)> {
        // NaN breakpoint (a = b = 0) also ends here.
        if !(((self.x * self.x) as f64) < self.breakpoint) {
            return None;
        }
        // Both stay within 0..=u32::MAX.
        let current = (self.x as i64, self.y as i64);
        if self.decision >= 0 {
            self.decision += 8 * self.b2 * self.x + 12 * self.b2 - 8 * self.a2 * self.y + 8 * self.a2;
            self.y -= 1;
        } else {
            self.decision += 8 * self.b2 * self.x + 12 * self.b2;
        }
        self.x += 1;
        Some(current)
    }
}

/// Two-pass midpoint ellipse with horizontal semi-axis `a` and vertical
/// semi-axis `b`.
pub fn draw_ellipse<S: Surface + ?Sized>(surface: &mut S, cx: i32, cy: i32, a: u32, b: u32, color: Color) {
    for (x, y) in EllipseRegion::new(a, b) {
        for (dx, dy) in [(x, y), (x, -y), (-x, y), (-x, -y)] {
            plot_offset(surface, cx, cy, dx, dy, color);
        }
    }
    for (x, y) in EllipseRegion::new(b, a) {
        for (dx, dy) in [(y, x), (-y, x), (y, -x), (-y, -x)] {
            plot_offset(surface, cx, cy, dx, dy, color);
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Ellipse {
    pub center: Point,
    pub a: u32,
    pub b: u32,
    pub color: Option<Color>,
}

impl Ellipse {
    pub fn new(center: Point, a: u32, b: u32) -> Self {
        Self {
            center,
            a,
            b,
            color: None,
        }
    }

    #[inline]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

impl Draw for Ellipse {
    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let c = self.color.unwrap_or(Color::WHITE);
        draw_ellipse(surface, self.center.x, self.center.y, self.a, self.b, c);
    }
}
