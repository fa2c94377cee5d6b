//! Directed line segment and point/segment relations.

use std::fmt;

use crate::clip_line;
use crate::color::Color;
use crate::error::{GeometryError, Result};
use crate::intersection;
use crate::line_bresenham::draw_segment;
use crate::point::Point;
use crate::range::Range;
use crate::surface::{Draw, Surface};

// ============================================================================
// Segment
// ============================================================================

/// An ordered pair of two distinct points.
///
/// Direction matters: scanline fill orients edges downward and the
/// intersection routines parameterise from `start` to `end`.
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    /// Colour for the whole segment. Leave unset and colour the endpoints
    /// to get a gradient.
    pub color: Option<Color>,
}

impl Segment {
    /// Fails with `InvalidGeometry` when `start == end`.
    pub fn new(start: Point, end: Point) -> Result<Self> {
        if start == end {
            return Err(GeometryError::invalid(format!(
                "segment expects two different points, got {start} twice"
            )));
        }
        Ok(Self {
            start,
            end,
            color: None,
        })
    }

    /// Shorthand for `Segment::new(Point::new(x0, y0)?, Point::new(x1, y1)?)`.
    pub fn from_coords(x0: f64, y0: f64, x1: f64, y1: f64) -> Result<Self> {
        Self::new(Point::new(x0, y0)?, Point::new(x1, y1)?)
    }

    #[inline]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Same segment, opposite direction.
    pub fn invert(&self) -> Segment {
        Segment {
            start: self.end,
            end: self.start,
            color: self.color,
        }
    }

    #[inline]
    pub fn dx(&self) -> f64 {
        self.end.xf() - self.start.xf()
    }

    #[inline]
    pub fn dy(&self) -> f64 {
        self.end.yf() - self.start.yf()
    }

    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    /// Stretch the infinite line through this segment across `window`.
    pub fn extend(&self, window: &Range) -> Option<Segment> {
        clip_line::extend(self, window)
    }

    /// Intersection with `other`, or `None` when they miss or are parallel.
    pub fn intersection(&self, other: &Segment) -> Option<Point> {
        intersection::segments_bounded(self, other)
    }

    /// Draw consecutive segments through `points`. Repeated points are
    /// skipped.
    pub fn pipe_draw<S: Surface + ?Sized>(surface: &mut S, points: &[Point], color: Option<Color>) {
        for pair in points.windows(2) {
            if pair[0] != pair[1] {
                draw_segment(surface, &pair[0], &pair[1], color);
            }
        }
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl Eq for Segment {}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

impl Draw for Segment {
    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        draw_segment(surface, &self.start, &self.end, self.color);
    }
}

// ============================================================================
// Point/segment relations
// ============================================================================

/// Position of a point relative to a directed segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointSide {
    Left,
    Colinear,
    Right,
}

/// Side of `c` relative to the directed segment `a → b`.
///
/// Compares `AB × AC` component products; "left" is the side where
/// `AB.x·AC.y > AB.y·AC.x`.
pub fn point_side(a: &Point, b: &Point, c: &Point) -> PointSide {
    let ux = b.xf() - a.xf();
    let uy = b.yf() - a.yf();
    let vx = c.xf() - a.xf();
    let vy = c.yf() - a.yf();
    let l = ux * vy;
    let r = uy * vx;

    if l > r {
        PointSide::Left
    } else if l < r {
        PointSide::Right
    } else {
        PointSide::Colinear
    }
}

/// Normal vector of `a → b`, `(-dy, dx)` on the left or `(dy, -dx)` on the
/// right.
pub fn normal(a: &Point, b: &Point, on_left: bool) -> Point {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    if on_left {
        Point::from_ints(-dy, dx)
    } else {
        Point::from_ints(dy, -dx)
    }
}

/// `true` if `c` lies on the infinite line through `segment`.
pub fn colinear(segment: &Segment, c: &Point) -> bool {
    point_side(&segment.start, &segment.end, c) == PointSide::Colinear
}

/// `true` if `c` lies on `segment`, endpoints included.
pub fn contains(segment: &Segment, c: &Point) -> bool {
    if *c == segment.start || *c == segment.end {
        return true;
    }
    if !colinear(segment, c) {
        return false;
    }

    // Project AC onto AB.
    let (a, b) = (&segment.start, &segment.end);
    let abx = b.xf() - a.xf();
    let aby = b.yf() - a.yf();
    let acx = c.xf() - a.xf();
    let acy = c.yf() - a.yf();

    let a_dot_c = acx * abx + acy * aby;
    if a_dot_c < 0.0 {
        return false;
    }
    a_dot_c <= abx * abx + aby * aby
}
