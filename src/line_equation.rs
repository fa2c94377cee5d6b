//! Line equations derived from a segment.
//!
//! A `Line` is always built from two points. Its `kind` tag selects the
//! closed form the intersection and clipping routines use, so the tag, the
//! standard form `a·x + b·y + c = 0` and the slope form `y = a·x + b` are
//! derived together and never set independently.

use crate::clip_line;
use crate::color::Color;
use crate::range::Range;
use crate::segment::Segment;
use crate::surface::{Draw, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Vertical,
    Horizontal,
    Sloped,
}

/// `a·x + b·y + c = 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Standard {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Standard {
    /// `a·x + b·y + c`; zero on the line.
    #[inline]
    pub fn eval(&self, x: f64, y: f64) -> f64 {
        self.a * x + self.b * y + self.c
    }
}

/// `y = a·x + b`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slope {
    pub a: f64,
    pub b: f64,
}

impl Slope {
    #[inline]
    pub fn y_at(&self, x: f64) -> f64 {
        self.a * x + self.b
    }

    /// Inverse of `y_at`; only meaningful for `a != 0`.
    #[inline]
    pub fn x_at(&self, y: f64) -> f64 {
        (y - self.b) / self.a
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equation {
    pub kind: LineKind,
    pub standard: Standard,
    /// `None` for vertical lines.
    pub slope: Option<Slope>,
}

/// Classify `segment` and derive both equation forms.
///
/// Vertical is tested before horizontal; a valid segment cannot be both.
pub fn equation(segment: &Segment) -> Equation {
    let start = &segment.start;
    let dx = segment.dx();
    let dy = segment.dy();

    if dx == 0.0 {
        return Equation {
            kind: LineKind::Vertical,
            standard: Standard {
                a: 1.0,
                b: 0.0,
                c: -start.xf(),
            },
            slope: None,
        };
    }

    if dy == 0.0 {
        return Equation {
            kind: LineKind::Horizontal,
            standard: Standard {
                a: 0.0,
                b: 1.0,
                c: -start.yf(),
            },
            slope: Some(Slope {
                a: 0.0,
                b: start.yf(),
            }),
        };
    }

    let a = dy / dx;
    let b = start.yf() - a * start.xf();
    Equation {
        kind: LineKind::Sloped,
        standard: Standard { a: -a, b: 1.0, c: -b },
        slope: Some(Slope { a, b }),
    }
}

// ============================================================================
// Line
// ============================================================================

/// Infinite line through a segment, with its derived equations.
#[derive(Debug, Clone, Copy)]
pub struct Line {
    pub kind: LineKind,
    pub standard: Standard,
    pub slope: Option<Slope>,
    /// The two points the line was derived from.
    pub segment: Segment,
    pub color: Option<Color>,
}

impl Line {
    pub fn from_segment(segment: &Segment) -> Self {
        let eq = equation(segment);
        Self {
            kind: eq.kind,
            standard: eq.standard,
            slope: eq.slope,
            segment: *segment,
            color: segment.color,
        }
    }

    #[inline]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn equation(&self) -> Equation {
        Equation {
            kind: self.kind,
            standard: self.standard,
            slope: self.slope,
        }
    }
}

impl Draw for Line {
    /// Extend the line to `[0, width] × [0, height]` and draw it.
    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let window = Range::from_size(surface.width(), surface.height());
        if let Some(mut s) = clip_line::extend(&self.segment, &window) {
            s.color = self.color;
            s.draw(surface);
        }
    }
}
