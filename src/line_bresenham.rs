//! Bresenham segment rasterization.
//!
//! Integer decision-variable stepping along the major axis (the one with
//! the larger absolute delta). Both endpoints are produced.

use crate::color::Color;
use crate::point::Point;
use crate::surface::Surface;

// ============================================================================
// BresenhamLine
// ============================================================================

/// Iterator over the pixels of a segment, start to end inclusive.
///
/// The decision variable starts at `-major`, grows by `2·minor` per step,
/// and the minor axis advances whenever it becomes positive.
#[derive(Debug, Clone)]
pub struct BresenhamLine {
    x: i32,
    y: i32,
    x1: i32,
    y1: i32,
    delta_x: i64,
    delta_y: i64,
    step_x: i32,
    step_y: i32,
    x_major: bool,
    decision: i64,
    done: bool,
}

impl BresenhamLine {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        let delta_x = (x1 as i64 - x0 as i64).abs();
        let delta_y = (y1 as i64 - y0 as i64).abs();
        let x_major = delta_x > delta_y;
        Self {
            x: x0,
            y: y0,
            x1,
            y1,
            delta_x,
            delta_y,
            step_x: if x1 < x0 { -1 } else { 1 },
            step_y: if y1 < y0 { -1 } else { 1 },
            x_major,
            decision: if x_major { -delta_x } else { -delta_y },
            done: false,
        }
    }

    pub fn between(start: &Point, end: &Point) -> Self {
        Self::new(start.x, start.y, end.x, end.y)
    }

    /// True if x is the major (one pixel per step) axis.
    #[inline]
    pub fn is_x_major(&self) -> bool {
        self.x_major
    }

    /// Number of pixels the iterator yields in total.
    #[inline]
    pub fn pixel_count(&self) -> u64 {
        self.delta_x.max(self.delta_y) as u64 + 1
    }
}

impl Iterator for BresenhamLine {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<(i32, i32)> {
        if self.done {
            return None;
        }
        let current = (self.x, self.y);

        if self.x_major {
            if self.x == self.x1 {
                self.done = true;
                return Some(current);
            }
            self.decision += 2 * self.delta_y;
            if self.decision > 0 {
                self.y += self.step_y;
                self.decision -= 2 * self.delta_x;
            }
            self.x += self.step_x;
        } else {
            if self.y == self.y1 {
                self.done = true;
                return Some(current);
            }
            self.decision += 2 * self.delta_x;
            if self.decision > 0 {
                self.x += self.step_x;
                self.decision -= 2 * self.delta_y;
            }
            self.y += self.step_y;
        }

        Some(current)
    }
}

// ============================================================================
// Colour gradient
// ============================================================================

/// Endpoint colour blend along a segment.
///
/// Progress is the mean of the normalised x and y distances from the start
/// (or whichever one is non-zero), not arc length.
#[derive(Debug, Clone, Copy)]
struct Gradient {
    x0: i32,
    y0: i32,
    mx: f64,
    my: f64,
    from: Color,
    to: Color,
}

impl Gradient {
    fn color_at(&self, x: i32, y: i32) -> Color {
        let dx = (x as f64 - self.x0 as f64).abs();
        let dy = (y as f64 - self.y0 as f64).abs();

        if dx == 0.0 && dy == 0.0 {
            return self.from;
        }
        let p = if dx == 0.0 {
            dy / self.my
        } else if dy == 0.0 {
            dx / self.mx
        } else {
            (dy / self.my + dx / self.mx) * 0.5
        };
        self.from.lerp(&self.to, p)
    }
}

/// Draw the segment `start → end`.
///
/// `color` paints the whole segment. Without it, endpoints carrying two
/// different colours produce a gradient; otherwise the start colour is used,
/// falling back to white.
pub fn draw_segment<S: Surface + ?Sized>(
    surface: &mut S,
    start: &Point,
    end: &Point,
    color: Option<Color>,
) {
    let gradient = match (color, start.color, end.color) {
        (None, Some(from), Some(to)) if from != to => Some(Gradient {
            x0: start.x,
            y0: start.y,
            mx: (end.xf() - start.xf()).abs(),
            my: (end.yf() - start.yf()).abs(),
            from,
            to,
        }),
        _ => None,
    };
    let solid = color.or(start.color).unwrap_or(Color::WHITE);

    for (x, y) in BresenhamLine::between(start, end) {
        let c = match &gradient {
            Some(g) => g.color_at(x, y),
            None => solid,
        };
        surface.draw_point(x, y, c);
    }
}
