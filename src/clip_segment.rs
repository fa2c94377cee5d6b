//! Segment clipping against an axis-aligned window.
//!
//! Cohen–Sutherland, Liang–Barsky and DMVD (Matthes–Drakopoulos). Each takes
//! a segment and a `Range` and returns the clipped segment with the input's
//! orientation and colour, or `None` when nothing of the segment survives
//! (including a result that collapses to a single pixel).

use crate::point::Point;
use crate::range::Range;
use crate::segment::Segment;

// ============================================================================
// Cohen–Sutherland
// ============================================================================

/// Outcode bits, screen space (y grows downward).
///
/// ```text
/// 1001 │ 1000 │ 1010
/// ─────┼──────┼─────
/// 0001 │ 0000 │ 0010
/// ─────┼──────┼─────
/// 0101 │ 0100 │ 0110
/// ```
pub const OUT_LEFT: u8 = 0b0001;
pub const OUT_RIGHT: u8 = 0b0010;
pub const OUT_BOTTOM: u8 = 0b0100;
pub const OUT_TOP: u8 = 0b1000;

/// Upper bound on clipping passes. Two per endpoint suffice; the rest
/// absorbs floating-point noise near corners.
const MAX_PASSES: u32 = 16;

/// Region code of `(x, y)` relative to `w`.
pub fn outcode(x: f64, y: f64, w: &Range) -> u8 {
    let mut code = 0;
    if x < w.x_min() {
        code |= OUT_LEFT;
    } else if x > w.x_max() {
        code |= OUT_RIGHT;
    }
    if y > w.y_max() {
        code |= OUT_BOTTOM;
    } else if y < w.y_min() {
        code |= OUT_TOP;
    }
    code
}

/// Cohen–Sutherland clipping.
///
/// Trivially accepts when both outcodes are zero and rejects when they share
/// a bit. Otherwise an outside endpoint is moved onto the first edge it
/// violates (left/right before bottom/top) and the loop repeats.
pub fn cohen_sutherland(segment: &Segment, w: &Range) -> Option<Segment> {
    let (mut x0, mut y0) = (segment.start.xf(), segment.start.yf());
    let (mut x1, mut y1) = (segment.end.xf(), segment.end.yf());
    let mut c0 = outcode(x0, y0, w);
    let mut c1 = outcode(x1, y1, w);

    let mut passes = 0;
    loop {
        log::trace!("cohen_sutherland: codes {c0:04b} {c1:04b}");
        if c0 | c1 == 0 {
            break;
        }
        if c0 & c1 != 0 {
            return None;
        }
        passes += 1;
        if passes > MAX_PASSES {
            log::warn!("cohen_sutherland: no convergence after {MAX_PASSES} passes for {segment}");
            return None;
        }

        let code = if c0 != 0 { c0 } else { c1 };
        let (dx, dy) = (x1 - x0, y1 - y0);
        let (x, y) = if code & OUT_LEFT != 0 {
            (w.x_min(), y0 + dy * (w.x_min() - x0) / dx)
        } else if code & OUT_RIGHT != 0 {
            (w.x_max(), y0 + dy * (w.x_max() - x0) / dx)
        } else if code & OUT_BOTTOM != 0 {
            (x0 + dx * (w.y_max() - y0) / dy, w.y_max())
        } else {
            (x0 + dx * (w.y_min() - y0) / dy, w.y_min())
        };

        if code == c0 {
            x0 = x;
            y0 = y;
            c0 = outcode(x0, y0, w);
        } else {
            x1 = x;
            y1 = y;
            c1 = outcode(x1, y1, w);
        }
    }

    rebuild(segment, x0, y0, x1, y1)
}

// ============================================================================
// Liang–Barsky
// ============================================================================

/// Liang–Barsky parametric clipping.
///
/// Tests `p·t <= q` for the four half-planes with
/// `p = [-dx, dx, -dy, dy]`, `q = [x0 - xMin, xMax - x0, y0 - yMin, yMax - y0]`,
/// shrinking the entry/exit interval `[t1, t2]` from `[0, 1]`.
pub fn liang_barsky(segment: &Segment, w: &Range) -> Option<Segment> {
    let (x0, y0) = (segment.start.xf(), segment.start.yf());
    let (dx, dy) = (segment.dx(), segment.dy());

    let p = [-dx, dx, -dy, dy];
    let q = [x0 - w.x_min(), w.x_max() - x0, y0 - w.y_min(), w.y_max() - y0];

    let mut t1: f64 = 0.0;
    let mut t2: f64 = 1.0;
    for (&p, &q) in p.iter().zip(q.iter()) {
        if p == 0.0 {
            // Parallel to this edge: outside means nothing survives.
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t1 = t1.max(r);
        } else {
            t2 = t2.min(r);
        }
        if t1 > t2 {
            return None;
        }
    }

    let (ex, ey) = if t2 != 1.0 {
        (x0 + t2 * dx, y0 + t2 * dy)
    } else {
        (segment.end.xf(), segment.end.yf())
    };
    let (sx, sy) = if t1 != 0.0 {
        (x0 + t1 * dx, y0 + t1 * dy)
    } else {
        (x0, y0)
    };

    rebuild(segment, sx, sy, ex, ey)
}

// ============================================================================
// DMVD
// ============================================================================

/// Matthes–Drakopoulos clipping.
///
/// Rejects segments whose bounding box misses the window, then clamps each
/// endpoint to the x-range and then the y-range, recomputing the other
/// coordinate from the segment's slope. A segment whose clamped x still
/// falls outside the window passes beside a corner and is rejected.
pub fn dmvd(segment: &Segment, w: &Range) -> Option<Segment> {
    let (x1, y1) = (segment.start.xf(), segment.start.yf());
    let (x2, y2) = (segment.end.xf(), segment.end.yf());

    if !(w.x_min() <= x1.max(x2)
        && w.y_min() <= y1.max(y2)
        && w.x_max() >= x1.min(x2)
        && w.y_max() >= y1.min(y2))
    {
        return None;
    }

    let dx = x2 - x1;
    let dy = y2 - y1;
    let clamp = |mut x: f64, mut y: f64| -> (f64, f64) {
        if dx != 0.0 {
            let m = dy / dx;
            if x < w.x_min() {
                x = w.x_min();
                y = m * (w.x_min() - x1) + y1;
            } else if x > w.x_max() {
                x = w.x_max();
                y = m * (w.x_max() - x1) + y1;
            }
        }
        if dy != 0.0 {
            let inv = dx / dy;
            if y < w.y_min() {
                y = w.y_min();
                x = inv * (w.y_min() - y1) + x1;
            } else if y > w.y_max() {
                y = w.y_max();
                x = inv * (w.y_max() - y1) + x1;
            }
        }
        (x, y)
    };

    let (sx, sy) = clamp(x1, y1);
    let (ex, ey) = clamp(x2, y2);
    let clipped = rebuild(segment, sx, sy, ex, ey)?;

    let x_range = w.x_min()..=w.x_max();
    if !x_range.contains(&clipped.start.xf()) || !x_range.contains(&clipped.end.xf()) {
        return None;
    }
    Some(clipped)
}

// ============================================================================
// Dispatch
// ============================================================================

/// Segment clipping algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentClip {
    CohenSutherland,
    LiangBarsky,
    Dmvd,
}

impl SegmentClip {
    pub fn clip(self, segment: &Segment, window: &Range) -> Option<Segment> {
        match self {
            SegmentClip::CohenSutherland => cohen_sutherland(segment, window),
            SegmentClip::LiangBarsky => liang_barsky(segment, window),
            SegmentClip::Dmvd => dmvd(segment, window),
        }
    }
}

/// Round the clipped endpoints back onto the grid, keeping colours.
fn rebuild(source: &Segment, sx: f64, sy: f64, ex: f64, ey: f64) -> Option<Segment> {
    let mut start = Point::new(sx, sy).ok()?;
    let mut end = Point::new(ex, ey).ok()?;
    start.color = source.start.color;
    end.color = source.end.color;
    let mut s = Segment::new(start, end).ok()?;
    s.color = source.color;
    Some(s)
}
