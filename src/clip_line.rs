//! Infinite-line clipping: slope clamp, extension to a window, and Skala's
//! table-driven clip.

use crate::basics::round_half_up;
use crate::line_equation::{Line, LineKind, Slope};
use crate::point::Point;
use crate::range::Range;
use crate::segment::Segment;

// ============================================================================
// Slope clip
// ============================================================================

/// Clamp one point of `y = a·x + b` into `w`: y-range first, then x-range,
/// recomputing the other coordinate from the slope each time.
fn clamp_to_slope(slope: &Slope, w: &Range, (mut x, mut y): (f64, f64)) -> (f64, f64) {
    if y < w.y_min() {
        y = w.y_min();
        x = slope.x_at(w.y_min());
    } else if y > w.y_max() {
        y = w.y_max();
        x = slope.x_at(w.y_max());
    }

    if x < w.x_min() {
        x = w.x_min();
        y = slope.y_at(w.x_min());
    } else if x > w.x_max() {
        x = w.x_max();
        y = slope.y_at(w.x_max());
    }

    (round_half_up(x), round_half_up(y))
}

fn segment_from(
    template: &Segment,
    (sx, sy): (f64, f64),
    (ex, ey): (f64, f64),
) -> Option<Segment> {
    let s = Segment::new(Point::new(sx, sy).ok()?, Point::new(ex, ey).ok()?).ok()?;
    Some(match template.color {
        Some(c) => s.with_color(c),
        None => s,
    })
}

/// Clamp both points of `line.segment` into `w` along the line's slope.
///
/// Vertical lines have no slope form and give `None`, as does a result that
/// collapses to one pixel.
pub fn clip_slope(line: &Line, w: &Range) -> Option<Segment> {
    let slope = line.slope?;
    let seg = &line.segment;
    let start = clamp_to_slope(&slope, w, (seg.start.xf(), seg.start.yf()));
    let end = clamp_to_slope(&slope, w, (seg.end.xf(), seg.end.yf()));
    segment_from(seg, start, end)
}

// ============================================================================
// Extension
// ============================================================================

/// Segment of the infinite line through `segment` spanning the window.
///
/// Vertical and horizontal lines run from one window edge to the opposite
/// one along their own axis, keeping the segment's direction. Sloped lines
/// take the points at `x = 0` and `x = xMax`, ordered `(x = 0) → (x = xMax)`
/// only when that runs downward and the segment also runs downward, and
/// then slope-clip both into the window.
pub fn extend(segment: &Segment, w: &Range) -> Option<Segment> {
    let line = Line::from_segment(segment);
    let (start, end) = (&segment.start, &segment.end);

    match line.kind {
        LineKind::Vertical => {
            let (y0, y1) = if start.y < end.y {
                (w.y_min(), w.y_max())
            } else {
                (w.y_max(), w.y_min())
            };
            segment_from(segment, (start.xf(), y0), (start.xf(), y1))
        }
        LineKind::Horizontal => {
            let (x0, x1) = if start.x < end.x {
                (w.x_min(), w.x_max())
            } else {
                (w.x_max(), w.x_min())
            };
            segment_from(segment, (x0, start.yf()), (x1, start.yf()))
        }
        LineKind::Sloped => {
            let slope = line.slope?;
            let p1 = (0.0, round_half_up(slope.b));
            let p2 = (round_half_up(w.x_max()), round_half_up(slope.y_at(w.x_max())));
            let (from, to) = if p1.1 < p2.1 && start.y < end.y {
                (p1, p2)
            } else {
                (p2, p1)
            };
            segment_from(
                segment,
                clamp_to_slope(&slope, w, from),
                clamp_to_slope(&slope, w, to),
            )
        }
    }
}

// ============================================================================
// Skala
// ============================================================================

/// First crossed edge for each corner sign code, `None` when the line
/// misses the window.
const TAB1: [Option<usize>; 16] = [
    None,
    Some(0),
    Some(0),
    Some(1),
    Some(1),
    None,
    Some(0),
    Some(2),
    Some(2),
    Some(0),
    None,
    Some(1),
    Some(1),
    Some(0),
    Some(0),
    None,
];

/// Second crossed edge for each corner sign code.
const TAB2: [Option<usize>; 16] = [
    None,
    Some(3),
    Some(1),
    Some(3),
    Some(2),
    None,
    Some(2),
    Some(3),
    Some(3),
    Some(2),
    None,
    Some(2),
    Some(3),
    Some(1),
    Some(3),
    None,
];

/// Corner sign code of `line` against `w`.
///
/// Corners are `(x0,y0) (x1,y0) (x1,y1) (x0,y1)`; bit `k` is set when
/// `a·x + b·y + c >= 0` at corner `k`.
pub fn skala_code(line: &Line, w: &Range) -> usize {
    let corners = [
        (w.x_min(), w.y_min()),
        (w.x_max(), w.y_min()),
        (w.x_max(), w.y_max()),
        (w.x_min(), w.y_max()),
    ];
    let mut code = 0;
    for (k, &(x, y)) in corners.iter().enumerate() {
        if line.standard.eval(x, y) >= 0.0 {
            code |= 1 << k;
        }
    }
    code
}

/// Skala's clip of an infinite line to a rectangular window.
///
/// The corner sign code selects the two crossed edges from `TAB1`/`TAB2`;
/// each crossing is the homogeneous cross product of the line and the
/// edge `y = y0`, `x = x1`, `y = y1` or `x = x0`.
pub fn skala(line: &Line, w: &Range) -> Option<Segment> {
    let code = skala_code(line, w);
    log::trace!("skala: corner code {code:04b}");
    let (i, j) = (TAB1[code]?, TAB2[code]?);

    let edges = [
        [0.0, 1.0, -w.y_min()],
        [1.0, 0.0, -w.x_max()],
        [0.0, 1.0, -w.y_max()],
        [1.0, 0.0, -w.x_min()],
    ];
    let p = [line.standard.a, line.standard.b, line.standard.c];

    let start = homogeneous_cross(&p, &edges[i])?;
    let end = homogeneous_cross(&p, &edges[j])?;
    let s = Segment::new(Point::new(start.0, start.1).ok()?, Point::new(end.0, end.1).ok()?).ok()?;
    Some(match line.color {
        Some(c) => s.with_color(c),
        None => s,
    })
}

/// Intersection of two lines in homogeneous form, `None` when parallel.
fn homogeneous_cross(p: &[f64; 3], e: &[f64; 3]) -> Option<(f64, f64)> {
    let x = p[1] * e[2] - p[2] * e[1];
    let y = p[2] * e[0] - p[0] * e[2];
    let w = p[0] * e[1] - p[1] * e[0];
    if w == 0.0 {
        return None;
    }
    Some((x / w, y / w))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn window() -> Range {
        Range::new((100.0, 200.0), (100.0, 150.0)).unwrap()
    }

    fn seg(x0: i32, y0: i32, x1: i32, y1: i32) -> Segment {
        Segment::new(Point::from_ints(x0, y0), Point::from_ints(x1, y1)).unwrap()
    }

    fn ends(s: Option<Segment>) -> Option<((i32, i32), (i32, i32))> {
        s.map(|s| ((s.start.x, s.start.y), (s.end.x, s.end.y)))
    }

    fn skala_of(x0: i32, y0: i32, x1: i32, y1: i32) -> Option<((i32, i32), (i32, i32))> {
        ends(skala(&Line::from_segment(&seg(x0, y0, x1, y1)), &window()))
    }

    #[test]
    fn test_skala_codes_and_crossings() {
        let w = window();
        let code = |x0, y0, x1, y1| skala_code(&Line::from_segment(&seg(x0, y0, x1, y1)), &w);

        assert_eq!(code(80, 80, 160, 200), 8);
        assert_eq!(skala_of(80, 80, 160, 200), Some(((127, 150), (100, 110))));

        assert_eq!(code(200, 50, 125, 300), 6);
        assert_eq!(skala_of(200, 50, 125, 300), Some(((185, 100), (170, 150))));

        assert_eq!(code(0, 120, 10, 120), 12);
        assert_eq!(skala_of(0, 120, 10, 120), Some(((200, 120), (100, 120))));

        assert_eq!(code(150, 0, 150, 10), 6);
        assert_eq!(skala_of(150, 0, 150, 10), Some(((150, 100), (150, 150))));

        assert_eq!(code(0, 0, 10, 10), 9);
        assert_eq!(skala_of(0, 0, 10, 10), Some(((100, 100), (150, 150))));
    }

    #[test]
    fn test_skala_miss() {
        assert_eq!(skala_of(0, 0, 10, 1000), None);
        assert_eq!(skala_of(0, 10, 10, 10), None);
    }

    #[test]
    fn test_skala_keeps_line_color() {
        let line = Line::from_segment(&seg(0, 120, 10, 120)).with_color(Color::LIME);
        assert_eq!(skala(&line, &window()).unwrap().color, Some(Color::LIME));
    }

    #[test]
    fn test_extend_axis_aligned() {
        let w = window();
        assert_eq!(ends(extend(&seg(150, 120, 150, 130), &w)), Some(((150, 100), (150, 150))));
        assert_eq!(ends(extend(&seg(150, 130, 150, 120), &w)), Some(((150, 150), (150, 100))));
        assert_eq!(ends(extend(&seg(110, 120, 120, 120), &w)), Some(((100, 120), (200, 120))));
        assert_eq!(ends(extend(&seg(120, 120, 110, 120), &w)), Some(((200, 120), (100, 120))));
    }

    #[test]
    fn test_extend_sloped() {
        let w = Range::new((0.0, 100.0), (0.0, 50.0)).unwrap();
        assert_eq!(ends(extend(&seg(0, 0, 10, 10), &w)), Some(((0, 0), (50, 50))));
        assert_eq!(ends(extend(&seg(10, 10, 0, 0), &w)), Some(((50, 50), (0, 0))));
        // Falling lines always come back ordered from x = xMax.
        assert_eq!(ends(extend(&seg(0, 50, 10, 40), &w)), Some(((50, 0), (0, 50))));
    }

    #[test]
    fn test_clip_slope() {
        let w = window();
        let line = Line::from_segment(&seg(0, 0, 300, 300));
        assert_eq!(ends(clip_slope(&line, &w)), Some(((100, 100), (150, 150))));
        let vertical = Line::from_segment(&seg(5, 0, 5, 10));
        assert_eq!(clip_slope(&vertical, &w), None);
    }
}
