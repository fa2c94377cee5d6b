//! Segment and line intersections.
//!
//! All comparisons are exact. Parallel and collinear inputs report `None`;
//! a collinear overlap is not collapsed to a single point.

use crate::line_equation::{Line, LineKind};
use crate::point::Point;
use crate::segment::Segment;

#[inline]
fn cross(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    ax * by - ay * bx
}

/// Segment × segment in parametric cross-product form.
///
/// With `r = b - a` and `s = d - c`, solves `a + t·r = c + u·s` and accepts
/// iff both `t` and `u` lie in `[0, 1]`.
pub fn segments(p: &Segment, q: &Segment) -> Option<Point> {
    let (a, c) = (&p.start, &q.start);
    let (rx, ry) = (p.dx(), p.dy());
    let (sx, sy) = (q.dx(), q.dy());

    let r_x_s = cross(rx, ry, sx, sy);
    if r_x_s == 0.0 {
        return None;
    }

    let (cax, cay) = (c.xf() - a.xf(), c.yf() - a.yf());
    let t = cross(cax, cay, sx, sy) / r_x_s;
    let u = cross(-cax, -cay, rx, ry) / cross(sx, sy, rx, ry);

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Point::new(a.xf() + t * rx, a.yf() + t * ry).ok()
    } else {
        None
    }
}

/// Segment × segment via the two-point line determinant.
///
/// Checks `t` on the first segment, then accepts when either bounding box
/// encloses the other, falling back to checking `u` on the second segment.
pub fn segments_bounded(p: &Segment, q: &Segment) -> Option<Point> {
    let (a, b) = (&p.start, &p.end);
    let (c, d) = (&q.start, &q.end);
    let (ax, ay, bx, by) = (a.xf(), a.yf(), b.xf(), b.yf());
    let (cx, cy, dx, dy) = (c.xf(), c.yf(), d.xf(), d.yf());

    let den = (ax - bx) * (cy - dy) - (ay - by) * (cx - dx);
    if den == 0.0 {
        return None;
    }

    let t = ((ax - cx) * (cy - dy) - (ay - cy) * (cx - dx)) / den;
    if !(0.0..=1.0).contains(&t) {
        return None;
    }

    let bbox = |p0: f64, p1: f64| if p0 > p1 { (p1, p0) } else { (p0, p1) };
    let (x_min1, x_max1) = bbox(ax, bx);
    let (y_min1, y_max1) = bbox(ay, by);
    let (x_min2, x_max2) = bbox(cx, dx);
    let (y_min2, y_max2) = bbox(cy, dy);

    let encloses = (x_min1 <= x_min2 && x_max1 >= x_max2 && y_min1 <= y_min2 && y_max1 >= y_max2)
        || (x_min2 <= x_min1 && x_max2 >= x_max1 && y_min2 <= y_min1 && y_max2 >= y_max1);

    if !encloses {
        let u = ((ax - cx) * (ay - by) - (ay - cy) * (ax - bx)) / den;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }
    }

    Point::new(ax + (bx - ax) * t, ay + (by - ay) * t).ok()
}

/// Infinite line × segment.
///
/// `t = (-c - a·s.x - b·s.y) / (a·(e.x - s.x) + b·(e.y - s.y))`; a zero
/// denominator gives NaN or ±∞ and therefore no intersection.
pub fn line_segment(line: &Line, segment: &Segment) -> Option<Point> {
    let st = &line.standard;
    let (sx, sy) = (segment.start.xf(), segment.start.yf());
    let (dx, dy) = (segment.dx(), segment.dy());

    let t = (-st.c - st.a * sx - st.b * sy) / (st.a * dx + st.b * dy);
    if (0.0..=1.0).contains(&t) {
        Point::new(sx + t * dx, sy + t * dy).ok()
    } else {
        None
    }
}

/// Infinite line × infinite line.
///
/// Two vertical or two horizontal lines never meet. Otherwise vertical lines
/// supply `x`, horizontal lines supply `y`, and sloped lines supply the
/// missing coordinate from `y = a·x + b`. Parallel sloped lines come back
/// as `None`.
pub fn lines(l1: &Line, l2: &Line) -> Option<Point> {
    if l1.kind != LineKind::Sloped && l1.kind == l2.kind {
        return None;
    }

    let mut x = None;
    let mut y = None;
    for l in [l1, l2] {
        match l.kind {
            LineKind::Vertical => x = Some(l.segment.start.xf()),
            LineKind::Horizontal => y = Some(l.segment.start.yf()),
            LineKind::Sloped => {}
        }
    }

    let (x, y) = match (x, y) {
        (Some(x), Some(y)) => (x, y),
        (None, None) => {
            let s1 = l1.slope?;
            let s2 = l2.slope?;
            let x = (s2.b - s1.b) / (s1.a - s2.a);
            (x, s1.a * x + s1.b)
        }
        (Some(x), None) => {
            let s = sloped(l1, l2)?;
            (x, s.y_at(x))
        }
        (None, Some(y)) => {
            let s = sloped(l1, l2)?;
            (s.x_at(y), y)
        }
    };

    Point::new(x, y).ok()
}

fn sloped(l1: &Line, l2: &Line) -> Option<crate::line_equation::Slope> {
    if l1.kind == LineKind::Sloped {
        l1.slope
    } else {
        l2.slope
    }
}
