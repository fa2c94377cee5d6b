//! Clamped B-spline curve evaluated with De Boor's algorithm.
//!
//! The knot vector is derived from the point count, degree and clamp flags
//! and rebuilt whenever any of them changes.

use std::cell::Cell;

use crate::color::Color;
use crate::error::{GeometryError, Result};
use crate::point::Point;
use crate::segment::Segment;
use crate::surface::{Draw, Surface};

/// Number of equal parameter steps `draw` takes across `[0, 1]`.
pub const BSPLINE_STEPS: u32 = 5000;

/// Which ends of the knot vector are pinned to the end control points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clamp {
    pub start: bool,
    pub end: bool,
}

impl Default for Clamp {
    fn default() -> Self {
        Self {
            start: true,
            end: true,
        }
    }
}

/// Construction parameters for `Bspline`.
#[derive(Debug, Clone)]
pub struct BsplineOptions {
    pub points: Vec<Point>,
    /// Defaults to `points.len() - 1`.
    pub degree: Option<usize>,
    pub clamp: Clamp,
    pub color: Color,
    /// Also draw the control polygon in green.
    pub show_control_polygon: bool,
}

impl Default for BsplineOptions {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            degree: None,
            clamp: Clamp::default(),
            color: Color::RED,
            show_control_polygon: false,
        }
    }
}

impl BsplineOptions {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }
}

// ============================================================================
// Bspline
// ============================================================================

#[derive(Debug, Clone)]
pub struct Bspline {
    points: Vec<Point>,
    degree: usize,
    clamp: Clamp,
    knots: Vec<f64>,
    pub color: Color,
    pub show_control_polygon: bool,
    last_span: Cell<Option<usize>>,
}

impl Bspline {
    /// Fails when the degree is zero or exceeds `points.len() - 1`.
    pub fn new(options: BsplineOptions) -> Result<Self> {
        let degree = options.degree.unwrap_or(options.points.len().saturating_sub(1));
        check_degree(options.points.len(), degree)?;
        let knots = knot_vector(options.points.len(), degree, options.clamp);
        Ok(Self {
            points: options.points,
            degree,
            clamp: options.clamp,
            knots,
            color: options.color,
            show_control_polygon: options.show_control_polygon,
            last_span: Cell::new(None),
        })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn clamp(&self) -> Clamp {
        self.clamp
    }

    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    /// Replace the control points, keeping the degree.
    pub fn set_points(&mut self, points: Vec<Point>) -> Result<()> {
        check_degree(points.len(), self.degree)?;
        self.points = points;
        self.rebuild();
        Ok(())
    }

    pub fn set_degree(&mut self, degree: usize) -> Result<()> {
        check_degree(self.points.len(), degree)?;
        self.degree = degree;
        self.rebuild();
        Ok(())
    }

    pub fn set_clamp(&mut self, clamp: Clamp) {
        self.clamp = clamp;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.knots = knot_vector(self.points.len(), self.degree, self.clamp);
        self.last_span.set(None);
        log::debug!(
            "bspline knots rebuilt: {} points, degree {}, {:?}",
            self.points.len(),
            self.degree,
            self.knots
        );
    }

    /// Knot span containing `x`: the greatest `k` with
    /// `knots[k] <= x < knots[k + 1]`. At the last knot, the last non-empty
    /// span. `None` outside the knot range.
    pub fn find_span(&self, x: f64) -> Option<usize> {
        let t = &self.knots;
        let last = *t.last()?;
        if !(x >= t[0] && x <= last) {
            return None;
        }
        if let Some(k) = self.last_span.get() {
            if k + 1 < t.len() && t[k] <= x && x < t[k + 1] {
                return Some(k);
            }
        }
        let found = if x < last {
            (0..t.len() - 1).rev().find(|&k| t[k] <= x && x < t[k + 1])
        } else {
            (0..t.len() - 1).rev().find(|&k| t[k] < t[k + 1])
        };
        if found.is_some() {
            self.last_span.set(found);
        }
        found
    }

    /// De Boor evaluation at `x` in span `k`.
    ///
    /// `None` when the span leaves too few control points on either side
    /// (possible with unclamped ends) or the blend degenerates.
    pub fn de_boor(&self, k: usize, x: f64) -> Option<(f64, f64)> {
        let p = self.degree;
        let t = &self.knots;
        let c = &self.points;
        if k < p || k >= c.len() {
            return None;
        }

        let mut d: Vec<(f64, f64)> = (0..=p).map(|j| (c[j + k - p].xf(), c[j + k - p].yf())).collect();

        for r in 1..=p {
            for j in (r..=p).rev() {
                let lo = t[j + k - p];
                let alpha = (x - lo) / (t[j + 1 + k - r] - lo);
                d[j] = (
                    (1.0 - alpha) * d[j - 1].0 + alpha * d[j].0,
                    (1.0 - alpha) * d[j - 1].1 + alpha * d[j].1,
                );
            }
        }

        let (px, py) = d[p];
        (px.is_finite() && py.is_finite()).then_some((px, py))
    }

    /// Curve point at parameter `x`.
    pub fn evaluate(&self, x: f64) -> Option<(f64, f64)> {
        let k = self.find_span(x)?;
        self.de_boor(k, x)
    }

    /// Curve point at `x`, rounded onto the grid and coloured.
    pub fn point_at(&self, x: f64) -> Option<Point> {
        let (px, py) = self.evaluate(x)?;
        Point::new(px, py).ok().map(|p| p.with_color(self.color))
    }
}

impl Draw for Bspline {
    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        if self.show_control_polygon {
            Segment::pipe_draw(surface, &self.points, Some(Color::GREEN));
        }
        for i in 0..=BSPLINE_STEPS {
            if let Some(p) = self.point_at(i as f64 / BSPLINE_STEPS as f64) {
                p.draw(surface);
            }
        }
    }
}

fn check_degree(point_count: usize, degree: usize) -> Result<()> {
    if degree == 0 || degree + 1 > point_count {
        return Err(GeometryError::invalid(format!(
            "b-spline degree {degree} needs at least {} control points, got {point_count}",
            degree + 1
        )));
    }
    Ok(())
}

/// Knot vector of length `point_count + degree + 1`.
///
/// Starts as a step at the midpoint, pins the first/last `degree + 1`
/// knots to 0/1 when clamped, then spaces any interior knots evenly in
/// `(0, 1)`.
pub fn knot_vector(point_count: usize, degree: usize, clamp: Clamp) -> Vec<f64> {
    let pad = degree + 1;
    let count = point_count + pad;
    let mut knots: Vec<f64> = (0..count)
        .map(|i| if i * 2 >= count - 1 { 1.0 } else { 0.0 })
        .collect();

    if clamp.start {
        for k in knots.iter_mut().take(pad) {
            *k = 0.0;
        }
    }
    if clamp.end {
        for k in knots.iter_mut().rev().take(pad) {
            *k = 1.0;
        }
    }

    let mid = count.saturating_sub(2 * pad);
    if mid != 0 {
        for (i, k) in knots.iter_mut().enumerate().take(count - pad).skip(pad) {
            *k = (i - pad + 1) as f64 / (mid + 1) as f64;
        }
    }

    knots
}
