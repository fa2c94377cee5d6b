//! Bézier curves: explicit cubic and general Bernstein form.
//!
//! Both sweep `t` over `[0, 1]` in a fixed number of equal steps (both ends
//! included) and plot `floor(B(t))`.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::basics::ifloor;
use crate::color::Color;
use crate::error::{GeometryError, Result};
use crate::point::Point;
use crate::surface::{Draw, Surface};

/// Default parameter increment.
pub const BEZIER_STEP: f64 = 0.0025;

/// Default colour of `draw_cubic`.
pub const CUBIC_COLOR: Color = Color::new(0, 180, 55, 255);

/// Default colour of `Bezier`.
pub const BEZIER_COLOR: Color = Color::new(200, 200, 50, 255);

#[inline]
fn step_count(step: f64) -> u32 {
    crate::basics::iround(1.0 / step).max(1) as u32
}

// ============================================================================
// Explicit cubic
// ============================================================================

/// Point of the cubic through `p` at `t`, by direct polynomial expansion.
pub fn cubic_point(p: &[Point; 4], t: f64) -> (f64, f64) {
    let d = 1.0 - t;
    let w0 = d * d * d;
    let w1 = 3.0 * t * d * d;
    let w2 = 3.0 * t * t * d;
    let w3 = t * t * t;
    (
        p[0].xf() * w0 + p[1].xf() * w1 + p[2].xf() * w2 + p[3].xf() * w3,
        p[0].yf() * w0 + p[1].yf() * w1 + p[2].yf() * w2 + p[3].yf() * w3,
    )
}

/// Plot the cubic with control points `p` at `BEZIER_STEP` resolution.
pub fn draw_cubic<S: Surface + ?Sized>(surface: &mut S, p: &[Point; 4], color: Option<Color>) {
    let c = color.unwrap_or(CUBIC_COLOR);
    let n = step_count(BEZIER_STEP);
    for i in 0..=n {
        let (x, y) = cubic_point(p, i as f64 / n as f64);
        surface.draw_point(ifloor(x), ifloor(y), c);
    }
}

// ============================================================================
// Binomial cache
// ============================================================================

/// Largest control-point count accepted by `Bezier::new`. Keeps central
/// binomial coefficients finite in `f64`.
pub const MAX_BEZIER_POINTS: usize = 1000;

/// `170!` is the largest factorial an `f64` holds.
const LARGEST_FACTORIAL: u32 = 170;

/// Memoised factorials and binomial coefficients.
///
/// Values are `f64`. Past `170!` binomials switch from factorial ratios to
/// the running product `Π (n - k + i) / i`.
#[derive(Debug, Clone, Default)]
pub struct BinomialCache {
    factorials: Vec<f64>,
    binomials: HashMap<(u32, u32), f64>,
}

impl BinomialCache {
    pub fn new() -> Self {
        Self {
            factorials: vec![1.0, 1.0],
            binomials: HashMap::new(),
        }
    }

    pub fn factorial(&mut self, n: u32) -> f64 {
        if self.factorials.is_empty() {
            self.factorials.push(1.0);
        }
        while self.factorials.len() <= n as usize {
            let k = self.factorials.len();
            let next = self.factorials[k - 1] * k as f64;
            self.factorials.push(next);
        }
        self.factorials[n as usize]
    }

    /// `C(n, k)`; zero when `k > n`.
    pub fn binomial(&mut self, n: u32, k: u32) -> f64 {
        if k > n {
            return 0.0;
        }
        if k == 0 || k == n {
            return 1.0;
        }
        if let Some(&v) = self.binomials.get(&(n, k)) {
            return v;
        }
        let v = if n <= LARGEST_FACTORIAL {
            self.factorial(n) / (self.factorial(k) * self.factorial(n - k))
        } else {
            let k = k.min(n - k);
            (1..=k).fold(1.0, |acc, i| acc * (n - k + i) as f64 / i as f64)
        };
        self.binomials.insert((n, k), v);
        v
    }

    /// Bernstein basis `C(n, i)·tⁱ·(1 - t)ⁿ⁻ⁱ`.
    pub fn bernstein(&mut self, n: u32, i: u32, t: f64) -> f64 {
        self.binomial(n, i) * t.powi(i as i32) * (1.0 - t).powi((n - i.min(n)) as i32)
    }

    /// Number of memoised binomial entries.
    pub fn len(&self) -> usize {
        self.binomials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.binomials.is_empty()
    }
}

// ============================================================================
// Bezier
// ============================================================================

/// General-degree Bézier curve `B(t) = Σ C(n,i)·tⁱ·(1-t)ⁿ⁻ⁱ·Pᵢ`.
///
/// Owns its binomial cache; evaluation through `&self` fills it lazily.
#[derive(Debug, Clone)]
pub struct Bezier {
    points: Vec<Point>,
    pub color: Color,
    step: f64,
    cache: RefCell<BinomialCache>,
}

impl Bezier {
    /// Between 4 and `MAX_BEZIER_POINTS` control points are required.
    pub fn new(points: Vec<Point>) -> Result<Self> {
        if points.len() < 4 {
            return Err(GeometryError::invalid(format!(
                "bezier curve needs at least 4 control points, got {}",
                points.len()
            )));
        }
        if points.len() > MAX_BEZIER_POINTS {
            return Err(GeometryError::invalid(format!(
                "bezier curve takes at most {MAX_BEZIER_POINTS} control points, got {}",
                points.len()
            )));
        }
        Ok(Self {
            points,
            color: BEZIER_COLOR,
            step: BEZIER_STEP,
            cache: RefCell::new(BinomialCache::new()),
        })
    }

    #[inline]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Degree `n = points.len() - 1`.
    pub fn degree(&self) -> u32 {
        (self.points.len() - 1) as u32
    }

    pub fn set_step(&mut self, step: f64) -> Result<()> {
        if !(step.is_finite() && step > 0.0 && step <= 1.0) {
            return Err(GeometryError::invalid(format!("bezier step must be in (0, 1], got {step}")));
        }
        self.step = step;
        Ok(())
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// `B(t)` in floating point.
    pub fn evaluate(&self, t: f64) -> (f64, f64) {
        let n = self.degree();
        let mut cache = self.cache.borrow_mut();
        let mut x = 0.0;
        let mut y = 0.0;
        for (i, p) in self.points.iter().enumerate() {
            let w = cache.bernstein(n, i as u32, t);
            x += w * p.xf();
            y += w * p.yf();
        }
        (x, y)
    }

    /// Floored pixels of the full sweep.
    pub fn pixels(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let n = step_count(self.step);
        (0..=n).map(move |i| {
            let (x, y) = self.evaluate(i as f64 / n as f64);
            (ifloor(x), ifloor(y))
        })
    }

    #[cfg(test)]
    fn cached_binomials(&self) -> usize {
        self.cache.borrow().len()
    }
}

impl Draw for Bezier {
    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for (x, y) in self.pixels() {
            surface.draw_point(x, y, self.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Image;

    fn pts(coords: &[(i32, i32)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::from_ints(x, y)).collect()
    }

    #[test]
    fn test_binomials() {
        let mut c = BinomialCache::new();
        assert_eq!(c.factorial(0), 1.0);
        assert_eq!(c.factorial(5), 120.0);
        assert_eq!(c.binomial(5, 2), 10.0);
        assert_eq!(c.binomial(6, 3), 20.0);
        assert_eq!(c.binomial(3, 4), 0.0);
        assert_eq!(c.len(), 2);
        // Memoised: asking again does not grow the cache.
        c.binomial(5, 2);
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn test_binomials_past_factorial_range() {
        let mut c = BinomialCache::new();
        let v = c.binomial(200, 100);
        assert!((v / 9.054851465610328e58 - 1.0).abs() < 1e-9, "{v}");
        assert_eq!(c.binomial(500, 1), 500.0);
        assert!(c.binomial(999, 499).is_finite());
    }

    #[test]
    fn test_high_degree_curve_stays_on_its_hull() {
        let control: Vec<Point> = (0..300)
            .map(|i| Point::from_ints(i % 50 + 10, (i * 7) % 40 + 10))
            .collect();
        let b = Bezier::new(control).unwrap();
        assert_eq!(b.evaluate(0.0), (10.0, 10.0));
        for (x, y) in b.pixels() {
            assert!((10..=59).contains(&x) && (10..=49).contains(&y), "({x}, {y})");
        }

        let too_many = vec![Point::from_ints(0, 0); MAX_BEZIER_POINTS + 1];
        assert!(Bezier::new(too_many).is_err());
    }

    #[test]
    fn test_bernstein_partition_of_unity() {
        let mut c = BinomialCache::new();
        for &t in &[0.0, 0.3, 0.5, 1.0] {
            let sum: f64 = (0..=6).map(|i| c.bernstein(6, i, t)).sum();
            assert!((sum - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_rejects_too_few_points() {
        assert!(Bezier::new(pts(&[(0, 0), (1, 1), (2, 0)])).is_err());
        assert!(Bezier::new(pts(&[(0, 0), (1, 1), (2, 0), (3, 3)])).is_ok());
    }

    #[test]
    fn test_endpoints_interpolated() {
        let b = Bezier::new(pts(&[(10, 10), (50, 200), (150, 0), (200, 100), (250, 30)])).unwrap();
        assert_eq!(b.evaluate(0.0), (10.0, 10.0));
        assert_eq!(b.evaluate(1.0), (250.0, 30.0));
        let first = b.pixels().next();
        let last = b.pixels().last();
        assert_eq!(first, Some((10, 10)));
        assert_eq!(last, Some((250, 30)));
        assert_eq!(b.pixels().count(), 401);
        assert!(b.cached_binomials() > 0);
    }

    #[test]
    fn test_general_form_matches_cubic() {
        let control = pts(&[(0, 0), (30, 90), (60, -20), (100, 40)]);
        let arr = [control[0], control[1], control[2], control[3]];
        let b = Bezier::new(control).unwrap();
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            let (gx, gy) = b.evaluate(t);
            let (cx, cy) = cubic_point(&arr, t);
            assert!((gx - cx).abs() < 1e-9 && (gy - cy).abs() < 1e-9);
        }
    }

    #[test]
    fn test_draw_colors() {
        let control = [
            Point::from_ints(5, 5),
            Point::from_ints(20, 40),
            Point::from_ints(40, 40),
            Point::from_ints(55, 5),
        ];
        let mut img = Image::new(64, 64);
        draw_cubic(&mut img, &control, None);
        assert_eq!(img.pixel(5, 5), Some(CUBIC_COLOR));
        assert_eq!(img.pixel(55, 5), Some(CUBIC_COLOR));

        let mut img = Image::new(64, 64);
        Bezier::new(control.to_vec()).unwrap().draw(&mut img);
        assert_eq!(img.pixel(55, 5), Some(BEZIER_COLOR));
    }
}
