//! Hypotrochoid / epitrochoid point plotter.

use crate::basics::ifloor;
use crate::color::Color;
use crate::error::{GeometryError, Result};
use crate::point::Point;
use crate::surface::{Draw, Surface};

/// A pen at distance `height` from the centre of a circle of `radius`
/// rolling along a fixed circle of `track_radius`.
///
/// With `inside` set the curve uses `track_radius + radius` and flips the
/// sign of the pen term; otherwise `track_radius - radius`.
#[derive(Debug, Clone, Copy)]
pub struct CyclicCurve {
    pub center: Point,
    pub track_radius: f64,
    pub radius: f64,
    pub height: f64,
    pub inside: bool,
    pub color: Option<Color>,
    max_tick: f64,
    step: f64,
}

impl CyclicCurve {
    pub const DEFAULT_MAX_TICK: f64 = 400.0;
    pub const DEFAULT_STEP: f64 = 0.05;

    /// Fails when `radius` is zero or any parameter is not finite.
    pub fn new(center: Point, track_radius: f64, radius: f64, height: f64, inside: bool) -> Result<Self> {
        if !(track_radius.is_finite() && radius.is_finite() && height.is_finite()) {
            return Err(GeometryError::invalid("cyclic curve parameters must be finite"));
        }
        if radius == 0.0 {
            return Err(GeometryError::invalid("rolling circle radius must be non-zero"));
        }
        Ok(Self {
            center,
            track_radius,
            radius,
            height,
            inside,
            color: None,
            max_tick: Self::DEFAULT_MAX_TICK,
            step: Self::DEFAULT_STEP,
        })
    }

    #[inline]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Parameter sweep `[0, max_tick]` in increments of `step`.
    pub fn set_sweep(&mut self, max_tick: f64, step: f64) -> Result<()> {
        if !(max_tick.is_finite() && max_tick >= 0.0 && step.is_finite() && step > 0.0) {
            return Err(GeometryError::invalid(format!(
                "invalid sweep max_tick={max_tick} step={step}"
            )));
        }
        self.max_tick = max_tick;
        self.step = step;
        Ok(())
    }

    pub fn max_tick(&self) -> f64 {
        self.max_tick
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Offset of the pen from `center` at parameter `t`.
    pub fn offset(&self, t: f64) -> (f64, f64) {
        let (r, sign) = if self.inside {
            (self.track_radius + self.radius, -1.0)
        } else {
            (self.track_radius - self.radius, 1.0)
        };
        let k = r * t / self.radius;
        let x = r * t.cos() + sign * self.height * k.cos();
        let y = r * t.sin() - self.height * k.sin();
        (x, y)
    }

    /// Integer pixels of the sweep, offsets floored before adding the
    /// centre.
    pub fn pixels(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let n = (self.max_tick / self.step).floor() as u64;
        (0..=n).filter_map(move |i| {
            let (x, y) = self.offset(i as f64 * self.step);
            if !(x.is_finite() && y.is_finite()) {
                return None;
            }
            Some((
                self.center.x.saturating_add(ifloor(x)),
                self.center.y.saturating_add(ifloor(y)),
            ))
        })
    }
}

impl Draw for CyclicCurve {
    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let c = self.color.unwrap_or(Color::WHITE);
        for (x, y) in self.pixels() {
            surface.draw_point(x, y, c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Image;

    #[test]
    fn test_rejects_zero_radius() {
        assert!(CyclicCurve::new(Point::from_ints(0, 0), 10.0, 0.0, 1.0, false).is_err());
        assert!(CyclicCurve::new(Point::from_ints(0, 0), f64::NAN, 1.0, 1.0, false).is_err());
    }

    #[test]
    fn test_offset_at_zero() {
        let c = CyclicCurve::new(Point::from_ints(0, 0), 100.0, 20.0, 10.0, false).unwrap();
        assert_eq!(c.offset(0.0), (80.0 + 10.0, 0.0));
        let c = CyclicCurve::new(Point::from_ints(0, 0), 100.0, 20.0, 10.0, true).unwrap();
        assert_eq!(c.offset(0.0), (120.0 - 10.0, 0.0));
    }

    #[test]
    fn test_sweep_count() {
        let mut c = CyclicCurve::new(Point::from_ints(0, 0), 100.0, 20.0, 10.0, false).unwrap();
        assert_eq!(c.pixels().count(), 8001);
        c.set_sweep(1.0, 0.25).unwrap();
        assert_eq!(c.pixels().count(), 5);
        assert!(c.set_sweep(1.0, 0.0).is_err());
    }

    #[test]
    fn test_pixels_stay_within_outer_radius() {
        let c = CyclicCurve::new(Point::from_ints(200, 200), 100.0, 30.0, 20.0, false).unwrap();
        let bound = 70.0 + 20.0 + 1.5;
        for (x, y) in c.pixels() {
            let dx = (x - 200) as f64;
            let dy = (y - 200) as f64;
            assert!((dx * dx + dy * dy).sqrt() <= bound);
        }
    }

    #[test]
    fn test_draw() {
        let mut img = Image::new(400, 400);
        CyclicCurve::new(Point::from_ints(200, 200), 100.0, 30.0, 20.0, false)
            .unwrap()
            .with_color(Color::YELLOW)
            .draw(&mut img);
        assert_eq!(img.pixel(290, 200), Some(Color::YELLOW));
        assert!(img.count(Color::YELLOW) > 100);
    }
}
