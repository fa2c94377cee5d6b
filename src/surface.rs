//! Pixel surface abstraction and in-memory RGBA image.
//!
//! `Surface` is the contract every drawing routine writes through: a
//! width×height RGBA grid, origin top-left, y growing downward. Writes are
//! bounds-checked and silently dropped outside the grid.

use std::collections::HashSet;

use crate::color::Color;
use crate::error::{GeometryError, Result};

// ============================================================================
// Surface
// ============================================================================

/// Flood fill neighbourhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// Up, down, right, left.
    #[default]
    Four,
    /// `Four` plus the diagonals.
    Eight,
}

/// An addressable RGBA raster.
///
/// Implementors supply the dimensions and raw pixel access; the provided
/// methods layer bounds checking, coordinate validation and flood fill on
/// top.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Colour at `(x, y)`, or `None` outside the grid.
    fn pixel(&self, x: i32, y: i32) -> Option<Color>;

    /// Overwrite the pixel at `(x, y)`. Only called with in-bounds
    /// coordinates.
    fn copy_pixel(&mut self, x: i32, y: i32, c: Color);

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as i64) < self.width() as i64 && (y as i64) < self.height() as i64
    }

    /// Write one pixel; out-of-range coordinates are a no-op.
    #[inline]
    fn draw_point(&mut self, x: i32, y: i32, c: Color) {
        if self.in_bounds(x, y) {
            self.copy_pixel(x, y, c);
        }
    }

    /// Write one pixel given floating-point coordinates.
    ///
    /// Out-of-range coordinates are a no-op. In-range coordinates with a
    /// fractional part fail with `InvalidCoordinate`.
    fn plot(&mut self, x: f64, y: f64, c: Color) -> Result<()> {
        let w = self.width() as f64;
        let h = self.height() as f64;
        if !(x >= 0.0 && y >= 0.0 && x <= w - 1.0 && y <= h - 1.0) {
            return Ok(());
        }
        if x.fract() != 0.0 || y.fract() != 0.0 {
            return Err(GeometryError::InvalidCoordinate { x, y });
        }
        self.copy_pixel(x as i32, y as i32, c);
        Ok(())
    }

    /// Fill every unpainted pixel reachable from `(x, y)` with `color`.
    ///
    /// Only pixels equal to `Color::UNPAINTED` are filled; the seed's own
    /// colour does not matter. Iterative, with a visited set so each
    /// coordinate is queued at most once.
    fn flood_fill(&mut self, x: i32, y: i32, color: Color, mode: Connectivity) -> &mut Self
    where
        Self: Sized,
    {
        let mut visited: HashSet<(i32, i32)> = HashSet::from([(x, y)]);
        let mut stack: Vec<(i32, i32)> = vec![(x, y)];
        let mut painted = 0usize;

        while let Some((x, y)) = stack.pop() {
            if self.pixel(x, y) != Some(Color::UNPAINTED) {
                continue;
            }
            self.copy_pixel(x, y, color);
            painted += 1;

            for (nx, ny) in neighbours(x, y, mode) {
                if visited.insert((nx, ny)) {
                    stack.push((nx, ny));
                }
            }
        }

        log::debug!("flood_fill from ({x}, {y}) painted {painted} pixels");
        self
    }
}

fn neighbours(x: i32, y: i32, mode: Connectivity) -> impl Iterator<Item = (i32, i32)> {
    let straight = [(x, y + 1), (x, y - 1), (x + 1, y), (x - 1, y)];
    let diagonal = [(x + 1, y + 1), (x - 1, y + 1), (x + 1, y - 1), (x - 1, y - 1)];
    let take = match mode {
        Connectivity::Four => 0,
        Connectivity::Eight => 4,
    };
    straight.into_iter().chain(diagonal.into_iter().take(take))
}

// ============================================================================
// Draw / Fill capabilities
// ============================================================================

/// Geometry that can rasterize its outline onto a surface.
pub trait Draw {
    fn draw<S: Surface + ?Sized>(&self, surface: &mut S);
}

/// Geometry that can rasterize its interior onto a surface.
///
/// `color` overrides the entity's own colour when given.
pub trait Fill {
    fn fill<S: Surface + ?Sized>(&self, surface: &mut S, color: Option<Color>);
}

// ============================================================================
// Image
// ============================================================================

/// Row-major RGBA8 buffer, 4 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Image {
    /// A zero-filled (unpainted) image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Byte offset of `(x, y)`: `4·(x + y·width)`.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        4 * (x as usize + y as usize * self.width as usize)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn clear(&mut self, c: Color) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&c.to_bytes());
        }
    }

    /// Number of pixels equal to `c`.
    pub fn count(&self, c: Color) -> usize {
        let bytes = c.to_bytes();
        self.data.chunks_exact(4).filter(|px| *px == bytes).count()
    }
}

impl Surface for Image {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let i = self.index(x as u32, y as u32);
        let px = &self.data[i..i + 4];
        Some(Color::from_bytes([px[0], px[1], px[2], px[3]]))
    }

    #[inline]
    fn copy_pixel(&mut self, x: i32, y: i32, c: Color) {
        let i = self.index(x as u32, y as u32);
        self.data[i..i + 4].copy_from_slice(&c.to_bytes());
    }
}
