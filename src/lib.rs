//! # raster2d
//!
//! Classic 2D raster graphics algorithms on an integer pixel grid.
//!
//! Geometry is built from integer `Point`s and composed into segments, lines
//! and polygons. Anything implementing `Surface` can be drawn on:
//!
//! - Bresenham lines with colour gradients, midpoint circles and
//!   two-region ellipses
//! - Flood fill (4- or 8-connected) and active-edge-table scanline fill
//! - Line and segment intersection
//! - Segment clipping (Cohen–Sutherland, Liang–Barsky, DMVD), line clipping
//!   (Skala, extension to a window) and polygon clipping
//!   (Sutherland–Hodgman, Weiler–Atherton)
//! - Bézier curves and clamped B-splines
//! - A small 3D layer: vectors, 4×4 matrices, plane and triangle
//!   intersection, perspective projection
//!
//! ## Layers
//!
//! 1. **Foundation**: rounding helpers, errors, colours, points, ranges
//! 2. **Surfaces**: the `Surface` trait, flood fill and the in-memory `Image`
//! 3. **Primitives**: segments, line equations, intersections, rasterisers
//! 4. **Clipping and fill**: window clipping and polygon scanline fill
//! 5. **Space**: 3D math projected back onto the raster

// Foundation
pub mod basics;
pub mod color;
pub mod error;
pub mod point;
pub mod range;

// Surfaces
pub mod surface;

// Primitives
pub mod intersection;
pub mod line_bresenham;
pub mod line_equation;
pub mod segment;

// Curves
pub mod bezier;
pub mod bspline;
pub mod cyclic;
pub mod ellipse_bresenham;

// Clipping and fill
pub mod clip_line;
pub mod clip_polygon;
pub mod clip_segment;
pub mod polygon;

// Space
pub mod space;
pub mod trans_mat4;

pub use color::Color;
pub use error::{GeometryError, Result};
pub use point::Point;
pub use polygon::Polygon;
pub use range::Range;
pub use segment::Segment;
pub use surface::{Connectivity, Draw, Fill, Image, Surface};
