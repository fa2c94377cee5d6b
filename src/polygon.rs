//! Polygon type, outline drawing, containment and scanline fill.
//!
//! Edge `i` joins vertex `i` to vertex `(i + 1) mod n`; there is no explicit
//! closing vertex.

use std::fmt;

use crate::color::Color;
use crate::error::{GeometryError, Result};
use crate::line_bresenham::draw_segment;
use crate::point::Point;
use crate::segment::{self, Segment};
use crate::surface::{Draw, Fill, Surface};

#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
    pub color: Option<Color>,
}

impl Polygon {
    /// At least 3 vertices are required.
    pub fn new(vertices: Vec<Point>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(GeometryError::invalid(format!(
                "polygon needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        Ok(Self {
            vertices,
            color: None,
        })
    }

    /// Build from integer coordinate pairs.
    pub fn from_coords(coords: &[(i32, i32)]) -> Result<Self> {
        Self::new(coords.iter().map(|&(x, y)| Point::from_ints(x, y)).collect())
    }

    #[inline]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Directed edges `(v[i], v[i + 1])`, closing edge last.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Twice the signed shoelace area, `Σ xᵢ·yᵢ₊₁ - xᵢ₊₁·yᵢ`.
    ///
    /// Positive when the interior lies on the left of every directed edge
    /// in the sense of `segment::point_side`.
    pub fn signed_area2(&self) -> f64 {
        self.edges()
            .map(|(a, b)| a.xf() * b.yf() - b.xf() * a.yf())
            .sum()
    }

    /// Copy with non-negative `signed_area2`, reversing the vertex order if
    /// needed.
    pub fn normalized(&self) -> Polygon {
        let mut p = self.clone();
        if p.signed_area2() < 0.0 {
            p.vertices.reverse();
        }
        p
    }

    /// Even-odd point containment. Vertices and points on edges are inside.
    pub fn contains(&self, p: &Point) -> bool {
        let mut inside = false;
        for (a, b) in self.edges() {
            if *p == a || *p == b {
                return true;
            }
            if let Ok(edge) = Segment::new(a, b) {
                if segment::contains(&edge, p) {
                    return true;
                }
            }
            if (a.y > p.y) != (b.y > p.y) {
                let x = a.xf() + (p.yf() - a.yf()) * (b.xf() - a.xf()) / (b.yf() - a.yf());
                if p.xf() < x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    // ========================================================================
    // Scanline fill
    // ========================================================================

    /// Fill edges: every edge except horizontal ones, oriented so that
    /// `start.y < end.y`, sorted by `start.y`.
    fn fill_edges(&self) -> Vec<(Point, Point)> {
        let mut edges: Vec<(Point, Point)> = self
            .edges()
            .filter(|(a, b)| a.y != b.y)
            .map(|(a, b)| if a.y > b.y { (b, a) } else { (a, b) })
            .collect();
        edges.sort_by_key(|(start, _)| start.y);
        edges
    }

    /// Horizontal spans `(y, x_from, x_to)` of the even-odd fill, computed
    /// with an active edge table.
    ///
    /// At each scanline, edges ending at `y` leave the table and edges
    /// starting at `y` join it; active edges are sorted by their crossing x
    /// and paired up (1st with 2nd, 3rd with 4th, ...).
    pub fn scanline_spans(&self) -> Vec<(i32, i32, i32)> {
        let edges = self.fill_edges();
        let mut spans = Vec::new();
        let Some(first) = edges.first() else {
            return spans;
        };

        let mut pending = edges.iter().peekable();
        let mut active: Vec<ActiveEdge> = Vec::new();
        let mut y = first.0.y;

        loop {
            active.retain(|e| e.end.y != y);
            while let Some(&&(start, end)) = pending.peek() {
                if start.y != y {
                    break;
                }
                active.push(ActiveEdge { start, end, x: 0.0 });
                pending.next();
            }

            for e in active.iter_mut() {
                e.x = e.x_at(y);
            }
            active.sort_by(|a, b| a.x.total_cmp(&b.x));

            for pair in active.chunks_exact(2) {
                if let (Ok(from), Ok(to)) = (
                    Point::new(pair[0].x, y as f64),
                    Point::new(pair[1].x, y as f64),
                ) {
                    spans.push((y, from.x, to.x));
                }
            }

            if active.is_empty() && pending.peek().is_none() {
                break;
            }
            y += 1;
        }

        log::debug!("scanline fill: {} edges, {} spans", edges.len(), spans.len());
        spans
    }
}

#[derive(Debug, Clone, Copy)]
struct ActiveEdge {
    start: Point,
    end: Point,
    x: f64,
}

impl ActiveEdge {
    /// Crossing x at scanline `y`.
    fn x_at(&self, y: i32) -> f64 {
        let dx = self.end.xf() - self.start.xf();
        if dx == 0.0 {
            return self.start.xf();
        }
        let slope = (self.end.yf() - self.start.yf()) / dx;
        let intercept = self.start.yf() - self.start.xf() * slope;
        (y as f64 - intercept) / slope
    }
}

impl Draw for Polygon {
    /// Closed outline, repeated consecutive vertices skipped.
    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let color = Some(self.color.unwrap_or(Color::WHITE));
        for (a, b) in self.edges() {
            if a != b {
                draw_segment(surface, &a, &b, color);
            }
        }
    }
}

impl Fill for Polygon {
    fn fill<S: Surface + ?Sized>(&self, surface: &mut S, color: Option<Color>) {
        let c = Some(color.or(self.color).unwrap_or(Color::WHITE));
        for (y, x0, x1) in self.scanline_spans() {
            draw_segment(surface, &Point::from_ints(x0, y), &Point::from_ints(x1, y), c);
        }
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.vertices.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Image;

    fn arrow() -> Polygon {
        Polygon::from_coords(&[(100, 100), (60, 200), (100, 150), (140, 200)]).unwrap()
    }

    #[test]
    fn test_new_requires_three_vertices() {
        assert!(Polygon::from_coords(&[(0, 0), (1, 1)]).is_err());
        assert!(Polygon::from_coords(&[(0, 0), (1, 1), (2, 0)]).is_ok());
    }

    #[test]
    fn test_signed_area_and_normalize() {
        let sq = Polygon::from_coords(&[(100, 100), (300, 100), (300, 300), (100, 300)]).unwrap();
        assert_eq!(sq.signed_area2(), 80000.0);
        let mut rev = sq.vertices().to_vec();
        rev.reverse();
        let rev = Polygon::new(rev).unwrap();
        assert_eq!(rev.signed_area2(), -80000.0);
        assert_eq!(rev.normalized().signed_area2(), 80000.0);
        assert_eq!(sq.normalized(), sq);
    }

    #[test]
    fn test_contains() {
        let p = arrow();
        assert!(p.contains(&Point::from_ints(100, 100)));
        assert!(p.contains(&Point::from_ints(75, 175)));
        assert!(p.contains(&Point::from_ints(100, 130)));
        assert!(!p.contains(&Point::from_ints(100, 175)));
        assert!(!p.contains(&Point::from_ints(10, 10)));
        // On the edge from (100,150) to (140,200).
        assert!(p.contains(&Point::from_ints(120, 175)));
    }

    #[test]
    fn test_scanline_even_odd() {
        let spans = arrow().scanline_spans();
        let at_175: Vec<_> = spans.iter().filter(|s| s.0 == 175).collect();
        assert_eq!(at_175, vec![&(175, 70, 80), &(175, 120, 130)]);

        let mut img = Image::new(300, 300);
        arrow().fill(&mut img, Some(Color::BLUE));
        assert_eq!(img.pixel(75, 175), Some(Color::BLUE));
        assert_eq!(img.pixel(125, 175), Some(Color::BLUE));
        assert_eq!(img.pixel(65, 175), Some(Color::UNPAINTED));
        assert_eq!(img.pixel(100, 175), Some(Color::UNPAINTED));
        assert_eq!(img.pixel(135, 175), Some(Color::UNPAINTED));
    }

    #[test]
    fn test_fill_rectangle() {
        let mut img = Image::new(20, 20);
        let rect = Polygon::from_coords(&[(2, 2), (10, 2), (10, 6), (2, 6)])
            .unwrap()
            .with_color(Color::RED);
        rect.fill(&mut img, None);
        // The bottom row is where both side edges end, so it is not spanned.
        assert_eq!(img.count(Color::RED), 9 * 4);
        assert_eq!(img.pixel(2, 2), Some(Color::RED));
        assert_eq!(img.pixel(10, 5), Some(Color::RED));
        assert_eq!(img.pixel(5, 6), Some(Color::UNPAINTED));
    }

    #[test]
    fn test_degenerate_polygon_fill_is_empty() {
        // All edges horizontal.
        let flat = Polygon::from_coords(&[(0, 5), (5, 5), (9, 5)]).unwrap();
        assert!(flat.scanline_spans().is_empty());
        let mut img = Image::new(10, 10);
        flat.fill(&mut img, None);
        assert_eq!(img.count(Color::UNPAINTED), 100);
    }

    #[test]
    fn test_self_intersecting_does_not_panic() {
        let bowtie = Polygon::from_coords(&[(0, 0), (10, 10), (10, 0), (0, 10)]).unwrap();
        let mut img = Image::new(12, 12);
        bowtie.fill(&mut img, Some(Color::RED));
        bowtie.draw(&mut img);
        assert!(img.count(Color::RED) > 0);
    }

    #[test]
    fn test_draw_outline_and_display() {
        let tri = Polygon::from_coords(&[(0, 0), (4, 0), (0, 4)]).unwrap();
        let mut img = Image::new(6, 6);
        tri.draw(&mut img);
        assert_eq!(img.pixel(4, 0), Some(Color::WHITE));
        assert_eq!(img.pixel(0, 4), Some(Color::WHITE));
        assert_eq!(img.pixel(2, 2), Some(Color::WHITE));
        assert_eq!(img.pixel(1, 1), Some(Color::UNPAINTED));
        assert_eq!(tri.to_string(), "[(0, 0), (4, 0), (0, 4)]");
    }
}
