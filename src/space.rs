//! 3D vectors, planes, lines and triangles.
//!
//! Only the pieces the perspective pipeline needs: line/plane and
//! line/triangle intersection, triangle normals, and a triangle model with
//! back-face culling.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::basics::ensure_finite;
use crate::color::Color;
use crate::error::Result;
use crate::point::Point;
use crate::segment::Segment;
use crate::surface::{Draw, Surface};
use crate::trans_mat4::{project_to_raster, Mat4};

// ============================================================================
// Vector3
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// All components must be finite.
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self> {
        Ok(Self {
            x: ensure_finite("x", x)?,
            y: ensure_finite("y", y)?,
            z: ensure_finite("z", z)?,
        })
    }

    /// Dot product; a negative zero result is returned as `0.0`.
    #[inline]
    pub fn dot(&self, other: &Vector3) -> f64 {
        let d = self.x * other.x + self.y * other.y + self.z * other.z;
        if d == 0.0 {
            0.0
        } else {
            d
        }
    }

    #[inline]
    pub fn cross(&self, other: &Vector3) -> Vector3 {
        Vector3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction; the zero vector stays zero.
    pub fn normalize(&self) -> Vector3 {
        let len = self.magnitude();
        if len == 0.0 {
            *self
        } else {
            *self * (1.0 / len)
        }
    }

    pub fn with_magnitude(&self, magnitude: f64) -> Vector3 {
        self.normalize() * magnitude
    }

    /// Transform as a point (`w = 1`).
    pub fn transform(&self, m: &Mat4) -> Vector3 {
        m.transform_point(self)
    }
}

impl Add for Vector3 {
    type Output = Vector3;
    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl Sub for Vector3 {
    type Output = Vector3;
    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;
    fn mul(self, k: f64) -> Vector3 {
        Vector3 {
            x: self.x * k,
            y: self.y * k,
            z: self.z * k,
        }
    }
}

impl Neg for Vector3 {
    type Output = Vector3;
    fn neg(self) -> Vector3 {
        self * -1.0
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ============================================================================
// Plane, Line3, Triangle
// ============================================================================

/// `(p - point) · normal = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub point: Vector3,
    pub normal: Vector3,
}

impl Plane {
    pub fn new(point: Vector3, normal: Vector3) -> Self {
        Self { point, normal }
    }

    /// `d` of the general form `a·x + b·y + c·z + d = 0`.
    pub fn d(&self) -> f64 {
        -self.normal.dot(&self.point)
    }
}

/// `p = point + t·direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line3 {
    pub point: Vector3,
    pub direction: Vector3,
}

impl Line3 {
    pub fn new(point: Vector3, direction: Vector3) -> Self {
        Self { point, direction }
    }

    pub fn at(&self, t: f64) -> Vector3 {
        self.point + self.direction * t
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Vector3,
    pub b: Vector3,
    pub c: Vector3,
    pub normal: Vector3,
}

impl Triangle {
    pub fn new(a: Vector3, b: Vector3, c: Vector3) -> Self {
        Self {
            a,
            b,
            c,
            normal: Self::normal_of(&a, &b, &c),
        }
    }

    /// `(c - a) × (b - a)`.
    pub fn normal_of(a: &Vector3, b: &Vector3, c: &Vector3) -> Vector3 {
        (*c - *a).cross(&(*b - *a))
    }

    /// Supporting plane through `a`.
    pub fn plane(&self) -> Plane {
        Plane::new(self.a, self.normal)
    }

    /// Transform all three vertices and recompute the normal.
    pub fn transform(&self, m: &Mat4) -> Triangle {
        Triangle::new(self.a.transform(m), self.b.transform(m), self.c.transform(m))
    }

    /// Mean z of the vertices.
    pub fn depth(&self) -> f64 {
        (self.a.z + self.b.z + self.c.z) / 3.0
    }
}

// ============================================================================
// Intersections
// ============================================================================

/// Intersection of a line and a plane, `t = (p₀ - l₀)·n / (l·n)`.
///
/// `None` when the line is parallel to the plane (including lying in it).
pub fn line_plane(line: &Line3, plane: &Plane) -> Option<Vector3> {
    let denom = line.direction.dot(&plane.normal);
    if denom == 0.0 {
        return None;
    }
    let t = (plane.point - line.point).dot(&plane.normal) / denom;
    Some(line.at(t))
}

/// Intersection of a line and a triangle.
///
/// With `p` the hit on the supporting plane and the vertices taken relative
/// to `p`, `u = b×c`, `v = c×a`, `w = a×b` all point the same way exactly
/// when `p` is strictly inside.
pub fn line_triangle(line: &Line3, triangle: &Triangle) -> Option<Vector3> {
    let p = line_plane(line, &triangle.plane())?;
    let a = triangle.a - p;
    let b = triangle.b - p;
    let c = triangle.c - p;

    let u = b.cross(&c);
    let v = c.cross(&a);
    let w = a.cross(&b);

    if u.dot(&v) <= 0.0 || v.dot(&w) <= 0.0 {
        return None;
    }
    Some(p)
}

// ============================================================================
// Model
// ============================================================================

/// Triangle mesh drawn as a projected wireframe.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub triangles: Vec<Triangle>,
    pub color: Color,
}

impl Model {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self {
            triangles,
            color: Color::WHITE,
        }
    }

    /// Cube spanning `[-1, 1]` on every axis, two triangles per face.
    pub fn cube() -> Self {
        const FACES: [[[f64; 3]; 3]; 12] = [
            [[-1.0, -1.0, -1.0], [-1.0, 1.0, -1.0], [1.0, 1.0, -1.0]],
            [[-1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [1.0, -1.0, -1.0]],
            [[1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0]],
            [[1.0, -1.0, -1.0], [1.0, 1.0, 1.0], [1.0, -1.0, 1.0]],
            [[1.0, -1.0, 1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0]],
            [[1.0, -1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, -1.0, 1.0]],
            [[-1.0, -1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, 1.0, -1.0]],
            [[-1.0, -1.0, 1.0], [-1.0, 1.0, -1.0], [-1.0, -1.0, -1.0]],
            [[-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0], [1.0, 1.0, 1.0]],
            [[-1.0, 1.0, -1.0], [1.0, 1.0, 1.0], [1.0, 1.0, -1.0]],
            [[1.0, -1.0, 1.0], [-1.0, -1.0, 1.0], [-1.0, -1.0, -1.0]],
            [[1.0, -1.0, 1.0], [-1.0, -1.0, -1.0], [1.0, -1.0, -1.0]],
        ];
        let v = |p: [f64; 3]| Vector3 {
            x: p[0],
            y: p[1],
            z: p[2],
        };
        Self::new(
            FACES
                .iter()
                .map(|f| Triangle::new(v(f[0]), v(f[1]), v(f[2])))
                .collect(),
        )
    }

    pub fn transform(&self, m: &Mat4) -> Model {
        Model {
            triangles: self.triangles.iter().map(|t| t.transform(m)).collect(),
            color: self.color,
        }
    }

    /// Triangles facing a camera at the origin, farthest (smallest mean z)
    /// first.
    pub fn visible_triangles(&self) -> Vec<Triangle> {
        let mut visible: Vec<Triangle> = self
            .triangles
            .iter()
            .filter(|t| t.normal.dot(&-t.a) >= 0.0)
            .copied()
            .collect();
        visible.sort_by(|a, b| a.depth().total_cmp(&b.depth()));
        visible
    }
}

impl Draw for Model {
    /// Wireframe of the visible triangles projected onto the surface.
    /// Triangles with a vertex at `z = 0` are skipped.
    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let (w, h) = (surface.width() as f64, surface.height() as f64);
        for t in self.visible_triangles() {
            let projected = (
                project_to_raster(&t.a, w, h),
                project_to_raster(&t.b, w, h),
                project_to_raster(&t.c, w, h),
            );
            if let (Some(a), Some(b), Some(c)) = projected {
                let outline: [Point; 4] = [a, b, c, a];
                Segment::pipe_draw(surface, &outline, Some(self.color));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Image;

    fn v(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3::new(x, y, z).unwrap()
    }

    #[test]
    fn test_new_rejects_non_finite() {
        assert!(Vector3::new(f64::NAN, 1.0, 1.0).is_err());
        assert!(Vector3::new(1.0, f64::NEG_INFINITY, 1.0).is_err());
        assert!(Vector3::new(f64::INFINITY, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(v(1.0, 1.0, 1.0) + v(2.0, 2.0, 2.0), v(3.0, 3.0, 3.0));
        assert_eq!(v(3.0, 2.0, 1.0) - v(1.0, 1.0, 1.0), v(2.0, 1.0, 0.0));
        assert_eq!(v(1.0, 1.0, 1.0) * 2.0, v(2.0, 2.0, 2.0));
        assert_eq!(-v(1.0, -2.0, 0.5), v(-1.0, 2.0, -0.5));
        assert_eq!(v(1.0, 2.0, 3.0).to_string(), "(1, 2, 3)");
    }

    #[test]
    fn test_dot_and_cross() {
        assert_eq!(v(1.0, 0.0, 0.0).dot(&v(0.0, 1.0, 1.0)), 0.0);
        let d = v(-1.0, 0.0, 0.0).dot(&v(0.0, 1.0, 1.0));
        assert!(d == 0.0 && d.is_sign_positive());
        assert_eq!(v(1.0, 1.0, 1.0).dot(&v(1.0, 1.0, 1.0)), 3.0);
        assert_eq!(v(1.0, 0.0, 0.0).cross(&v(0.0, 1.0, 0.0)), v(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_magnitude_and_normalize() {
        assert_eq!(v(-1.0, 0.0, 0.0).magnitude(), 1.0);
        assert_eq!(v(20.0, 0.0, 0.0).magnitude(), 20.0);
        assert_eq!(v(2.0, 0.0, 0.0).normalize(), v(1.0, 0.0, 0.0));
        assert_eq!(v(-2.0, 0.0, 0.0).normalize(), v(-1.0, 0.0, 0.0));
        assert_eq!(Vector3::ZERO.normalize(), Vector3::ZERO);
        assert_eq!(v(1.0, 0.0, 0.0).with_magnitude(5.0), v(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_triangle_normal() {
        let t = Triangle::new(v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(0.0, 1.0, 0.0));
        assert_eq!(t.normal, v(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_line_plane() {
        let plane = Plane::new(v(0.0, 0.0, -5.0), v(0.0, 0.0, 1.0));
        assert_eq!(plane.d(), 5.0);
        let line = Line3::new(Vector3::ZERO, v(0.0, 0.0, -1.0));
        assert_eq!(line_plane(&line, &plane), Some(v(0.0, 0.0, -5.0)));
        let parallel = Line3::new(Vector3::ZERO, v(1.0, 0.0, 0.0));
        assert_eq!(line_plane(&parallel, &plane), None);
    }

    #[test]
    fn test_line_triangle() {
        let t = Triangle::new(v(-1.0, -1.0, -2.0), v(1.0, -1.0, -2.0), v(0.0, 1.0, -2.0));
        let hit = Line3::new(Vector3::ZERO, v(0.0, 0.0, -1.0));
        assert_eq!(line_triangle(&hit, &t), Some(v(0.0, 0.0, -2.0)));
        let miss = Line3::new(v(5.0, 5.0, 0.0), v(0.0, 0.0, -1.0));
        assert_eq!(line_triangle(&miss, &t), None);
        let parallel = Line3::new(Vector3::ZERO, v(1.0, 0.0, 0.0));
        assert_eq!(line_triangle(&parallel, &t), None);
    }

    #[test]
    fn test_cube_culling() {
        let cube = Model::cube().transform(&Mat4::translate(&v(0.0, 0.0, -5.0)));
        let visible = cube.visible_triangles();
        assert!(!visible.is_empty());
        assert!(visible.len() < cube.triangles.len());
        for w in visible.windows(2) {
            assert!(w[0].depth() <= w[1].depth());
        }
    }

    #[test]
    fn test_draw_cube_wireframe() {
        let cube = Model::cube().transform(&Mat4::translate(&v(0.0, 0.0, -5.0)));
        let mut img = Image::new(100, 100);
        cube.draw(&mut img);
        assert!(img.count(Color::WHITE) > 0);
    }
}
