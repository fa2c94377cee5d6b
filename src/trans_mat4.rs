//! 4×4 transformation matrix and perspective projection.
//!
//! Row-major storage with the row-vector convention: a point is the row
//! `[x y z 1]` multiplied on the left, so each matrix row is the image of a
//! basis vector and the last row holds the translation.
//!
//! ```text
//!               | x₀ y₀ z₀ w₀ |
//! [x y z w]  *  | x₁ y₁ z₁ w₁ |  =  [x' y' z' w']
//!               | x₂ y₂ z₂ w₂ |
//!               | x₃ y₃ z₃ w₃ |
//! ```
//!
//! `a * b` applies `a` first, then `b`.

use crate::error::{GeometryError, Result};
use crate::point::Point;
use crate::space::Vector3;

/// Rotation angles in radians. Absent or zero angles contribute nothing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Angles {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub m: [[f64; 4]; 4],
}

impl Mat4 {
    // ====================================================================
    // Construction
    // ====================================================================

    pub const IDENTITY: Mat4 = Mat4 {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub fn new(m: [[f64; 4]; 4]) -> Self {
        Self { m }
    }

    /// From 16 values, row after row.
    pub fn from_array(v: &[f64; 16]) -> Self {
        let mut m = [[0.0; 4]; 4];
        for (i, value) in v.iter().enumerate() {
            m[i / 4][i % 4] = *value;
        }
        Self { m }
    }

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn translate(v: &Vector3) -> Self {
        let mut t = Self::IDENTITY;
        t.m[3] = [v.x, v.y, v.z, 1.0];
        t
    }

    /// Rotation about x, then y, then z.
    ///
    /// Fails when no non-zero angle is given.
    pub fn rotate(angles: Angles) -> Result<Self> {
        let present = |a: Option<f64>| a.filter(|&a| a != 0.0);
        let mut parts = Vec::with_capacity(3);

        if let Some(a) = present(angles.x) {
            let (s, c) = a.sin_cos();
            parts.push(Self::new([
                [1.0, 0.0, 0.0, 0.0],
                [0.0, c, s, 0.0],
                [0.0, -s, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]));
        }
        if let Some(a) = present(angles.y) {
            let (s, c) = a.sin_cos();
            parts.push(Self::new([
                [c, 0.0, -s, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [s, 0.0, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]));
        }
        if let Some(a) = present(angles.z) {
            let (s, c) = a.sin_cos();
            parts.push(Self::new([
                [c, s, 0.0, 0.0],
                [-s, c, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]));
        }

        parts
            .into_iter()
            .reduce(|acc, m| acc * m)
            .ok_or_else(|| GeometryError::invalid("rotation needs at least one non-zero angle"))
    }

    /// Uniform scale.
    pub fn scale(k: f64) -> Self {
        Self::scale_xyz(&Vector3 { x: k, y: k, z: k })
    }

    /// Per-axis scale; zero components are treated as 1.
    pub fn scale_xyz(v: &Vector3) -> Self {
        let or_one = |k: f64| if k == 0.0 { 1.0 } else { k };
        let mut s = Self::IDENTITY;
        s.m[0][0] = or_one(v.x);
        s.m[1][1] = or_one(v.y);
        s.m[2][2] = or_one(v.z);
        s
    }

    // ====================================================================
    // Operations
    // ====================================================================

    pub fn multiply(&self, rhs: &Mat4) -> Mat4 {
        let mut r = [[0.0; 4]; 4];
        for (i, row) in r.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.m[i][k] * rhs.m[k][j]).sum();
            }
        }
        Mat4 { m: r }
    }

    pub fn transpose(&self) -> Mat4 {
        let mut r = [[0.0; 4]; 4];
        for (i, row) in r.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.m[j][i];
            }
        }
        Mat4 { m: r }
    }

    /// `[x y z 1] * self`, dropping `w'`.
    pub fn transform_point(&self, v: &Vector3) -> Vector3 {
        let m = &self.m;
        Vector3 {
            x: v.x * m[0][0] + v.y * m[1][0] + v.z * m[2][0] + m[3][0],
            y: v.x * m[0][1] + v.y * m[1][1] + v.z * m[2][1] + m[3][1],
            z: v.x * m[0][2] + v.y * m[1][2] + v.z * m[2][2] + m[3][2],
        }
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl std::ops::Mul for Mat4 {
    type Output = Mat4;
    fn mul(self, rhs: Mat4) -> Mat4 {
        self.multiply(&rhs)
    }
}

impl std::ops::MulAssign for Mat4 {
    fn mul_assign(&mut self, rhs: Mat4) {
        *self = self.multiply(&rhs);
    }
}

// ============================================================================
// Projection
// ============================================================================

/// Perspective projection of a camera-space point onto a raster.
///
/// The camera sits at the origin looking down `-z`; `x / -z` and `y / -z`
/// in `[-1, 1]` map to `[0, width]` and `[0, height]` via
/// `(v + 1)·0.5·size`. `None` for points at `z = 0` or off the `i32` grid.
pub fn project_to_raster(v: &Vector3, width: f64, height: f64) -> Option<Point> {
    if v.z == 0.0 {
        return None;
    }
    let to_raster = |c: f64, size: f64| (c / -v.z + 1.0) * 0.5 * size;
    Point::new(to_raster(v.x, width), to_raster(v.y, height)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::deg2rad;

    fn v(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3 { x, y, z }
    }

    fn close(a: &Vector3, b: &Vector3) -> bool {
        (a.x - b.x).abs() < 1e-10 && (a.y - b.y).abs() < 1e-10 && (a.z - b.z).abs() < 1e-10
    }

    #[test]
    fn test_transpose() {
        let l = Mat4::from_array(&[
            1.0, 2.0, 3.0, 4.0, 4.0, 3.0, 2.0, 1.0, 1.0, 2.0, 3.0, 4.0, 4.0, 3.0, 2.0, 1.0,
        ]);
        let r = Mat4::from_array(&[
            1.0, 4.0, 1.0, 4.0, 2.0, 3.0, 2.0, 3.0, 3.0, 2.0, 3.0, 2.0, 4.0, 1.0, 4.0, 1.0,
        ]);
        assert_eq!(l, r.transpose());
        assert_eq!(r, l.transpose());
    }

    #[test]
    fn test_identity_and_translate() {
        let p = v(1.0, 2.0, 3.0);
        assert_eq!(Mat4::identity().transform_point(&p), p);
        assert_eq!(Mat4::default(), Mat4::IDENTITY);
        let t = Mat4::translate(&v(10.0, 0.0, -1.0));
        assert_eq!(p.transform(&t), v(11.0, 2.0, 2.0));
    }

    #[test]
    fn test_rotate() {
        assert!(Mat4::rotate(Angles::default()).is_err());
        assert!(Mat4::rotate(Angles {
            x: Some(0.0),
            ..Angles::default()
        })
        .is_err());

        let rz = Mat4::rotate(Angles {
            z: Some(deg2rad(90.0)),
            ..Angles::default()
        })
        .unwrap();
        assert!(close(&v(1.0, 0.0, 0.0).transform(&rz), &v(0.0, 1.0, 0.0)));

        let rx = Mat4::rotate(Angles {
            x: Some(deg2rad(90.0)),
            ..Angles::default()
        })
        .unwrap();
        assert!(close(&v(0.0, 1.0, 0.0).transform(&rx), &v(0.0, 0.0, 1.0)));

        let both = Mat4::rotate(Angles {
            x: Some(deg2rad(90.0)),
            z: Some(deg2rad(90.0)),
            ..Angles::default()
        })
        .unwrap();
        assert_eq!(both, rx * rz);
    }

    #[test]
    fn test_scale_and_compose() {
        let s = Mat4::scale_xyz(&v(2.0, 0.0, 3.0));
        assert_eq!(v(1.0, 1.0, 1.0).transform(&s), v(2.0, 1.0, 3.0));

        let mut m = Mat4::scale(2.0);
        m *= Mat4::translate(&v(1.0, 1.0, 1.0));
        // Scale first, then translate.
        assert_eq!(v(1.0, 2.0, 3.0).transform(&m), v(3.0, 5.0, 7.0));
    }

    #[test]
    fn test_project_to_raster() {
        assert_eq!(
            project_to_raster(&v(0.0, 0.0, -1.0), 200.0, 100.0),
            Some(Point::from_ints(100, 50))
        );
        assert_eq!(
            project_to_raster(&v(1.0, -1.0, -2.0), 200.0, 100.0),
            Some(Point::from_ints(150, 25))
        );
        assert_eq!(project_to_raster(&v(1.0, 1.0, 0.0), 200.0, 100.0), None);
    }
}
