//! Square matrix value types.
//!
//! [`Matrix3`] and [`Matrix4`] store their elements column-major (the layout
//! WGSL expects for `mat3x3`/`mat4x4` uniforms) while the literal constructors
//! take elements in row-major order so that source code reads like the written
//! matrix. Elements are addressed with a `(row, column)` pair.

use std::ops::{Index, IndexMut, Mul};

use crate::math::{MathError, Vector3, Vector4};

/// A 3×3 float matrix representing a linear transform.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Matrix3 {
    cols: [Vector3; 3],
}

impl Matrix3 {
    pub const IDENTITY: Self = Self::from_cols(
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(0.0, 0.0, 1.0),
    );

    /// Build from elements given in row-major order.
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        n00: f32,
        n01: f32,
        n02: f32,
        n10: f32,
        n11: f32,
        n12: f32,
        n20: f32,
        n21: f32,
        n22: f32,
    ) -> Self {
        Self::from_cols(
            Vector3::new(n00, n10, n20),
            Vector3::new(n01, n11, n21),
            Vector3::new(n02, n12, n22),
        )
    }

    pub const fn from_cols(a: Vector3, b: Vector3, c: Vector3) -> Self {
        Self { cols: [a, b, c] }
    }

    pub const fn col(&self, j: usize) -> Vector3 {
        self.cols[j]
    }

    pub fn row(&self, i: usize) -> Vector3 {
        Vector3::new(self.cols[0][i], self.cols[1][i], self.cols[2][i])
    }

    /// Scalar triple product of the column vectors.
    pub fn determinant(&self) -> f32 {
        let [a, b, c] = self.cols;
        a.cross(b).dot(c)
    }

    /// Invert via the cross-product adjugate.
    ///
    /// The rows of the inverse are the pairwise cross products of the columns
    /// scaled by the reciprocal determinant. A zero determinant means the
    /// columns are linearly dependent and is reported as
    /// [`MathError::SingularMatrix`].
    pub fn inverse(&self) -> Result<Self, MathError> {
        let [a, b, c] = self.cols;

        let r0 = b.cross(c);
        let r1 = c.cross(a);
        let r2 = a.cross(b);

        let det = r2.dot(c);
        if det == 0.0 {
            return Err(MathError::SingularMatrix);
        }
        let inv_det = 1.0 / det;

        Ok(Self::new(
            r0.x * inv_det,
            r0.y * inv_det,
            r0.z * inv_det,
            r1.x * inv_det,
            r1.y * inv_det,
            r1.z * inv_det,
            r2.x * inv_det,
            r2.y * inv_det,
            r2.z * inv_det,
        ))
    }
}

impl Index<(usize, usize)> for Matrix3 {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        &self.cols[col][row]
    }
}

impl IndexMut<(usize, usize)> for Matrix3 {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        &mut self.cols[col][row]
    }
}

impl Mul for Matrix3 {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        let mut result = Self::default();
        for i in 0..3 {
            for j in 0..3 {
                result[(i, j)] = self[(i, 0)] * other[(0, j)]
                    + self[(i, 1)] * other[(1, j)]
                    + self[(i, 2)] * other[(2, j)];
            }
        }
        result
    }
}

impl Mul<Vector3> for Matrix3 {
    type Output = Vector3;

    fn mul(self, v: Vector3) -> Vector3 {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z
    }
}

impl Mul<f32> for Matrix3 {
    type Output = Self;

    fn mul(self, s: f32) -> Self {
        Self::from_cols(self.cols[0] * s, self.cols[1] * s, self.cols[2] * s)
    }
}

/// A 4×4 float matrix representing an affine or projective transform.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Matrix4 {
    cols: [Vector4; 4],
}

impl Matrix4 {
    pub const IDENTITY: Self = Self::from_cols(
        Vector4::new(1.0, 0.0, 0.0, 0.0),
        Vector4::new(0.0, 1.0, 0.0, 0.0),
        Vector4::new(0.0, 0.0, 1.0, 0.0),
        Vector4::new(0.0, 0.0, 0.0, 1.0),
    );

    /// Build from elements given in row-major order.
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        n00: f32,
        n01: f32,
        n02: f32,
        n03: f32,
        n10: f32,
        n11: f32,
        n12: f32,
        n13: f32,
        n20: f32,
        n21: f32,
        n22: f32,
        n23: f32,
        n30: f32,
        n31: f32,
        n32: f32,
        n33: f32,
    ) -> Self {
        Self::from_cols(
            Vector4::new(n00, n10, n20, n30),
            Vector4::new(n01, n11, n21, n31),
            Vector4::new(n02, n12, n22, n32),
            Vector4::new(n03, n13, n23, n33),
        )
    }

    pub const fn from_cols(a: Vector4, b: Vector4, c: Vector4, d: Vector4) -> Self {
        Self {
            cols: [a, b, c, d],
        }
    }

    pub const fn col(&self, j: usize) -> Vector4 {
        self.cols[j]
    }

    pub fn row(&self, i: usize) -> Vector4 {
        Vector4::new(
            self.cols[0][i],
            self.cols[1][i],
            self.cols[2][i],
            self.cols[3][i],
        )
    }

    /// Cofactor expansion along the first row.
    pub fn determinant(&self) -> f32 {
        fn det3(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32, g: f32, h: f32, i: f32) -> f32 {
            a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g)
        }

        let m = self;
        m[(0, 0)]
            * det3(
                m[(1, 1)],
                m[(1, 2)],
                m[(1, 3)],
                m[(2, 1)],
                m[(2, 2)],
                m[(2, 3)],
                m[(3, 1)],
                m[(3, 2)],
                m[(3, 3)],
            )
            - m[(0, 1)]
                * det3(
                    m[(1, 0)],
                    m[(1, 2)],
                    m[(1, 3)],
                    m[(2, 0)],
                    m[(2, 2)],
                    m[(2, 3)],
                    m[(3, 0)],
                    m[(3, 2)],
                    m[(3, 3)],
                )
            + m[(0, 2)]
                * det3(
                    m[(1, 0)],
                    m[(1, 1)],
                    m[(1, 3)],
                    m[(2, 0)],
                    m[(2, 1)],
                    m[(2, 3)],
                    m[(3, 0)],
                    m[(3, 1)],
                    m[(3, 3)],
                )
            - m[(0, 3)]
                * det3(
                    m[(1, 0)],
                    m[(1, 1)],
                    m[(1, 2)],
                    m[(2, 0)],
                    m[(2, 1)],
                    m[(2, 2)],
                    m[(3, 0)],
                    m[(3, 1)],
                    m[(3, 2)],
                )
    }

    /// A view transform looking from `eye` toward `target`.
    ///
    /// The rotation rows are the right/up/−front camera basis and the
    /// translation column is `−dot(basis, eye)`, so the transform maps `eye`
    /// to the origin with −z pointing at `target`. Fails if `eye` and
    /// `target` coincide or `up` is parallel to the view direction.
    pub fn look_at(eye: Vector3, target: Vector3, up: Vector3) -> Result<Self, MathError> {
        let front = (target - eye).normalize()?;
        let right = front.cross(up).normalize()?;
        let up = right.cross(front);

        Ok(Self::new(
            right.x,
            right.y,
            right.z,
            -right.dot(eye),
            up.x,
            up.y,
            up.z,
            -up.dot(eye),
            -front.x,
            -front.y,
            -front.z,
            front.dot(eye),
            0.0,
            0.0,
            0.0,
            1.0,
        ))
    }

    /// A right-handed perspective projection mapping depth to wgpu's
    /// `0..=1` clip range. `fovy` is the vertical field of view in radians.
    pub fn perspective(fovy: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        let f = 1.0 / (fovy / 2.0).tan();
        Self::new(
            f / aspect,
            0.0,
            0.0,
            0.0,
            0.0,
            f,
            0.0,
            0.0,
            0.0,
            0.0,
            zfar / (znear - zfar),
            znear * zfar / (znear - zfar),
            0.0,
            0.0,
            -1.0,
            0.0,
        )
    }
}

impl Index<(usize, usize)> for Matrix4 {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        &self.cols[col][row]
    }
}

impl IndexMut<(usize, usize)> for Matrix4 {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        &mut self.cols[col][row]
    }
}

impl Mul for Matrix4 {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        let mut result = Self::default();
        for i in 0..4 {
            for j in 0..4 {
                result[(i, j)] = self[(i, 0)] * other[(0, j)]
                    + self[(i, 1)] * other[(1, j)]
                    + self[(i, 2)] * other[(2, j)]
                    + self[(i, 3)] * other[(3, j)];
            }
        }
        result
    }
}

impl Mul<Vector4> for Matrix4 {
    type Output = Vector4;

    fn mul(self, v: Vector4) -> Vector4 {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z + self.cols[3] * v.w
    }
}

impl Mul<f32> for Matrix4 {
    type Output = Self;

    fn mul(self, s: f32) -> Self {
        Self::from_cols(
            self.cols[0] * s,
            self.cols[1] * s,
            self.cols[2] * s,
            self.cols[3] * s,
        )
    }
}

impl From<Matrix4> for [[f32; 4]; 4] {
    fn from(m: Matrix4) -> Self {
        [
            m.cols[0].to_array(),
            m.cols[1].to_array(),
            m.cols[2].to_array(),
            m.cols[3].to_array(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn assert_matrix3_eq(a: Matrix3, b: Matrix3, epsilon: f32) {
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(a[(i, j)], b[(i, j)], epsilon = epsilon);
            }
        }
    }

    #[test]
    fn constructor_is_row_major_storage_column_major() {
        let m = Matrix3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);
        assert_eq!(m[(0, 1)], 2.0);
        assert_eq!(m[(1, 0)], 4.0);
        assert_eq!(m.col(0), Vector3::new(1.0, 4.0, 7.0));
        assert_eq!(m.row(2), Vector3::new(7.0, 8.0, 9.0));
    }

    #[test]
    fn inverse_times_original_is_identity() {
        let m = Matrix3::new(2.0, 0.0, 1.0, 1.0, 3.0, -1.0, 0.0, 2.0, 4.0);
        let inv = m.inverse().unwrap();
        assert_matrix3_eq(m * inv, Matrix3::IDENTITY, 1e-5);
        assert_matrix3_eq(inv * m, Matrix3::IDENTITY, 1e-5);
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        // Second row is twice the first.
        let m = Matrix3::new(1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 0.0, 1.0, 0.0);
        assert_eq!(m.determinant(), 0.0);
        assert_eq!(m.inverse(), Err(MathError::SingularMatrix));
    }

    #[test]
    fn determinant_of_scaling_matrix() {
        let m = Matrix3::new(2.0, 0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 4.0);
        assert_relative_eq!(m.determinant(), 24.0);

        let m4 = Matrix4::new(
            2.0, 0.0, 0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 0.0, 4.0, 0.0, 0.0, 0.0, 0.0, 1.0,
        );
        assert_relative_eq!(m4.determinant(), 24.0);
    }

    #[test]
    fn matrix4_multiplication_with_identity() {
        let m = Matrix4::new(
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0,
        );
        assert_eq!(m * Matrix4::IDENTITY, m);
        assert_eq!(Matrix4::IDENTITY * m, m);
    }

    #[test]
    fn matrix4_maps_vectors() {
        // A translation by (1, 2, 3) in the last column.
        let t = Matrix4::new(
            1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 2.0, 0.0, 0.0, 1.0, 3.0, 0.0, 0.0, 0.0, 1.0,
        );
        let p = t * Vector4::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(p, Vector4::new(2.0, 3.0, 4.0, 1.0));
    }

    #[test]
    fn look_at_maps_eye_to_origin_and_target_onto_negative_z() {
        let eye = Vector3::new(1.0, 2.0, 3.0);
        let target = Vector3::new(4.0, 2.0, 3.0);
        let view = Matrix4::look_at(eye, target, Vector3::unit_y()).unwrap();

        let origin = view * Vector4::from_vector3(eye, 1.0);
        assert_relative_eq!(origin.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(origin.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(origin.z, 0.0, epsilon = 1e-6);

        let ahead = view * Vector4::from_vector3(target, 1.0);
        assert_relative_eq!(ahead.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(ahead.y, 0.0, epsilon = 1e-6);
        assert!(ahead.z < 0.0);
    }

    #[test]
    fn look_at_rejects_degenerate_arguments() {
        let eye = Vector3::new(1.0, 1.0, 1.0);
        assert_eq!(
            Matrix4::look_at(eye, eye, Vector3::unit_y()),
            Err(MathError::ZeroMagnitude)
        );
        // Up parallel to the view direction.
        assert_eq!(
            Matrix4::look_at(Vector3::ZERO, Vector3::unit_y(), Vector3::unit_y()),
            Err(MathError::ZeroMagnitude)
        );
    }

    #[test]
    fn perspective_maps_near_and_far_to_the_wgpu_depth_range() {
        let proj = Matrix4::perspective(45f32.to_radians(), 1.0, 0.1, 100.0);

        let near = proj * Vector4::new(0.0, 0.0, -0.1, 1.0);
        assert_relative_eq!(near.z / near.w, 0.0, epsilon = 1e-5);

        let far = proj * Vector4::new(0.0, 0.0, -100.0, 1.0);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-5);
    }
}
