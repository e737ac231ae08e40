//! Fixed-size matrices.
//!
//! # Convention
//! - Elements are stored row-major: `rows[row][col]`
//! - Vectors are **column vectors** on the right: `Matrix * Vector`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//!
//! Matrix products check the inner dimension at compile time: a
//! `Matrix<T, R, C>` only multiplies a `Matrix<T, C, K>` or a `Vector<T, C>`.

use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use super::scalar::Scalar;
use super::vector::{Vector, Vector3, Vector4};
use crate::error::MathError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix<T, const R: usize, const C: usize> {
    rows: [[T; C]; R],
}

pub type Matrix3<T> = Matrix<T, 3, 3>;
pub type Matrix4<T> = Matrix<T, 4, 4>;

pub type Mat3 = Matrix3<f32>;
pub type Mat4 = Matrix4<f32>;

impl<T: Scalar, const R: usize, const C: usize> Matrix<T, R, C> {
    const NON_EMPTY: () = assert!(R > 0 && C > 0, "matrices need at least one row and column");

    pub const ZERO: Self = Self::from_rows([[T::ZERO; C]; R]);

    pub const fn from_rows(rows: [[T; C]; R]) -> Self {
        let () = Self::NON_EMPTY;
        Self { rows }
    }

    pub fn zeros() -> Self {
        Self::ZERO
    }

    /// Builds a matrix from exactly `R * C` values in row-major order.
    pub fn from_slice(values: &[T]) -> Result<Self, MathError> {
        if values.len() != R * C {
            return Err(MathError::ElementCount {
                expected: R * C,
                actual: values.len(),
            });
        }
        let mut m = Self::zeros();
        for (i, &value) in values.iter().enumerate() {
            m.rows[i / C][i % C] = value;
        }
        Ok(m)
    }

    pub fn rows(&self) -> &[[T; C]; R] {
        &self.rows
    }

    /// Bounds-checked element read.
    pub fn try_get(&self, row: usize, col: usize) -> Result<T, MathError> {
        self.check(row, col)?;
        Ok(self.rows[row][col])
    }

    /// Bounds-checked element write.
    pub fn try_set(&mut self, row: usize, col: usize, value: T) -> Result<(), MathError> {
        self.check(row, col)?;
        self.rows[row][col] = value;
        Ok(())
    }

    fn check(&self, row: usize, col: usize) -> Result<(), MathError> {
        if row >= R {
            return Err(MathError::IndexOutOfRange { index: row, len: R });
        }
        if col >= C {
            return Err(MathError::IndexOutOfRange { index: col, len: C });
        }
        Ok(())
    }

    pub fn row(&self, row: usize) -> Vector<T, C> {
        Vector::from_array(self.rows[row])
    }

    pub fn column(&self, col: usize) -> Vector<T, R> {
        Vector::from_array(std::array::from_fn(|row| self.rows[row][col]))
    }

    pub fn transpose(&self) -> Matrix<T, C, R> {
        Matrix::from_rows(std::array::from_fn(|col| {
            std::array::from_fn(|row| self.rows[row][col])
        }))
    }

    fn map(self, f: impl Fn(T) -> T) -> Self {
        Self::from_rows(self.rows.map(|row| row.map(&f)))
    }

    fn zip_with(mut self, rhs: Self, f: impl Fn(&mut T, T)) -> Self {
        for (lhs_row, rhs_row) in self.rows.iter_mut().zip(rhs.rows) {
            for (a, b) in lhs_row.iter_mut().zip(rhs_row) {
                f(a, b);
            }
        }
        self
    }
}

impl<T: Scalar, const N: usize> Matrix<T, N, N> {
    pub fn identity() -> Self {
        let mut m = Self::zeros();
        for i in 0..N {
            m.rows[i][i] = T::ONE;
        }
        m
    }
}

impl<T: Scalar> Matrix4<T> {
    /// Creates a translation matrix.
    ///
    /// Translation is stored in the last column.
    pub fn translation(x: T, y: T, z: T) -> Self {
        let (o, i) = (T::ZERO, T::ONE);
        Self::from_rows([[i, o, o, x], [o, i, o, y], [o, o, i, z], [o, o, o, i]])
    }

    /// Creates a scale matrix.
    pub fn scaling(x: T, y: T, z: T) -> Self {
        let (o, i) = (T::ZERO, T::ONE);
        Self::from_rows([[x, o, o, o], [o, y, o, o], [o, o, z, o], [o, o, o, i]])
    }

    /// Creates a rotation matrix around the X axis.
    pub fn rotation_x(angle: T) -> Self {
        let (c, s) = (angle.cos(), angle.sin());
        let (o, i) = (T::ZERO, T::ONE);
        Self::from_rows([[i, o, o, o], [o, c, -s, o], [o, s, c, o], [o, o, o, i]])
    }

    /// Creates a rotation matrix around the Y axis.
    pub fn rotation_y(angle: T) -> Self {
        let (c, s) = (angle.cos(), angle.sin());
        let (o, i) = (T::ZERO, T::ONE);
        Self::from_rows([[c, o, s, o], [o, i, o, o], [-s, o, c, o], [o, o, o, i]])
    }

    /// Creates a rotation matrix around the Z axis.
    pub fn rotation_z(angle: T) -> Self {
        let (c, s) = (angle.cos(), angle.sin());
        let (o, i) = (T::ZERO, T::ONE);
        Self::from_rows([[c, -s, o, o], [s, c, o, o], [o, o, i, o], [o, o, o, i]])
    }

    /// `Rx * Ry * Rz`: Z is applied first, X last.
    pub fn rotation_xyz(x: T, y: T, z: T) -> Self {
        Self::rotation_x(x) * Self::rotation_y(y) * Self::rotation_z(z)
    }

    /// Left-handed perspective projection (camera looks down +Z).
    ///
    /// Clip `w` is the view-space depth, and after the divide `z` runs from
    /// 0 at the near plane to 1 at the far plane.
    ///
    /// # Arguments
    ///
    /// * `fov_y` - Vertical field of view in radians.
    /// * `aspect_ratio` - Width divided by height.
    /// * `near` / `far` - Clipping plane distances, `0 < near < far`.
    pub fn perspective_lh(fov_y: T, aspect_ratio: T, near: T, far: T) -> Self {
        let (o, i) = (T::ZERO, T::ONE);
        let f = i / (fov_y / T::from_f64(2.0)).tan();
        let q = far / (far - near);
        Self::from_rows([
            [f / aspect_ratio, o, o, o],
            [o, f, o, o],
            [o, o, q, -q * near],
            [o, o, i, o],
        ])
    }

    /// Inverse of a rotation + translation matrix.
    ///
    /// Transposes the 3x3 rotation block and rotates the negated translation
    /// by it. Gives wrong results for matrices with scale, shear or
    /// projection.
    pub fn fast_inverse_rigid(&self) -> Self {
        let m = &self.rows;
        let (o, i) = (T::ZERO, T::ONE);
        let t = Vector3::new(m[0][3], m[1][3], m[2][3]);
        let r0 = Vector3::new(m[0][0], m[1][0], m[2][0]);
        let r1 = Vector3::new(m[0][1], m[1][1], m[2][1]);
        let r2 = Vector3::new(m[0][2], m[1][2], m[2][2]);
        Self::from_rows([
            [r0.x(), r0.y(), r0.z(), -r0.dot(t)],
            [r1.x(), r1.y(), r1.z(), -r1.dot(t)],
            [r2.x(), r2.y(), r2.z(), -r2.dot(t)],
            [o, o, o, i],
        ])
    }

    /// Transforms a point (`w = 1`) without a perspective divide.
    pub fn transform_point(&self, p: Vector3<T>) -> Vector3<T> {
        (*self * p.extend(T::ONE)).truncate()
    }

    /// Transforms a direction (`w = 0`), ignoring translation.
    pub fn transform_direction(&self, d: Vector3<T>) -> Vector3<T> {
        (*self * d.extend(T::ZERO)).truncate()
    }

    /// Upper-left 3x3 block.
    pub fn linear_part(&self) -> Matrix3<T> {
        Matrix3::from_rows(std::array::from_fn(|row| {
            std::array::from_fn(|col| self.rows[row][col])
        }))
    }
}

impl<T: Scalar> From<Matrix3<T>> for Matrix4<T> {
    fn from(m: Matrix3<T>) -> Self {
        let mut out = Self::identity();
        for row in 0..3 {
            out.rows[row][..3].copy_from_slice(&m.rows[row]);
        }
        out
    }
}

impl<T: Scalar, const R: usize, const C: usize> Default for Matrix<T, R, C> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<T: Scalar, const R: usize, const C: usize> From<[[T; C]; R]> for Matrix<T, R, C> {
    fn from(rows: [[T; C]; R]) -> Self {
        Self::from_rows(rows)
    }
}

impl<T: Scalar, const R: usize, const C: usize> TryFrom<&[T]> for Matrix<T, R, C> {
    type Error = MathError;

    fn try_from(values: &[T]) -> Result<Self, Self::Error> {
        Self::from_slice(values)
    }
}

/// Panics on out-of-range indices; use [`Matrix::try_get`] for a checked read.
impl<T, const R: usize, const C: usize> Index<(usize, usize)> for Matrix<T, R, C> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.rows[row][col]
    }
}

impl<T, const R: usize, const C: usize> IndexMut<(usize, usize)> for Matrix<T, R, C> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.rows[row][col]
    }
}

impl<T: Scalar, const R: usize, const C: usize> Add for Matrix<T, R, C> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |a, b| *a += b)
    }
}

impl<T: Scalar, const R: usize, const C: usize> AddAssign for Matrix<T, R, C> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Scalar, const R: usize, const C: usize> Sub for Matrix<T, R, C> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |a, b| *a -= b)
    }
}

impl<T: Scalar, const R: usize, const C: usize> SubAssign for Matrix<T, R, C> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Scalar, const R: usize, const C: usize> Neg for Matrix<T, R, C> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.map(|e| -e)
    }
}

/// Adds a scalar to every element.
impl<T: Scalar, const R: usize, const C: usize> Add<T> for Matrix<T, R, C> {
    type Output = Self;

    fn add(self, rhs: T) -> Self::Output {
        self.map(|e| e + rhs)
    }
}

impl<T: Scalar, const R: usize, const C: usize> AddAssign<T> for Matrix<T, R, C> {
    fn add_assign(&mut self, rhs: T) {
        *self = *self + rhs;
    }
}

impl<T: Scalar, const R: usize, const C: usize> Sub<T> for Matrix<T, R, C> {
    type Output = Self;

    fn sub(self, rhs: T) -> Self::Output {
        self.map(|e| e - rhs)
    }
}

impl<T: Scalar, const R: usize, const C: usize> SubAssign<T> for Matrix<T, R, C> {
    fn sub_assign(&mut self, rhs: T) {
        *self = *self - rhs;
    }
}

impl<T: Scalar, const R: usize, const C: usize> Mul<T> for Matrix<T, R, C> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self::Output {
        self.map(|e| e * rhs)
    }
}

impl<T: Scalar, const R: usize, const C: usize> MulAssign<T> for Matrix<T, R, C> {
    fn mul_assign(&mut self, rhs: T) {
        *self = *self * rhs;
    }
}

impl<T: Scalar, const R: usize, const C: usize> Div<T> for Matrix<T, R, C> {
    type Output = Self;

    fn div(self, rhs: T) -> Self::Output {
        self.map(|e| e / rhs)
    }
}

impl<T: Scalar, const R: usize, const C: usize> DivAssign<T> for Matrix<T, R, C> {
    fn div_assign(&mut self, rhs: T) {
        *self = *self / rhs;
    }
}

/// Matrix product; the inner dimensions must agree.
impl<T: Scalar, const R: usize, const C: usize, const K: usize> Mul<Matrix<T, C, K>>
    for Matrix<T, R, C>
{
    type Output = Matrix<T, R, K>;

    fn mul(self, rhs: Matrix<T, C, K>) -> Self::Output {
        Matrix::from_rows(std::array::from_fn(|row| {
            std::array::from_fn(|col| (0..C).map(|k| self.rows[row][k] * rhs.rows[k][col]).sum::<T>())
        }))
    }
}

impl<T: Scalar, const N: usize> MulAssign for Matrix<T, N, N> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

/// Applies the matrix to a column vector.
impl<T: Scalar, const R: usize, const C: usize> Mul<Vector<T, C>> for Matrix<T, R, C> {
    type Output = Vector<T, R>;

    fn mul(self, rhs: Vector<T, C>) -> Self::Output {
        Vector::from_array(std::array::from_fn(|row| self.row(row).dot(rhs)))
    }
}

impl<T: Scalar> Mul<Vector4<T>> for &Matrix4<T> {
    type Output = Vector4<T>;

    fn mul(self, rhs: Vector4<T>) -> Self::Output {
        *self * rhs
    }
}
