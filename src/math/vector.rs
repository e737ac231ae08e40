//! Fixed-size numeric vectors.
//!
//! [`Vector<T, N>`] stores `N` components of a [`Scalar`] type. Arithmetic is
//! component-wise; [`Vector::dot`] works for any `N`, while the cross product
//! and quaternion rotation exist only for `N == 3`.
//!
//! A zero-dimensional vector is rejected when the type is instantiated, so
//! `Vector<f32, 0>` fails to compile as soon as it is constructed.

use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

use super::quaternion::Quaternion;
use super::scalar::Scalar;
use crate::error::MathError;

/// Lengths below this are treated as zero by [`Vector::unit`] and [`Vector::normalize`].
pub const UNIT_LENGTH_EPSILON: f64 = 1e-10;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector<T, const N: usize> {
    pub components: [T; N],
}

pub type Vector2<T> = Vector<T, 2>;
pub type Vector3<T> = Vector<T, 3>;
pub type Vector4<T> = Vector<T, 4>;

pub type Vec2 = Vector2<f32>;
pub type Vec3 = Vector3<f32>;
pub type Vec4 = Vector4<f32>;

impl<T: Scalar, const N: usize> Vector<T, N> {
    const NON_EMPTY: () = assert!(N > 0, "zero-dimensional vectors are not defined");

    pub const ZERO: Self = Self::from_array([T::ZERO; N]);
    pub const ONE: Self = Self::from_array([T::ONE; N]);

    pub const fn from_array(components: [T; N]) -> Self {
        let () = Self::NON_EMPTY;
        Self { components }
    }

    pub fn zeros() -> Self {
        Self::from_array([T::ZERO; N])
    }

    /// Bounds-checked component read.
    pub fn try_get(&self, index: usize) -> Result<T, MathError> {
        self.components
            .get(index)
            .copied()
            .ok_or(MathError::IndexOutOfRange { index, len: N })
    }

    /// Bounds-checked component write.
    pub fn try_set(&mut self, index: usize, value: T) -> Result<(), MathError> {
        let slot = self
            .components
            .get_mut(index)
            .ok_or(MathError::IndexOutOfRange { index, len: N })?;
        *slot = value;
        Ok(())
    }

    /// Converts every component into another scalar type.
    pub fn cast<U: Scalar>(&self) -> Vector<U, N> {
        Vector::from_array(self.components.map(|c| U::from_f64(c.to_f64())))
    }

    pub fn dot(&self, other: Self) -> T {
        self.components
            .iter()
            .zip(other.components.iter())
            .map(|(&a, &b)| a * b)
            .sum()
    }

    /// Sum of squared components, i.e. the squared length.
    pub fn length_squared(&self) -> T {
        self.dot(*self)
    }

    pub fn length(&self) -> T {
        self.length_squared().sqrt()
    }

    pub fn component_sum(&self) -> T {
        self.components.iter().copied().sum()
    }

    pub fn is_zero(&self) -> bool {
        self.components.iter().all(|&c| c == T::ZERO)
    }

    /// Returns a unit-length copy, or the zero vector when the length is
    /// below [`UNIT_LENGTH_EPSILON`].
    pub fn unit(&self) -> Self {
        let length = self.length();
        if length.to_f64() < UNIT_LENGTH_EPSILON {
            return Self::zeros();
        }
        *self / length
    }

    /// Normalizes in place; leaves near-zero vectors untouched.
    pub fn normalize(&mut self) {
        let length = self.length();
        if length.to_f64() < UNIT_LENGTH_EPSILON {
            return;
        }
        *self /= length;
    }

    /// Linearly interpolate between two vectors.
    pub fn lerp(self, other: Self, t: T) -> Self {
        self + (other - self) * t
    }
}

impl<T: Scalar> Vector<T, 2> {
    pub const fn new(x: T, y: T) -> Self {
        Self { components: [x, y] }
    }

    /// 2D cross product (z component of the 3D cross product).
    pub fn perp_dot(&self, other: Self) -> T {
        self.x() * other.y() - self.y() * other.x()
    }
}

impl<T: Scalar> Vector<T, 3> {
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self {
            components: [x, y, z],
        }
    }

    /// Returns the cross product of two vectors.
    /// The resulting vector is perpendicular to both input vectors.
    pub fn cross(&self, other: Self) -> Self {
        let [v1, v2, v3] = self.components;
        let [w1, w2, w3] = other.components;
        Self::new(v2 * w3 - v3 * w2, v3 * w1 - v1 * w3, v1 * w2 - v2 * w1)
    }

    /// Lift to homogeneous coordinates with the given `w`.
    pub fn extend(&self, w: T) -> Vector4<T> {
        Vector4::new(self.x(), self.y(), self.z(), w)
    }

    pub fn xy(&self) -> Vector2<T> {
        Vector2::new(self.x(), self.y())
    }

    /// Rotate in place by a unit quaternion: `q * p * conjugate(q)` with `p`
    /// the vector lifted to a pure quaternion.
    pub fn rotate_by_quaternion(&mut self, rotation: Quaternion<T>) {
        *self = self.copy_rotated_by_quaternion(rotation);
    }

    pub fn copy_rotated_by_quaternion(&self, rotation: Quaternion<T>) -> Self {
        let p = Quaternion::pure(*self);
        (rotation * p * rotation.conjugate()).vector_part()
    }
}

impl<T: Scalar> Vector<T, 4> {
    pub const fn new(x: T, y: T, z: T, w: T) -> Self {
        Self {
            components: [x, y, z, w],
        }
    }

    /// Drops `w`.
    pub fn truncate(&self) -> Vector3<T> {
        Vector3::new(self.x(), self.y(), self.z())
    }

    pub fn w(&self) -> T {
        self.components[3]
    }
}

macro_rules! component_accessors {
    ($n:literal => $($name:ident: $index:literal),+) => {
        impl<T: Scalar> Vector<T, $n> {
            $(
                #[inline]
                pub fn $name(&self) -> T {
                    self.components[$index]
                }
            )+
        }
    };
}

component_accessors!(2 => x: 0, y: 1);
component_accessors!(3 => x: 0, y: 1, z: 2);
component_accessors!(4 => x: 0, y: 1, z: 2);

impl<T: Scalar, const N: usize> Default for Vector<T, N> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<T: Scalar, const N: usize> From<[T; N]> for Vector<T, N> {
    fn from(components: [T; N]) -> Self {
        Self::from_array(components)
    }
}

/// Construction from a list of exactly `N` values.
impl<T: Scalar, const N: usize> TryFrom<&[T]> for Vector<T, N> {
    type Error = MathError;

    fn try_from(values: &[T]) -> Result<Self, Self::Error> {
        let components: [T; N] = values.try_into().map_err(|_| MathError::ElementCount {
            expected: N,
            actual: values.len(),
        })?;
        Ok(Self::from_array(components))
    }
}

/// Panics when `index >= N`; use [`Vector::try_get`] for a checked read.
impl<T, const N: usize> Index<usize> for Vector<T, N> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.components[index]
    }
}

impl<T, const N: usize> IndexMut<usize> for Vector<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.components[index]
    }
}

/// Component-wise addition of two vectors.
impl<T: Scalar, const N: usize> Add for Vector<T, N> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl<T: Scalar, const N: usize> AddAssign for Vector<T, N> {
    fn add_assign(&mut self, rhs: Self) {
        for (a, b) in self.components.iter_mut().zip(rhs.components) {
            *a += b;
        }
    }
}

/// Component-wise subtraction of two vectors.
impl<T: Scalar, const N: usize> Sub for Vector<T, N> {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self::Output {
        self -= rhs;
        self
    }
}

impl<T: Scalar, const N: usize> SubAssign for Vector<T, N> {
    fn sub_assign(&mut self, rhs: Self) {
        for (a, b) in self.components.iter_mut().zip(rhs.components) {
            *a -= b;
        }
    }
}

impl<T: Scalar, const N: usize> Neg for Vector<T, N> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::from_array(self.components.map(|c| -c))
    }
}

/// Scalar multiplication of a vector.
impl<T: Scalar, const N: usize> Mul<T> for Vector<T, N> {
    type Output = Self;

    fn mul(mut self, rhs: T) -> Self::Output {
        self *= rhs;
        self
    }
}

impl<T: Scalar, const N: usize> MulAssign<T> for Vector<T, N> {
    fn mul_assign(&mut self, rhs: T) {
        for c in self.components.iter_mut() {
            *c *= rhs;
        }
    }
}

/// Scalar division of a vector.
impl<T: Scalar, const N: usize> Div<T> for Vector<T, N> {
    type Output = Self;

    fn div(mut self, rhs: T) -> Self::Output {
        self /= rhs;
        self
    }
}

impl<T: Scalar, const N: usize> DivAssign<T> for Vector<T, N> {
    fn div_assign(&mut self, rhs: T) {
        for c in self.components.iter_mut() {
            *c /= rhs;
        }
    }
}
