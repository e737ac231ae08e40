use crate::math::{Matrix3, Matrix4, Scalar, Vector2, Vector3};

/// A mesh vertex: position, normal and texture coordinates.
///
/// Defaults to all zeros.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex3<T> {
    pub position: Vector3<T>,
    pub normal: Vector3<T>,
    pub texture_coordinates: Vector2<T>,
}

impl<T: Scalar> Default for Vertex3<T> {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl<T: Scalar> Vertex3<T> {
    pub fn new(position: Vector3<T>, normal: Vector3<T>, texture_coordinates: Vector2<T>) -> Self {
        Self {
            position,
            normal,
            texture_coordinates,
        }
    }

    /// A vertex with only a position; normal and texture coordinates are zero.
    pub fn from_position(position: Vector3<T>) -> Self {
        Self {
            position,
            ..Self::zeroed()
        }
    }

    pub fn from_xyz(x: T, y: T, z: T) -> Self {
        Self::from_position(Vector3::new(x, y, z))
    }

    fn zeroed() -> Self {
        Self {
            position: Vector3::ZERO,
            normal: Vector3::ZERO,
            texture_coordinates: Vector2::ZERO,
        }
    }

    /// Applies a 3x3 matrix to both the position and the normal.
    pub fn transform(&mut self, matrix: &Matrix3<T>) {
        self.position = *matrix * self.position;
        self.normal = *matrix * self.normal;
    }

    pub fn transformed(&self, matrix: &Matrix3<T>) -> Self {
        let mut copy = *self;
        copy.transform(matrix);
        copy
    }

    /// Lifts the position to `(x, y, z, 1)`, applies `matrix` and divides by
    /// the resulting `w`. The divide is skipped when `w` is exactly zero.
    ///
    /// Returns the clip-space `w` alongside so callers can reject vertices
    /// behind the eye.
    pub fn project(&mut self, matrix: &Matrix4<T>) -> T {
        let clip = *matrix * self.position.extend(T::ONE);
        let w = clip.w();
        self.position = if w == T::ZERO {
            clip.truncate()
        } else {
            clip.truncate() / w
        };
        w
    }
}
