use crate::math::{Scalar, Vector3};

/// Orientation of a planar face.
///
/// Computed eagerly whenever a polygon is built or transformed, from its
/// first three vertices: `(v1 - v0) x (v2 - v0)`, normalized. Colinear or
/// coincident vertices produce [`SurfaceNormal::Degenerate`], which the
/// renderer culls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceNormal<T> {
    Unit(Vector3<T>),
    Degenerate,
}

impl<T: Scalar> SurfaceNormal<T> {
    pub fn from_points(v0: Vector3<T>, v1: Vector3<T>, v2: Vector3<T>) -> Self {
        Self::from_vector((v1 - v0).cross(v2 - v0))
    }

    /// Normalizes `v`; zero-length (below the unit epsilon) input is degenerate.
    pub fn from_vector(v: Vector3<T>) -> Self {
        let unit = v.unit();
        if unit.is_zero() {
            Self::Degenerate
        } else {
            Self::Unit(unit)
        }
    }

    pub fn unit(&self) -> Option<Vector3<T>> {
        match *self {
            Self::Unit(n) => Some(n),
            Self::Degenerate => None,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::Degenerate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    #[test]
    fn counter_clockwise_xy_triangle_faces_plus_z() {
        let n = SurfaceNormal::from_points(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        assert_eq!(n, SurfaceNormal::Unit(Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn colinear_points_are_degenerate() {
        let n = SurfaceNormal::from_points(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(2.0, 2.0, 2.0),
        );
        assert!(n.is_degenerate());
        assert_eq!(n.unit(), None);

        let same = Vec3::new(3.0, 1.0, 2.0);
        assert!(SurfaceNormal::from_points(same, same, same).is_degenerate());
    }
}
