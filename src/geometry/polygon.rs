//! Planar faces in 3D and their 2D projections.
//!
//! [`Triangle3D`] is the fixed-arity fast path used by culling and
//! rasterization. [`Polygon3D`] holds quads and n-gons and reduces them to
//! triangles through ear clipping. Both carry an eagerly computed
//! [`SurfaceNormal`] that is refreshed on every transform.

use std::ops::{AddAssign, Index, IndexMut, MulAssign};

use super::normal::SurfaceNormal;
use super::triangulate::ear_clip;
use super::vertex::Vertex3;
use crate::error::MathError;
use crate::math::{Matrix3, Matrix4, Scalar, Vector2};

fn normal_of<T: Scalar>(vertices: &[Vertex3<T>]) -> SurfaceNormal<T> {
    match vertices {
        [v0, v1, v2, ..] => SurfaceNormal::from_points(v0.position, v1.position, v2.position),
        _ => SurfaceNormal::Degenerate,
    }
}

/// Projects every vertex and returns the smallest clip-space `w`.
fn project_all<T: Scalar>(vertices: &mut [Vertex3<T>], matrix: &Matrix4<T>) -> Option<T> {
    vertices.iter_mut().fold(None, |min_w, vertex| {
        let w = vertex.project(matrix);
        match min_w {
            Some(m) if m <= w => Some(m),
            _ => Some(w),
        }
    })
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle3D<T> {
    vertices: [Vertex3<T>; 3],
    normal: SurfaceNormal<T>,
}

impl<T: Scalar> Triangle3D<T> {
    pub fn new(vertices: [Vertex3<T>; 3]) -> Self {
        Self {
            normal: normal_of(&vertices),
            vertices,
        }
    }

    pub fn vertices(&self) -> &[Vertex3<T>; 3] {
        &self.vertices
    }

    pub fn normal(&self) -> SurfaceNormal<T> {
        self.normal
    }

    /// Mean Z of the three positions, the painter's sort key.
    pub fn mean_z(&self) -> T {
        let [a, b, c] = &self.vertices;
        (a.position.z() + b.position.z() + c.position.z()) / T::from_f64(3.0)
    }

    /// Applies `matrix` with perspective divide and recomputes the normal.
    pub fn transform_by_matrix4x4(&mut self, matrix: &Matrix4<T>) {
        project_all(&mut self.vertices, matrix);
        self.normal = normal_of(&self.vertices);
    }

    pub fn copy_transformed_by_matrix4x4(&self, matrix: &Matrix4<T>) -> Self {
        let mut copy = *self;
        copy.transform_by_matrix4x4(matrix);
        copy
    }

    /// Like [`Triangle3D::copy_transformed_by_matrix4x4`], but rejects the
    /// triangle when any vertex lands at or behind the eye (`w <= 0`) or
    /// between the eye and the near plane (NDC `z < 0`). Vertices that close
    /// divide out to unbounded screen coordinates.
    pub fn project_in_front(&self, matrix: &Matrix4<T>) -> Option<Self> {
        let mut copy = *self;
        let min_w = project_all(&mut copy.vertices, matrix)?;
        if min_w <= T::ZERO || copy.vertices.iter().any(|v| v.position.z() < T::ZERO) {
            return None;
        }
        copy.normal = normal_of(&copy.vertices);
        Some(copy)
    }

    /// Applies a 3x3 matrix to positions and vertex normals.
    pub fn copy_transformed_by_matrix3x3(&self, matrix: &Matrix3<T>) -> Self {
        Self::new(self.vertices.map(|v| v.transformed(matrix)))
    }

    /// Drops Z, keeping `(x, y)` of each vertex in order.
    pub fn to_polygon2d(&self) -> Polygon2D<T, 3> {
        Polygon2D::new(self.vertices.map(|v| v.position.xy()))
    }
}

impl<T: Scalar> From<[Vertex3<T>; 3]> for Triangle3D<T> {
    fn from(vertices: [Vertex3<T>; 3]) -> Self {
        Self::new(vertices)
    }
}

/// A face with any number of vertices (quads and n-gons).
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon3D<T> {
    vertices: Vec<Vertex3<T>>,
    normal: SurfaceNormal<T>,
}

impl<T: Scalar> Polygon3D<T> {
    /// Faces with fewer than three vertices get a degenerate normal.
    pub fn new(vertices: Vec<Vertex3<T>>) -> Self {
        Self {
            normal: normal_of(&vertices),
            vertices,
        }
    }

    pub fn vertices(&self) -> &[Vertex3<T>] {
        &self.vertices
    }

    pub fn normal(&self) -> SurfaceNormal<T> {
        self.normal
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Applies `matrix` with perspective divide and recomputes the normal.
    pub fn transform_by_matrix4x4(&mut self, matrix: &Matrix4<T>) {
        project_all(&mut self.vertices, matrix);
        self.normal = normal_of(&self.vertices);
    }

    pub fn copy_transformed_by_matrix4x4(&self, matrix: &Matrix4<T>) -> Self {
        let mut copy = self.clone();
        copy.transform_by_matrix4x4(matrix);
        copy
    }

    /// Applies a 3x3 matrix to positions and vertex normals.
    pub fn copy_transformed_by_matrix3x3(&self, matrix: &Matrix3<T>) -> Self {
        Self::new(self.vertices.iter().map(|v| v.transformed(matrix)).collect())
    }

    /// Drops Z; fails unless the polygon has exactly `N` vertices.
    pub fn to_polygon2d<const N: usize>(&self) -> Result<Polygon2D<T, N>, MathError> {
        let points: Vec<Vector2<T>> = self.vertices.iter().map(|v| v.position.xy()).collect();
        Polygon2D::from_slice(&points)
    }

    /// Splits the face into `len() - 2` triangles by ear clipping.
    ///
    /// Fewer than three vertices yield nothing; a triangle yields itself.
    pub fn triangulate(&self) -> Vec<Triangle3D<T>> {
        ear_clip(&self.vertices, self.normal)
    }
}

impl<T: Scalar> From<Triangle3D<T>> for Polygon3D<T> {
    fn from(triangle: Triangle3D<T>) -> Self {
        Self {
            vertices: triangle.vertices.to_vec(),
            normal: triangle.normal,
        }
    }
}

/// A projected face: `N` points in the plane, in the source vertex order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Polygon2D<T, const N: usize> {
    pub vertices: [Vector2<T>; N],
}

impl<T: Scalar, const N: usize> Polygon2D<T, N> {
    const NON_EMPTY: () = assert!(N > 0, "polygons need at least one vertex");

    pub const fn new(vertices: [Vector2<T>; N]) -> Self {
        let () = Self::NON_EMPTY;
        Self { vertices }
    }

    pub fn from_slice(points: &[Vector2<T>]) -> Result<Self, MathError> {
        let vertices: [Vector2<T>; N] = points.try_into().map_err(|_| MathError::ElementCount {
            expected: N,
            actual: points.len(),
        })?;
        Ok(Self::new(vertices))
    }

    pub fn scale_x(&mut self, factor: T) {
        for v in self.vertices.iter_mut() {
            v[0] *= factor;
        }
    }

    pub fn scale_y(&mut self, factor: T) {
        for v in self.vertices.iter_mut() {
            v[1] *= factor;
        }
    }

    /// Returns `(x0, y0, x1, y1)` of the axis-aligned bounding box.
    pub fn bounds(&self) -> (T, T, T, T) {
        let first = self.vertices[0];
        self.vertices.iter().fold(
            (first.x(), first.y(), first.x(), first.y()),
            |(x0, y0, x1, y1), v| {
                (
                    if v.x() < x0 { v.x() } else { x0 },
                    if v.y() < y0 { v.y() } else { y0 },
                    if v.x() > x1 { v.x() } else { x1 },
                    if v.y() > y1 { v.y() } else { y1 },
                )
            },
        )
    }
}

/// Translates every vertex.
impl<T: Scalar, const N: usize> AddAssign<Vector2<T>> for Polygon2D<T, N> {
    fn add_assign(&mut self, translation: Vector2<T>) {
        for v in self.vertices.iter_mut() {
            *v += translation;
        }
    }
}

/// Uniform scale about the origin.
impl<T: Scalar, const N: usize> MulAssign<T> for Polygon2D<T, N> {
    fn mul_assign(&mut self, factor: T) {
        for v in self.vertices.iter_mut() {
            *v *= factor;
        }
    }
}

impl<T, const N: usize> Index<usize> for Polygon2D<T, N> {
    type Output = Vector2<T>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.vertices[index]
    }
}

impl<T, const N: usize> IndexMut<usize> for Polygon2D<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.vertices[index]
    }
}
