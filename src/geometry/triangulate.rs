//! Ear-clipping triangulation of planar polygons.

use tracing::warn;

use super::normal::SurfaceNormal;
use super::polygon::Triangle3D;
use super::vertex::Vertex3;
use crate::math::{Scalar, Vector2, Vector3};

/// Tolerance of the barycentric containment test.
const CONTAINMENT_EPSILON: f64 = 1e-10;

/// Triangulates `vertices` in the plane orthogonal to `normal`.
///
/// The polygon is projected by dropping the normal's dominant axis, with the
/// remaining pair ordered so a face wound counter-clockwise about its normal
/// stays counter-clockwise in 2D. Winding that disagrees with the normal is
/// detected from the signed area and handled by flipping the convexity test.
/// If no ear can be found the remainder is fanned from its first vertex.
pub(crate) fn ear_clip<T: Scalar>(
    vertices: &[Vertex3<T>],
    normal: SurfaceNormal<T>,
) -> Vec<Triangle3D<T>> {
    let n = vertices.len();
    if n < 3 {
        return Vec::new();
    }
    let triangle = |a: usize, b: usize, c: usize| {
        Triangle3D::new([vertices[a], vertices[b], vertices[c]])
    };
    if n == 3 {
        return vec![triangle(0, 1, 2)];
    }

    let plane_normal = normal.unit().unwrap_or_else(|| newell_normal(vertices));
    let mut indices: Vec<usize> = (0..n).collect();
    let mut triangles = Vec::with_capacity(n - 2);

    if plane_normal.is_zero() {
        warn!(vertices = n, "polygon has no plane, fan triangulating");
        fan(&indices, &mut triangles, triangle);
        return triangles;
    }

    let (u, v) = projection_axes(plane_normal);
    let points: Vec<Vector2<T>> = vertices
        .iter()
        .map(|vertex| Vector2::new(vertex.position[u], vertex.position[v]))
        .collect();

    let orientation = if signed_area(&points) < T::ZERO {
        warn!(
            vertices = n,
            "polygon winding is clockwise about its normal, clipping with reversed orientation"
        );
        -T::ONE
    } else {
        T::ONE
    };

    while indices.len() > 3 {
        let count = indices.len();
        let ear = (0..count).find(|&i| {
            let prev = indices[(i + count - 1) % count];
            let cur = indices[i];
            let next = indices[(i + 1) % count];
            let (a, b, c) = (points[prev], points[cur], points[next]);

            let turn = (b - a).perp_dot(c - b) * orientation;
            if turn <= T::ZERO {
                return false;
            }
            !indices
                .iter()
                .filter(|&&k| k != prev && k != cur && k != next)
                .any(|&k| point_in_triangle(points[k], a, b, c))
        });

        match ear {
            Some(i) => {
                let prev = indices[(i + count - 1) % count];
                let next = indices[(i + 1) % count];
                triangles.push(triangle(prev, indices[i], next));
                indices.remove(i);
            }
            None => {
                warn!(
                    vertices = n,
                    remaining = count,
                    "no ear found, fan triangulating the remainder"
                );
                fan(&indices, &mut triangles, triangle);
                return triangles;
            }
        }
    }

    triangles.push(triangle(indices[0], indices[1], indices[2]));
    triangles
}

fn fan<T, F>(indices: &[usize], out: &mut Vec<Triangle3D<T>>, triangle: F)
where
    F: Fn(usize, usize, usize) -> Triangle3D<T>,
{
    for pair in indices[1..].windows(2) {
        out.push(triangle(indices[0], pair[0], pair[1]));
    }
}

/// Axes kept when projecting along the dominant component of `normal`.
fn projection_axes<T: Scalar>(normal: Vector3<T>) -> (usize, usize) {
    let [x, y, z] = normal.components.map(|c| c.abs());
    let dominant = if x >= y && x >= z {
        0
    } else if y >= z {
        1
    } else {
        2
    };
    let (u, v) = ((dominant + 1) % 3, (dominant + 2) % 3);
    if normal[dominant] < T::ZERO {
        (v, u)
    } else {
        (u, v)
    }
}

/// Area-weighted normal, valid even when the first three vertices are colinear.
fn newell_normal<T: Scalar>(vertices: &[Vertex3<T>]) -> Vector3<T> {
    let mut normal = Vector3::ZERO;
    for (i, current) in vertices.iter().enumerate() {
        let next = vertices[(i + 1) % vertices.len()];
        normal += current.position.cross(next.position);
    }
    normal
}

/// Twice the signed area; positive for counter-clockwise winding.
fn signed_area<T: Scalar>(points: &[Vector2<T>]) -> T {
    (0..points.len())
        .map(|i| points[i].perp_dot(points[(i + 1) % points.len()]))
        .sum()
}

/// Barycentric test, inclusive of the edges.
fn point_in_triangle<T: Scalar>(p: Vector2<T>, a: Vector2<T>, b: Vector2<T>, c: Vector2<T>) -> bool {
    let v0 = c - a;
    let v1 = b - a;
    let v2 = p - a;

    let dot00 = v0.dot(v0);
    let dot01 = v0.dot(v1);
    let dot02 = v0.dot(v2);
    let dot11 = v1.dot(v1);
    let dot12 = v1.dot(v2);

    let denom = dot00 * dot11 - dot01 * dot01;
    if denom == T::ZERO {
        return false;
    }
    let u = (dot11 * dot02 - dot01 * dot12) / denom;
    let v = (dot00 * dot12 - dot01 * dot02) / denom;

    let epsilon = T::from_f64(CONTAINMENT_EPSILON);
    u >= -epsilon && v >= -epsilon && u + v <= T::ONE + epsilon
}
