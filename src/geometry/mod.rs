//! Polygon model: vertices, faces, surface normals and triangulation.

mod normal;
mod polygon;
mod triangulate;
mod vertex;

pub use normal::SurfaceNormal;
pub use polygon::{Polygon2D, Polygon3D, Triangle3D};
pub use vertex::Vertex3;
