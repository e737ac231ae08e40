use crate::geometry::{Polygon3D, Triangle3D};

use super::material::Material;

/// Faces of one loaded mesh grouped by arity, plus its material.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub name: String,
    pub triangles: Vec<Triangle3D<f32>>,
    /// Four-sided faces.
    pub quadrilaterals: Vec<Polygon3D<f32>>,
    /// Faces with more than four sides.
    pub ngons: Vec<Polygon3D<f32>>,
    pub material: Material,
}

impl Model {
    pub fn face_count(&self) -> usize {
        self.triangles.len() + self.quadrilaterals.len() + self.ngons.len()
    }

    /// Every face as triangles: triangles first, then triangulated quads,
    /// then triangulated n-gons.
    pub fn to_triangles(&self) -> Vec<Triangle3D<f32>> {
        let mut out = self.triangles.clone();
        for polygon in self.quadrilaterals.iter().chain(&self.ngons) {
            out.extend(polygon.triangulate());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vertex3;

    #[test]
    fn flattening_triangulates_quads_and_ngons() {
        let quad = Polygon3D::new(vec![
            Vertex3::from_xyz(0.0, 0.0, 0.0),
            Vertex3::from_xyz(1.0, 0.0, 0.0),
            Vertex3::from_xyz(1.0, 1.0, 0.0),
            Vertex3::from_xyz(0.0, 1.0, 0.0),
        ]);
        let pentagon = Polygon3D::new(vec![
            Vertex3::from_xyz(0.0, 0.0, 0.0),
            Vertex3::from_xyz(2.0, 0.0, 0.0),
            Vertex3::from_xyz(3.0, 1.0, 0.0),
            Vertex3::from_xyz(1.0, 2.0, 0.0),
            Vertex3::from_xyz(-1.0, 1.0, 0.0),
        ]);
        let triangle = Triangle3D::new([
            Vertex3::from_xyz(0.0, 0.0, 1.0),
            Vertex3::from_xyz(1.0, 0.0, 1.0),
            Vertex3::from_xyz(0.0, 1.0, 1.0),
        ]);

        let model = Model {
            triangles: vec![triangle],
            quadrilaterals: vec![quad],
            ngons: vec![pentagon],
            ..Default::default()
        };

        assert_eq!(model.face_count(), 3);
        let triangles = model.to_triangles();
        assert_eq!(triangles.len(), 1 + 2 + 3);
        assert_eq!(triangles[0], triangle);
    }
}
