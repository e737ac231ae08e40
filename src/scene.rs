//! The rendered scene: one model, flattened to triangles, spinning in front
//! of the camera.

use std::path::Path;

use tracing::debug;

use crate::error::LoadError;
use crate::geometry::Triangle3D;
use crate::loader::{Model, ObjLoader};
use crate::math::{Mat4, Vec3};
use crate::transform::Transform;

/// OBJ files are right-handed; mirroring Z brings them into the
/// left-handed world.
const HANDEDNESS_FLIP: Vec3 = Vec3::new(1.0, 1.0, -1.0);

pub struct Scene {
    model: Model,
    triangles: Vec<Triangle3D<f32>>,
    transform: Transform,
}

impl Scene {
    pub fn load<P: AsRef<Path>>(path: P, distance: f32) -> Result<Self, LoadError> {
        Ok(Self::from_model(ObjLoader::load(path)?, distance))
    }

    /// Places the centre of the model's bounding box `distance` units down
    /// +Z and triangulates every quad and n-gon.
    pub fn from_model(model: Model, distance: f32) -> Self {
        let triangles = model.to_triangles();
        let pivot = bounds_center(&triangles);
        debug!(triangles = triangles.len(), ?pivot, "scene built");

        let mut transform = Transform::new();
        transform
            .set_pivot(pivot)
            .set_scale(HANDEDNESS_FLIP)
            .set_position_xyz(0.0, 0.0, distance);

        let mut scene = Self {
            model,
            triangles,
            transform,
        };
        scene.update(0.0);
        scene
    }

    /// Sets the spin for `elapsed` seconds since start.
    pub fn update(&mut self, elapsed: f32) {
        self.transform
            .set_rotation_xyz(1.0 + elapsed, 2.0 + elapsed * 0.2, 1.5 + elapsed * 0.2);
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Model-space triangles.
    pub fn triangles(&self) -> &[Triangle3D<f32>] {
        &self.triangles
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.transform.to_matrix()
    }
}

fn bounds_center(triangles: &[Triangle3D<f32>]) -> Vec3 {
    let mut positions = triangles
        .iter()
        .flat_map(|t| t.vertices().iter().map(|v| v.position));
    let Some(first) = positions.next() else {
        return Vec3::ZERO;
    };

    let (min, max) = positions.fold((first, first), |(mut min, mut max), p| {
        for axis in 0..3 {
            min[axis] = min[axis].min(p[axis]);
            max[axis] = max[axis].max(p[axis]);
        }
        (min, max)
    });
    (min + max) * 0.5
}
