//! The 3D pipeline: transform, cull, depth sort, project, rasterize.
//!
//! There is no depth buffer. Visible triangles are ordered by the mean NDC
//! depth of their vertices and painted farthest first, so nearer triangles
//! overwrite farther ones. This is only correct for well-separated convex
//! geometry, which is the accepted trade-off of the painter's algorithm.

use std::cmp::Ordering;

use tracing::trace;

use super::renderer2d::Renderer2D;
use super::surface::Surface;
use crate::colors;
use crate::geometry::{Polygon2D, SurfaceNormal, Triangle3D};
use crate::math::{Mat4, Vec2, Vec3};

/// Back-face test threshold; slightly negative so faces seen edge-on do not
/// flicker between frames.
pub const BACK_FACE_TOLERANCE: f32 = -0.01;

/// Eye position in NDC for a perspective camera.
///
/// The perspective divide sends the eye to infinitely far behind the near
/// plane; a distant point on the -Z axis stands in for it.
pub const NDC_EYE: Vec3 = Vec3::new(0.0, 0.0, -1000.0);

/// Colors used for every triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStyle {
    pub fill: u32,
    pub outline: u32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            fill: colors::WHITE,
            outline: colors::BLACK,
        }
    }
}

/// Per-call pipeline counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    pub submitted: usize,
    /// A vertex was behind the eye or inside the near plane.
    pub near_clipped: usize,
    pub degenerate: usize,
    pub back_facing: usize,
    pub drawn: usize,
}

#[derive(Debug, Default, Clone)]
pub struct Renderer3D {
    renderer2d: Renderer2D,
    style: RenderStyle,
}

impl Renderer3D {
    pub fn new(style: RenderStyle) -> Self {
        Self {
            renderer2d: Renderer2D::new(),
            style,
        }
    }

    pub fn style(&self) -> RenderStyle {
        self.style
    }

    pub fn set_style(&mut self, style: RenderStyle) {
        self.style = style;
    }

    /// Draws `triangles` into `surface`.
    ///
    /// Each triangle is transformed by `view_projection` (with perspective
    /// divide), culled, depth sorted and filled then outlined. Degenerate or
    /// invisible triangles, and those reaching inside the near plane, are
    /// dropped silently. The surface is neither cleared nor presented here.
    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        triangles: &[Triangle3D<f32>],
        view_projection: &Mat4,
        camera_position: Vec3,
    ) -> RenderStats {
        let (visible, mut stats) = self.visible_triangles(triangles, view_projection, camera_position);
        let (width, height) = (surface.width() as f32, surface.height() as f32);

        for triangle in &visible {
            let projected = to_screen(triangle, width, height);

            surface.set_draw_color(self.style.fill);
            self.renderer2d.fill_triangle(surface, &projected);

            surface.set_draw_color(self.style.outline);
            self.renderer2d.draw_triangle(surface, &projected);
        }

        stats.drawn = visible.len();
        trace!(
            submitted = stats.submitted,
            near_clipped = stats.near_clipped,
            degenerate = stats.degenerate,
            back_facing = stats.back_facing,
            drawn = stats.drawn,
            "rendered triangles"
        );
        stats
    }

    /// Transforms and culls `triangles`, returning the survivors in paint
    /// order (farthest first) together with the cull counts.
    pub fn visible_triangles(
        &self,
        triangles: &[Triangle3D<f32>],
        view_projection: &Mat4,
        camera_position: Vec3,
    ) -> (Vec<Triangle3D<f32>>, RenderStats) {
        let mut stats = RenderStats {
            submitted: triangles.len(),
            ..Default::default()
        };

        let mut visible: Vec<Triangle3D<f32>> = triangles
            .iter()
            .filter_map(|triangle| {
                let Some(transformed) = triangle.project_in_front(view_projection) else {
                    stats.near_clipped += 1;
                    return None;
                };
                let normal = match transformed.normal() {
                    SurfaceNormal::Unit(n) => n,
                    SurfaceNormal::Degenerate => {
                        stats.degenerate += 1;
                        return None;
                    }
                };
                let to_face = transformed.vertices()[0].position - camera_position;
                if normal.dot(to_face) < BACK_FACE_TOLERANCE {
                    stats.back_facing += 1;
                    return None;
                }
                Some(transformed)
            })
            .collect();

        visible.sort_by(farthest_first);
        (visible, stats)
    }
}

fn farthest_first(a: &Triangle3D<f32>, b: &Triangle3D<f32>) -> Ordering {
    b.mean_z().total_cmp(&a.mean_z())
}

/// Maps NDC `[-1, 1]` to pixels with Y pointing down.
fn to_screen(triangle: &Triangle3D<f32>, width: f32, height: f32) -> Polygon2D<f32, 3> {
    let mut projected = triangle.to_polygon2d();
    for v in projected.vertices.iter_mut() {
        *v = Vec2::new((v.x() + 1.0) * 0.5 * width, (1.0 - v.y()) * 0.5 * height);
    }
    projected
}
