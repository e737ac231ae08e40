//! 2D primitive rasterization on top of a [`Surface`].
//!
//! Everything here is expressed through the surface's point, line and
//! rectangle primitives in its current draw color, so the same code draws
//! into the owned [`FrameBuffer`](super::FrameBuffer) and into test doubles.
//!
//! # Triangle fill
//!
//! Vertices are sorted by Y, then the triangle is filled as a flat-bottom
//! triangle, a flat-top triangle, or split at the middle vertex's Y into
//! one of each:
//!
//! ```text
//!        v0                   v0
//!        /\                   /\
//!       /  \                 /  \
//!      /    \       =>      /----\ <- split at v1.y
//!     /      \             v1   split
//!    /________\             \    /
//!   v1        v2             \  /
//!                             v2
//! ```
//!
//! Each row `y` in `ceil(top)..=floor(bottom)` covers the pixels
//! `ceil(x_left)..=floor(x_right)`, where the edge positions come from the
//! inverse slopes `dx / dy` of the two non-horizontal edges. Rows and spans
//! are clamped to the surface, so the work per triangle is bounded by the
//! surface size however far its vertices reach.

use super::surface::Surface;
use crate::geometry::Polygon2D;
use crate::math::Vec2;

/// Stateless 2D rasterizer.
#[derive(Debug, Default, Clone, Copy)]
pub struct Renderer2D;

impl Renderer2D {
    pub fn new() -> Self {
        Self
    }

    pub fn draw_point<S: Surface + ?Sized>(&self, surface: &mut S, point: Vec2) {
        surface.draw_point(point.x() as i32, point.y() as i32);
    }

    /// Outlines a `width` x `width` square whose top-left corner is `(x, y)`.
    pub fn draw_point_with_width<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        x: f32,
        y: f32,
        width: f32,
    ) {
        self.draw_rect(surface, x as i32, y as i32, width as i32, width as i32);
    }

    /// Draws the part of the segment that lies on the surface (with a one
    /// pixel margin). Non-finite endpoints draw nothing.
    pub fn draw_line<S: Surface + ?Sized>(&self, surface: &mut S, start: Vec2, end: Vec2) {
        let bounds = (-1.0, -1.0, surface.width() as f32, surface.height() as f32);
        let Some((start, end)) = clip_segment(start, end, bounds) else {
            return;
        };
        surface.draw_line(
            start.x() as i32,
            start.y() as i32,
            end.x() as i32,
            end.y() as i32,
        );
    }

    /// Outline of the `width` x `height` rectangle at `(x, y)`.
    pub fn draw_rect<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) {
        if width <= 0 || height <= 0 {
            return;
        }
        let (x1, y1) = (x + width - 1, y + height - 1);
        surface.draw_line(x, y, x1, y);
        surface.draw_line(x, y1, x1, y1);
        surface.draw_line(x, y, x, y1);
        surface.draw_line(x1, y, x1, y1);
    }

    pub fn fill_rect<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) {
        surface.fill_rect(x, y, x + width, y + height);
    }

    /// Midpoint circle outline with 8-way symmetric plotting.
    pub fn draw_circle<S: Surface + ?Sized>(&self, surface: &mut S, cx: i32, cy: i32, radius: i32) {
        let (mut x, mut y) = (0, radius);
        let mut d = 3 - 2 * radius;
        put_circle_points(surface, cx, cy, x, y);
        while y >= x {
            if d > 0 {
                y -= 1;
                d += 4 * (x - y) + 10;
            } else {
                d += 4 * x + 6;
            }
            x += 1;
            put_circle_points(surface, cx, cy, x, y);
        }
    }

    /// Filled circle drawn as horizontal spans, two or four per step.
    pub fn fill_circle<S: Surface + ?Sized>(&self, surface: &mut S, cx: i32, cy: i32, radius: i32) {
        let (mut x, mut y) = (0, radius);
        let mut m = 5 - 4 * radius;

        while x <= y {
            surface.fill_rect(cx - y, cy - x, cx + y + 1, cy - x + 1);
            surface.fill_rect(cx - y, cy + x, cx + y + 1, cy + x + 1);

            if m > 0 {
                surface.fill_rect(cx - x, cy - y, cx + x + 1, cy - y + 1);
                surface.fill_rect(cx - x, cy + y, cx + x + 1, cy + y + 1);
                y -= 1;
                m -= 8 * y;
            }
            x += 1;
            m += 8 * x + 4;
        }
    }

    /// Connects the points in order and closes the loop.
    pub fn draw_polygon<S: Surface + ?Sized>(&self, surface: &mut S, points: &[Vec2]) {
        if points.len() < 2 {
            return;
        }
        for pair in points.windows(2) {
            self.draw_line(surface, pair[0], pair[1]);
        }
        if let (Some(&last), Some(&first)) = (points.last(), points.first()) {
            self.draw_line(surface, last, first);
        }
    }

    pub fn draw_triangle<S: Surface + ?Sized>(&self, surface: &mut S, triangle: &Polygon2D<f32, 3>) {
        self.draw_polygon(surface, &triangle.vertices);
    }

    /// Fills the triangle, touching only rows and columns on the surface.
    pub fn fill_triangle<S: Surface + ?Sized>(&self, surface: &mut S, triangle: &Polygon2D<f32, 3>) {
        if !triangle.vertices.iter().all(|v| v.x().is_finite() && v.y().is_finite()) {
            return;
        }
        let [mut v0, mut v1, mut v2] = triangle.vertices;
        sort_by_y(&mut v0, &mut v1, &mut v2);

        if (v1.y() - v2.y()).abs() < f32::EPSILON {
            fill_flat_bottom(surface, v0, v1, v2);
            return;
        }
        if (v0.y() - v1.y()).abs() < f32::EPSILON {
            fill_flat_top(surface, v0, v1, v2);
            return;
        }

        let t = (v1.y() - v0.y()) / (v2.y() - v0.y());
        let split = v0.lerp(v2, t);
        fill_flat_bottom(surface, v0, v1, split);
        fill_flat_top(surface, v1, split, v2);
    }
}

fn put_circle_points<S: Surface + ?Sized>(surface: &mut S, cx: i32, cy: i32, x: i32, y: i32) {
    surface.draw_point(cx + x, cy + y);
    surface.draw_point(cx - x, cy + y);
    surface.draw_point(cx + x, cy - y);
    surface.draw_point(cx - x, cy - y);
    surface.draw_point(cx + y, cy + x);
    surface.draw_point(cx - y, cy + x);
    surface.draw_point(cx + y, cy - x);
    surface.draw_point(cx - y, cy - x);
}

/// Three-comparison sort; afterwards `v0.y <= v1.y <= v2.y`.
fn sort_by_y(v0: &mut Vec2, v1: &mut Vec2, v2: &mut Vec2) {
    if v1.y() < v0.y() {
        std::mem::swap(v0, v1);
    }
    if v2.y() < v1.y() {
        std::mem::swap(v1, v2);
    }
    if v1.y() < v0.y() {
        std::mem::swap(v0, v1);
    }
}

/// Liang-Barsky clip of `start..end` against `(min_x, min_y, max_x, max_y)`.
///
/// Runs in `f64` so endpoints far off the surface still clip to the right
/// pixel.
fn clip_segment(start: Vec2, end: Vec2, bounds: (f32, f32, f32, f32)) -> Option<(Vec2, Vec2)> {
    let (x0, y0) = (start.x() as f64, start.y() as f64);
    let (dx, dy) = (end.x() as f64 - x0, end.y() as f64 - y0);
    if !(dx.is_finite() && dy.is_finite()) {
        return None;
    }
    let (min_x, min_y, max_x, max_y) = (
        bounds.0 as f64,
        bounds.1 as f64,
        bounds.2 as f64,
        bounds.3 as f64,
    );

    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    for (p, q) in [(-dx, x0 - min_x), (dx, max_x - x0), (-dy, y0 - min_y), (dy, max_y - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }

    let at = |t: f64| Vec2::new((x0 + dx * t) as f32, (y0 + dy * t) as f32);
    let clipped_start = if t0 > 0.0 { at(t0) } else { start };
    let clipped_end = if t1 < 1.0 { at(t1) } else { end };
    Some((clipped_start, clipped_end))
}

/// Rows `ceil(top)..=floor(bottom)` restricted to the surface.
fn rows_on<S: Surface + ?Sized>(surface: &S, top: f32, bottom: f32) -> std::ops::RangeInclusive<i32> {
    let last = surface.height() as f32 - 1.0;
    top.ceil().max(0.0) as i32..=bottom.floor().min(last) as i32
}

fn span<S: Surface + ?Sized>(surface: &mut S, y: i32, x1: f32, x2: f32) {
    let last = surface.width() as f32 - 1.0;
    let x_left = x1.min(x2).ceil().max(0.0);
    let x_right = x1.max(x2).floor().min(last);
    if x_left <= x_right {
        surface.draw_line(x_left as i32, y, x_right as i32, y);
    }
}

/// `v0` on top, `v1` and `v2` share the bottom Y.
fn fill_flat_bottom<S: Surface + ?Sized>(surface: &mut S, v0: Vec2, v1: Vec2, v2: Vec2) {
    let height = v1.y() - v0.y();
    if height.abs() < f32::EPSILON {
        return;
    }
    let inv_slope_1 = (v1.x() - v0.x()) / height;
    let inv_slope_2 = (v2.x() - v0.x()) / height;

    for y in rows_on(surface, v0.y(), v1.y()) {
        let dy = y as f32 - v0.y();
        span(surface, y, v0.x() + inv_slope_1 * dy, v0.x() + inv_slope_2 * dy);
    }
}

/// `v0` and `v1` share the top Y, `v2` at the bottom.
fn fill_flat_top<S: Surface + ?Sized>(surface: &mut S, v0: Vec2, v1: Vec2, v2: Vec2) {
    let height = v2.y() - v0.y();
    if height.abs() < f32::EPSILON {
        return;
    }
    let inv_slope_1 = (v2.x() - v0.x()) / height;
    let inv_slope_2 = (v2.x() - v1.x()) / height;

    for y in rows_on(surface, v0.y(), v2.y()) {
        let dy = y as f32 - v0.y();
        span(surface, y, v0.x() + inv_slope_1 * dy, v1.x() + inv_slope_2 * dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;
    use crate::render::FrameBuffer;

    fn filled(fb: &FrameBuffer) -> Vec<(i32, i32)> {
        let (w, h) = (fb.width() as i32, fb.height() as i32);
        (0..h)
            .flat_map(|y| (0..w).map(move |x| (x, y)))
            .filter(|&(x, y)| fb.get_pixel(x, y) == Some(colors::RED))
            .collect()
    }

    fn row_span(fb: &FrameBuffer, y: i32) -> Option<(i32, i32)> {
        let xs: Vec<i32> = filled(fb)
            .into_iter()
            .filter(|&(_, py)| py == y)
            .map(|(x, _)| x)
            .collect();
        Some((*xs.iter().min()?, *xs.iter().max()?))
    }

    fn triangle(points: [[f32; 2]; 3]) -> Polygon2D<f32, 3> {
        Polygon2D::new(points.map(|[x, y]| Vec2::new(x, y)))
    }

    #[test]
    fn right_triangle_spans_are_exact() {
        let mut fb = FrameBuffer::new(8, 8);
        fb.set_draw_color(colors::RED);
        Renderer2D.fill_triangle(&mut fb, &triangle([[0.0, 0.0], [4.0, 0.0], [0.0, 4.0]]));

        for y in 0..=4 {
            assert_eq!(row_span(&fb, y), Some((0, 4 - y)), "row {y}");
        }
        assert_eq!(row_span(&fb, 5), None);
        // 5 + 4 + 3 + 2 + 1 pixels, no gaps inside a row.
        assert_eq!(filled(&fb).len(), 15);
    }

    #[test]
    fn fill_is_independent_of_vertex_order() {
        let orders = [
            [[0.0, 0.0], [4.0, 0.0], [0.0, 4.0]],
            [[0.0, 4.0], [0.0, 0.0], [4.0, 0.0]],
            [[4.0, 0.0], [0.0, 4.0], [0.0, 0.0]],
        ];
        let mut reference = None;
        for points in orders {
            let mut fb = FrameBuffer::new(8, 8);
            fb.set_draw_color(colors::RED);
            Renderer2D.fill_triangle(&mut fb, &triangle(points));
            let pixels = filled(&fb);
            match &reference {
                None => reference = Some(pixels),
                Some(r) => assert_eq!(&pixels, r),
            }
        }
    }

    #[test]
    fn general_triangle_is_split_at_middle_vertex() {
        let mut fb = FrameBuffer::new(16, 16);
        fb.set_draw_color(colors::RED);
        Renderer2D.fill_triangle(&mut fb, &triangle([[6.0, 0.0], [0.0, 6.0], [10.0, 10.0]]));

        assert_eq!(row_span(&fb, 0), Some((6, 6)));
        // Middle vertex row reaches from the left vertex to the long edge.
        assert_eq!(row_span(&fb, 6), Some((0, 8)));
        assert_eq!(row_span(&fb, 10), Some((10, 10)));
        assert_eq!(row_span(&fb, 11), None);
    }

    #[test]
    fn circle_outline_is_symmetric() {
        let mut fb = FrameBuffer::new(21, 21);
        fb.set_draw_color(colors::RED);
        Renderer2D.draw_circle(&mut fb, 10, 10, 7);

        let pixels = filled(&fb);
        assert!(pixels.contains(&(17, 10)));
        assert!(pixels.contains(&(10, 3)));
        for &(x, y) in &pixels {
            let (dx, dy) = (x - 10, y - 10);
            for (sx, sy) in [(-dx, dy), (dx, -dy), (dy, dx)] {
                assert!(pixels.contains(&(10 + sx, 10 + sy)), "missing mirror of {dx},{dy}");
            }
            let r2 = dx * dx + dy * dy;
            assert!((36..=64).contains(&r2), "({dx},{dy}) off the circle");
        }
        assert_eq!(fb.get_pixel(10, 10), Some(colors::BACKGROUND));
    }

    #[test]
    fn filled_circle_covers_disc() {
        let mut fb = FrameBuffer::new(21, 21);
        fb.set_draw_color(colors::RED);
        Renderer2D.fill_circle(&mut fb, 10, 10, 5);

        let pixels = filled(&fb);
        for &(x, y) in &pixels {
            let (dx, dy) = (x - 10, y - 10);
            assert!(dx * dx + dy * dy <= 5 * 5 + 5, "({dx},{dy}) outside the disc");
        }
        for (x, y) in [(10, 10), (15, 10), (5, 10), (10, 15), (10, 5), (13, 13)] {
            assert!(pixels.contains(&(x, y)), "({x},{y}) not filled");
        }
        // Rows are solid between their extremes.
        for y in 5..=15 {
            let (lo, hi) = row_span(&fb, y).unwrap();
            assert_eq!((lo..=hi).count(), pixels.iter().filter(|p| p.1 == y).count());
        }
    }

    #[test]
    fn rect_outline_and_polygon() {
        let mut fb = FrameBuffer::new(8, 8);
        fb.set_draw_color(colors::RED);
        Renderer2D.draw_rect(&mut fb, 1, 1, 4, 3);
        assert_eq!(fb.get_pixel(1, 1), Some(colors::RED));
        assert_eq!(fb.get_pixel(4, 3), Some(colors::RED));
        assert_eq!(fb.get_pixel(2, 2), Some(colors::BACKGROUND));
        assert_eq!(fb.get_pixel(5, 1), Some(colors::BACKGROUND));

        let mut fb = FrameBuffer::new(8, 8);
        fb.set_draw_color(colors::RED);
        Renderer2D.draw_polygon(
            &mut fb,
            &[Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.0), Vec2::new(5.0, 5.0)],
        );
        // Closing edge back to the start.
        assert_eq!(fb.get_pixel(3, 3), Some(colors::RED));
    }

    #[test]
    fn point_with_width_outlines_a_square() {
        let mut fb = FrameBuffer::new(8, 8);
        fb.set_draw_color(colors::RED);
        Renderer2D.draw_point_with_width(&mut fb, 2.0, 2.0, 3.0);
        for corner in [(2, 2), (4, 2), (2, 4), (4, 4)] {
            assert_eq!(fb.get_pixel(corner.0, corner.1), Some(colors::RED), "{corner:?}");
        }
        assert_eq!(fb.get_pixel(3, 3), Some(colors::BACKGROUND));
        assert_eq!(fb.get_pixel(5, 2), Some(colors::BACKGROUND));
        assert_eq!(filled(&fb).len(), 8);

        Renderer2D.draw_point_with_width(&mut fb, 6.0, 6.0, 1.0);
        assert_eq!(fb.get_pixel(6, 6), Some(colors::RED));
        assert_eq!(filled(&fb).len(), 9);
    }

    /// Records every line request.
    struct LineLog {
        width: u32,
        height: u32,
        lines: Vec<(i32, i32, i32, i32)>,
    }

    impl LineLog {
        fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                lines: Vec::new(),
            }
        }

        fn within(&self, margin: i32) -> bool {
            let (w, h) = (self.width as i32, self.height as i32);
            self.lines.iter().all(|&(x0, y0, x1, y1)| {
                [x0, x1].iter().all(|x| (-margin..w + margin).contains(x))
                    && [y0, y1].iter().all(|y| (-margin..h + margin).contains(y))
            })
        }
    }

    impl Surface for LineLog {
        fn width(&self) -> u32 {
            self.width
        }

        fn height(&self) -> u32 {
            self.height
        }

        fn set_draw_color(&mut self, _color: u32) {}

        fn clear(&mut self) {}

        fn draw_point(&mut self, _x: i32, _y: i32) {}

        fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
            self.lines.push((x0, y0, x1, y1));
        }
    }

    #[test]
    fn huge_triangle_fill_stays_on_the_surface() {
        let huge = triangle([[-1e9, 1e9], [1e9, 1e9], [4.0, -1e9]]);

        let mut log = LineLog::new(8, 6);
        Renderer2D.fill_triangle(&mut log, &huge);
        assert_eq!(log.lines.len(), 6);
        assert!(log.within(0), "{:?}", log.lines);

        let mut fb = FrameBuffer::new(8, 6);
        fb.set_draw_color(colors::RED);
        Renderer2D.fill_triangle(&mut fb, &huge);
        assert_eq!(filled(&fb).len(), 48);

        // Entirely below the surface: no rows at all.
        let mut log = LineLog::new(8, 6);
        Renderer2D.fill_triangle(&mut log, &triangle([[0.0, 100.0], [1e9, 1e9], [-1e9, 1e9]]));
        assert!(log.lines.is_empty());

        let mut log = LineLog::new(8, 6);
        Renderer2D.fill_triangle(&mut log, &triangle([[0.0, f32::NAN], [4.0, 4.0], [0.0, 4.0]]));
        assert!(log.lines.is_empty());
    }

    #[test]
    fn lines_are_clipped_to_the_surface() {
        let mut log = LineLog::new(8, 8);
        Renderer2D.draw_line(&mut log, Vec2::new(-1e9, 3.0), Vec2::new(1e9, 3.0));
        Renderer2D.draw_line(&mut log, Vec2::new(3.0, -1e9), Vec2::new(4.0, 1e9));
        assert_eq!(log.lines.len(), 2);
        assert!(log.within(1), "{:?}", log.lines);

        // Fully off the surface, or not finite.
        Renderer2D.draw_line(&mut log, Vec2::new(-50.0, -50.0), Vec2::new(-20.0, 100.0));
        Renderer2D.draw_line(&mut log, Vec2::new(f32::INFINITY, 0.0), Vec2::new(2.0, 2.0));
        assert_eq!(log.lines.len(), 2);

        let mut fb = FrameBuffer::new(8, 8);
        fb.set_draw_color(colors::RED);
        Renderer2D.draw_line(&mut fb, Vec2::new(-1e9, 3.0), Vec2::new(1e9, 3.0));
        assert_eq!(row_span(&fb, 3), Some((0, 7)));
        assert_eq!(filled(&fb).len(), 8);

        // Segments already on the surface are left alone.
        let mut log = LineLog::new(8, 8);
        Renderer2D.draw_line(&mut log, Vec2::new(1.0, 2.0), Vec2::new(6.0, 5.0));
        assert_eq!(log.lines, vec![(1, 2, 6, 5)]);
    }
}
