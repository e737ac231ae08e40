use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use polyrast::geometry::{Polygon2D, Triangle3D, Vertex3};
use polyrast::math::{Mat4, Vec2};
use polyrast::render::{FrameBuffer, RenderStyle, Renderer2D, Renderer3D, NDC_EYE};
use polyrast::ObjLoader;

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn triangle(a: (f32, f32), b: (f32, f32), c: (f32, f32)) -> Polygon2D<f32, 3> {
    Polygon2D::new([Vec2::new(a.0, a.1), Vec2::new(b.0, b.1), Vec2::new(c.0, c.1)])
}

fn small_triangle() -> Polygon2D<f32, 3> {
    triangle((100.0, 100.0), (120.0, 100.0), (110.0, 120.0))
}

fn medium_triangle() -> Polygon2D<f32, 3> {
    triangle((100.0, 100.0), (300.0, 100.0), (200.0, 300.0))
}

fn large_triangle() -> Polygon2D<f32, 3> {
    triangle((50.0, 50.0), (750.0, 100.0), (400.0, 550.0))
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");
    let renderer = Renderer2D::new();

    for (name, tri) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
    ] {
        group.bench_with_input(BenchmarkId::new("fill", name), &tri, |b, tri| {
            let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            b.iter(|| renderer.fill_triangle(&mut fb, black_box(tri)));
        });

        group.bench_with_input(BenchmarkId::new("outline", name), &tri, |b, tri| {
            let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            b.iter(|| renderer.draw_triangle(&mut fb, black_box(tri)));
        });
    }

    group.finish();
}

fn benchmark_triangle_grid(c: &mut Criterion) {
    // 20x10 cells, two triangles each.
    let mut triangles = Vec::with_capacity(400);
    for row in 0..10 {
        for col in 0..20 {
            let x = col as f32 * 40.0;
            let y = row as f32 * 60.0;
            triangles.push(triangle((x, y), (x + 40.0, y), (x, y + 60.0)));
            triangles.push(triangle((x + 40.0, y), (x + 40.0, y + 60.0), (x, y + 60.0)));
        }
    }

    let renderer = Renderer2D::new();
    c.bench_function("grid_400_triangles", |b| {
        let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
        b.iter(|| {
            for tri in &triangles {
                renderer.fill_triangle(&mut fb, black_box(tri));
            }
        });
    });
}

/// A wavy height field facing the camera, `n * n * 2` triangles.
fn height_field(n: usize) -> Vec<Triangle3D<f32>> {
    let point = |i: usize, j: usize| {
        let x = i as f32 / n as f32 * 2.0 - 1.0;
        let y = j as f32 / n as f32 * 2.0 - 1.0;
        Vertex3::from_xyz(x, y, 0.1 * (x * 6.0).sin() * (y * 6.0).cos())
    };

    let mut triangles = Vec::with_capacity(n * n * 2);
    for i in 0..n {
        for j in 0..n {
            triangles.push(Triangle3D::new([point(i, j), point(i, j + 1), point(i + 1, j)]));
            triangles.push(Triangle3D::new([point(i + 1, j), point(i, j + 1), point(i + 1, j + 1)]));
        }
    }
    triangles
}

fn benchmark_full_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render3d");
    let renderer = Renderer3D::new(RenderStyle::default());
    let projection = Mat4::perspective_lh(
        std::f32::consts::FRAC_PI_2,
        BUFFER_WIDTH as f32 / BUFFER_HEIGHT as f32,
        0.1,
        100.0,
    );
    let mvp = projection
        * Mat4::translation(0.0, 0.0, 3.0)
        * Mat4::rotation_xyz(0.6, 0.8, 0.2);

    let cube_path = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/models/cube.obj");
    if let Ok(cube) = ObjLoader::load(cube_path) {
        let triangles = cube.to_triangles();
        group.bench_function("cube", |b| {
            let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            b.iter(|| renderer.render(&mut fb, black_box(&triangles), &mvp, NDC_EYE));
        });
    }

    for n in [16, 64] {
        let triangles = height_field(n);
        group.bench_with_input(
            BenchmarkId::new("height_field", triangles.len()),
            &triangles,
            |b, triangles| {
                let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
                b.iter(|| renderer.render(&mut fb, black_box(triangles), &mvp, NDC_EYE));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_single_triangle,
    benchmark_triangle_grid,
    benchmark_full_render
);
criterion_main!(benches);
