//! Wavefront OBJ reader.
//!
//! Supported directives: `v x y z [w]`, `vt u v`, `vn x y z`,
//! `f i[/t[/n]] ...`, `mtllib`, `o`. Everything else is skipped. Face
//! indices are 1-based; negative indices count back from the most recent
//! element, as in the OBJ format.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::{info, warn};

use super::material::Material;
use super::model::Model;
use crate::error::LoadError;
use crate::geometry::{Polygon3D, Triangle3D, Vertex3};
use crate::math::{Vec2, Vec3};

#[derive(Debug, Default, Clone, Copy)]
pub struct ObjLoader;

impl ObjLoader {
    /// Loads an `.obj` file. Material libraries are resolved relative to
    /// the file's directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Model, LoadError> {
        let path = path.as_ref();
        let is_obj = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("obj"));
        if !is_obj {
            return Err(LoadError::UnsupportedExtension {
                path: path.to_path_buf(),
            });
        }

        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut model = Self::parse_str(&text, path.parent())?;
        if model.name.is_empty() {
            if let Some(stem) = path.file_stem() {
                model.name = stem.to_string_lossy().into_owned();
            }
        }

        info!(
            path = %path.display(),
            name = %model.name,
            triangles = model.triangles.len(),
            quadrilaterals = model.quadrilaterals.len(),
            ngons = model.ngons.len(),
            material = %model.material.name,
            "loaded model"
        );
        Ok(model)
    }

    /// Parses OBJ text. `base_dir` locates `mtllib` files; without it,
    /// material libraries are skipped.
    pub fn parse_str(text: &str, base_dir: Option<&Path>) -> Result<Model, LoadError> {
        let mut parser = Parser::default();
        for (index, line) in text.lines().enumerate() {
            parser.line(index + 1, line, base_dir)?;
        }
        Ok(parser.model)
    }
}

#[derive(Default)]
struct Parser {
    positions: Vec<Vec3>,
    texture_coordinates: Vec<Vec2>,
    normals: Vec<Vec3>,
    model: Model,
    material_loaded: bool,
}

impl Parser {
    fn line(&mut self, line_no: usize, line: &str, base_dir: Option<&Path>) -> Result<(), LoadError> {
        let mut words = line.split_whitespace();
        let Some(keyword) = words.next() else {
            return Ok(());
        };
        let args: Vec<&str> = words.collect();

        match keyword {
            "v" => {
                let [x, y, z] = floats::<3>(line_no, &args)?;
                let mut position = Vec3::new(x, y, z);
                if let Some(w) = args.get(3) {
                    let w: f32 = number(line_no, w)?;
                    if w != 0.0 {
                        position /= w;
                    }
                }
                self.positions.push(position);
            }
            "vt" => {
                let [u, v] = floats::<2>(line_no, &args)?;
                self.texture_coordinates.push(Vec2::new(u, v));
            }
            "vn" => {
                let [x, y, z] = floats::<3>(line_no, &args)?;
                self.normals.push(Vec3::new(x, y, z).unit());
            }
            "f" => self.face(line_no, &args)?,
            "o" => {
                if let Some(name) = args.first() {
                    self.model.name = (*name).to_owned();
                }
            }
            "mtllib" => self.material_library(&args, base_dir),
            _ => {}
        }
        Ok(())
    }

    fn face(&mut self, line_no: usize, args: &[&str]) -> Result<(), LoadError> {
        if args.len() < 3 {
            return Err(LoadError::parse(
                line_no,
                format!("face needs at least 3 vertices, got {}", args.len()),
            ));
        }

        let vertices = args
            .iter()
            .map(|corner| self.face_vertex(line_no, corner))
            .collect::<Result<Vec<_>, _>>()?;

        match vertices.len() {
            3 => self
                .model
                .triangles
                .push(Triangle3D::new([vertices[0], vertices[1], vertices[2]])),
            4 => self.model.quadrilaterals.push(Polygon3D::new(vertices)),
            _ => self.model.ngons.push(Polygon3D::new(vertices)),
        }
        Ok(())
    }

    /// One `p`, `p/t`, `p//n` or `p/t/n` corner.
    fn face_vertex(&self, line_no: usize, corner: &str) -> Result<Vertex3<f32>, LoadError> {
        let mut parts = corner.split('/');
        let mut vertex = Vertex3::default();

        let position = parts.next().unwrap_or_default();
        vertex.position = lookup(line_no, &self.positions, position)?;

        if let Some(texture) = parts.next().filter(|t| !t.is_empty()) {
            vertex.texture_coordinates = lookup(line_no, &self.texture_coordinates, texture)?;
        }
        if let Some(normal) = parts.next().filter(|n| !n.is_empty()) {
            vertex.normal = lookup(line_no, &self.normals, normal)?;
        }
        Ok(vertex)
    }

    fn material_library(&mut self, args: &[&str], base_dir: Option<&Path>) {
        let (Some(name), Some(dir)) = (args.first(), base_dir) else {
            return;
        };
        if self.material_loaded {
            return;
        }

        let path = dir.join(name);
        match Material::load_library(&path) {
            Ok(materials) => match materials.into_iter().next() {
                Some(material) => {
                    self.model.material = material;
                    self.material_loaded = true;
                }
                None => warn!(path = %path.display(), "material library is empty"),
            },
            Err(err) => warn!(error = %err, "continuing without material"),
        }
    }
}

fn number<T: FromStr>(line_no: usize, token: &str) -> Result<T, LoadError> {
    token
        .parse()
        .map_err(|_| LoadError::parse(line_no, format!("invalid number `{token}`")))
}

/// The first `N` arguments as floats; extra arguments are ignored.
fn floats<const N: usize>(line_no: usize, args: &[&str]) -> Result<[f32; N], LoadError> {
    if args.len() < N {
        return Err(LoadError::parse(
            line_no,
            format!("expected {N} numbers, got {}", args.len()),
        ));
    }
    let mut out = [0.0; N];
    for (slot, token) in out.iter_mut().zip(args) {
        *slot = number(line_no, token)?;
    }
    Ok(out)
}

/// Resolves a 1-based (or negative, relative) OBJ index into `items`.
fn lookup<T: Copy>(line_no: usize, items: &[T], token: &str) -> Result<T, LoadError> {
    let index: i64 = number(line_no, token)?;
    let resolved = match index {
        i if i > 0 => usize::try_from(i - 1).ok(),
        i if i < 0 => usize::try_from(items.len() as i64 + i).ok(),
        _ => None,
    };
    resolved
        .and_then(|i| items.get(i).copied())
        .ok_or(LoadError::InvalidIndex { line: line_no, index })
}
