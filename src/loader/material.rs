//! Surface material descriptions from `.mtl` libraries.
//!
//! Materials are carried with a model for completeness; nothing in the
//! pipeline shades with them.

use std::path::Path;

use tracing::debug;

use crate::error::LoadError;
use crate::math::Vec3;

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub ambient_color: Vec3,
    pub diffuse_color: Vec3,
    pub specular_color: Vec3,
    pub specular_exponent: f32,
    /// Opacity in `[0, 1]`; `Tr` values are stored inverted.
    pub dissolve: f32,
    pub optical_density: f32,
    pub illumination: u8,
    pub ambient_color_map: Option<String>,
    pub diffuse_color_map: Option<String>,
    pub specular_color_map: Option<String>,
    pub specular_exponent_map: Option<String>,
    pub dissolve_map: Option<String>,
    pub bump_map: Option<String>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            ambient_color: Vec3::ZERO,
            diffuse_color: Vec3::ONE,
            specular_color: Vec3::ZERO,
            specular_exponent: 0.0,
            dissolve: 1.0,
            optical_density: 1.0,
            illumination: 0,
            ambient_color_map: None,
            diffuse_color_map: None,
            specular_color_map: None,
            specular_exponent_map: None,
            dissolve_map: None,
            bump_map: None,
        }
    }
}

impl Material {
    /// Reads every material in the library at `path`, in file order.
    pub fn load_library<P: AsRef<Path>>(path: P) -> Result<Vec<Material>, LoadError> {
        let path = path.as_ref();
        let (materials, _) = tobj::load_mtl(path).map_err(|source| LoadError::Material {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), count = materials.len(), "loaded material library");
        Ok(materials.into_iter().map(Material::from).collect())
    }
}

/// First whitespace-separated token of an unparsed directive, as a float.
fn unknown_float(material: &tobj::Material, keys: &[&str]) -> Option<f32> {
    keys.iter()
        .filter_map(|key| material.unknown_param.get(*key))
        .find_map(|value| value.split_whitespace().next()?.parse().ok())
}

fn unknown_path(material: &tobj::Material, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| material.unknown_param.get(*key))
        .find_map(|value| value.split_whitespace().last().map(str::to_owned))
}

impl From<tobj::Material> for Material {
    fn from(m: tobj::Material) -> Self {
        let defaults = Material::default();
        let color = |c: Option<[f32; 3]>, fallback: Vec3| c.map(Vec3::from).unwrap_or(fallback);

        let dissolve = m
            .dissolve
            .or_else(|| unknown_float(&m, &["Tr"]).map(|tr| 1.0 - tr))
            .unwrap_or(defaults.dissolve);
        let bump_map = m
            .normal_texture
            .clone()
            .or_else(|| unknown_path(&m, &["bump", "Bump", "map_bump", "map_Bump"]));

        Self {
            ambient_color: color(m.ambient, defaults.ambient_color),
            diffuse_color: color(m.diffuse, defaults.diffuse_color),
            specular_color: color(m.specular, defaults.specular_color),
            specular_exponent: m.shininess.unwrap_or(defaults.specular_exponent),
            dissolve,
            optical_density: m.optical_density.unwrap_or(defaults.optical_density),
            illumination: m.illumination_model.unwrap_or(defaults.illumination),
            ambient_color_map: m.ambient_texture,
            diffuse_color_map: m.diffuse_texture,
            specular_color_map: m.specular_texture,
            specular_exponent_map: m.shininess_texture,
            dissolve_map: m.dissolve_texture,
            bump_map,
            name: m.name,
        }
    }
}
