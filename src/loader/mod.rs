//! Mesh and material loading.

mod material;
mod model;
mod obj;

pub use material::Material;
pub use model::Model;
pub use obj::ObjLoader;
