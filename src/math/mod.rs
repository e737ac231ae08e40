//! Linear algebra: const-generic vectors and matrices plus quaternions.

pub mod matrix;
pub mod quaternion;
pub mod scalar;
pub mod vector;

pub use matrix::{Mat3, Mat4, Matrix, Matrix3, Matrix4};
pub use quaternion::Quaternion;
pub use scalar::Scalar;
pub use vector::{Vec2, Vec3, Vec4, Vector, Vector2, Vector3, Vector4};
