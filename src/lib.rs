//! A CPU software rasterizer for polygon meshes.
//!
//! Meshes are loaded from Wavefront OBJ files, transformed on the CPU,
//! back-face culled, sorted back to front and painted into an owned
//! framebuffer. SDL2 is used only to show that framebuffer in a window.
//!
//! # Quick Start
//!
//! ```ignore
//! use polyrast::prelude::*;
//!
//! let config = Config::default();
//! let mut window = Window::new(&config.title, config.width, config.height)?;
//! let mut engine = Engine::new(&config)?;
//! loop {
//!     for event in window.poll_events() {
//!         engine.handle_event(&event);
//!     }
//!     engine.update();
//!     engine.render();
//!     window.present(engine.frame_buffer().as_bytes())?;
//! }
//! ```

pub mod camera;
pub mod clock;
pub mod colors;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod geometry;
pub mod input;
pub mod loader;
pub mod math;
pub mod projection;
pub mod render;
pub mod scene;
pub mod transform;
pub mod window;

pub use engine::Engine;
pub use error::{EngineError, LoadError, MathError};
pub use loader::{Material, Model, ObjLoader};
pub use projection::Projection;
pub use transform::Transform;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use polyrast::prelude::*;
/// ```
pub mod prelude {
    // Application
    pub use crate::clock::{Clock, FrameLimiter};
    pub use crate::config::{CameraSettings, Config};
    pub use crate::engine::Engine;
    pub use crate::error::{EngineError, LoadError};
    pub use crate::scene::Scene;

    // Camera
    pub use crate::camera::Camera;
    pub use crate::projection::Projection;
    pub use crate::transform::Transform;

    // Math
    pub use crate::math::{Mat3, Mat4, Quaternion, Vec2, Vec3, Vec4};

    // Geometry
    pub use crate::geometry::{Polygon2D, Polygon3D, Triangle3D, Vertex3};
    pub use crate::loader::{Material, Model, ObjLoader};

    // Rendering
    pub use crate::render::{FrameBuffer, RenderStyle, Renderer2D, Renderer3D, Surface};

    // Window & Input
    pub use crate::events::{Event, EventBus, EventKind, Key, MouseButton};
    pub use crate::input::InputState;
    pub use crate::window::Window;
}
