//! Rasterization onto a [`Surface`].

mod framebuffer;
mod renderer2d;
mod renderer3d;
mod surface;

pub use framebuffer::FrameBuffer;
pub use renderer2d::Renderer2D;
pub use renderer3d::{RenderStats, RenderStyle, Renderer3D, BACK_FACE_TOLERANCE, NDC_EYE};
pub use surface::{BresenhamLine, Surface};
