//! WebGPU rendering module
//!
//! Line-based scene pass into an offscreen target at the logical
//! resolution, then a letterboxed blit to the window surface.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
