// src/rendering_lib/mod.rs

pub mod renderer;
pub mod shader;

pub use renderer::{ClipRect, Renderer};
pub use shader::WGSL_SHADER_SOURCE;
