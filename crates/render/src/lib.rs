//! Rendering interface: renderer-agnostic frame description and shared data.
//!
//! # Invariants
//! - Renderers never mutate rotation state; they draw what a [`Frame`] says.
//! - The transform is recomputed each tick and never cached across frames.
//!
//! The cube mesh, its wireframe edge list and shader source loading live here
//! so every backend uploads the same data.

mod mesh;
mod renderer;
mod shader_source;

pub use mesh::{Mesh, Vertex};
pub use renderer::{DebugTextRenderer, Frame, Renderer};
pub use shader_source::{ShaderLoadError, ShaderSources, load_shader_or_empty, try_load_shader};

pub fn crate_info() -> &'static str {
    "cubespin-render v0.1.0"
}
