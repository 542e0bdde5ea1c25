//! wgpu render backend for the spinning cube.
//!
//! Compiles the vertex/fragment pair into a pipeline, uploads the cube once
//! and issues a single indexed draw per frame with the `new_pos` transform.
//!
//! # Invariants
//! - Renderer never mutates rotation state.
//! - A failed shader program is logged, never fatal; frames are cleared but
//!   nothing is drawn.
//! - GPU resources are owned values and are released on drop.

mod gpu;
mod program;
mod shaders;

pub use gpu::{CubeRenderer, log_uncaptured_errors};
pub use program::{DrawStyle, ProgramStatus, ShaderProgram};
pub use shaders::{
    CUBE_FRAGMENT_SHADER, CUBE_VERTEX_SHADER, FRAGMENT_ENTRY_POINT, VERTEX_ENTRY_POINT,
    builtin_sources,
};
