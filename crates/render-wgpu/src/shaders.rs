use cubespin_render::ShaderSources;

/// Default WGSL vertex stage. Entry point `vs_main`, uniform `new_pos`.
pub const CUBE_VERTEX_SHADER: &str = include_str!("../../../shaders/cube.vert.wgsl");

/// Default WGSL fragment stage. Entry point `fs_main`.
pub const CUBE_FRAGMENT_SHADER: &str = include_str!("../../../shaders/cube.frag.wgsl");

pub const VERTEX_ENTRY_POINT: &str = "vs_main";
pub const FRAGMENT_ENTRY_POINT: &str = "fs_main";

/// Default shader pair compiled into the binary.
pub fn builtin_sources() -> ShaderSources {
    ShaderSources::new(CUBE_VERTEX_SHADER, CUBE_FRAGMENT_SHADER)
}
