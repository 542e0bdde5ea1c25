use std::path::{Path, PathBuf};

/// Errors from reading shader source files.
#[derive(Debug, thiserror::Error)]
pub enum ShaderLoadError {
    #[error("cannot open shader {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read a shader source file wholesale.
pub fn try_load_shader(path: impl AsRef<Path>) -> Result<String, ShaderLoadError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| ShaderLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a shader source file, falling back to an empty source on failure.
///
/// The failure is logged; an empty source then fails compilation and is
/// reported again there, but the program keeps running.
pub fn load_shader_or_empty(path: impl AsRef<Path>) -> String {
    match try_load_shader(path) {
        Ok(source) => source,
        Err(e) => {
            tracing::warn!("{e}; continuing with empty shader source");
            String::new()
        }
    }
}

/// Vertex and fragment source text for one program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// Load both stages from disk; unreadable files become empty sources.
    pub fn load(vertex_path: impl AsRef<Path>, fragment_path: impl AsRef<Path>) -> Self {
        Self {
            vertex: load_shader_or_empty(vertex_path),
            fragment: load_shader_or_empty(fragment_path),
        }
    }
}
