use crate::shaders::{FRAGMENT_ENTRY_POINT, VERTEX_ENTRY_POINT};
use cubespin_render::{ShaderSources, Vertex};

/// Outcome of compiling and linking a shader program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramStatus {
    Linked,
    /// Validation failed; the message is the backend's diagnostic.
    Failed(String),
}

impl ProgramStatus {
    pub fn is_usable(&self) -> bool {
        matches!(self, ProgramStatus::Linked)
    }
}

/// Primitive assembly for the cube.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DrawStyle {
    /// Every triangle edge as a line.
    #[default]
    Wireframe,
    Solid,
}

impl DrawStyle {
    pub fn topology(self) -> wgpu::PrimitiveTopology {
        match self {
            DrawStyle::Wireframe => wgpu::PrimitiveTopology::LineList,
            DrawStyle::Solid => wgpu::PrimitiveTopology::TriangleList,
        }
    }
}

/// A compiled vertex/fragment pair as a render pipeline.
///
/// A failed program still owns a pipeline handle, but it must not be bound.
pub struct ShaderProgram {
    pipeline: wgpu::RenderPipeline,
    status: ProgramStatus,
}

impl ShaderProgram {
    /// Compile both stages and link them into a pipeline.
    ///
    /// Never fails: compilation messages are logged and any validation error
    /// is captured into [`ProgramStatus::Failed`].
    pub fn compile(
        device: &wgpu::Device,
        sources: &ShaderSources,
        layout: &wgpu::PipelineLayout,
        surface_format: wgpu::TextureFormat,
        style: DrawStyle,
    ) -> Self {
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let vertex = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("cube_vertex_shader"),
            source: wgpu::ShaderSource::Wgsl(sources.vertex.as_str().into()),
        });
        let fragment = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("cube_fragment_shader"),
            source: wgpu::ShaderSource::Wgsl(sources.fragment.as_str().into()),
        });
        log_compilation("vertex", &vertex);
        log_compilation("fragment", &fragment);

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("cube_pipeline"),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: &vertex,
                entry_point: Some(VERTEX_ENTRY_POINT),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x3,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment,
                entry_point: Some(FRAGMENT_ENTRY_POINT),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: style.topology(),
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let status = match pollster::block_on(device.pop_error_scope()) {
            None => ProgramStatus::Linked,
            Some(error) => {
                let message = error.to_string();
                tracing::error!("shader program failed to link: {message}");
                ProgramStatus::Failed(message)
            }
        };

        Self { pipeline, status }
    }

    pub fn status(&self) -> &ProgramStatus {
        &self.status
    }

    /// The pipeline, if the program linked.
    pub fn pipeline(&self) -> Option<&wgpu::RenderPipeline> {
        self.status.is_usable().then_some(&self.pipeline)
    }
}

fn log_compilation(stage: &str, module: &wgpu::ShaderModule) {
    let info = pollster::block_on(module.get_compilation_info());
    for msg in info.messages {
        let line = msg.location.map(|l| l.line_number).unwrap_or(0);
        match msg.message_type {
            wgpu::CompilationMessageType::Error => {
                tracing::error!("{stage} shader:{line}: {}", msg.message)
            }
            wgpu::CompilationMessageType::Warning => {
                tracing::warn!("{stage} shader:{line}: {}", msg.message)
            }
            _ => tracing::debug!("{stage} shader:{line}: {}", msg.message),
        }
    }
}
