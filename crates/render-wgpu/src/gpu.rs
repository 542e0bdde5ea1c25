use crate::program::{DrawStyle, ProgramStatus, ShaderProgram};
use bytemuck::{Pod, Zeroable};
use cubespin_render::{Frame, Mesh, ShaderSources};
use glam::Mat4;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    new_pos: [[f32; 4]; 4],
}

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Route uncaptured wgpu errors to the log instead of panicking, so an
/// unusable program degrades to a blank frame.
pub fn log_uncaptured_errors(device: &wgpu::Device) {
    device.on_uncaptured_error(Box::new(|error| {
        tracing::error!("wgpu error: {error}");
    }));
}

/// wgpu renderer for the single cube.
///
/// Owns the uploaded mesh, the transform uniform and the shader program.
/// Every GPU handle is released when the renderer is dropped.
pub struct CubeRenderer {
    program: ShaderProgram,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    depth_texture: wgpu::TextureView,
    style: DrawStyle,
    surface_format: wgpu::TextureFormat,
}

impl CubeRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        sources: &ShaderSources,
        style: DrawStyle,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("new_pos_uniform"),
            contents: bytemuck::bytes_of(&Uniforms {
                new_pos: Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("cube_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let program =
            ShaderProgram::compile(device, sources, &pipeline_layout, surface_format, style);
        if let ProgramStatus::Failed(_) = program.status() {
            tracing::warn!("cube will not be drawn until a valid shader program is supplied");
        }

        let (vertex_buffer, index_buffer, index_count) =
            Self::upload_mesh(device, &Mesh::cube(), style);
        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            program,
            uniform_buffer,
            uniform_bind_group,
            vertex_buffer,
            index_buffer,
            index_count,
            depth_texture,
            style,
            surface_format,
        }
    }

    /// Upload vertices plus the index list matching `style`.
    fn upload_mesh(
        device: &wgpu::Device,
        mesh: &Mesh,
        style: DrawStyle,
    ) -> (wgpu::Buffer, wgpu::Buffer, u32) {
        let indices = match style {
            DrawStyle::Wireframe => mesh.edge_indices(),
            DrawStyle::Solid => mesh.indices.clone(),
        };

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_vertex_buffer"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_index_buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        tracing::debug!(
            vertices = mesh.vertices.len(),
            indices = indices.len(),
            ?style,
            "uploaded cube mesh"
        );
        (vertex_buffer, index_buffer, indices.len() as u32)
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    pub fn style(&self) -> DrawStyle {
        self.style
    }

    pub fn program_status(&self) -> &ProgramStatus {
        self.program.status()
    }

    /// Write the `new_pos` transform uniform.
    pub fn set_transform(&self, queue: &wgpu::Queue, transform: Mat4) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                new_pos: transform.to_cols_array_2d(),
            }),
        );
    }

    /// Render one frame: clear colour and depth, then one indexed draw.
    ///
    /// With an unusable program the frame is only cleared.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        frame: &Frame,
    ) {
        self.set_transform(queue, frame.transform);

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("cube_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("cube_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            if let Some(pipeline) = self.program.pipeline() {
                pass.set_pipeline(pipeline);
                pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..self.index_count, 0, 0..1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}
