use anyhow::{Context, Result, anyhow};
use clap::Parser;
use cubespin_control::{ControllerConfig, Mode, RotationController};
use cubespin_input::{HeldKeys, Key, KeyBindings};
use cubespin_render::{Frame, ShaderSources};
use cubespin_render_wgpu::{CubeRenderer, DrawStyle, builtin_sources, log_uncaptured_errors};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "cubespin-desktop", about = "Spinning cube demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Vertex shader source (WGSL)
    #[arg(long, default_value = "shaders/cube.vert.wgsl")]
    vertex_shader: PathBuf,

    /// Fragment shader source (WGSL)
    #[arg(long, default_value = "shaders/cube.frag.wgsl")]
    fragment_shader: PathBuf,

    /// Use the shaders compiled into the binary instead of reading files
    #[arg(long)]
    builtin_shaders: bool,

    /// Draw filled triangles instead of a wireframe
    #[arg(long)]
    solid: bool,

    /// Start in manual mode
    #[arg(long)]
    manual: bool,

    /// Window width in pixels
    #[arg(long, default_value = "640")]
    width: u32,

    /// Window height in pixels
    #[arg(long, default_value = "480")]
    height: u32,

    /// Window title
    #[arg(long, default_value = "cubespin")]
    title: String,
}

/// Translate a physical key into one the demo cares about.
fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Space => Some(Key::Space),
        KeyCode::ArrowUp => Some(Key::ArrowUp),
        KeyCode::ArrowDown => Some(Key::ArrowDown),
        KeyCode::ArrowLeft => Some(Key::ArrowLeft),
        KeyCode::ArrowRight => Some(Key::ArrowRight),
        KeyCode::KeyW => Some(Key::W),
        KeyCode::KeyA => Some(Key::A),
        KeyCode::KeyS => Some(Key::S),
        KeyCode::KeyD => Some(Key::D),
        _ => None,
    }
}

/// Per-run state that outlives the GPU context.
struct AppState {
    controller: RotationController,
    bindings: KeyBindings,
    keys_held: HeldKeys,
}

impl AppState {
    fn new(config: ControllerConfig) -> Self {
        Self {
            controller: RotationController::new(config),
            bindings: KeyBindings::default(),
            keys_held: HeldKeys::new(),
        }
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if let Some(key) = map_key(key) {
            self.keys_held.set(key, pressed);
        }
    }

    /// Poll the keyboard, advance the controller and describe the frame.
    fn tick(&mut self) -> Frame {
        let input = self.bindings.sample(&self.keys_held);
        self.controller.tick(&input);
        Frame::capture(&self.controller)
    }
}

/// Window, surface and device, created together once the event loop resumes.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: CubeRenderer,
}

impl Gpu {
    fn new(event_loop: &ActiveEventLoop, options: &WindowOptions) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(options.title.clone())
            .with_inner_size(PhysicalSize::new(options.width, options.height));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("cannot create window")?,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("cannot create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| anyhow!("no compatible graphics adapter"))?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("cubespin_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("cannot create device")?;
        log_uncaptured_errors(&device);

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| anyhow!("surface reports no texture formats"))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = CubeRenderer::new(
            &device,
            surface_format,
            config.width,
            config.height,
            &options.shaders,
            options.style,
        );

        tracing::info!(
            "GPU initialized with {} backend ({:?}, {:?})",
            adapter.get_info().backend.to_str(),
            renderer.surface_format(),
            renderer.style()
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }

    fn draw(&self, frame: &Frame) {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.renderer.render(&self.device, &self.queue, &view, frame);

        self.window.pre_present_notify();
        output.present();
    }
}

/// Startup options for the window and renderer.
struct WindowOptions {
    title: String,
    width: u32,
    height: u32,
    shaders: ShaderSources,
    style: DrawStyle,
}

struct GpuApp {
    state: AppState,
    options: WindowOptions,
    gpu: Option<Gpu>,
    /// Set when startup fails; returned from `main` after the loop exits.
    fatal: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(state: AppState, options: WindowOptions) -> Self {
        Self {
            state,
            options,
            gpu: None,
            fatal: None,
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match Gpu::new(event_loop, &self.options) {
            Ok(gpu) => {
                gpu.window.request_redraw();
                self.gpu = Some(gpu);
            }
            Err(e) => {
                tracing::error!("startup failed: {e:#}");
                self.fatal = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size);
                }
            }
            WindowEvent::Focused(false) => {
                self.state.keys_held.clear();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::RedrawRequested => {
                let frame = self.state.tick();
                if let Some(gpu) = &self.gpu {
                    gpu.draw(&frame);
                    gpu.window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("cubespin-desktop starting");

    let shaders = if cli.builtin_shaders {
        builtin_sources()
    } else {
        ShaderSources::load(&cli.vertex_shader, &cli.fragment_shader)
    };
    let style = if cli.solid {
        DrawStyle::Solid
    } else {
        DrawStyle::Wireframe
    };
    let config = ControllerConfig {
        initial_mode: if cli.manual { Mode::Manual } else { Mode::Auto },
        ..ControllerConfig::default()
    };

    let options = WindowOptions {
        title: cli.title,
        width: cli.width,
        height: cli.height,
        shaders,
        style,
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(AppState::new(config), options);
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.fatal.take() {
        return Err(e);
    }

    tracing::info!(
        ticks = app.state.controller.ticks(),
        "cubespin-desktop exiting"
    );
    Ok(())
}
