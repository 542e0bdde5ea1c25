use cubespin_control::{Mode, RotationController, RotationState};
use glam::Mat4;

/// Everything a backend needs to draw one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub tick: u64,
    pub mode: Mode,
    pub rotation: RotationState,
    /// Uploaded as the `new_pos` uniform.
    pub transform: Mat4,
}

impl Frame {
    /// Snapshot the controller after its tick for this frame.
    pub fn capture(controller: &RotationController) -> Self {
        Self {
            tick: controller.ticks(),
            mode: controller.mode(),
            rotation: controller.state(),
            transform: controller.transform(),
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            tick: 0,
            mode: Mode::Auto,
            rotation: RotationState::default(),
            transform: Mat4::IDENTITY,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer only reads the frame; rotation state is owned by the
/// controller.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&mut self, frame: &Frame) -> Self::Output;
}

/// Text renderer for headless runs, logs and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, frame: &Frame) -> String {
        let mut out = format!(
            "tick={} mode={} angle_x={:.4} angle_y={:.4}\n",
            frame.tick, frame.mode, frame.rotation.angle_x, frame.rotation.angle_y
        );
        for row in 0..4 {
            let r = frame.transform.row(row);
            out.push_str(&format!(
                "  [{:>8.4} {:>8.4} {:>8.4} {:>8.4}]\n",
                r.x, r.y, r.z, r.w
            ));
        }
        out
    }
}
