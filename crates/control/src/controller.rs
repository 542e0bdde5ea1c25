use crate::state::{Mode, RotationState, ToggleLatch};
use cubespin_input::{Direction, InputFrame};
use glam::Mat4;
use serde::{Deserialize, Serialize};

/// Tunables for the rotation controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Per-tick increment of both angles in auto mode.
    pub auto_step: f32,
    /// Per-tick increment per active direction in manual mode.
    pub manual_step: f32,
    pub initial_mode: Mode,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            auto_step: 0.01,
            manual_step: 0.03,
            initial_mode: Mode::Auto,
        }
    }
}

/// Owns the rotation angles and the auto/manual mode.
///
/// Call [`RotationController::tick`] once per frame with that frame's input;
/// it returns the transform to upload. Angles survive mode switches.
#[derive(Debug, Clone)]
pub struct RotationController {
    config: ControllerConfig,
    state: RotationState,
    mode: Mode,
    latch: ToggleLatch,
    ticks: u64,
}

impl Default for RotationController {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}

impl RotationController {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            state: RotationState::default(),
            mode: config.initial_mode,
            latch: ToggleLatch::new(),
            ticks: 0,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn state(&self) -> RotationState {
        self.state
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of ticks processed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance one tick and return the transform for it.
    pub fn tick(&mut self, input: &InputFrame) -> Mat4 {
        if self.latch.observe(input.toggle) {
            self.mode = self.mode.toggled();
            tracing::info!(mode = %self.mode, "rotation mode toggled");
        }

        match self.mode {
            Mode::Manual => {
                let step = self.config.manual_step;
                for direction in Direction::ALL {
                    if !input.is_active(direction) {
                        continue;
                    }
                    match direction {
                        Direction::Right => self.state.angle_x += step,
                        Direction::Left => self.state.angle_x -= step,
                        Direction::Up => self.state.angle_y += step,
                        Direction::Down => self.state.angle_y -= step,
                    }
                }
            }
            Mode::Auto => {
                self.state.angle_x += self.config.auto_step;
                self.state.angle_y += self.config.auto_step;
            }
        }

        self.ticks += 1;
        tracing::trace!(
            tick = self.ticks,
            angle_x = self.state.angle_x,
            angle_y = self.state.angle_y,
            "rotation tick"
        );

        self.transform()
    }

    /// Transform for the current angles.
    pub fn transform(&self) -> Mat4 {
        self.state.transform()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    fn frame(f: impl FnOnce(&mut InputFrame)) -> InputFrame {
        let mut input = InputFrame::IDLE;
        f(&mut input);
        input
    }

    fn manual() -> RotationController {
        RotationController::new(ControllerConfig {
            initial_mode: Mode::Manual,
            ..ControllerConfig::default()
        })
    }

    #[test]
    fn starts_in_auto_at_rest() {
        let c = RotationController::default();
        assert_eq!(c.mode(), Mode::Auto);
        assert_eq!(c.state(), RotationState::default());
        assert_eq!(c.transform(), Mat4::IDENTITY);
        assert_eq!(c.ticks(), 0);
    }

    #[test]
    fn auto_mode_advances_both_angles() {
        let mut c = RotationController::default();
        for _ in 0..20 {
            c.tick(&InputFrame::IDLE);
        }
        assert!(close(c.state().angle_x, 0.20));
        assert!(close(c.state().angle_y, 0.20));
        assert_eq!(c.ticks(), 20);
    }

    #[test]
    fn auto_mode_ignores_directions() {
        let mut c = RotationController::default();
        let everything = frame(|f| {
            f.right = true;
            f.up = true;
        });
        let mut last = c.state();
        for _ in 0..7 {
            c.tick(&everything);
            let now = c.state();
            assert!(now.angle_x > last.angle_x);
            assert!(now.angle_y > last.angle_y);
            last = now;
        }
        assert!(close(c.state().angle_x, 0.07));
        assert!(close(c.state().angle_y, 0.07));
    }

    #[test]
    fn manual_mode_steps_each_direction() {
        let mut c = manual();
        for _ in 0..4 {
            c.tick(&frame(|f| f.right = true));
        }
        assert!(close(c.state().angle_x, 0.12));
        assert!(close(c.state().angle_y, 0.0));

        for _ in 0..2 {
            c.tick(&frame(|f| f.down = true));
        }
        assert!(close(c.state().angle_y, -0.06));

        c.tick(&frame(|f| f.left = true));
        assert!(close(c.state().angle_x, 0.09));

        c.tick(&frame(|f| f.up = true));
        assert!(close(c.state().angle_y, -0.03));
    }

    #[test]
    fn manual_mode_idle_holds_still() {
        let mut c = manual();
        c.tick(&frame(|f| f.up = true));
        let before = c.state();
        for _ in 0..10 {
            c.tick(&InputFrame::IDLE);
        }
        assert_eq!(c.state(), before);
    }

    #[test]
    fn opposing_directions_cancel() {
        let mut c = manual();
        let both = frame(|f| {
            f.left = true;
            f.right = true;
            f.up = true;
            f.down = true;
        });
        for _ in 0..5 {
            c.tick(&both);
        }
        assert!(close(c.state().angle_x, 0.0));
        assert!(close(c.state().angle_y, 0.0));
    }

    #[test]
    fn aliases_step_once_per_direction() {
        use cubespin_input::{HeldKeys, Key, KeyBindings};

        let bindings = KeyBindings::default();
        let held: HeldKeys = [Key::ArrowRight, Key::D].into_iter().collect();
        let mut c = manual();
        c.tick(&bindings.sample(&held));
        assert!(close(c.state().angle_x, 0.03));
    }

    #[test]
    fn held_toggle_flips_once() {
        let mut c = RotationController::default();
        c.tick(&InputFrame::IDLE);
        let press = frame(|f| f.toggle = true);
        for _ in 0..10 {
            c.tick(&press);
        }
        assert_eq!(c.mode(), Mode::Manual);

        c.tick(&InputFrame::IDLE);
        c.tick(&press);
        assert_eq!(c.mode(), Mode::Auto);
    }

    #[test]
    fn toggle_flips_on_every_rising_edge() {
        let mut c = RotationController::default();
        let press = frame(|f| f.toggle = true);
        let mut expected = Mode::Auto;
        for _ in 0..6 {
            c.tick(&InputFrame::IDLE);
            c.tick(&press);
            expected = expected.toggled();
            assert_eq!(c.mode(), expected);
        }
    }

    #[test]
    fn toggle_held_at_startup_does_not_flip() {
        let mut c = RotationController::default();
        let press = frame(|f| f.toggle = true);
        c.tick(&press);
        c.tick(&press);
        assert_eq!(c.mode(), Mode::Auto);
    }

    #[test]
    fn toggling_preserves_angles() {
        let mut c = RotationController::default();
        for _ in 0..3 {
            c.tick(&InputFrame::IDLE);
        }
        let before = c.state();
        // The toggle tick itself runs in manual mode with no direction held.
        c.tick(&frame(|f| f.toggle = true));
        assert_eq!(c.mode(), Mode::Manual);
        assert_eq!(c.state(), before);
    }

    #[test]
    fn scenario_auto_then_manual() {
        let mut c = RotationController::default();
        for _ in 0..5 {
            c.tick(&InputFrame::IDLE);
        }
        assert!(close(c.state().angle_x, 0.05));
        assert!(close(c.state().angle_y, 0.05));

        c.tick(&frame(|f| f.toggle = true));
        c.tick(&InputFrame::IDLE);
        assert_eq!(c.mode(), Mode::Manual);

        for _ in 0..3 {
            c.tick(&frame(|f| f.right = true));
        }
        assert!(close(c.state().angle_x, 0.14));
        assert!(close(c.state().angle_y, 0.05));
    }

    #[test]
    fn tick_returns_fresh_transform() {
        let mut c = RotationController::default();
        let m = c.tick(&InputFrame::IDLE);
        assert_eq!(m, c.state().transform());
        assert_ne!(m, Mat4::IDENTITY);
    }

    #[test]
    fn custom_steps_are_honoured() {
        let mut c = RotationController::new(ControllerConfig {
            auto_step: 0.5,
            ..ControllerConfig::default()
        });
        c.tick(&InputFrame::IDLE);
        c.tick(&InputFrame::IDLE);
        assert!(close(c.state().angle_x, 1.0));
    }
}
