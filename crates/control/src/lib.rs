//! Rotation controller: the per-tick state machine behind the spinning cube.
//!
//! Two modes, `Auto` and `Manual`, connected by a debounced toggle. In auto
//! mode both angles advance on their own; in manual mode the direction keys
//! drive them. The transform is recomputed from the angles every tick.
//!
//! # Invariants
//! - The mode flips at most once per press-release cycle of the toggle key.
//! - Switching modes never resets the angles.
//! - The transform is a pure function of [`RotationState`].

mod controller;
mod state;

pub use controller::{ControllerConfig, RotationController};
pub use state::{Mode, RotationState, ToggleLatch};

pub fn crate_info() -> &'static str {
    "cubespin-control v0.1.0"
}
