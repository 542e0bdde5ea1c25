//! Keyboard input: logical keys, bindings, and per-tick sampling.
//!
//! # Invariants
//! - The controller consumes [`InputFrame`]s, never raw window events.
//! - A direction is either active or not for a tick; aliased keys never
//!   double-count.

pub mod bindings;
pub mod key;
pub mod script;

pub use bindings::{Direction, InputFrame, KeyBindings};
pub use key::{HeldKeys, Key, KeyParseError, KeyboardState};
pub use script::{InputScript, ScriptError, ScriptStep};

pub fn crate_info() -> &'static str {
    "cubespin-input v0.1.0"
}
