use crate::key::{Key, KeyboardState};
use serde::{Deserialize, Serialize};

/// One of the four logical rotation directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Up,
        Direction::Down,
    ];
}

/// Maps logical controls to physical keys.
///
/// Each direction is bound to two keys (an arrow and a letter). Either one
/// being held activates the direction; holding both activates it once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub toggle: Key,
    pub right: [Key; 2],
    pub left: [Key; 2],
    pub up: [Key; 2],
    pub down: [Key; 2],
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            toggle: Key::Space,
            right: [Key::ArrowRight, Key::D],
            left: [Key::ArrowLeft, Key::A],
            up: [Key::ArrowUp, Key::W],
            down: [Key::ArrowDown, Key::S],
        }
    }
}

impl KeyBindings {
    /// Keys bound to a direction.
    pub fn keys_for(&self, direction: Direction) -> [Key; 2] {
        match direction {
            Direction::Right => self.right,
            Direction::Left => self.left,
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }

    /// Poll the keyboard once and collapse it into a tick's worth of input.
    pub fn sample(&self, keyboard: &impl KeyboardState) -> InputFrame {
        let active = |direction| {
            self.keys_for(direction)
                .iter()
                .any(|key| keyboard.is_pressed(*key))
        };
        InputFrame {
            toggle: keyboard.is_pressed(self.toggle),
            right: active(Direction::Right),
            left: active(Direction::Left),
            up: active(Direction::Up),
            down: active(Direction::Down),
        }
    }
}

/// Logical input for a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFrame {
    pub toggle: bool,
    pub right: bool,
    pub left: bool,
    pub up: bool,
    pub down: bool,
}

impl InputFrame {
    /// No keys held.
    pub const IDLE: InputFrame = InputFrame {
        toggle: false,
        right: false,
        left: false,
        up: false,
        down: false,
    };

    pub fn is_active(&self, direction: Direction) -> bool {
        match direction {
            Direction::Right => self.right,
            Direction::Left => self.left,
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }
}
