use crate::key::{HeldKeys, Key, KeyParseError};
use std::str::FromStr;

/// Errors from parsing an input script.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("input script is empty")]
    Empty,
    #[error("step {step}: invalid repeat count {count:?}")]
    BadCount { step: usize, count: String },
    #[error("step {step}: no keys given")]
    NoKeys { step: usize },
    #[error("step {step}: {source}")]
    Key {
        step: usize,
        #[source]
        source: KeyParseError,
    },
}

/// One step of a script: a set of held keys repeated for `ticks` ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptStep {
    pub ticks: u32,
    pub keys: HeldKeys,
}

/// A scripted sequence of keyboard states, one per tick.
///
/// Grammar: comma-separated steps `COUNTxKEYS`, where `KEYS` is `idle` or
/// `+`-joined key names and `COUNTx` may be omitted. For example
/// `5xidle,space,idle,3xright`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputScript {
    steps: Vec<ScriptStep>,
}

impl InputScript {
    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    /// Total number of ticks the script covers.
    pub fn tick_count(&self) -> u64 {
        self.steps.iter().map(|s| u64::from(s.ticks)).sum()
    }

    /// Keyboard state for each tick, in order.
    pub fn frames(&self) -> impl Iterator<Item = &HeldKeys> {
        self.steps
            .iter()
            .flat_map(|s| std::iter::repeat_n(&s.keys, s.ticks as usize))
    }
}

impl FromStr for InputScript {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ScriptError::Empty);
        }

        let mut steps = Vec::new();
        for (step, raw) in s.split(',').enumerate() {
            let raw = raw.trim();
            let (ticks, keys) = match raw.split_once('x') {
                Some((count, keys)) if is_count(count) => {
                    let ticks = count
                        .parse::<u32>()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or_else(|| ScriptError::BadCount {
                            step,
                            count: count.to_string(),
                        })?;
                    (ticks, keys)
                }
                _ => (1, raw),
            };

            let keys = keys.trim();
            if keys.is_empty() {
                return Err(ScriptError::NoKeys { step });
            }

            let held = if keys.eq_ignore_ascii_case("idle") {
                HeldKeys::new()
            } else {
                keys.split('+')
                    .map(|name| name.parse::<Key>())
                    .collect::<Result<HeldKeys, _>>()
                    .map_err(|source| ScriptError::Key { step, source })?
            };

            steps.push(ScriptStep { ticks, keys: held });
        }

        tracing::debug!(steps = steps.len(), "parsed input script");
        Ok(Self { steps })
    }
}

fn is_count(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyboardState;

    #[test]
    fn parses_counts_and_idle() {
        let script: InputScript = "5xidle,space,idle,3xright".parse().unwrap();
        assert_eq!(script.steps().len(), 4);
        assert_eq!(script.tick_count(), 10);

        let frames: Vec<&HeldKeys> = script.frames().collect();
        assert_eq!(frames.len(), 10);
        assert!(frames[..5].iter().all(|f| f.is_empty()));
        assert!(frames[5].is_pressed(Key::Space));
        assert!(frames[6].is_empty());
        assert!(frames[7..].iter().all(|f| f.is_pressed(Key::ArrowRight)));
    }

    #[test]
    fn parses_key_combinations() {
        let script: InputScript = "2xleft+d".parse().unwrap();
        let step = &script.steps()[0];
        assert_eq!(step.ticks, 2);
        assert!(step.keys.is_pressed(Key::ArrowLeft));
        assert!(step.keys.is_pressed(Key::D));
        assert_eq!(step.keys.len(), 2);
    }

    #[test]
    fn empty_script_is_rejected() {
        assert_eq!("  ".parse::<InputScript>(), Err(ScriptError::Empty));
    }

    #[test]
    fn zero_count_is_rejected() {
        let err = "0xspace".parse::<InputScript>().unwrap_err();
        assert!(matches!(err, ScriptError::BadCount { step: 0, .. }));
    }

    #[test]
    fn missing_keys_are_rejected() {
        let err = "idle,3x".parse::<InputScript>().unwrap_err();
        assert_eq!(err, ScriptError::NoKeys { step: 1 });
    }

    #[test]
    fn unknown_key_reports_step() {
        let err = "idle,2xjump".parse::<InputScript>().unwrap_err();
        assert!(matches!(err, ScriptError::Key { step: 1, .. }));
        assert!(err.to_string().contains("jump"));
    }
}
