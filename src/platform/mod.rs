//! Platform abstraction layer
//!
//! The simulation never talks to a keyboard, a screen or a dialog box. The
//! host provides these collaborators:
//! - input: held directions, read once per frame
//! - name prompt: blocking request for a leaderboard name
//! - renderer and score sinks: presentation only, no feedback

use crate::highscores::LeaderboardEntry;
use crate::sim::{GameState, TickInput};

/// Source of per-frame input
pub trait InputSource {
    fn poll(&mut self) -> TickInput;
}

/// Synchronous name request, made only when a score makes the leaderboard.
/// `None` means the player cancelled.
pub trait NamePrompt {
    fn ask_name(&mut self) -> Option<String>;
}

/// Draws the current state
pub trait Renderer {
    fn draw(&mut self, state: &GameState);
}

/// Receives score and leaderboard updates after each change
pub trait ScoreSink {
    fn score_changed(&mut self, score: u64);
    fn leaderboard_changed(&mut self, entries: &[LeaderboardEntry]);
}

/// Replays a fixed list of inputs, then repeats the last one
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    inputs: Vec<TickInput>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(inputs: Vec<TickInput>) -> Self {
        Self { inputs, cursor: 0 }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> TickInput {
        let input = self
            .inputs
            .get(self.cursor)
            .or(self.inputs.last())
            .copied()
            .unwrap_or_default();
        self.cursor += 1;
        input
    }
}

/// Lets the simulation steer the paddle
#[derive(Debug, Clone, Copy, Default)]
pub struct Autopilot;

impl InputSource for Autopilot {
    fn poll(&mut self) -> TickInput {
        TickInput {
            autopilot: true,
            ..Default::default()
        }
    }
}

/// Always answers with the same name
#[derive(Debug, Clone, Default)]
pub struct FixedNamePrompt {
    name: Option<String>,
    calls: usize,
}

impl FixedNamePrompt {
    pub fn new(name: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_string),
            calls: 0,
        }
    }

    /// How many times the name was asked for
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl NamePrompt for FixedNamePrompt {
    fn ask_name(&mut self) -> Option<String> {
        self.calls += 1;
        self.name.clone()
    }
}

/// Renderer that draws nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _state: &GameState) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_input_repeats_last() {
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        let mut input = ScriptedInput::new(vec![left, right]);
        assert_eq!(input.poll(), left);
        assert_eq!(input.poll(), right);
        assert_eq!(input.poll(), right);
    }

    #[test]
    fn test_empty_script_is_idle() {
        let mut input = ScriptedInput::default();
        assert_eq!(input.poll(), TickInput::default());
    }
}
