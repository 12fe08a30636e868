//! Frame driver
//!
//! Owns the game state and the leaderboard, runs one tick per frame and
//! handles the GameOver -> record -> reset transition. The name prompt is
//! called from inside `frame`, so no tick runs while it is outstanding.

use crate::highscores::Leaderboard;
use crate::platform::{InputSource, NamePrompt, Renderer, ScoreSink};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, tick};

/// A running game plus its leaderboard
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    leaderboard: Leaderboard,
    /// Completed runs
    runs: u32,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        log::info!("Session started with seed: {}", settings.seed);
        Self {
            state: GameState::new(settings),
            leaderboard: Leaderboard::new(),
            runs: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Poll input, tick, notify sinks, then draw
    pub fn frame(
        &mut self,
        input: &mut impl InputSource,
        prompt: &mut impl NamePrompt,
        sink: &mut impl ScoreSink,
        renderer: &mut impl Renderer,
    ) -> Vec<GameEvent> {
        let input = input.poll();
        let events = self.step(&input, prompt, sink);
        renderer.draw(&self.state);
        events
    }

    /// Tick once with an explicit input
    pub fn step(
        &mut self,
        input: &TickInput,
        prompt: &mut impl NamePrompt,
        sink: &mut impl ScoreSink,
    ) -> Vec<GameEvent> {
        let score_before = self.state.score;
        let events = tick(&mut self.state, input);

        if self.state.score != score_before {
            sink.score_changed(self.state.score);
        }

        if self.state.is_game_over() {
            self.finish_run(prompt, sink);
        }

        events
    }

    fn finish_run(&mut self, prompt: &mut impl NamePrompt, sink: &mut impl ScoreSink) {
        let score = self.state.score;
        self.runs += 1;
        if let Some(rank) = self.leaderboard.record(score, prompt) {
            log::info!("Run {} placed #{} with {}", self.runs, rank, score);
        }
        sink.leaderboard_changed(self.leaderboard.top());

        self.state.reset();
        log::info!("Game reset");
        sink.score_changed(self.state.score);
    }
}
