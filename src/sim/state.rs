//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::BlockGrid;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Ball left through the floor; waiting for the host to record and reset
    GameOver,
}

/// Something the host may want to react to (sound, HUD, logging)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    BlockDestroyed { row: usize, column: usize },
    RowRegenerated { row: usize },
    PaddleBounce { speed: f32 },
    GameOver { score: u64 },
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Centre
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Ball at its serve position, centred just above the floor
    pub fn spawn(settings: &Settings) -> Self {
        Self {
            pos: Vec2::new(
                settings.arena_width / 2.0,
                settings.arena_height - settings.ball_start_offset,
            ),
            vel: settings.ball_start_velocity,
            radius: settings.ball_radius,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge (fixed)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Paddle {
    /// Paddle centred horizontally
    pub fn spawn(settings: &Settings) -> Self {
        Self {
            x: (settings.arena_width - settings.paddle_width) / 2.0,
            y: settings.paddle_top(),
            width: settings.paddle_width,
            height: settings.paddle_height,
            speed: settings.paddle_speed,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn center(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Inclusive horizontal span test
    pub fn spans_x(&self, x: f32) -> bool {
        x >= self.x && x <= self.right()
    }

    /// Move right one step, stopping at the right wall
    pub fn move_right(&mut self, arena_width: f32) {
        if self.right() < arena_width {
            self.x = (self.x + self.speed).min(arena_width - self.width);
        }
    }

    /// Move left one step, stopping at the left wall
    pub fn move_left(&mut self) {
        if self.x > 0.0 {
            self.x = (self.x - self.speed).max(0.0);
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    /// Block colour RNG (seeded from settings, carries across resets)
    pub rng: Pcg32,
    pub score: u64,
    /// Simulation tick counter for the current run
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub ball: Ball,
    pub paddle: Paddle,
    pub grid: BlockGrid,
}

impl GameState {
    /// Create a new game from settings
    pub fn new(settings: Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let grid = BlockGrid::new(&settings, &mut rng);
        Self {
            ball: Ball::spawn(&settings),
            paddle: Paddle::spawn(&settings),
            grid,
            rng,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            settings,
        }
    }

    /// Create a default game with the given seed
    pub fn with_seed(seed: u64) -> Self {
        Self::new(Settings::with_seed(seed))
    }

    /// Start a fresh run: ball, paddle, score and blocks are rebuilt
    pub fn reset(&mut self) {
        self.ball = Ball::spawn(&self.settings);
        self.paddle = Paddle::spawn(&self.settings);
        self.grid = BlockGrid::new(&self.settings, &mut self.rng);
        self.score = 0;
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
