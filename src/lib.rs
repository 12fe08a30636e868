//! Brick Wall - a staggered-wall Breakout game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball, paddle, block grid, tick)
//! - `highscores`: In-memory top-5 leaderboard
//! - `session`: Frame driver tying the simulation to its collaborators
//! - `platform`: Input, name prompt and presentation collaborator traits
//! - `settings`: Data-driven game tuning

pub mod highscores;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::{Leaderboard, LeaderboardEntry};
pub use session::Session;
pub use settings::{Settings, SettingsError};

/// Game configuration defaults
pub mod consts {
    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 700.0;
    pub const ARENA_HEIGHT: f32 = 500.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Gap between the paddle's bottom edge and the arena floor
    pub const PADDLE_BOTTOM_MARGIN: f32 = 10.0;
    /// Pixels per tick
    pub const PADDLE_SPEED: f32 = 10.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_START_DX: f32 = 2.0;
    pub const BALL_START_DY: f32 = -2.0;
    /// Ball spawns this far above the arena floor
    pub const BALL_START_OFFSET: f32 = 30.0;
    /// Speed boost when ball hits paddle (multiplicative)
    pub const PADDLE_BOOST: f32 = 1.05;

    /// Block grid defaults
    pub const BLOCK_ROWS: usize = 6;
    pub const BLOCK_COLUMNS: usize = 10;
    pub const BLOCK_WIDTH: f32 = 70.0;
    pub const BLOCK_HEIGHT: f32 = 20.0;
    pub const POINTS_PER_BLOCK: u64 = 10;

    /// Leaderboard
    pub const MAX_HIGH_SCORES: usize = 5;
    pub const NAME_LEN: usize = 3;
    pub const NAME_FILLER: char = '?';
}
