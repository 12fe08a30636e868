//! Game settings and tuning
//!
//! Every gameplay constant lives here so a run can be reconfigured from a
//! JSON file without recompiling. Defaults match `crate::consts`.

use std::fmt;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading or validating settings
#[derive(Debug)]
pub enum SettingsError {
    /// Settings file could not be read
    Io(std::io::Error),
    /// Settings file is not valid JSON for `Settings`
    Parse(serde_json::Error),
    /// A value is outside its allowed range
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "failed to read settings: {e}"),
            SettingsError::Parse(e) => write!(f, "failed to parse settings: {e}"),
            SettingsError::Invalid { field, reason } => {
                write!(f, "invalid setting `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between the paddle and the arena floor
    pub paddle_bottom_margin: f32,
    /// Pixels moved per tick while a direction is held
    pub paddle_speed: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_start_velocity: Vec2,
    /// Spawn height above the arena floor
    pub ball_start_offset: f32,
    /// Velocity multiplier applied on every paddle bounce
    pub speed_up_factor: f32,
    /// Optional cap on ball speed (None = uncapped)
    pub max_ball_speed: Option<f32>,

    // === Blocks ===
    pub block_rows: usize,
    pub block_columns: usize,
    pub block_width: f32,
    pub block_height: f32,
    pub points_per_block: u64,

    /// Seed for block colours
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_bottom_margin: PADDLE_BOTTOM_MARGIN,
            paddle_speed: PADDLE_SPEED,

            ball_radius: BALL_RADIUS,
            ball_start_velocity: Vec2::new(BALL_START_DX, BALL_START_DY),
            ball_start_offset: BALL_START_OFFSET,
            speed_up_factor: PADDLE_BOOST,
            max_ball_speed: None,

            block_rows: BLOCK_ROWS,
            block_columns: BLOCK_COLUMNS,
            block_width: BLOCK_WIDTH,
            block_height: BLOCK_HEIGHT,
            points_per_block: POINTS_PER_BLOCK,

            seed: 0,
        }
    }
}

impl Settings {
    /// Default settings with a specific seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Y coordinate of the paddle's top edge
    pub fn paddle_top(&self) -> f32 {
        self.arena_height - self.paddle_height - self.paddle_bottom_margin
    }

    /// Check every value is usable by the simulation
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("ball_radius", self.ball_radius),
            ("block_width", self.block_width),
            ("block_height", self.block_height),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("paddle_bottom_margin", self.paddle_bottom_margin),
            ("ball_start_offset", self.ball_start_offset),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(field, format!("must not be negative, got {value}")));
            }
        }
        if self.paddle_width > self.arena_width {
            return Err(invalid("paddle_width", "wider than the arena".to_string()));
        }
        if self.block_columns < 2 {
            return Err(invalid(
                "block_columns",
                "need at least 2 columns for the stagger".to_string(),
            ));
        }
        if self.block_rows == 0 {
            return Err(invalid("block_rows", "need at least 1 row".to_string()));
        }
        let grid_width = self.block_columns as f32 * self.block_width;
        if grid_width > self.arena_width {
            return Err(invalid(
                "block_columns",
                format!("grid is {grid_width} wide but arena is {}", self.arena_width),
            ));
        }
        let grid_height = self.block_rows as f32 * self.block_height;
        if grid_height >= self.paddle_top() {
            return Err(invalid(
                "block_rows",
                format!("grid is {grid_height} tall and reaches the paddle"),
            ));
        }
        if !(self.speed_up_factor > 1.0) {
            return Err(invalid(
                "speed_up_factor",
                format!("must be greater than 1.0, got {}", self.speed_up_factor),
            ));
        }
        if let Some(cap) = self.max_ball_speed {
            if !(cap.is_finite() && cap > 0.0) {
                return Err(invalid("max_ball_speed", format!("must be positive, got {cap}")));
            }
        }
        if !self.ball_start_velocity.is_finite() || self.ball_start_velocity == Vec2::ZERO {
            return Err(invalid(
                "ball_start_velocity",
                "must be finite and non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> SettingsError {
    SettingsError::Invalid { field, reason }
}
