//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per tick, velocities in pixels per tick
//! - Seeded RNG only
//! - Stable iteration order (rows top to bottom, slots left to right)
//! - No rendering or platform dependencies

pub mod grid;
pub mod state;
pub mod tick;

pub use grid::{Block, BlockColor, BlockGrid, BlockStatus, Row};
pub use state::{Ball, GameEvent, GamePhase, GameState, Paddle};
pub use tick::{TickInput, tick};
