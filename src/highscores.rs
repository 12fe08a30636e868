//! High score leaderboard
//!
//! Keeps the top 5 scores for the lifetime of the process. Nothing is
//! written to disk.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_HIGH_SCORES, NAME_FILLER, NAME_LEN};
use crate::platform::NamePrompt;

/// Name stored when the player gives none
pub const BLANK_NAME: &str = "???";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Exactly three characters
    pub name: String,
    pub score: u64,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Record a finished run. Asks `prompt` for a name only when the score
    /// qualifies. Returns the rank achieved (1-indexed).
    pub fn record(&mut self, score: u64, prompt: &mut impl NamePrompt) -> Option<usize> {
        if !self.qualifies(score) {
            log::info!("Score {} did not make the leaderboard", score);
            return None;
        }
        let name = prompt.ask_name();
        self.insert(name.as_deref(), score)
    }

    /// Insert with an already obtained (raw) name
    pub fn insert(&mut self, name: Option<&str>, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = LeaderboardEntry {
            name: normalize_name(name),
            score,
        };

        // Ties go after existing entries with the same score
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        log::info!("Score {} entered the leaderboard at rank {}", score, rank);
        Some(rank)
    }

    /// Sorted entries, best first
    pub fn top(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

/// Normalise raw player input into a three character name.
///
/// Missing or empty input becomes [`BLANK_NAME`]. Otherwise the input is
/// trimmed, upper-cased, cut to three characters and padded with `?`.
pub fn normalize_name(raw: Option<&str>) -> String {
    let trimmed = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return BLANK_NAME.to_string(),
    };
    let mut name: String = trimmed.to_uppercase().chars().take(NAME_LEN).collect();
    while name.chars().count() < NAME_LEN {
        name.push(NAME_FILLER);
    }
    name
}
