//! Difficulty presets
//!
//! Three immutable profiles selected at game start. The profile feeds the
//! initial values of the per-run progression state; it is never mutated
//! during a run.

use serde::{Deserialize, Serialize};

/// Named difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Parse a difficulty name. Unrecognized names fall back to `Medium`
    /// rather than failing.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "medium" | "med" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            other => {
                log::warn!("Unknown difficulty '{other}', defaulting to medium");
                Difficulty::Medium
            }
        }
    }

    /// The preset parameter block for this difficulty
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                ship_speed: 1.5,
                bullet_speed: 2.5,
                alien_speed: 1.0,
                alien_points: 50,
                speedup_scale: 1.1,
            },
            Difficulty::Medium => DifficultyProfile {
                ship_speed: 2.0,
                bullet_speed: 3.0,
                alien_speed: 1.5,
                alien_points: 100,
                speedup_scale: 1.2,
            },
            Difficulty::Hard => DifficultyProfile {
                ship_speed: 2.5,
                bullet_speed: 3.5,
                alien_speed: 2.0,
                alien_points: 150,
                speedup_scale: 1.3,
            },
        }
    }
}

/// Speed and scoring parameters for one difficulty level.
///
/// Speeds are in pixels per tick. `speedup_scale` is the multiplier applied
/// to the run's working speeds on every full-fleet clear.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub ship_speed: f32,
    pub bullet_speed: f32,
    pub alien_speed: f32,
    pub alien_points: u32,
    pub speedup_scale: f32,
}
