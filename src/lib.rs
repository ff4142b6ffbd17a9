//! Alien Siege - a fixed-timestep alien invasion arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, formation movement, collisions, progression)
//! - `app`: Real-time frame loop driving the simulation at 60 Hz
//! - `platform`: Rendering/input collaborator boundary (traits + frame snapshots)
//! - `settings`: Difficulty presets
//! - `highscores`: JSON-persisted high-score table

pub mod app;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::{Difficulty, DifficultyProfile};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (frames per second)
    pub const TICK_RATE: u32 = 60;
    /// Real-time halt after losing a ship, before the simulation resumes
    pub const RECOVERY_PAUSE_MS: u64 = 500;

    /// Play area dimensions (logical pixels)
    pub const SCREEN_WIDTH: f32 = 1200.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;

    /// Ship defaults
    pub const SHIP_WIDTH: f32 = 50.0;
    pub const SHIP_HEIGHT: f32 = 50.0;
    pub const SHIP_LIMIT: u32 = 3;

    /// Bullet defaults
    pub const BULLET_WIDTH: f32 = 3.0;
    pub const BULLET_HEIGHT: f32 = 15.0;
    /// Simultaneous player bullets allowed on screen
    pub const BULLETS_ALLOWED: usize = 100;

    /// Alien defaults
    pub const ALIEN_WIDTH: f32 = 50.0;
    pub const ALIEN_HEIGHT: f32 = 50.0;
    /// Vertical drop applied to the whole fleet on edge contact
    pub const FLEET_DROP: i32 = 10;
    /// Most rows a fleet can spawn with, however high the level climbs
    pub const MAX_FLEET_ROWS: u32 = 5;
    /// One alien bullet fired per this many active ticks, on average
    pub const ALIEN_FIRE_RATE: u32 = 100;
    pub const ALIEN_BULLET_SPEED: f32 = 1.0;

    /// Power-up defaults
    pub const POWERUP_SIZE: f32 = 20.0;
    pub const POWERUP_SPEED: f32 = 1.0;
    /// One power-up spawned per this many active ticks, on average
    pub const POWERUP_SPAWN_RATE: u32 = 1000;

    /// Escalation ceilings applied on each full-fleet clear
    pub const MAX_SHIP_SPEED: f32 = 5.0;
    pub const MAX_BULLET_SPEED: f32 = 6.0;
    pub const MAX_ALIEN_SPEED: f32 = 3.0;
    /// Point values freeze once they reach this
    pub const MAX_ALIEN_POINTS: u32 = 1000;
    /// Multiplier applied to the alien point value on each fleet clear
    pub const SCORE_SCALE: f32 = 1.5;

    /// Menu difficulty buttons (centered row, easy / medium / hard)
    pub const MENU_BUTTON_WIDTH: f32 = 200.0;
    pub const MENU_BUTTON_HEIGHT: f32 = 50.0;
    pub const MENU_BUTTON_SPACING: f32 = 250.0;
}
