//! Game state and core simulation types
//!
//! All per-run state lives here: the player ship, the entity collections,
//! the progression values scaled from the active difficulty profile, and
//! the top-level phase machine.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collection::{Bounded, EntityCollection};
use super::fleet::Fleet;
use super::rect::Rect;
use crate::consts::*;
use crate::settings::{Difficulty, DifficultyProfile};

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Difficulty menu is showing; no simulation advance
    Menu,
    /// Full simulation running
    Active,
    /// Transient state after losing a ship; the frame loop holds here for
    /// the recovery pause, then resumes Active
    ShipLost,
    /// Run ended; only a menu re-entry leaves this state
    GameOver,
}

/// Notable transitions surfaced to the platform layer (scoreboard refresh,
/// logging, sound hooks)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    GameStarted { difficulty: Difficulty },
    LevelUp { level: u32 },
    ShipLost { lives_left: u32 },
    PowerupCollected,
    GameOver { score: u32 },
}

/// The player's ship
///
/// Horizontal position is floating point for sub-pixel motion; the vertical
/// row is fixed at the bottom of the play area. Intent flags are set by the
/// input layer and consumed each tick.
#[derive(Debug, Clone)]
pub struct Ship {
    pub x: f32,
    pub y: f32,
    pub moving_left: bool,
    pub moving_right: bool,
    pub firing: bool,
    pub has_super_bullet: bool,
}

impl Ship {
    /// A ship centered at the bottom of a play area
    pub fn centered(width: f32, height: f32) -> Self {
        Self {
            x: (width - SHIP_WIDTH) / 2.0,
            y: height - SHIP_HEIGHT,
            moving_left: false,
            moving_right: false,
            firing: false,
            has_super_bullet: false,
        }
    }

    /// Re-center horizontally, keeping intent flags as they are
    pub fn recenter(&mut self, width: f32) {
        self.x = (width - SHIP_WIDTH) / 2.0;
    }

    /// Apply movement intent, clamped to the play area
    pub fn advance(&mut self, speed: f32, width: f32) {
        if self.moving_right {
            self.x += speed;
        }
        if self.moving_left {
            self.x -= speed;
        }
        self.x = self.x.clamp(0.0, width - SHIP_WIDTH);
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, SHIP_WIDTH, SHIP_HEIGHT)
    }
}

/// A player bullet. Super bullets span the full play-area height and are
/// removed after exactly one resolution pass.
#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub size: Vec2,
    pub is_super: bool,
}

impl Bullet {
    /// A regular bullet leaving the ship's top edge
    pub fn from_ship(ship: &Ship) -> Self {
        Self {
            pos: Vec2::new(
                ship.bounds().center_x() - BULLET_WIDTH / 2.0,
                ship.y - BULLET_HEIGHT,
            ),
            size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            is_super: false,
        }
    }

    /// A super bullet covering the whole column above and below the ship
    pub fn super_from_ship(ship: &Ship, play_height: f32) -> Self {
        Self {
            pos: Vec2::new(ship.bounds().center_x() - BULLET_WIDTH / 2.0, 0.0),
            size: Vec2::new(BULLET_WIDTH, play_height),
            is_super: true,
        }
    }
}

impl Bounded for Bullet {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }
}

/// A bullet fired by an alien. `source_id` records which alien fired it,
/// for lookup only; the alien may be destroyed while the bullet is live.
#[derive(Debug, Clone)]
pub struct AlienBullet {
    pub pos: Vec2,
    pub source_id: u32,
}

impl Bounded for AlienBullet {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, BULLET_WIDTH, BULLET_HEIGHT)
    }
}

/// One alien in the fleet. Horizontal position is floating point; vertical
/// position moves only in fixed integral drops.
#[derive(Debug, Clone)]
pub struct Alien {
    pub id: u32,
    pub x: f32,
    pub y: i32,
}

impl Bounded for Alien {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y as f32, ALIEN_WIDTH, ALIEN_HEIGHT)
    }
}

/// A falling power-up; contact grants the ship a super bullet
#[derive(Debug, Clone)]
pub struct Powerup {
    pub pos: Vec2,
}

impl Bounded for Powerup {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, POWERUP_SIZE, POWERUP_SIZE)
    }
}

/// Mutable per-run progression: score, level, lives, and the working
/// speed/point values scaled up from the active difficulty profile on each
/// full-fleet clear.
#[derive(Debug, Clone)]
pub struct Progression {
    pub score: u32,
    /// Best score seen this process session
    pub high_score: u32,
    pub level: u32,
    pub lives_left: u32,
    pub game_over: bool,
    pub ship_speed: f32,
    pub bullet_speed: f32,
    pub alien_speed: f32,
    pub alien_points: u32,
}

impl Progression {
    pub fn new(profile: &DifficultyProfile) -> Self {
        Self {
            score: 0,
            high_score: 0,
            level: 1,
            lives_left: SHIP_LIMIT,
            game_over: false,
            ship_speed: profile.ship_speed,
            bullet_speed: profile.bullet_speed,
            alien_speed: profile.alien_speed,
            alien_points: profile.alien_points,
        }
    }

    /// Reset for a fresh run, keeping the session high score
    pub fn reset(&mut self, profile: &DifficultyProfile) {
        let high_score = self.high_score;
        *self = Self::new(profile);
        self.high_score = high_score;
    }

    /// Add points for destroyed aliens
    pub fn award(&mut self, points: u32) {
        self.score += points;
        if self.score > self.high_score {
            self.high_score = self.score;
        }
    }

    /// Multiply the working speeds by the profile's speedup scale, each
    /// capped at its fixed ceiling, and scale the point value (frozen once
    /// it reaches the maximum).
    pub fn escalate(&mut self, speedup_scale: f32) {
        if self.ship_speed < MAX_SHIP_SPEED {
            self.ship_speed *= speedup_scale;
        }
        if self.bullet_speed < MAX_BULLET_SPEED {
            self.bullet_speed *= speedup_scale;
        }
        if self.alien_speed < MAX_ALIEN_SPEED {
            self.alien_speed *= speedup_scale;
        }
        if self.alien_points < MAX_ALIEN_POINTS {
            self.alien_points = (self.alien_points as f32 * SCORE_SCALE) as u32;
        }
    }
}

/// Complete game state, owned by the driver and passed by `&mut` to every
/// update. There is no ambient or static state anywhere in the simulation.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG; all randomness (alien fire, power-up spawns) draws here
    pub rng: Pcg32,
    /// Play area dimensions, fixed at construction
    pub width: f32,
    pub height: f32,
    pub phase: GamePhase,
    /// The selected difficulty and its immutable parameter block
    pub difficulty: Difficulty,
    pub profile: DifficultyProfile,
    pub progress: Progression,
    pub ship: Ship,
    pub bullets: EntityCollection<Bullet>,
    pub alien_bullets: EntityCollection<AlienBullet>,
    pub fleet: Fleet,
    pub powerups: EntityCollection<Powerup>,
    /// Transitions produced this tick, drained by the platform layer
    pub events: Vec<GameEvent>,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// A fresh state in the Menu phase. A default fleet is spawned so the
    /// formation shows behind the menu, as on first launch.
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        let difficulty = Difficulty::default();
        let profile = difficulty.profile();
        let mut fleet = Fleet::new();
        fleet.spawn(1, width);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            width,
            height,
            phase: GamePhase::Menu,
            difficulty,
            profile,
            progress: Progression::new(&profile),
            ship: Ship::centered(width, height),
            bullets: EntityCollection::new(),
            alien_bullets: EntityCollection::new(),
            fleet,
            powerups: EntityCollection::new(),
            events: Vec::new(),
            time_ticks: 0,
        }
    }

    /// Leave the transient ShipLost state. Called by the frame loop once
    /// the recovery pause has elapsed.
    pub fn resume_after_ship_loss(&mut self) {
        if self.phase == GamePhase::ShipLost {
            self.phase = GamePhase::Active;
        }
    }
}
