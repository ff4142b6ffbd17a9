//! Platform collaborator boundary
//!
//! The simulation core neither draws nor polls devices. A windowing
//! backend plugs in here with two traits:
//! - `InputSource` delivers the frame's discrete input events
//! - `Presenter` receives a read-only `FrameSnapshot` once per frame
//!
//! Key bindings are fixed: arrows move, space fires, q quits. The
//! presenter is expected to hide the pointer cursor while the phase is
//! Active/ShipLost and reveal it for Menu and GameOver.

use crate::sim::collection::Bounded;
use crate::sim::rect::Rect;
use crate::sim::state::{GamePhase, GameState};

/// The fixed set of game keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Fire,
    Quit,
}

/// A discrete input event, polled once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    KeyUp(Key),
    PointerClick { x: f32, y: f32 },
}

/// Source of input events (window event queue, test script, ...)
pub trait InputSource {
    fn poll(&mut self) -> Vec<InputEvent>;
}

/// Rendering collaborator: receives one snapshot per frame
pub trait Presenter {
    fn present(&mut self, frame: &FrameSnapshot);
}

/// What kind of entity a sprite box belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Ship,
    Bullet,
    SuperBullet,
    AlienBullet,
    Alien,
    Powerup,
}

/// Read-only description of one frame: every live entity's box and kind,
/// the scoreboard values, and the phase (so the presenter can overlay the
/// menu or the game-over text).
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub lives_left: u32,
    pub entities: Vec<(EntityKind, Rect)>,
}

impl FrameSnapshot {
    /// Capture the current state for presentation
    pub fn capture(state: &GameState) -> Self {
        let mut entities = Vec::with_capacity(
            1 + state.bullets.len()
                + state.alien_bullets.len()
                + state.fleet.len()
                + state.powerups.len(),
        );

        entities.push((EntityKind::Ship, state.ship.bounds()));
        for bullet in state.bullets.iter() {
            let kind = if bullet.is_super {
                EntityKind::SuperBullet
            } else {
                EntityKind::Bullet
            };
            entities.push((kind, bullet.bounds()));
        }
        for bullet in state.alien_bullets.iter() {
            entities.push((EntityKind::AlienBullet, bullet.bounds()));
        }
        for alien in state.fleet.aliens().iter() {
            entities.push((EntityKind::Alien, alien.bounds()));
        }
        for powerup in state.powerups.iter() {
            entities.push((EntityKind::Powerup, powerup.bounds()));
        }

        Self {
            phase: state.phase,
            score: state.progress.score,
            high_score: state.progress.high_score,
            level: state.progress.level,
            lives_left: state.progress.lives_left,
            entities,
        }
    }
}
