//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No sleeping, no I/O, no rendering or platform dependencies
//!
//! The real-time concerns (frame pacing, the post-ship-loss recovery
//! pause) belong to `crate::app`.

pub mod collection;
pub mod collision;
pub mod fleet;
pub mod rect;
pub mod state;
pub mod tick;

pub use collection::{Bounded, EntityCollection};
pub use collision::{resolve, ship_hit};
pub use fleet::Fleet;
pub use rect::Rect;
pub use state::{
    Alien, AlienBullet, Bullet, GameEvent, GamePhase, GameState, Powerup, Progression, Ship,
};
pub use tick::{TickInput, menu_buttons, menu_hit_test, start_game, tick};
