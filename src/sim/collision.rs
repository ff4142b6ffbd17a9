//! Fixed-order collision resolution
//!
//! Runs once per active tick. The pass order is load-bearing, not
//! aesthetic: scoring must happen exactly once per destroyed alien, the
//! super-bullet sweep must see only bullets that survived the pairwise
//! pass, and the fleet-cleared branch must run after every removal of the
//! tick has settled.

use super::collection::Bounded;
use super::state::{GameEvent, GamePhase, GameState};

/// Resolve all pairwise interactions for this tick, in order:
///
/// 1. player bullets x aliens (remove both, score per alien)
/// 2. super-bullet sweep (survivors die unconditionally after one pass)
/// 3. ship body contact with aliens or alien bullets
/// 4. ship x power-ups
/// 5. aliens reaching the bottom boundary (treated as a ship hit)
/// 6. fleet cleared: reset bullets, escalate, next level
///
/// A ship hit ends the pass early; the phase is no longer Active and
/// nothing further may advance this tick.
pub fn resolve(state: &mut GameState) {
    bullet_alien_pass(state);
    super_bullet_sweep(state);

    ship_contact_pass(state);
    if state.phase != GamePhase::Active {
        return;
    }

    powerup_pass(state);

    if state.fleet.reached_bottom(state.height) {
        ship_hit(state);
    }
    if state.phase != GamePhase::Active {
        return;
    }

    fleet_cleared_pass(state);
}

/// Respond to the ship being hit by an alien, an alien bullet, or the
/// fleet reaching the bottom.
///
/// With lives remaining: bullets and aliens reset, the fleet respawns at
/// the current level, the ship recenters, and the phase drops to the
/// transient ShipLost for the recovery pause. On the last life: straight
/// to GameOver, leaving every collection exactly as it was.
pub fn ship_hit(state: &mut GameState) {
    state.progress.lives_left = state.progress.lives_left.saturating_sub(1);

    if state.progress.lives_left == 0 {
        state.progress.game_over = true;
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver {
            score: state.progress.score,
        });
        log::info!(
            "Game over: score {} at level {}",
            state.progress.score,
            state.progress.level
        );
        return;
    }

    state.bullets.clear();
    state.alien_bullets.clear();
    state.fleet.spawn(state.progress.level, state.width);
    state.ship.recenter(state.width);
    state.phase = GamePhase::ShipLost;
    state.events.push(GameEvent::ShipLost {
        lives_left: state.progress.lives_left,
    });
}

/// Step 1: every player bullet against every alien. Both sides of a hit
/// are removed; each destroyed alien scores the current point value.
/// Super bullets take part here too with their full-height box, so one
/// that connects kills everything in its column and is consumed.
fn bullet_alien_pass(state: &mut GameState) {
    let points = state.progress.alien_points;
    let pairs = state.bullets.collide_pairs(state.fleet.aliens_mut(), true, true);
    for (_bullet, aliens_hit) in &pairs {
        state.progress.award(points * aliens_hit.len() as u32);
    }
}

/// Step 2: super bullets that hit nothing in step 1 still sweep their
/// column once, then die unconditionally. One-frame lifetime: a super
/// bullet must never persist to accumulate hits across ticks.
fn super_bullet_sweep(state: &mut GameState) {
    let points = state.progress.alien_points;
    let probes: Vec<_> = state
        .bullets
        .iter()
        .filter(|b| b.is_super)
        .map(|b| b.bounds())
        .collect();
    for probe in probes {
        let destroyed = state.fleet.aliens_mut().take_overlapping(probe);
        state.progress.award(points * destroyed.len() as u32);
    }
    state.bullets.retain(|b| !b.is_super);
}

/// Step 3: body contact with an alien, or an alien bullet landing
fn ship_contact_pass(state: &mut GameState) {
    let ship_box = state.ship.bounds();
    if state.fleet.aliens().overlaps_any(ship_box) || state.alien_bullets.overlaps_any(ship_box) {
        ship_hit(state);
    }
}

/// Step 4: catching a power-up arms the super bullet
fn powerup_pass(state: &mut GameState) {
    let collected = state.powerups.take_overlapping(state.ship.bounds());
    if !collected.is_empty() {
        state.ship.has_super_bullet = true;
        state.events.push(GameEvent::PowerupCollected);
    }
}

/// Step 6: fleet destroyed. All bullets vanish, the level advances, and
/// the next formation spawns with the escalated speeds and point values.
fn fleet_cleared_pass(state: &mut GameState) {
    if !state.fleet.is_empty() {
        return;
    }
    state.bullets.clear();
    state.alien_bullets.clear();
    state.progress.escalate(state.profile.speedup_scale);
    state.progress.level += 1;
    state.fleet.spawn(state.progress.level, state.width);
    state.events.push(GameEvent::LevelUp {
        level: state.progress.level,
    });
    log::info!(
        "Level up: {} (alien points now {})",
        state.progress.level,
        state.progress.alien_points
    );
}
