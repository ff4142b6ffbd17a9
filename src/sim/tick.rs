//! Fixed timestep simulation tick
//!
//! One `tick()` call advances the whole simulation by a single 60 Hz step:
//! ship intent, projectile and formation movement, random fire and
//! power-up draws, then the fixed-order collision resolution. Menu and
//! GameOver ticks only watch for a difficulty selection; everything else
//! in those phases is rendering, which is not this module's concern.

use glam::Vec2;
use rand::Rng;

use super::collection::Bounded;
use super::collision;
use super::rect::Rect;
use super::state::{Bullet, GameEvent, GamePhase, GameState, Powerup};
use crate::consts::*;
use crate::settings::Difficulty;

/// Input intents for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Held movement keys
    pub move_left: bool,
    pub move_right: bool,
    /// Held fire key
    pub fire: bool,
    /// Difficulty button clicked this frame, if any
    pub select: Option<Difficulty>,
}

/// The three difficulty buttons, one row centered on the play area
pub fn menu_buttons(width: f32, height: f32) -> [(Difficulty, Rect); 3] {
    let center = Vec2::new(width / 2.0, height / 2.0);
    let offset = Vec2::new(MENU_BUTTON_SPACING, 0.0);
    [
        (
            Difficulty::Easy,
            Rect::centered(center - offset, MENU_BUTTON_WIDTH, MENU_BUTTON_HEIGHT),
        ),
        (
            Difficulty::Medium,
            Rect::centered(center, MENU_BUTTON_WIDTH, MENU_BUTTON_HEIGHT),
        ),
        (
            Difficulty::Hard,
            Rect::centered(center + offset, MENU_BUTTON_WIDTH, MENU_BUTTON_HEIGHT),
        ),
    ]
}

/// Hit-test a pointer click against the difficulty buttons
pub fn menu_hit_test(width: f32, height: f32, x: f32, y: f32) -> Option<Difficulty> {
    menu_buttons(width, height)
        .into_iter()
        .find(|(_, rect)| rect.contains_point(x, y))
        .map(|(difficulty, _)| difficulty)
}

/// Start a fresh run with the chosen difficulty.
///
/// Valid from Menu and from GameOver (there is no auto-reset). Applies the
/// profile, resets progression, clears every entity collection, spawns a
/// level-one fleet and recenters the ship.
pub fn start_game(state: &mut GameState, difficulty: Difficulty) {
    let profile = difficulty.profile();
    state.difficulty = difficulty;
    state.profile = profile;
    state.progress.reset(&profile);

    state.bullets.clear();
    state.alien_bullets.clear();
    state.powerups.clear();
    state.fleet.spawn(state.progress.level, state.width);

    state.ship.recenter(state.width);
    state.ship.moving_left = false;
    state.ship.moving_right = false;
    state.ship.firing = false;
    state.ship.has_super_bullet = false;

    state.phase = GamePhase::Active;
    state.events.push(GameEvent::GameStarted { difficulty });
    log::info!(
        "New game: {} difficulty, {} lives",
        difficulty.as_str(),
        state.progress.lives_left
    );
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Menu | GamePhase::GameOver => {
            // Rendering-only phases; the only live control is selection
            if let Some(difficulty) = input.select {
                start_game(state, difficulty);
            }
            return;
        }
        // The frame loop holds here for the recovery pause
        GamePhase::ShipLost => return,
        GamePhase::Active => {}
    }

    state.time_ticks += 1;

    // Ship intent and movement
    state.ship.moving_left = input.move_left;
    state.ship.moving_right = input.move_right;
    state.ship.firing = input.fire;
    state.ship.advance(state.progress.ship_speed, state.width);
    if state.ship.firing {
        fire_bullet(state);
    }

    // Player bullets travel up; discarded once fully past the top edge.
    // Super bullets already span the column and do not move.
    let bullet_speed = state.progress.bullet_speed;
    for bullet in state.bullets.iter_mut() {
        if !bullet.is_super {
            bullet.pos.y -= bullet_speed;
        }
    }
    state.bullets.retain(|b| b.bounds().bottom() > 0.0);

    // Alien bullets fall at their fixed speed
    for bullet in state.alien_bullets.iter_mut() {
        bullet.pos.y += ALIEN_BULLET_SPEED;
    }
    let height = state.height;
    state.alien_bullets.retain(|b| b.bounds().top() < height);

    // Fleet: edge reversal first, then the horizontal step, then maybe a
    // shot from the bottom row
    state.fleet.check_edges(state.width);
    state.fleet.advance(state.progress.alien_speed);
    if let Some(bullet) = state.fleet.maybe_fire(&mut state.rng, ALIEN_FIRE_RATE) {
        state.alien_bullets.add(bullet);
    }

    // Occasional power-up drop at a random column
    if state.rng.random_ratio(1, POWERUP_SPAWN_RATE) {
        let x = state.rng.random_range(0.0..state.width - POWERUP_SIZE);
        state.powerups.add(Powerup {
            pos: Vec2::new(x, -POWERUP_SIZE),
        });
    }
    for powerup in state.powerups.iter_mut() {
        powerup.pos.y += POWERUP_SPEED;
    }
    state.powerups.retain(|p| p.bounds().top() <= height);

    // All pairwise interactions, fixed order
    collision::resolve(state);
}

/// Fire on intent: a stored super bullet takes priority and ignores the
/// on-screen cap; regular fire is a no-op at the cap.
fn fire_bullet(state: &mut GameState) {
    if state.ship.has_super_bullet {
        let bullet = Bullet::super_from_ship(&state.ship, state.height);
        state.bullets.add(bullet);
        state.ship.has_super_bullet = false;
    } else if state.bullets.len() < BULLETS_ALLOWED {
        state.bullets.add(Bullet::from_ship(&state.ship));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn new_state() -> GameState {
        GameState::new(42, 1200.0, 800.0)
    }

    #[test]
    fn test_menu_select_starts_game() {
        let mut state = new_state();
        assert_eq!(state.phase, GamePhase::Menu);

        let input = TickInput {
            select: Some(Difficulty::Easy),
            ..Default::default()
        };
        tick(&mut state, &input);

        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.profile, Difficulty::Easy.profile());
        assert_eq!(state.progress.score, 0);
        assert_eq!(state.progress.level, 1);
        assert_eq!(state.progress.lives_left, SHIP_LIMIT);
        assert!(!state.progress.game_over);
        assert!(!state.fleet.is_empty());
    }

    #[test]
    fn test_menu_ignores_motion_and_fire() {
        let mut state = new_state();
        let ship_x = state.ship.x;
        let input = TickInput {
            move_left: true,
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input);

        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.ship.x, ship_x);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_game_over_resets_only_through_selection() {
        let mut state = new_state();
        state.phase = GamePhase::GameOver;
        state.progress.game_over = true;
        state.progress.score = 500;

        tick(&mut state, &TickInput { fire: true, ..Default::default() });
        assert_eq!(state.phase, GamePhase::GameOver);

        let input = TickInput {
            select: Some(Difficulty::Hard),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.progress.score, 0);
        assert!(!state.progress.game_over);
        // Session best survives the reset
        assert_eq!(state.progress.high_score, 500);
    }

    #[test]
    fn test_ship_lost_tick_is_inert_until_resumed() {
        let mut state = new_state();
        start_game(&mut state, Difficulty::Medium);
        state.phase = GamePhase::ShipLost;

        let ticks = state.time_ticks;
        tick(&mut state, &TickInput { fire: true, ..Default::default() });
        assert_eq!(state.time_ticks, ticks);
        assert!(state.bullets.is_empty());

        state.resume_after_ship_loss();
        assert_eq!(state.phase, GamePhase::Active);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, ticks + 1);
    }

    #[test]
    fn test_fire_respects_on_screen_cap() {
        let mut state = new_state();
        start_game(&mut state, Difficulty::Medium);
        // Saturate the cap with bullets parked below the formation
        for _ in 0..BULLETS_ALLOWED {
            let mut bullet = Bullet::from_ship(&state.ship);
            bullet.pos.y = 600.0;
            state.bullets.add(bullet);
        }

        tick(&mut state, &TickInput { fire: true, ..Default::default() });
        assert_eq!(state.bullets.len(), BULLETS_ALLOWED);
    }

    #[test]
    fn test_super_bullet_fire_consumes_the_charge() {
        let mut state = new_state();
        start_game(&mut state, Difficulty::Medium);
        state.ship.has_super_bullet = true;
        let points = state.progress.alien_points;

        tick(&mut state, &TickInput { fire: true, ..Default::default() });

        // The sweep connected with the two aliens in the ship's column and
        // was consumed in the same tick
        assert!(!state.ship.has_super_bullet);
        assert!(state.bullets.iter().all(|b| !b.is_super));
        assert_eq!(state.progress.score, 2 * points);
    }

    #[test]
    fn test_menu_hit_test_buttons() {
        let (w, h) = (1200.0, 800.0);
        let center = (600.0, 400.0);
        assert_eq!(
            menu_hit_test(w, h, center.0, center.1),
            Some(Difficulty::Medium)
        );
        assert_eq!(
            menu_hit_test(w, h, center.0 - MENU_BUTTON_SPACING, center.1),
            Some(Difficulty::Easy)
        );
        assert_eq!(
            menu_hit_test(w, h, center.0 + MENU_BUTTON_SPACING, center.1),
            Some(Difficulty::Hard)
        );
        assert_eq!(menu_hit_test(w, h, 10.0, 10.0), None);
        assert_eq!(menu_hit_test(w, h, center.0, center.1 + 100.0), None);
    }

    #[test]
    fn test_level_progression_end_to_end() {
        let mut state = new_state();
        start_game(&mut state, Difficulty::Medium);
        assert_eq!(state.progress.alien_points, 100);

        // Three bullets placed onto three distinct aliens
        let targets: Vec<_> = state
            .fleet
            .aliens()
            .iter()
            .take(3)
            .map(|a| (a.x, a.y as f32))
            .collect();
        for (x, y) in targets {
            let mut bullet = Bullet::from_ship(&state.ship);
            bullet.pos = Vec2::new(x + 20.0, y + 20.0);
            state.bullets.add(bullet);
        }
        let fleet_before = state.fleet.len();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.progress.score, 300);
        assert_eq!(state.fleet.len(), fleet_before - 3);
        assert_eq!(state.progress.level, 1);

        // Wipe the remainder down to one and finish the fleet
        let last = state.fleet.aliens().iter().next().unwrap().clone();
        state.fleet.aliens_mut().retain(|a| a.id == last.id);
        let mut bullet = Bullet::from_ship(&state.ship);
        bullet.pos = Vec2::new(last.x + 20.0, last.y as f32 + 20.0);
        state.bullets.add(bullet);
        tick(&mut state, &TickInput::default());

        assert_eq!(state.progress.score, 400);
        assert_eq!(state.progress.level, 2);
        assert_eq!(state.progress.alien_points, 150); // 100 * 1.5
        let mut rows: Vec<i32> = state.fleet.aliens().iter().map(|a| a.y).collect();
        rows.sort_unstable();
        rows.dedup();
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_same_seed_same_run() {
        let inputs = [
            TickInput { fire: true, ..Default::default() },
            TickInput { move_left: true, fire: true, ..Default::default() },
            TickInput { move_right: true, ..Default::default() },
            TickInput::default(),
        ];

        let mut a = new_state();
        let mut b = new_state();
        start_game(&mut a, Difficulty::Hard);
        start_game(&mut b, Difficulty::Hard);

        for i in 0..600 {
            let input = inputs[i % inputs.len()];
            tick(&mut a, &input);
            tick(&mut b, &input);
            a.resume_after_ship_loss();
            b.resume_after_ship_loss();
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.progress.score, b.progress.score);
        assert_eq!(a.progress.lives_left, b.progress.lives_left);
        assert_eq!(a.bullets.len(), b.bullets.len());
        assert_eq!(a.alien_bullets.len(), b.alien_bullets.len());
        assert_eq!(a.fleet.len(), b.fleet.len());
        assert!((a.ship.x - b.ship.x).abs() < f32::EPSILON);
    }

    proptest! {
        /// Across any active input sequence, lives never increase and the
        /// score never decreases.
        #[test]
        fn prop_lives_and_score_monotonic(
            seed in any::<u64>(),
            moves in proptest::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 1..300),
        ) {
            let mut state = GameState::new(seed, 1200.0, 800.0);
            start_game(&mut state, Difficulty::Medium);

            let mut lives = state.progress.lives_left;
            let mut score = state.progress.score;
            for (left, right, fire) in moves {
                let input = TickInput {
                    move_left: left,
                    move_right: right,
                    fire,
                    select: None,
                };
                tick(&mut state, &input);
                prop_assert!(state.progress.lives_left <= lives);
                prop_assert!(state.progress.score >= score);
                lives = state.progress.lives_left;
                score = state.progress.score;

                if state.phase == GamePhase::GameOver {
                    break;
                }
                state.resume_after_ship_loss();
            }
        }
    }
}
