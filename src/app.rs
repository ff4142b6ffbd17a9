//! Real-time frame loop
//!
//! One logical thread owns all game state. The loop polls input, advances
//! the simulation one tick, presents a snapshot, then sleeps to hold
//! 60 frames per second. The only other blocking point is the deliberate
//! recovery pause after a ship loss; both halt the entire loop, never a
//! subset of entities. A quit event ends the loop immediately.

use std::time::{Duration, Instant};

use crate::consts::*;
use crate::highscores::HighScores;
use crate::platform::{FrameSnapshot, InputEvent, InputSource, Key, Presenter};
use crate::sim::state::{GameEvent, GamePhase, GameState};
use crate::sim::tick::{TickInput, menu_hit_test, tick};

/// Held-key state accumulated from discrete key events
#[derive(Debug, Clone, Copy, Default)]
struct HeldKeys {
    left: bool,
    right: bool,
    fire: bool,
}

/// Owns the game state and the two external collaborators
pub struct App<I, P> {
    state: GameState,
    input: I,
    presenter: P,
    highscores: HighScores,
    held: HeldKeys,
}

impl<I: InputSource, P: Presenter> App<I, P> {
    pub fn new(seed: u64, input: I, presenter: P) -> Self {
        let highscores = HighScores::load();
        let mut state = GameState::new(seed, SCREEN_WIDTH, SCREEN_HEIGHT);
        state.progress.high_score = highscores.top_score().unwrap_or(0);
        Self {
            state,
            input,
            presenter,
            highscores,
            held: HeldKeys::default(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Run frames until a quit event arrives
    pub fn run(&mut self) {
        let frame_budget = Duration::from_secs(1) / TICK_RATE;

        loop {
            let frame_start = Instant::now();

            let mut select = None;
            for event in self.input.poll() {
                match event {
                    InputEvent::Quit | InputEvent::KeyDown(Key::Quit) => return,
                    InputEvent::KeyDown(Key::Left) => self.held.left = true,
                    InputEvent::KeyUp(Key::Left) => self.held.left = false,
                    InputEvent::KeyDown(Key::Right) => self.held.right = true,
                    InputEvent::KeyUp(Key::Right) => self.held.right = false,
                    InputEvent::KeyDown(Key::Fire) => self.held.fire = true,
                    InputEvent::KeyUp(Key::Fire) => self.held.fire = false,
                    InputEvent::KeyUp(Key::Quit) => {}
                    InputEvent::PointerClick { x, y } => {
                        select = menu_hit_test(self.state.width, self.state.height, x, y);
                    }
                }
            }

            let tick_input = TickInput {
                move_left: self.held.left,
                move_right: self.held.right,
                fire: self.held.fire,
                select,
            };
            tick(&mut self.state, &tick_input);
            self.drain_events();

            self.presenter.present(&FrameSnapshot::capture(&self.state));

            // Grace period after losing a ship: the whole loop holds, then
            // the simulation resumes where the hit left it
            if self.state.phase == GamePhase::ShipLost {
                std::thread::sleep(Duration::from_millis(RECOVERY_PAUSE_MS));
                self.state.resume_after_ship_loss();
            }

            let elapsed = frame_start.elapsed();
            if elapsed < frame_budget {
                std::thread::sleep(frame_budget - elapsed);
            }
        }
    }

    /// React to the transitions the simulation surfaced this tick
    fn drain_events(&mut self) {
        for event in self.state.events.drain(..) {
            if let GameEvent::GameOver { score } = event {
                let level = self.state.progress.level;
                let difficulty = self.state.difficulty;
                if let Some(rank) = self.highscores.add_score(score, level, difficulty) {
                    log::info!("New high score (rank {rank}): {score}");
                }
                self.highscores.save();
            }
        }
    }
}
