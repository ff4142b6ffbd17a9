//! Alien Siege entry point
//!
//! No windowing backend is wired in yet, so the binary runs a seeded demo
//! session through the full frame loop: a scripted pilot selects the
//! medium difficulty, then strafes and fires while a logging presenter
//! reports the scoreboard once per second.

use std::time::{SystemTime, UNIX_EPOCH};

use alien_siege::app::App;
use alien_siege::consts::*;
use alien_siege::platform::{FrameSnapshot, InputEvent, InputSource, Key, Presenter};
use alien_siege::sim::GamePhase;

/// How long the demo session runs before quitting
const DEMO_SECONDS: u32 = 15;

/// Scripted pilot: clicks the medium button, holds fire, and swaps strafe
/// direction every two seconds
struct DemoPilot {
    frame: u64,
}

impl InputSource for DemoPilot {
    fn poll(&mut self) -> Vec<InputEvent> {
        let frame = self.frame;
        self.frame += 1;

        if frame >= (DEMO_SECONDS * TICK_RATE) as u64 {
            return vec![InputEvent::Quit];
        }
        match frame {
            0 => vec![InputEvent::PointerClick {
                x: SCREEN_WIDTH / 2.0,
                y: SCREEN_HEIGHT / 2.0,
            }],
            1 => vec![
                InputEvent::KeyDown(Key::Fire),
                InputEvent::KeyDown(Key::Right),
            ],
            _ => {
                let period = (2 * TICK_RATE) as u64;
                if frame % period == 0 {
                    if (frame / period) % 2 == 0 {
                        vec![
                            InputEvent::KeyUp(Key::Left),
                            InputEvent::KeyDown(Key::Right),
                        ]
                    } else {
                        vec![
                            InputEvent::KeyUp(Key::Right),
                            InputEvent::KeyDown(Key::Left),
                        ]
                    }
                } else {
                    Vec::new()
                }
            }
        }
    }
}

/// Headless presenter: one scoreboard line per second
struct LogPresenter {
    frames: u64,
}

impl Presenter for LogPresenter {
    fn present(&mut self, frame: &FrameSnapshot) {
        if self.frames % TICK_RATE as u64 == 0 || frame.phase == GamePhase::GameOver {
            log::info!(
                "[{:?}] score {} (best {}) level {} lives {} entities {}",
                frame.phase,
                frame.score,
                frame.high_score,
                frame.level,
                frame.lives_left,
                frame.entities.len()
            );
        }
        self.frames += 1;
    }
}

fn main() {
    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("Alien Siege starting (seed {seed})");

    let mut app = App::new(seed, DemoPilot { frame: 0 }, LogPresenter { frames: 0 });
    app.run();

    let progress = &app.state().progress;
    log::info!(
        "Demo finished: score {}, level {}, lives left {}",
        progress.score,
        progress.level,
        progress.lives_left
    );
}
