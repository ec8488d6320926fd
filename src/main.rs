//! Invaders entry point
//!
//! Headless native shell: drives the simulation at the fixed timestep with
//! a scripted autopilot, drains the draw batch and sound cues every frame,
//! and logs session outcomes. A windowed frontend would replace
//! [`autopilot`] with real key polling and hand each draw batch to its
//! renderer; nothing in the core changes.

use std::time::{SystemTime, UNIX_EPOCH};

use invaders::consts::*;
use invaders::render;
use invaders::sim::{GameEvent, GameState, MenuAction, Nav, Screen, TickInput, tick};
use invaders::Settings;

fn main() {
    env_logger::init();

    let settings = Settings::load();
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("Starting with seed {seed}");

    let mut state = GameState::new(seed);
    let mut nav = Nav::default();
    let mut sessions: u32 = 0;
    let mut frame: u64 = 0;
    // Ten minutes of simulated time; the autopilot resolves well before.
    let max_frames: u64 = 10 * 60 * 120;

    loop {
        frame += 1;
        if frame > max_frames {
            log::warn!("Demo run timed out after {} frames", frame - 1);
            break;
        }

        let input = autopilot(&state, &nav, sessions, frame);

        // Whole-process cancellation, checked once per frame boundary.
        if input.cancel {
            log::info!("Cancelled");
            break;
        }

        match nav.screen {
            Screen::Menu => {
                match nav.menu_tick(input.menu_up, input.menu_down, input.confirm, SIM_DT) {
                    Some(MenuAction::StartGame) => {
                        if nav.pending_reset {
                            let next = seed.wrapping_add(u64::from(sessions)).wrapping_add(1);
                            state.reset(next);
                            nav.pending_reset = false;
                            log::info!("Session reinitialized with seed {next}");
                        }
                        log::info!("Session started");
                    }
                    Some(MenuAction::Quit) => {
                        log::info!("Exiting after {sessions} session(s)");
                        break;
                    }
                    None => {}
                }
            }
            Screen::Game | Screen::Pause => {
                tick(&mut state, &mut nav, &input, SIM_DT);
                for event in state.events.drain(..) {
                    match event {
                        GameEvent::Sound(cue) => {
                            log::debug!("sound cue {cue:?} at volume {:.2}", settings.cue_volume());
                        }
                    }
                }
                if nav.screen != Screen::Game {
                    sessions += 1;
                    log::info!(
                        "Session over: {:?} with score {} and {} hp",
                        nav.screen,
                        state.score,
                        state.player.hp
                    );
                }
            }
            Screen::GameOver | Screen::Victory => {
                nav.end_screen_tick(input.any_key, SIM_DT);
            }
        }

        let batch = render::build_frame(&state, &nav, &settings);
        if settings.show_fps && frame % 600 == 0 {
            log::debug!("frame {frame}: {} draw commands", batch.len());
        }
    }

    settings.save();
}

/// Scripted stand-in for a human player: aims under the horizontally
/// nearest enemy, holds primary fire, and lobs a missile cluster every two
/// seconds. Plays one session, then exits through the menu.
fn autopilot(state: &GameState, nav: &Nav, sessions: u32, frame: u64) -> TickInput {
    let mut input = TickInput::default();
    match nav.screen {
        Screen::Menu => {
            if sessions == 0 {
                input.confirm = true;
            } else {
                // One run is enough: cycle to Exit and confirm.
                input.menu_down = true;
                input.confirm = true;
            }
        }
        Screen::Game | Screen::Pause => {
            let target = state.enemies.iter().min_by(|a, b| {
                let da = (a.kin.pos.x - state.player.kin.pos.x).abs();
                let db = (b.kin.pos.x - state.player.kin.pos.x).abs();
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            });
            if let Some(enemy) = target {
                let dx = enemy.kin.pos.x - state.player.kin.pos.x;
                input.left = dx < -10.0;
                input.right = dx > 10.0;
            }
            input.fire = true;
            input.missile = frame % 240 == 0;
        }
        Screen::GameOver | Screen::Victory => {
            input.any_key = true;
        }
    }
    input
}
