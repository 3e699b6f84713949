//! Asteroid Field entry point
//!
//! Headless runner: loads settings, plays a session (autopilot by default)
//! and logs every game event as a JSON line.

use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use asteroid_field::hud::LogHud;
use asteroid_field::session::{FixedStep, Session};
use asteroid_field::sim::GameState;
use asteroid_field::{HighScores, Settings};

fn main() {
    env_logger::init();
    log::info!("Asteroid Field (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(Path::new(&path)) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!("Seed {}", seed);

    let high_scores = match &settings.high_scores_path {
        Some(path) => HighScores::load(path).unwrap_or_else(|e| {
            log::warn!("{}; starting with an empty leaderboard", e);
            HighScores::new()
        }),
        None => HighScores::new(),
    };

    let state = GameState::with_config(seed, settings.round_config());
    let mut session =
        Session::new(state, LogHud::new(), high_scores).with_autopilot(settings.autopilot);
    if !settings.autopilot {
        log::warn!("No input device in headless mode; the round will wait at the first prompt");
    }

    let dt = settings.tick_dt();
    let mut clock = FixedStep::new(dt);
    let mut last_frame = Instant::now();
    let mut ticks = 0u64;
    let mut failed = false;

    'run: while !session.is_finished() && (settings.max_ticks == 0 || ticks < settings.max_ticks)
    {
        let steps = if settings.realtime {
            std::thread::sleep(Duration::from_secs_f32(dt));
            let now = Instant::now();
            let elapsed = now.duration_since(last_frame).as_secs_f32();
            last_frame = now;
            clock.advance(elapsed)
        } else {
            1
        };

        for _ in 0..steps {
            let events = match session.step() {
                Ok(events) => events,
                Err(e) => {
                    log::error!("HUD rejected the frame: {}", e);
                    failed = true;
                    break 'run;
                }
            };
            for event in events {
                match serde_json::to_string(&event) {
                    Ok(line) => println!("{}", line),
                    Err(e) => log::warn!("Could not encode event: {}", e),
                }
            }
            ticks += 1;
        }
    }

    let state = session.state();
    log::info!(
        "Stopped after {} ticks: round {}, score {}, phase {:?}",
        ticks,
        state.round,
        state.score,
        state.phase
    );

    // Saved on every way out of the loop
    if let Some(path) = &settings.high_scores_path {
        if let Err(e) = session.session_end().save(path) {
            log::error!("{}", e);
        }
    }

    if failed {
        std::process::exit(1);
    }
}

/// Seed from the wall clock when none is configured
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
