//! Pixel Archer entry point
//!
//! Runs the simulation headlessly with the autopilot at the wheel and logs
//! what happened. Usage: `pixel-archer [settings.json] [seconds]`.

use std::process::ExitCode;

use pixel_archer::sim::{FrameSnapshot, TickInput};
use pixel_archer::{FixedStepClock, Session, Settings, TileMap};

/// Simulated seconds when none are given
const DEFAULT_RUN_SECONDS: f32 = 60.0;
/// Pretend display refresh
const FRAME_TIME: f32 = 1.0 / 60.0;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Pixel Archer (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().unwrap_or_else(|| Settings::FILE_NAME.to_string());
    let seconds = args
        .next()
        .and_then(|s| s.parse::<f32>().ok())
        .unwrap_or(DEFAULT_RUN_SECONDS);

    let settings = Settings::load(&settings_path);
    let map = match &settings.map_path {
        Some(path) => match TileMap::load(path) {
            Ok(map) => map,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => TileMap::blank(settings.arena_width, settings.arena_height),
    };

    let mut session = Session::new(settings, map);
    let mut clock = FixedStepClock::new();
    let mut input = TickInput {
        autopilot: true,
        ..TickInput::default()
    };

    let frames = (seconds / FRAME_TIME).ceil() as u64;
    'run: for _ in 0..frames {
        for _ in 0..clock.advance(FRAME_TIME) {
            if !session.frame(&input) {
                break 'run;
            }
            input.clear_one_shots();
        }

        if !session.state.player.is_alive() {
            log::info!("Player fell on wave {}", session.state.wave.wave);
            break;
        }
    }

    let snap = FrameSnapshot::capture(&session.state);
    log::info!(
        "Finished at tick {}: wave {}, health {:.0}%, {} enemies, {} skills",
        snap.tick,
        snap.wave,
        snap.player.health_ratio * 100.0,
        snap.enemies.len(),
        session.state.player.skills.len(),
    );
    ExitCode::SUCCESS
}
