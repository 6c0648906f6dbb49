use std::str::FromStr;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

// Import from the library crate
use bike_racer::{config, controller, error, frame_loop, logging, model, view};

use config::GameConfig;
use controller::{InputEvent, InputProcessor, RapierWorld};
use frame_loop::FrameLoopContext;
use error::GameError;
use model::SceneGraph;
use view::{HudField, TextHud};

const FRAME_DELTA: f32 = 1.0 / 60.0;

/// Read an environment override, falling back to the default on absence or parse errors
fn env_or<T: FromStr + Copy + std::fmt::Debug>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(name, %raw, ?default, "unparseable override, using default");
            default
        }),
        Err(_) => default,
    }
}

/// Headless test drive: throttle, a left sweep, coast, brake
fn scripted_input(frame: u64) -> Option<InputEvent> {
    let key = |down: bool, k: &str| {
        if down {
            InputEvent::KeyDown(k.to_string())
        } else {
            InputEvent::KeyUp(k.to_string())
        }
    };
    match frame {
        0 => Some(key(true, "ArrowUp")),
        120 => Some(key(true, "ArrowLeft")),
        180 => Some(key(false, "ArrowLeft")),
        300 => Some(key(false, "ArrowUp")),
        420 => Some(key(true, "ArrowDown")),
        480 => Some(key(false, "ArrowDown")),
        _ => None,
    }
}

fn main() -> Result<(), GameError> {
    logging::init();

    let frames: u64 = env_or("BIKE_FRAMES", 600);
    let seed: u64 = env_or("BIKE_SEED", 7);
    info!(frames, seed, "starting headless run");

    let config = GameConfig::default();
    let physics = RapierWorld::new(config.gravity, config.solver_iterations);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut ctx = FrameLoopContext::new(config, physics, SceneGraph::new(), &mut rng);
    ctx.game_state.borrow_mut().enable_controls();

    let processor = InputProcessor::default();
    let mut hud = TextHud::new();

    for frame in 0..frames {
        if let Some(event) = scripted_input(frame) {
            processor.process(&mut ctx.controls.borrow_mut(), &event);
        }

        let report = ctx.update(FRAME_DELTA, &mut hud);

        if frame % 60 == 0 {
            let p = ctx.actor.position();
            info!(
                frame,
                speed = report.speed,
                x = p.x,
                y = p.y,
                z = p.z,
                "{}",
                hud.get(HudField::Speed).unwrap_or("")
            );
        }
    }

    let state = ctx.game_state.borrow();
    info!(
        score = hud.get(HudField::Score).unwrap_or(""),
        coins_left = ctx.coins.active_count(),
        meshes = ctx.surface.len(),
        frames_rendered = ctx.surface.frames_rendered(),
        "run finished"
    );
    println!("{}", state.snapshot_json()?);
    Ok(())
}
