//! Headless demo driver: build the stock city scene, run the drive loop
//! for a few seconds, and log where the fleet ended up.

use std::time::Duration;

use motorcade::demo;
use motorcade::engine::DriveEngine;
use motorcade::options::Options;
use motorcade::util::tick_clock::TickClock;

/// Simulated seconds to run before reporting.
const RUN_SECONDS: f64 = 5.0;

/// Tick pacing for the headless loop (~60 Hz).
const TICK_INTERVAL: Duration = Duration::from_millis(16);

fn main() {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(preset) => {
            match Options::load(std::path::Path::new(&preset)) {
                Ok(o) => o,
                Err(e) => {
                    log::error!("failed to load preset {preset}: {e}");
                    std::process::exit(1);
                }
            }
        }
        None => Options::default(),
    };

    let mut engine = DriveEngine::new(demo::route(), options, 16.0 / 9.0);
    let model = demo::build_city(engine.scene_mut());
    if let Err(e) = engine.on_scene_ready(model) {
        log::error!("scene setup failed: {e}");
        std::process::exit(1);
    }

    let camera = engine.camera();
    log::info!(
        "camera framed at {:?} looking at {:?} (near {:.1}, far {:.0})",
        camera.eye,
        camera.target,
        camera.znear,
        camera.zfar,
    );

    let mut clock = TickClock::start();
    loop {
        let t = clock.next_timestamp();
        if t >= RUN_SECONDS {
            break;
        }
        engine.tick(t);
        std::thread::sleep(TICK_INTERVAL);
    }

    if let Some(registry) = engine.registry() {
        for actor in registry.actors() {
            if let Some(mount) = engine.scene().node(actor.mount) {
                log::info!(
                    "{} (phase {:.3}) at {:?}",
                    actor.name,
                    actor.phase,
                    mount.position
                );
            }
        }
    }
    log::info!(
        "drove {RUN_SECONDS:.1}s simulated at {:.0} ticks/s",
        clock.rate()
    );
}
