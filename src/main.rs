//! Gap Glider entry point
//!
//! Headless demo: loads tuning (optional JSON path as the first argument),
//! lets the autopilot fly for a fixed stretch of simulated time and logs the
//! session summary. Rendering hosts drive `gap_glider::Game` directly.

use gap_glider::consts::SIM_DT;
use gap_glider::platform::ManualClock;
use gap_glider::sim::GameEvent;
use gap_glider::{Game, Tuning, TuningError};

/// Simulated frames to run (two minutes at 60 Hz)
const DEMO_FRAMES: u32 = 60 * 120;

fn main() -> Result<(), TuningError> {
    env_logger::init();
    log::info!("Gap Glider (headless) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("Seed {}", seed);

    // Scripted clock so the demo runs as fast as the CPU allows
    let mut game = Game::new(seed, tuning, ManualClock::new(0))?;
    game.set_autopilot(true);
    game.confirm_name("Autopilot");

    let frame_ms = (SIM_DT * 1000.0).round() as u64;
    let mut runs = 0u32;
    let mut milestones = 0u32;
    for _ in 0..DEMO_FRAMES {
        game.clock().advance(frame_ms);
        game.update(SIM_DT);
        for event in game.drain_events() {
            match event {
                GameEvent::GameOver { distance } => {
                    runs += 1;
                    log::debug!("Run {} ended at {}m", runs, distance);
                }
                GameEvent::Milestone { .. } => milestones += 1,
                _ => {}
            }
        }
    }

    let snapshot = game.snapshot();
    log::info!(
        "Finished: {} runs, {} milestones, best {}m, current {}m ({:?}, speed x{:.1})",
        runs,
        milestones,
        snapshot.best_distance,
        snapshot.distance,
        snapshot.mode,
        snapshot.speed_ratio
    );
    println!(
        "{} best: {}m over {} runs",
        snapshot.player_name, snapshot.best_distance, runs
    );

    Ok(())
}
