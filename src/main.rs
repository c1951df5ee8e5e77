//! Combat Arena entry point
//!
//! Headless demo: runs the simulation in auto-targeting mode and logs the
//! outcome. Rendering frontends consume the library crate instead.

use combat_arena::sim::{Session, step};

const MAX_FRAMES: u64 = 50_000;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

    log::info!("Combat Arena starting with seed {seed}");

    let mut session = Session::new(seed);
    session.toggle_auto_mode();

    while !session.is_finished && session.frame < MAX_FRAMES {
        step(&mut session);
    }

    log::info!(
        "run ended after {} frames: score {}, health {}, misses {}",
        session.frame,
        session.player.points,
        session.player.health,
        session.player.shots_missed
    );

    if log::log_enabled!(log::Level::Debug) {
        match serde_json::to_string(&session) {
            Ok(snapshot) => log::debug!("final session: {snapshot}"),
            Err(e) => log::warn!("session snapshot failed: {e}"),
        }
    }
}
