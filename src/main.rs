//! Knight Move 3D entry point
//!
//! Runs the game headless: the knight chases the heart across the board for
//! a fixed number of frames, then the run is summarized in the log.
//!
//! Usage: `knight-move-3d [settings.json] [frames]`

use knight_move_3d::engine::HeadlessEngine;
use knight_move_3d::sim::plan_route;
use knight_move_3d::{Application, Settings};

/// Fixed frame step for headless runs (60 Hz)
const FRAME_DT: f32 = 1.0 / 60.0;
const DEFAULT_FRAMES: u64 = 3600;

fn main() {
    env_logger::init();
    log::info!("Knight Move 3D (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    let frames = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::error!("Invalid frame count: {}", e);
            std::process::exit(2);
        }
        None => DEFAULT_FRAMES,
    };

    let mut app = match Application::new(HeadlessEngine::new(FRAME_DT), settings) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Cannot start: {}", e);
            std::process::exit(1);
        }
    };

    for _ in 0..frames {
        if app.knight().is_ready() && !app.board().is_placing_heart() {
            chase_heart(&mut app);
        }
        app.frame();
    }

    let board = app.board();
    log::info!(
        "Ran {} frames ({:.1}s): score {}, hearts {}, total {}",
        app.engine().frames(),
        app.engine().elapsed(),
        board.score(),
        board.hearts_collected(),
        board.total_score()
    );
    log::info!(
        "Knight made {} hops and fell {} times; {} render calls ({} last frame)",
        app.knight().hops(),
        app.knight().falls(),
        app.engine().total_render_calls(),
        app.last_render_calls()
    );
}

/// Queue the shortest hop sequence toward the heart
fn chase_heart(app: &mut Application<HeadlessEngine>) {
    let dims = app.board().dimensions();
    let from = app.knight().index();
    let to = app.board().heart().index();

    let route = match plan_route(dims, from, to) {
        Some(route) if !route.is_empty() => route,
        // Already there or unreachable: hop anywhere to keep moving
        _ => app.knight().valid_moves(dims).take(1).collect(),
    };

    for mv in route {
        if let Err(e) = app.queue_knight_move(mv) {
            log::warn!("Route step rejected: {}", e);
        }
    }
}
