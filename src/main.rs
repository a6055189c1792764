use lanefall::app::{App, InputFeed};
use lanefall::audio::LogCues;
use lanefall::game::session::GameSession;
use lanefall::game::spawn::{LaneSource, RandomLanes};
use lanefall::input::KeyBindings;
use lanefall::settings;
use log::{error, info, LevelFilter};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // --- Logging Setup ---
    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::Info) // Default level
        .init();

    info!("lanefall starting...");

    // --- Settings & Session ---
    settings::load();
    let settings = settings::get();

    let lanes: Box<dyn LaneSource + Send> = match settings.seed {
        Some(seed) => {
            info!("Using fixed spawn seed {}", seed);
            Box::new(RandomLanes::seeded(seed))
        }
        None => Box::new(RandomLanes::new()),
    };

    let session = match GameSession::with_lane_source(settings.game.clone(), lanes) {
        Ok(session) => session,
        Err(e) => {
            error!("Invalid gameplay configuration: {}", e);
            return Err(e.into());
        }
    };

    // --- Driver ---
    let feed = match &settings.script {
        Some(script) => InputFeed::Script { keys: script.chars().collect() },
        None if settings.autoplay => InputFeed::Autoplay,
        None => InputFeed::Idle,
    };

    let bindings = KeyBindings::new(&settings.bindings);
    let mut app = App::new(session, Box::new(LogCues), bindings, feed, settings.tick_hz);
    app.run(settings.run_ticks);

    info!("lanefall exited gracefully.");
    Ok(())
}
