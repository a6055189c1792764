use configparser::ini::Ini;
use log::{info, warn};
use once_cell::sync::Lazy;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use crate::config::GameConfig;

// --- Settings Data ---
const SETTINGS_DIR: &str = "save";
const SETTINGS_INI_PATH: &str = "save/settings.ini";

/// Everything the driver reads from disk: gameplay tuning overrides plus
/// driver pacing and input options. Game state never lives here.
#[derive(Debug, Clone)]
pub struct Settings {
    pub game: GameConfig,
    /// Driver tick cadence in Hz.
    pub tick_hz: u32,
    /// How many ticks a run lasts before the binary exits.
    pub run_ticks: u64,
    /// When no script is given: press lanes automatically as notes cross the
    /// line, or let everything scroll by unstruck.
    pub autoplay: bool,
    /// One key character per lane, left to right.
    pub bindings: String,
    /// Optional per-tick key script; any unbound character is a rest.
    pub script: Option<String>,
    /// Optional spawn seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            tick_hz: 60,
            run_ticks: 1800,
            autoplay: true,
            bindings: "asdf".to_string(),
            script: None,
            seed: None,
        }
    }
}

// Global static for the loaded settings.
static SETTINGS: Lazy<Mutex<Settings>> = Lazy::new(|| Mutex::new(Settings::default()));

/// Creates the default settings file if it doesn't exist.
fn create_default_file() -> Result<(), std::io::Error> {
    info!("Settings file not found, creating defaults in '{}'.", SETTINGS_DIR);
    fs::create_dir_all(SETTINGS_DIR)?;

    let defaults = Settings::default();
    let mut conf = Ini::new();
    conf.set("gameplay", "LaneCount", Some(defaults.game.lane_count.to_string()));
    conf.set("gameplay", "SpawnInterval", Some(defaults.game.spawn_interval.to_string()));
    conf.set("gameplay", "NoteSpeed", Some(defaults.game.note_speed.to_string()));
    conf.set("gameplay", "JudgmentWindow", Some(defaults.game.judgment_window.to_string()));
    conf.set("gameplay", "MissThreshold", Some(defaults.game.miss_threshold.to_string()));
    conf.set("gameplay", "HitValue", Some(defaults.game.hit_value.to_string()));
    conf.set("driver", "TickHz", Some(defaults.tick_hz.to_string()));
    conf.set("driver", "RunTicks", Some(defaults.run_ticks.to_string()));
    conf.set("driver", "Autoplay", Some("1".to_string()));
    conf.set("driver", "Bindings", Some(defaults.bindings.clone()));
    conf.write(SETTINGS_INI_PATH)?;
    Ok(())
}

/// Loads settings from disk into the global cache. Missing or malformed
/// values fall back to defaults; this never fails the program.
pub fn load() {
    if !Path::new(SETTINGS_INI_PATH).exists() {
        if let Err(e) = create_default_file() {
            warn!("Failed to create default settings file: {}", e);
            // Proceed with default struct values.
            return;
        }
    }

    let mut settings = SETTINGS.lock().unwrap();
    let defaults = Settings::default();

    let mut conf = Ini::new();
    if conf.load(SETTINGS_INI_PATH).is_ok() {
        settings.game.lane_count = conf
            .get("gameplay", "LaneCount")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.game.lane_count);
        settings.game.spawn_interval = conf
            .get("gameplay", "SpawnInterval")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.game.spawn_interval);
        settings.game.note_speed = conf
            .get("gameplay", "NoteSpeed")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.game.note_speed);
        settings.game.judgment_window = conf
            .get("gameplay", "JudgmentWindow")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.game.judgment_window);
        settings.game.miss_threshold = conf
            .get("gameplay", "MissThreshold")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.game.miss_threshold);
        settings.game.hit_value = conf
            .get("gameplay", "HitValue")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.game.hit_value);
        settings.tick_hz = conf
            .get("driver", "TickHz")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.tick_hz);
        settings.run_ticks = conf
            .get("driver", "RunTicks")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.run_ticks);
        settings.autoplay = conf
            .get("driver", "Autoplay")
            .and_then(|v| v.parse::<u8>().ok())
            .map_or(defaults.autoplay, |v| v != 0);
        settings.bindings = conf.get("driver", "Bindings").unwrap_or(defaults.bindings);
        settings.script = conf.get("driver", "Script");
        settings.seed = conf.get("driver", "Seed").and_then(|v| v.parse().ok());
    } else {
        warn!("Failed to load '{}', using default settings.", SETTINGS_INI_PATH);
    }
}

/// Returns a copy of the currently loaded settings.
pub fn get() -> Settings {
    SETTINGS.lock().unwrap().clone()
}
