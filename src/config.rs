use std::error::Error;
use std::fmt;

// Gameplay Constants (defaults; overridable per session via GameConfig or save/settings.ini)
pub const DEFAULT_LANE_COUNT: usize = 4;
pub const DEFAULT_SPAWN_INTERVAL: u32 = 30; // ticks between spawns; smaller = denser chart
pub const DEFAULT_NOTE_SPEED: f32 = 7.0; // position units per tick
pub const DEFAULT_JUDGMENT_WINDOW: f32 = 40.0; // +/- around the judgment line
pub const DEFAULT_MISS_THRESHOLD: f32 = 40.0; // slack past the line before a note is gone
pub const DEFAULT_HIT_VALUE: u32 = 100;
pub const DEFAULT_SPAWN_POSITION: f32 = 0.0;
pub const DEFAULT_JUDGMENT_LINE: f32 = 700.0;

// Renderer support
pub const KEY_FLASH_TICKS: u8 = 10; // lane press effect countdown

/// Per-session gameplay tuning. Validated once at session construction; the
/// engine assumes a valid config everywhere after that.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub lane_count: usize,
    pub spawn_interval: u32,
    pub note_speed: f32,
    pub judgment_window: f32,
    pub miss_threshold: f32,
    pub hit_value: u32,
    pub spawn_position: f32,
    pub judgment_line: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            lane_count: DEFAULT_LANE_COUNT,
            spawn_interval: DEFAULT_SPAWN_INTERVAL,
            note_speed: DEFAULT_NOTE_SPEED,
            judgment_window: DEFAULT_JUDGMENT_WINDOW,
            miss_threshold: DEFAULT_MISS_THRESHOLD,
            hit_value: DEFAULT_HIT_VALUE,
            spawn_position: DEFAULT_SPAWN_POSITION,
            judgment_line: DEFAULT_JUDGMENT_LINE,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lane_count == 0 {
            return Err(ConfigError::NoLanes);
        }
        if self.spawn_interval == 0 {
            return Err(ConfigError::NonPositive("spawn_interval"));
        }
        if !self.note_speed.is_finite() {
            return Err(ConfigError::NotFinite("note_speed"));
        }
        if self.note_speed <= 0.0 {
            return Err(ConfigError::NonPositive("note_speed"));
        }
        if !self.judgment_window.is_finite() {
            return Err(ConfigError::NotFinite("judgment_window"));
        }
        if self.judgment_window <= 0.0 {
            return Err(ConfigError::NonPositive("judgment_window"));
        }
        if !self.miss_threshold.is_finite() {
            return Err(ConfigError::NotFinite("miss_threshold"));
        }
        if self.miss_threshold < 0.0 {
            return Err(ConfigError::Negative("miss_threshold"));
        }
        if !self.spawn_position.is_finite() {
            return Err(ConfigError::NotFinite("spawn_position"));
        }
        if !self.judgment_line.is_finite() {
            return Err(ConfigError::NotFinite("judgment_line"));
        }
        if self.judgment_line <= self.spawn_position {
            return Err(ConfigError::LineBeforeSpawn);
        }
        Ok(())
    }
}

/// Rejected at session construction; the engine never runs on a bad config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    NoLanes,
    NonPositive(&'static str),
    Negative(&'static str),
    NotFinite(&'static str),
    LineBeforeSpawn,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoLanes => write!(f, "lane_count must be at least 1"),
            ConfigError::NonPositive(field) => write!(f, "{} must be greater than zero", field),
            ConfigError::Negative(field) => write!(f, "{} must not be negative", field),
            ConfigError::NotFinite(field) => write!(f, "{} must be a finite number", field),
            ConfigError::LineBeforeSpawn => {
                write!(f, "judgment_line must lie beyond spawn_position")
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_spawn_interval_is_rejected() {
        let config = GameConfig { spawn_interval: 0, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::NonPositive("spawn_interval")));
    }

    #[test]
    fn non_positive_note_speed_is_rejected() {
        let config = GameConfig { note_speed: 0.0, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::NonPositive("note_speed")));
        let config = GameConfig { note_speed: -7.0, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::NonPositive("note_speed")));
    }

    #[test]
    fn nan_fields_are_rejected() {
        let config = GameConfig { judgment_window: f32::NAN, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::NotFinite("judgment_window")));
    }

    #[test]
    fn zero_lanes_is_rejected() {
        let config = GameConfig { lane_count: 0, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::NoLanes));
    }

    #[test]
    fn negative_miss_threshold_is_rejected() {
        let config = GameConfig { miss_threshold: -1.0, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::Negative("miss_threshold")));
    }

    #[test]
    fn judgment_line_must_be_past_spawn() {
        let config = GameConfig { judgment_line: 0.0, spawn_position: 0.0, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::LineBeforeSpawn));
    }

    #[test]
    fn zero_hit_value_is_allowed() {
        let config = GameConfig { hit_value: 0, ..Default::default() };
        assert_eq!(config.validate(), Ok(()));
    }
}
