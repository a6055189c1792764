use std::collections::VecDeque;

use log::{debug, info};

use crate::config::{ConfigError, GameConfig, KEY_FLASH_TICKS};
use crate::game::clock::TickClock;
use crate::game::events::GameEvent;
use crate::game::field::NoteField;
use crate::game::judgment::{self, TapOutcome};
use crate::game::note::Note;
use crate::game::score::ScoreTracker;
use crate::game::spawn::{LaneSource, RandomLanes, Spawner};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// Ticks are idle (no spawning, no motion); waiting for the first input.
    NotStarted,
    /// The per-tick pipeline runs. There is no terminal phase; a session runs
    /// until the driver stops ticking or restarts it.
    Running,
}

/// One complete game: clock, spawner, note field, score tracker and the
/// outbound event queue, behind two entry points. The driver calls `tick()`
/// at a fixed cadence and `on_lane_press()` once per discrete key-down; both
/// run on the driver's thread and are never re-entered.
pub struct GameSession {
    config: GameConfig,
    clock: TickClock,
    spawner: Spawner,
    field: NoteField,
    tracker: ScoreTracker,
    phase: SessionPhase,
    lane_flash: Vec<u8>,
    events: VecDeque<GameEvent>,
}

impl GameSession {
    /// Creates a session with OS-seeded lane randomness. Fails fast on an
    /// invalid config; nothing is constructed in that case.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_lane_source(config, Box::new(RandomLanes::new()))
    }

    /// Creates a session with an injected lane source, for reproducible runs.
    pub fn with_lane_source(
        config: GameConfig,
        lanes: Box<dyn LaneSource + Send>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            "Session created: {} lanes, spawn every {} ticks, speed {}, window {}",
            config.lane_count, config.spawn_interval, config.note_speed, config.judgment_window
        );
        let spawner = Spawner::new(&config, lanes);
        let lane_flash = vec![0; config.lane_count];
        Ok(Self {
            config,
            clock: TickClock::new(),
            spawner,
            field: NoteField::new(),
            tracker: ScoreTracker::new(),
            phase: SessionPhase::NotStarted,
            lane_flash,
            events: VecDeque::new(),
        })
    }

    /// One fixed time step: spawn, then advance, then expire, in that order,
    /// every call. Before the session starts only the lane flash timers decay
    /// and the field stays empty.
    pub fn tick(&mut self) {
        self.clock.advance();
        for flash in &mut self.lane_flash {
            *flash = flash.saturating_sub(1);
        }

        if self.phase != SessionPhase::Running {
            return;
        }

        self.spawner.maybe_spawn(&mut self.field);
        self.field.advance();
        for lane in self
            .field
            .expire(self.config.judgment_line, self.config.miss_threshold)
        {
            self.tracker.apply_miss();
            self.events.push_back(GameEvent::Miss { lane });
        }
    }

    /// Handles one discrete key-down on `lane`. A lane outside the configured
    /// range is rejected silently: no state change, no event. The first valid
    /// press starts the session before it is judged.
    pub fn on_lane_press(&mut self, lane: usize) {
        if lane >= self.config.lane_count {
            debug!("Ignoring press on invalid lane {}", lane);
            return;
        }

        self.lane_flash[lane] = KEY_FLASH_TICKS;
        if self.phase == SessionPhase::NotStarted {
            self.begin();
        }

        match judgment::resolve(lane, &mut self.field, &self.config) {
            TapOutcome::Hit { offset } => {
                self.tracker.apply_hit(self.config.hit_value);
                self.events.push_back(GameEvent::Hit {
                    lane,
                    offset,
                    score: self.tracker.score(),
                    combo: self.tracker.combo(),
                });
            }
            TapOutcome::Miss => {
                self.tracker.apply_miss();
                self.events.push_back(GameEvent::Miss { lane });
            }
        }
    }

    /// Dedicated start signal; unlike a lane press it is not judged.
    pub fn start(&mut self) {
        if self.phase == SessionPhase::NotStarted {
            self.begin();
        }
    }

    fn begin(&mut self) {
        self.phase = SessionPhase::Running;
        self.events.push_back(GameEvent::GameStarted);
        info!("Session started");
    }

    /// Discards all notes, score, combo, queued events and the clock, and
    /// returns to `NotStarted`. The lane source keeps its state, so a seeded
    /// session does not replay the same chart after a restart.
    pub fn restart(&mut self) {
        info!(
            "Session restarted after {} ticks (score {}, max combo {})",
            self.clock.ticks(),
            self.tracker.score(),
            self.tracker.max_combo()
        );
        self.clock.reset();
        self.spawner.reset();
        self.field.clear();
        self.tracker.reset();
        self.phase = SessionPhase::NotStarted;
        self.lane_flash.fill(0);
        self.events.clear();
    }

    /// Next queued event, oldest first. Drained by the driver after every
    /// entry point.
    pub fn poll_event(&mut self) -> Option<GameEvent> {
        self.events.pop_front()
    }

    // --- Observable state (read-only, for the renderer and audio driver) ---

    #[inline(always)]
    pub fn notes(&self) -> &[Note] {
        self.field.notes()
    }

    #[inline(always)]
    pub fn score(&self) -> u64 {
        self.tracker.score()
    }

    #[inline(always)]
    pub fn combo(&self) -> u32 {
        self.tracker.combo()
    }

    #[inline(always)]
    pub fn max_combo(&self) -> u32 {
        self.tracker.max_combo()
    }

    #[inline(always)]
    pub fn hits(&self) -> u32 {
        self.tracker.hits()
    }

    #[inline(always)]
    pub fn misses(&self) -> u32 {
        self.tracker.misses()
    }

    #[inline(always)]
    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    #[inline(always)]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[inline(always)]
    pub fn ticks(&self) -> u64 {
        self.clock.ticks()
    }

    /// Per-lane press effect countdowns, for the renderer.
    #[inline(always)]
    pub fn lane_flash(&self) -> &[u8] {
        &self.lane_flash
    }

    #[inline(always)]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::spawn::ScriptedLanes;

    fn session(config: GameConfig, lanes: Vec<usize>) -> GameSession {
        GameSession::with_lane_source(config, Box::new(ScriptedLanes::new(lanes))).unwrap()
    }

    #[test]
    fn construction_rejects_invalid_config() {
        let config = GameConfig { note_speed: 0.0, ..Default::default() };
        assert!(GameSession::new(config).is_err());
    }

    #[test]
    fn ticks_before_start_do_nothing() {
        let mut session = session(GameConfig::default(), vec![0]);
        for _ in 0..200 {
            session.tick();
        }
        assert!(!session.is_running());
        assert!(session.notes().is_empty());
        assert_eq!(session.score(), 0);
        assert_eq!(session.combo(), 0);
        assert!(session.poll_event().is_none());
        assert_eq!(session.ticks(), 200);
    }

    #[test]
    fn first_press_starts_then_judges() {
        let mut session = session(GameConfig::default(), vec![0]);
        session.on_lane_press(0);
        assert!(session.is_running());
        assert_eq!(session.poll_event(), Some(GameEvent::GameStarted));
        // The empty field makes the starting press a normal whiffed miss.
        assert_eq!(session.poll_event(), Some(GameEvent::Miss { lane: 0 }));
        assert!(session.poll_event().is_none());
    }

    #[test]
    fn start_signal_is_not_judged_and_fires_once() {
        let mut session = session(GameConfig::default(), vec![0]);
        session.start();
        session.start();
        assert_eq!(session.poll_event(), Some(GameEvent::GameStarted));
        assert!(session.poll_event().is_none());
    }

    #[test]
    fn invalid_lane_press_changes_nothing() {
        let mut session = session(GameConfig::default(), vec![0]);
        session.on_lane_press(4);
        assert!(!session.is_running());
        assert_eq!(session.combo(), 0);
        assert!(session.poll_event().is_none());
        assert!(session.lane_flash().iter().all(|&flash| flash == 0));
    }

    #[test]
    fn lane_flash_decays_each_tick() {
        let mut session = session(GameConfig::default(), vec![0]);
        session.on_lane_press(1);
        assert_eq!(session.lane_flash()[1], KEY_FLASH_TICKS);
        session.tick();
        assert_eq!(session.lane_flash()[1], KEY_FLASH_TICKS - 1);
        for _ in 0..KEY_FLASH_TICKS {
            session.tick();
        }
        assert_eq!(session.lane_flash()[1], 0);
    }

    #[test]
    fn restart_discards_everything() {
        let config = GameConfig { spawn_interval: 2, ..Default::default() };
        let mut session = session(config, vec![3]);
        session.start();
        for _ in 0..10 {
            session.tick();
        }
        assert!(!session.notes().is_empty());

        session.restart();
        assert!(!session.is_running());
        assert!(session.notes().is_empty());
        assert_eq!(session.score(), 0);
        assert_eq!(session.ticks(), 0);
        assert!(session.poll_event().is_none());

        // And it comes back up cleanly.
        session.start();
        session.tick();
        session.tick();
        assert_eq!(session.notes().len(), 1);
    }
}
