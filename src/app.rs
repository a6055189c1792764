use std::thread;
use std::time::{Duration, Instant};

use log::info;

use crate::audio::CueSink;
use crate::game::events::GameEvent;
use crate::game::session::GameSession;
use crate::input::KeyBindings;

const STATUS_LOG_INTERVAL_TICKS: u64 = 300; // every 5s at 60 Hz

/// Where the driver's input comes from. The session itself never knows; it
/// only ever receives `on_lane_press` calls.
pub enum InputFeed {
    /// Press each lane as its note crosses the judgment line.
    Autoplay,
    /// Per-tick key characters; unbound characters are rests. The first
    /// press starts the session, exactly like a player would.
    Script { keys: Vec<char> },
    /// No input at all; every note scrolls past unstruck.
    Idle,
}

/// The external driver: paces the session at a fixed cadence, feeds input,
/// and fans events out to the collaborators. This is the single place where
/// `tick()` and `on_lane_press()` are invoked, which keeps the two entry
/// points serialized as the core requires.
pub struct App {
    session: GameSession,
    cues: Box<dyn CueSink>,
    bindings: KeyBindings,
    feed: InputFeed,
    tick_hz: u32,
}

impl App {
    pub fn new(
        session: GameSession,
        cues: Box<dyn CueSink>,
        bindings: KeyBindings,
        feed: InputFeed,
        tick_hz: u32,
    ) -> Self {
        Self {
            session,
            cues,
            bindings,
            feed,
            tick_hz: tick_hz.max(1),
        }
    }

    /// Runs `ticks` fixed steps at the configured cadence, then reports.
    pub fn run(&mut self, ticks: u64) {
        info!("Driver running {} ticks at {} Hz", ticks, self.tick_hz);
        let tick_duration = Duration::from_secs(1) / self.tick_hz;
        let mut next_tick = Instant::now() + tick_duration;

        for tick in 0..ticks {
            self.feed_input(tick);
            self.session.tick();
            self.dispatch_events();

            if tick > 0 && tick % STATUS_LOG_INTERVAL_TICKS == 0 {
                info!(
                    "Tick {}: score {}, combo {}, {} notes on screen",
                    self.session.ticks(),
                    self.session.score(),
                    self.session.combo(),
                    self.session.notes().len()
                );
            }

            // Fixed-cadence pacing; sleeping is skipped when a tick overran.
            if let Some(wait) = next_tick.checked_duration_since(Instant::now()) {
                thread::sleep(wait);
            }
            next_tick += tick_duration;
        }

        info!(
            "Run finished: score {}, max combo {}, {} hits / {} misses",
            self.session.score(),
            self.session.max_combo(),
            self.session.hits(),
            self.session.misses()
        );
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    fn feed_input(&mut self, tick: u64) {
        match &self.feed {
            InputFeed::Autoplay => {
                if tick == 0 {
                    self.session.start();
                }
                // Press once per note, on the tick it reaches the line.
                let (line, window) = {
                    let config = self.session.config();
                    (config.judgment_line, config.judgment_window)
                };
                let due: Vec<usize> = self
                    .session
                    .notes()
                    .iter()
                    .filter(|note| {
                        note.position >= line
                            && note.position - line < note.speed
                            && note.position - line < window
                    })
                    .map(|note| note.lane)
                    .collect();
                for lane in due {
                    self.session.on_lane_press(lane);
                }
            }
            InputFeed::Script { keys } => {
                let Some(&key) = keys.get(tick as usize) else {
                    return;
                };
                if let Some(lane) = self.bindings.lane_for_key(key) {
                    self.session.on_lane_press(lane);
                }
            }
            InputFeed::Idle => {}
        }
    }

    fn dispatch_events(&mut self) {
        while let Some(event) = self.session.poll_event() {
            match event {
                GameEvent::GameStarted => self.cues.game_started(),
                GameEvent::Hit { .. } => self.cues.hit(),
                GameEvent::Miss { .. } => self.cues.miss(),
            }
        }
    }
}
