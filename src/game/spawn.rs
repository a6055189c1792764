use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::game::field::NoteField;
use crate::game::note::Note;

/// Where spawned notes land. Injected into the spawner so a session can be
/// replayed exactly: tests seed the generator or script the lanes outright.
///
/// Callers guarantee `lane_count >= 1` (enforced by config validation).
pub trait LaneSource {
    fn next_lane(&mut self, lane_count: usize) -> usize;
}

/// Uniformly random lanes from a seedable generator.
pub struct RandomLanes {
    rng: StdRng,
}

impl RandomLanes {
    pub fn new() -> Self {
        Self { rng: StdRng::from_os_rng() }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for RandomLanes {
    fn default() -> Self {
        Self::new()
    }
}

impl LaneSource for RandomLanes {
    fn next_lane(&mut self, lane_count: usize) -> usize {
        self.rng.random_range(0..lane_count)
    }
}

/// Replays a fixed lane sequence, cycling when exhausted. Out-of-range
/// entries are clamped into the lane range.
pub struct ScriptedLanes {
    lanes: Vec<usize>,
    cursor: usize,
}

impl ScriptedLanes {
    pub fn new(lanes: Vec<usize>) -> Self {
        Self { lanes, cursor: 0 }
    }
}

impl LaneSource for ScriptedLanes {
    fn next_lane(&mut self, lane_count: usize) -> usize {
        if self.lanes.is_empty() {
            return 0;
        }
        let lane = self.lanes[self.cursor % self.lanes.len()];
        self.cursor += 1;
        lane.min(lane_count - 1)
    }
}

/// Periodic note creation. The accumulator counts ticks since the last spawn
/// and stays in `[0, interval)`; at most one note per tick, by construction.
pub struct Spawner {
    interval: u32,
    accumulator: u32,
    lane_count: usize,
    spawn_position: f32,
    note_speed: f32,
    lanes: Box<dyn LaneSource + Send>,
}

impl Spawner {
    pub fn new(config: &GameConfig, lanes: Box<dyn LaneSource + Send>) -> Self {
        Self {
            interval: config.spawn_interval,
            accumulator: 0,
            lane_count: config.lane_count,
            spawn_position: config.spawn_position,
            note_speed: config.note_speed,
            lanes,
        }
    }

    /// Advances the spawn schedule by one tick, appending a note when the
    /// interval elapses. Returns whether a note was spawned.
    pub fn maybe_spawn(&mut self, field: &mut NoteField) -> bool {
        self.accumulator += 1;
        if self.accumulator < self.interval {
            return false;
        }
        self.accumulator = 0;
        let lane = self.lanes.next_lane(self.lane_count);
        field.push(Note::spawn(lane, self.spawn_position, self.note_speed));
        true
    }

    pub fn reset(&mut self) {
        self.accumulator = 0;
    }
}
