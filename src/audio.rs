use log::info;

/// Cue notifications for the audio collaborator. Strictly fire-and-forget:
/// implementations must return promptly and swallow their own failures, so a
/// missing asset or dead device can never stall or fail a tick.
pub trait CueSink {
    /// Background music start, delivered exactly once per session run.
    fn game_started(&mut self);
    fn hit(&mut self);
    fn miss(&mut self);
}

/// Logs each cue. Stands in for a real playback backend.
#[derive(Debug, Default)]
pub struct LogCues;

impl CueSink for LogCues {
    fn game_started(&mut self) {
        info!("Cue: background music start");
    }

    fn hit(&mut self) {
        info!("Cue: hit");
    }

    fn miss(&mut self) {
        info!("Cue: miss");
    }
}

/// Discards every cue.
#[derive(Debug, Default)]
pub struct NullCues;

impl CueSink for NullCues {
    fn game_started(&mut self) {}
    fn hit(&mut self) {}
    fn miss(&mut self) {}
}
