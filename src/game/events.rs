/// Outbound notifications for the renderer and audio collaborators. The
/// session queues these; the driver drains the queue after every entry point
/// and forwards cues fire-and-forget, so a slow collaborator can never stall
/// a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    GameStarted,
    Hit {
        lane: usize,
        /// Signed distance from the judgment line at the moment of the hit;
        /// negative means the note had not yet reached the line.
        offset: f32,
        score: u64,
        combo: u32,
    },
    Miss {
        lane: usize,
    },
}
