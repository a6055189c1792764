use crate::game::note::{Note, NoteStatus};

/// The live collection of notes, stored in spawn order. Spawn order matters:
/// judgment tie-breaks resolve to the earliest-spawned candidate, which is
/// simply the first match in this list.
///
/// Invariant: every stored note is `Active`. A note that transitions to `Hit`
/// or `Missed` is removed in the same call that transitions it.
#[derive(Debug, Default)]
pub struct NoteField {
    notes: Vec<Note>,
}

impl NoteField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, note: Note) {
        self.notes.push(note);
    }

    #[inline(always)]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn clear(&mut self) {
        self.notes.clear();
    }

    /// Moves every note one tick at its own fixed speed.
    pub fn advance(&mut self) {
        for note in &mut self.notes {
            note.position += note.speed;
        }
    }

    /// Removes notes that have traveled past the judgment line by more than
    /// `miss_threshold` and returns their lanes. Removal happens here, so an
    /// overdue note is reported exactly once no matter how many ticks follow.
    pub fn expire(&mut self, judgment_line: f32, miss_threshold: f32) -> Vec<usize> {
        let cutoff = judgment_line + miss_threshold;
        let mut missed = Vec::new();
        self.notes.retain_mut(|note| {
            if note.position > cutoff {
                note.status = NoteStatus::Missed;
                missed.push(note.lane);
                false
            } else {
                true
            }
        });
        missed
    }

    /// Removes and returns the note at `index`. Used by judgment when a
    /// candidate is resolved to a hit.
    pub(crate) fn remove(&mut self, index: usize) -> Note {
        self.notes.remove(index)
    }
}
