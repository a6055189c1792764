use log::debug;

use crate::config::GameConfig;
use crate::game::field::NoteField;
use crate::game::note::NoteStatus;

/// Result of resolving one discrete lane press.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TapOutcome {
    /// A note was struck. `offset` is its signed distance from the judgment
    /// line (negative = early).
    Hit { offset: f32 },
    /// No candidate note was near the line; a whiffed press counts as a miss
    /// just like a note scrolling away unstruck.
    Miss,
}

/// Resolves a lane press against the field. A note is a candidate when it
/// occupies the pressed lane and sits strictly within `judgment_window` of
/// the line. When several candidates overlap, the earliest-spawned one wins
/// (field order is spawn order); only that note is removed.
///
/// Called once per key-down event, never per tick. The caller has already
/// rejected invalid lane indices.
pub fn resolve(lane: usize, field: &mut NoteField, config: &GameConfig) -> TapOutcome {
    let candidate = field
        .notes()
        .iter()
        .position(|note| {
            note.lane == lane
                && (note.position - config.judgment_line).abs() < config.judgment_window
        });

    let Some(index) = candidate else {
        debug!("Whiffed press on lane {}", lane);
        return TapOutcome::Miss;
    };

    let mut note = field.remove(index);
    note.status = NoteStatus::Hit;
    let offset = note.position - config.judgment_line;
    debug!("Hit on lane {}, offset {:+.1}", lane, offset);
    TapOutcome::Hit { offset }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::note::Note;
    use approx::assert_relative_eq;

    fn config() -> GameConfig {
        GameConfig::default() // line 700, window 40
    }

    fn field_with(positions: &[(usize, f32)]) -> NoteField {
        let mut field = NoteField::new();
        for &(lane, position) in positions {
            field.push(Note::spawn(lane, position, 7.0));
        }
        field
    }

    #[test]
    fn press_with_no_notes_is_a_miss() {
        let mut field = NoteField::new();
        assert_eq!(resolve(0, &mut field, &config()), TapOutcome::Miss);
    }

    #[test]
    fn press_hits_only_the_matching_lane() {
        let mut field = field_with(&[(1, 700.0)]);
        assert_eq!(resolve(0, &mut field, &config()), TapOutcome::Miss);
        assert_eq!(field.len(), 1);

        let TapOutcome::Hit { offset } = resolve(1, &mut field, &config()) else {
            panic!("expected a hit");
        };
        assert_relative_eq!(offset, 0.0);
        assert!(field.is_empty());
    }

    #[test]
    fn window_bounds_are_strict() {
        // 660.0 and 740.0 are exactly window distance away: not candidates.
        let mut field = field_with(&[(0, 660.0), (0, 740.0)]);
        assert_eq!(resolve(0, &mut field, &config()), TapOutcome::Miss);
        assert_eq!(field.len(), 2);

        let mut field = field_with(&[(0, 660.5)]);
        assert!(matches!(resolve(0, &mut field, &config()), TapOutcome::Hit { .. }));
    }

    #[test]
    fn earliest_spawned_candidate_wins_over_closer_one() {
        // Spawn order: 730 first, then 695. The later note is closer to the
        // line, but the tie-break is spawn order, not proximity.
        let mut field = field_with(&[(2, 730.0), (2, 695.0)]);

        let TapOutcome::Hit { offset } = resolve(2, &mut field, &config()) else {
            panic!("expected a hit");
        };
        assert_relative_eq!(offset, 30.0);
        assert_eq!(field.len(), 1);
        assert_relative_eq!(field.notes()[0].position, 695.0);

        // A second press takes the remaining note.
        let TapOutcome::Hit { offset } = resolve(2, &mut field, &config()) else {
            panic!("expected a hit");
        };
        assert_relative_eq!(offset, -5.0);
        assert!(field.is_empty());
    }

    #[test]
    fn out_of_window_notes_in_lane_do_not_block_a_miss() {
        let mut field = field_with(&[(3, 100.0), (3, 1000.0)]);
        assert_eq!(resolve(3, &mut field, &config()), TapOutcome::Miss);
        assert_eq!(field.len(), 2);
    }
}
