//! Staff layout engine — maps each note event to a placement.
//!
//! Spacing is not proportional: every note advances the cursor by the same
//! fixed step, whatever its duration.

use crate::model::{GlyphVariant, NoteEvent, PitchStep, Placement};

use super::constants::*;

/// Vertical notehead centre for each step on a treble staff, fourth octave.
///
/// C sits on the first ledger line below the staff and is also the entry
/// used for any step outside A–G. Positions follow real treble pitch, one
/// half line spacing per step, not the wider table (C 190 down to B 130)
/// of earlier previews; hosts matching those coordinates must remap.
pub(crate) fn staff_y(step: &PitchStep) -> i32 {
    let half = STAFF_LINE_SPACING / 2;
    let bottom = STAFF_TOP + STAFF_HEIGHT; // E4
    let steps_above_e = match step {
        PitchStep::C => -2,
        PitchStep::D => -1,
        PitchStep::E => 0,
        PitchStep::F => 1,
        PitchStep::G => 2,
        PitchStep::A => 3,
        PitchStep::B => 4,
        PitchStep::Other(_) => -2,
    };
    bottom - steps_above_e * half
}

/// Running horizontal cursor plus the pure pitch/duration mappings.
#[derive(Debug, Clone)]
pub struct StaffLayout {
    cursor_x: i32,
    spacing: i32,
}

impl StaffLayout {
    pub fn new(origin_x: i32, spacing: i32) -> Self {
        Self {
            cursor_x: origin_x,
            spacing,
        }
    }

    /// Place `event` at the current cursor and advance.
    pub fn place(&mut self, event: &NoteEvent) -> Placement {
        let placement = Placement {
            x: self.cursor_x,
            y: staff_y(&event.step),
            glyph: GlyphVariant::for_duration(&event.duration),
        };
        self.cursor_x = self.cursor_x.saturating_add(self.spacing);
        placement
    }

    pub fn cursor(&self) -> i32 {
        self.cursor_x
    }
}
