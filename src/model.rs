//! Data model for the note stream and its layout.
//!
//! A [`NoteEvent`] is produced by the walker and consumed immediately by
//! the layout engine; nothing here is persisted between renders.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One note element scanned out of a note-list document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEvent {
    /// Element identifier, e.g. `note-1`
    pub id: String,
    /// Note name from `<step>`
    pub step: PitchStep,
    /// Note value from `<type>`
    pub duration: DurationType,
    /// Lyric syllable; `None` when the `<text>` element is empty
    pub lyric: Option<String>,
}

/// Note name. Anything outside A–G is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PitchStep {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    Other(String),
}

impl PitchStep {
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "A" => PitchStep::A,
            "B" => PitchStep::B,
            "C" => PitchStep::C,
            "D" => PitchStep::D,
            "E" => PitchStep::E,
            "F" => PitchStep::F,
            "G" => PitchStep::G,
            other => PitchStep::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PitchStep::A => "A",
            PitchStep::B => "B",
            PitchStep::C => "C",
            PitchStep::D => "D",
            PitchStep::E => "E",
            PitchStep::F => "F",
            PitchStep::G => "G",
            PitchStep::Other(s) => s,
        }
    }

    /// MIDI note number in the fourth octave (middle C = 60).
    /// `None` for steps outside A–G.
    pub fn to_midi(&self) -> Option<u8> {
        let semitone = match self {
            PitchStep::C => 0,
            PitchStep::D => 2,
            PitchStep::E => 4,
            PitchStep::F => 5,
            PitchStep::G => 7,
            PitchStep::A => 9,
            PitchStep::B => 11,
            PitchStep::Other(_) => return None,
        };
        Some(60 + semitone)
    }
}

impl fmt::Display for PitchStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Note value as far as the renderer cares: whole, half, or anything else.
///
/// `Other` keeps the raw `<type>` text (quarter, eighth, ...) for timing and
/// attribute lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DurationType {
    Whole,
    Half,
    Other(String),
}

impl DurationType {
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "whole" => DurationType::Whole,
            "half" => DurationType::Half,
            other => DurationType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DurationType::Whole => "whole",
            DurationType::Half => "half",
            DurationType::Other(s) => s,
        }
    }

    /// Length in quarter notes. Unrecognized types count as one beat.
    pub fn quarter_beats(&self) -> f64 {
        match self {
            DurationType::Whole => 4.0,
            DurationType::Half => 2.0,
            DurationType::Other(s) => match s.as_str() {
                "breve" => 8.0,
                "quarter" => 1.0,
                "eighth" => 0.5,
                "16th" => 0.25,
                "32nd" => 0.125,
                "64th" => 0.0625,
                _ => 1.0,
            },
        }
    }
}

impl fmt::Display for DurationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drawn shape of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GlyphVariant {
    /// Unfilled ellipse, no stem (whole note)
    Hollow,
    /// Unfilled ellipse with stem (half note)
    HollowStemmed,
    /// Filled ellipse with stem (quarter and everything unrecognized)
    FilledStemmed,
}

impl GlyphVariant {
    pub fn for_duration(duration: &DurationType) -> Self {
        match duration {
            DurationType::Whole => GlyphVariant::Hollow,
            DurationType::Half => GlyphVariant::HollowStemmed,
            DurationType::Other(_) => GlyphVariant::FilledStemmed,
        }
    }

    pub fn is_filled(self) -> bool {
        matches!(self, GlyphVariant::FilledStemmed)
    }

    pub fn has_stem(self) -> bool {
        !matches!(self, GlyphVariant::Hollow)
    }
}

/// Where and how a note is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Notehead centre, horizontal
    pub x: i32,
    /// Notehead centre, vertical (staff coordinate)
    pub y: i32,
    pub glyph: GlyphVariant,
}
