//! Compute absolute onsets and durations for the note stream.
//!
//! Notes are strictly sequential (one voice, no chords), so the timemap is
//! a running sum of note lengths at a single tempo. This answers "when does
//! each element sound?" for time-indexed lookups and MIDI output.

use crate::model::DurationType;

/// Timing of one element, in milliseconds from the start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementTiming {
    pub onset_ms: f64,
    pub duration_ms: f64,
    /// Onset in quarter notes, for tick conversion
    pub onset_beats: f64,
    /// Length in quarter notes
    pub beats: f64,
}

/// Running clock over a sequence of note durations.
#[derive(Debug, Clone)]
pub struct Timeline {
    ms_per_quarter: f64,
    elapsed_beats: f64,
}

impl Timeline {
    pub fn new(tempo_bpm: f64) -> Self {
        Self {
            ms_per_quarter: 60_000.0 / tempo_bpm,
            elapsed_beats: 0.0,
        }
    }

    /// Timing for the next note, then move the clock past it.
    pub fn advance(&mut self, duration: &DurationType) -> ElementTiming {
        let beats = duration.quarter_beats();
        let timing = ElementTiming {
            onset_ms: self.elapsed_beats * self.ms_per_quarter,
            duration_ms: beats * self.ms_per_quarter,
            onset_beats: self.elapsed_beats,
            beats,
        };
        self.elapsed_beats += beats;
        timing
    }

    /// Total length so far in milliseconds.
    pub fn total_ms(&self) -> f64 {
        self.elapsed_beats * self.ms_per_quarter
    }
}
