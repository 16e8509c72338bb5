//! Element index: per-note records built during a render, used for
//! attribute lookups (`get_element_attr`) and time-indexed lookups
//! (`get_elements_at_time`).

use serde::Serialize;

use crate::error::Result;
use crate::model::{GlyphVariant, NoteEvent, Placement};
use crate::timemap::ElementTiming;

/// Everything known about one rendered note.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementRecord {
    pub id: String,
    pub step: String,
    pub duration_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lyric: Option<String>,
    pub x: i32,
    pub y: i32,
    pub glyph: GlyphVariant,
    pub onset_ms: f64,
    pub duration_ms: f64,
    #[serde(skip)]
    pub onset_beats: f64,
    #[serde(skip)]
    pub beats: f64,
    #[serde(skip)]
    pub midi_note: Option<u8>,
}

impl ElementRecord {
    pub fn new(event: &NoteEvent, placement: &Placement, timing: &ElementTiming) -> Self {
        Self {
            id: event.id.clone(),
            step: event.step.to_string(),
            duration_type: event.duration.to_string(),
            lyric: event.lyric.clone(),
            x: placement.x,
            y: placement.y,
            glyph: placement.glyph,
            onset_ms: timing.onset_ms,
            duration_ms: timing.duration_ms,
            onset_beats: timing.onset_beats,
            beats: timing.beats,
            midi_note: event.step.to_midi(),
        }
    }

    fn sounds_at(&self, time_ms: f64) -> bool {
        time_ms >= self.onset_ms && time_ms < self.onset_ms + self.duration_ms
    }
}

/// Attribute record of `id` as a JSON object, or `None` if no rendered
/// element has that id.
pub fn element_attributes_json(elements: &[ElementRecord], id: &str) -> Result<Option<String>> {
    match elements.iter().find(|e| e.id == id) {
        Some(record) => Ok(Some(serde_json::to_string(record)?)),
        None => Ok(None),
    }
}

/// Ids of the elements sounding at `time_ms`.
pub fn elements_at_time(elements: &[ElementRecord], time_ms: f64) -> Vec<&str> {
    elements
        .iter()
        .filter(|e| e.sounds_at(time_ms))
        .map(|e| e.id.as_str())
        .collect()
}
