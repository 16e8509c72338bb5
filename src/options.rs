//! Render options — the session's configuration, set from a JSON object.
//!
//! Keys are camelCase. `set_options` merges: keys present in the JSON
//! replace the current value, absent keys are left alone, and unknown keys
//! are ignored so option blobs written for a full engraving engine can be
//! passed through unchanged.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoreError};
use crate::renderer::required_capacity;
use crate::walker::DEFAULT_MAX_NOTES;

/// Upper bound on `max_notes`, whatever the caller asks for. The image
/// capacity usually binds first; see [`RenderOptions::validate`].
pub const HARD_MAX_NOTES: usize = 256;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    /// SVG canvas width in user units
    pub page_width: u32,
    /// SVG canvas height in user units
    pub page_height: u32,
    /// Maximum number of notes consumed per render
    pub max_notes: usize,
    /// Horizontal position of the first note
    pub note_origin_x: i32,
    /// Fixed horizontal step between notes
    pub note_spacing: i32,
    /// Declared capacity of the rendered image in bytes
    pub image_capacity: usize,
    /// Tempo used for time lookups and MIDI output
    pub tempo_bpm: f64,
    /// Canvas background fill
    pub background: String,
    /// Fill colour of lyric syllables
    pub lyric_color: String,
    /// Caption drawn under the staff
    pub footer_text: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_width: 1200,
            page_height: 300,
            max_notes: DEFAULT_MAX_NOTES,
            note_origin_x: 160,
            note_spacing: 45,
            image_capacity: 32_000,
            tempo_bpm: 120.0,
            background: "transparent".into(),
            lyric_color: "#FFFFFF".into(),
            footer_text: "scorelite preview".into(),
        }
    }
}

impl RenderOptions {
    /// Return a copy of `self` with the keys of `json` merged in.
    pub fn merged(&self, json: &str) -> Result<RenderOptions> {
        if json.trim().is_empty() {
            return Err(ScoreError::InvalidInput("options JSON is empty".into()));
        }
        let patch: serde_json::Value = serde_json::from_str(json)?;
        let serde_json::Value::Object(patch) = patch else {
            return Err(ScoreError::InvalidInput("options must be a JSON object".into()));
        };

        let mut current = serde_json::to_value(self)?;
        if let serde_json::Value::Object(ref mut fields) = current {
            for (key, value) in patch {
                if fields.contains_key(&key) {
                    fields.insert(key, value);
                } else {
                    log::debug!("Ignoring unknown option '{key}'");
                }
            }
        }

        let options: RenderOptions = serde_json::from_value(current)?;
        options.validate()?;
        Ok(options)
    }

    /// Check that every value is in a range the renderer can honour.
    ///
    /// `image_capacity` must hold the header, the footer and `max_notes`
    /// groups of the largest size a note can render to, so an accepted
    /// configuration never truncates the image below its note cap.
    pub fn validate(&self) -> Result<()> {
        if self.page_width == 0 || self.page_height == 0 {
            return Err(ScoreError::InvalidInput("page dimensions must be positive".into()));
        }
        if self.max_notes > HARD_MAX_NOTES {
            return Err(ScoreError::InvalidInput(format!(
                "maxNotes {} exceeds the limit of {HARD_MAX_NOTES}",
                self.max_notes
            )));
        }
        if self.note_spacing <= 0 {
            return Err(ScoreError::InvalidInput("noteSpacing must be positive".into()));
        }
        if !(self.tempo_bpm.is_finite() && self.tempo_bpm > 0.0) {
            return Err(ScoreError::InvalidInput("tempoBpm must be a positive number".into()));
        }
        let required = required_capacity(self);
        if self.image_capacity < required {
            return Err(ScoreError::InvalidInput(format!(
                "imageCapacity {} cannot hold {} notes; at least {required} bytes are needed",
                self.image_capacity, self.max_notes
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_valid() {
        assert!(RenderOptions::default().validate().is_ok());
    }

    #[test]
    fn merge_replaces_only_given_keys() {
        let base = RenderOptions::default();
        let merged = base.merged(r#"{"noteSpacing": 60, "tempoBpm": 90}"#).unwrap();
        assert_eq!(merged.note_spacing, 60);
        assert_eq!(merged.tempo_bpm, 90.0);
        assert_eq!(merged.page_width, base.page_width);
        assert_eq!(merged.footer_text, base.footer_text);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let merged = RenderOptions::default()
            .merged(r#"{"scale": 40, "adjustPageHeight": true}"#)
            .unwrap();
        assert_eq!(merged, RenderOptions::default());
    }

    #[test]
    fn rejects_bad_json_and_values() {
        let base = RenderOptions::default();
        assert!(matches!(base.merged("not json"), Err(ScoreError::InvalidInput(_))));
        assert!(matches!(base.merged("[1, 2]"), Err(ScoreError::InvalidInput(_))));
        assert!(matches!(base.merged(""), Err(ScoreError::InvalidInput(_))));
        assert!(matches!(base.merged(r#"{"maxNotes": 100000}"#), Err(ScoreError::InvalidInput(_))));
        assert!(matches!(base.merged(r#"{"noteSpacing": 0}"#), Err(ScoreError::InvalidInput(_))));
        assert!(matches!(base.merged(r#"{"pageWidth": "wide"}"#), Err(ScoreError::InvalidInput(_))));
        assert!(matches!(base.merged(r#"{"imageCapacity": 10}"#), Err(ScoreError::InvalidInput(_))));
    }

    #[test]
    fn capacity_must_hold_header_and_footer() {
        let base = RenderOptions::default();
        // Smaller than the clef path alone.
        assert!(matches!(base.merged(r#"{"imageCapacity": 2048}"#), Err(ScoreError::InvalidInput(_))));
        let frame = crate::renderer::frame_len(&base);
        let json = format!(r#"{{"maxNotes": 0, "imageCapacity": {frame}}}"#);
        assert_eq!(base.merged(&json).unwrap().image_capacity, frame);
        let json = format!(r#"{{"maxNotes": 0, "imageCapacity": {}}}"#, frame - 1);
        assert!(matches!(base.merged(&json), Err(ScoreError::InvalidInput(_))));
    }

    #[test]
    fn max_notes_must_fit_the_capacity() {
        let base = RenderOptions::default();
        assert!(matches!(base.merged(r#"{"maxNotes": 200}"#), Err(ScoreError::InvalidInput(_))));
        let roomy = base.merged(r#"{"maxNotes": 200, "imageCapacity": 400000}"#).unwrap();
        assert_eq!(roomy.max_notes, 200);
        // A longer caption shrinks the room left for notes.
        let tight = RenderOptions { max_notes: 30, ..base.clone() };
        let capacity = required_capacity(&tight);
        let tight = RenderOptions { image_capacity: capacity, ..tight };
        assert!(tight.validate().is_ok());
        assert!(tight.merged(r#"{"footerText": "a much longer caption"}"#).is_err());
    }
}
