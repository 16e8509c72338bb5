//! Document validation for the `validate` boundary operation.
//!
//! This is a separate, stricter check than the renderer's scan: the
//! renderer accepts anything and draws what it can find, while validation
//! requires a well-formed MusicXML score.

use roxmltree::{Document, ParsingOptions};

use crate::error::{Result, ScoreError};

/// Root elements accepted as a score.
const SCORE_ROOTS: [&str; 2] = ["score-partwise", "score-timewise"];

/// Check that `text` is a well-formed MusicXML score document.
pub fn validate_document(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(ScoreError::InvalidInput("document is empty".into()));
    }

    // MusicXML files include a DOCTYPE declaration, so we must allow DTDs
    let options = ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let doc = Document::parse_with_options(text, options)
        .map_err(|e| ScoreError::LoadFailure(format!("XML parse error: {e}")))?;

    let root = doc.root_element().tag_name().name();
    if !SCORE_ROOTS.contains(&root) {
        return Err(ScoreError::LoadFailure(format!(
            "unsupported root element '{root}'"
        )));
    }
    Ok(())
}
