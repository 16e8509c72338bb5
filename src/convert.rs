//! Format conversion for the `convert_file` boundary operation.
//!
//! Every supported source format is converted to uncompressed MusicXML
//! text, the format `load_document` consumes.

use std::str::FromStr;

use crate::error::{Result, ScoreError};
use crate::mxl::extract_musicxml_from_mxl;
use crate::validate::validate_document;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Uncompressed MusicXML (`.musicxml` / `.xml`)
    MusicXml,
    /// Compressed MusicXML archive (`.mxl`)
    Mxl,
}

impl FromStr for SourceFormat {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "musicxml" | "xml" => Ok(SourceFormat::MusicXml),
            "mxl" => Ok(SourceFormat::Mxl),
            other => Err(ScoreError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Convert `data` in `format` into MusicXML text.
pub fn convert(data: &[u8], format: SourceFormat) -> Result<String> {
    if data.is_empty() {
        return Err(ScoreError::InvalidInput("no data to convert".into()));
    }
    let xml = match format {
        SourceFormat::MusicXml => std::str::from_utf8(data)
            .map_err(|e| ScoreError::LoadFailure(format!("invalid UTF-8 in MusicXML: {e}")))?
            .to_string(),
        SourceFormat::Mxl => extract_musicxml_from_mxl(data)?,
    };
    validate_document(&xml)?;
    Ok(xml)
}
