//! MXL file handler — reads compressed MusicXML (.mxl) archives.
//!
//! An .mxl file is a ZIP archive containing:
//!   - META-INF/container.xml  — declares the root MusicXML file path
//!   - <rootfile>.xml          — the actual MusicXML content (e.g., score.xml)
//!   - (optional) other files  — images, sounds, etc.

use std::io::{Cursor, Read};
use zip::ZipArchive;

use crate::error::{Result, ScoreError};

/// Extract the MusicXML content string from .mxl bytes.
pub fn extract_musicxml_from_mxl(data: &[u8]) -> Result<String> {
    let cursor = Cursor::new(data);
    let mut archive = ZipArchive::new(cursor)
        .map_err(|e| ScoreError::LoadFailure(format!("failed to open MXL archive: {e}")))?;

    let root_file_path = read_container_xml(&mut archive)?;

    let mut root_file = archive.by_name(&root_file_path).map_err(|e| {
        ScoreError::LoadFailure(format!("root file '{root_file_path}' not found in archive: {e}"))
    })?;

    let mut xml = String::new();
    root_file
        .read_to_string(&mut xml)
        .map_err(|e| ScoreError::LoadFailure(format!("failed to read '{root_file_path}': {e}")))?;

    log::debug!("Extracted '{root_file_path}' ({} bytes) from MXL archive", xml.len());
    Ok(xml)
}

/// Find the root MusicXML file path, from META-INF/container.xml if present.
fn read_container_xml(archive: &mut ZipArchive<Cursor<&[u8]>>) -> Result<String> {
    let container_xml = match archive.by_name("META-INF/container.xml") {
        Ok(mut container_file) => {
            let mut xml = String::new();
            container_file
                .read_to_string(&mut xml)
                .map_err(|e| ScoreError::LoadFailure(format!("failed to read container.xml: {e}")))?;
            Some(xml)
        }
        Err(_) => None,
    }; // mutable borrow of archive is released here

    if let Some(xml) = container_xml {
        let doc = roxmltree::Document::parse(&xml)
            .map_err(|e| ScoreError::LoadFailure(format!("failed to parse container.xml: {e}")))?;

        return doc
            .descendants()
            .filter(|n| n.tag_name().name() == "rootfile")
            .find_map(|n| n.attribute("full-path"))
            .map(String::from)
            .ok_or_else(|| ScoreError::LoadFailure("no rootfile found in container.xml".into()));
    }

    // No container: take the first MusicXML-looking file outside META-INF.
    let names: Vec<String> = (0..archive.len())
        .filter_map(|i| archive.by_index(i).ok().map(|f| f.name().to_string()))
        .collect();

    names
        .iter()
        .find(|name| {
            !name.starts_with("META-INF/") && (name.ends_with(".xml") || name.ends_with(".musicxml"))
        })
        .cloned()
        .ok_or_else(|| {
            ScoreError::LoadFailure(format!("no MusicXML file found in archive; files: {names:?}"))
        })
}
