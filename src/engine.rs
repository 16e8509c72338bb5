//! The engraver seam: what a rendering back end must provide to sit behind
//! a [`crate::session::Session`].
//!
//! [`TextScanEngraver`] is the built-in heuristic back end. A binding to a
//! full engraving engine implements the same trait and inherits the
//! session's lifecycle and the bridge's fallback policy unchanged.

use crate::error::Result;
use crate::options::RenderOptions;
use crate::renderer::{render_document, RenderedPage};

pub trait Engraver {
    /// Version string reported through `get_version` once initialized.
    fn version(&self) -> String;

    /// Engrave a loaded document into a single page.
    fn engrave(&self, document: &str, options: &RenderOptions) -> Result<RenderedPage>;
}

/// Heuristic renderer that scans the raw document text for note elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextScanEngraver;

impl Engraver for TextScanEngraver {
    fn version(&self) -> String {
        concat!("scorelite-textscan ", env!("CARGO_PKG_VERSION")).to_string()
    }

    fn engrave(&self, document: &str, options: &RenderOptions) -> Result<RenderedPage> {
        Ok(render_document(document, options))
    }
}
