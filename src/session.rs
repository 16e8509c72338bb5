//! Session — owns a loaded document and drives rendering.
//!
//! A session is an explicit context object: there is no global state, so
//! any number of sessions can live side by side. Every operation returns a
//! [`Result`]; turning errors into boundary fallback values is the job of
//! [`crate::bridge::ScoreBridge`].

use crate::convert::{convert, SourceFormat};
use crate::engine::{Engraver, TextScanEngraver};
use crate::error::{Result, ScoreError};
use crate::extract::truncate_to_boundary;
use crate::midi::generate_midi;
use crate::options::RenderOptions;
use crate::playback::{element_attributes_json, elements_at_time};
use crate::renderer::{RenderedPage, PLACEHOLDER_SVG};
use crate::validate::validate_document;

/// Maximum stored document size in bytes. Longer input is truncated.
pub const DOCUMENT_CAPACITY: usize = 16_000;

/// Version reported before the session is initialized.
pub const FALLBACK_VERSION: &str = "scorelite-uninitialized";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Initialized,
    DocumentLoaded,
}

/// What `load_document` did with its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Bytes kept in the document buffer
    pub stored: usize,
    /// Whether the input was cut to fit
    pub truncated: bool,
}

pub struct Session<E: Engraver = TextScanEngraver> {
    engraver: E,
    state: SessionState,
    options: RenderOptions,
    document: String,
    /// Last engraved page, dropped whenever document or options change
    page: Option<RenderedPage>,
}

impl Session<TextScanEngraver> {
    pub fn new() -> Self {
        Self::with_engraver(TextScanEngraver)
    }
}

impl Default for Session<TextScanEngraver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Engraver> Session<E> {
    pub fn with_engraver(engraver: E) -> Self {
        Self {
            engraver,
            state: SessionState::Uninitialized,
            options: RenderOptions::default(),
            document: String::new(),
            page: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// The stored (possibly truncated) document text.
    pub fn document(&self) -> &str {
        &self.document
    }

    // ── Lifecycle ───────────────────────────────────────────────────

    /// Move to `Initialized` from any state, clearing the document, the
    /// cached page and the options.
    pub fn initialize(&mut self) -> Result<()> {
        self.clear();
        self.state = SessionState::Initialized;
        log::info!("Session initialized ({})", self.engraver.version());
        Ok(())
    }

    /// Move to `Uninitialized` from any state and release all buffers.
    pub fn cleanup(&mut self) {
        self.clear();
        self.document.shrink_to_fit();
        self.state = SessionState::Uninitialized;
        log::info!("Session cleaned up");
    }

    fn clear(&mut self) {
        self.document.clear();
        self.page = None;
        self.options = RenderOptions::default();
    }

    fn require_initialized(&self) -> Result<()> {
        match self.state {
            SessionState::Uninitialized => Err(ScoreError::NotInitialized),
            _ => Ok(()),
        }
    }

    // ── Configuration and loading ───────────────────────────────────

    /// Merge a JSON object of options into the current options.
    pub fn set_options(&mut self, json: &str) -> Result<()> {
        self.require_initialized()?;
        self.options = self.options.merged(json)?;
        self.page = None;
        log::debug!("Options updated: {:?}", self.options);
        Ok(())
    }

    /// Replace the document. Input longer than [`DOCUMENT_CAPACITY`] bytes
    /// is cut at the last character boundary that fits.
    pub fn load_document(&mut self, text: &str) -> Result<LoadReport> {
        self.require_initialized()?;

        let kept = truncate_to_boundary(text, DOCUMENT_CAPACITY);
        let truncated = kept.len() < text.len();
        if truncated {
            log::warn!(
                "Document of {} bytes truncated to {} bytes",
                text.len(),
                kept.len()
            );
        }

        self.document.clear();
        self.document.push_str(kept);
        self.page = None;
        self.state = SessionState::DocumentLoaded;
        log::debug!("Loaded document ({} bytes)", kept.len());

        Ok(LoadReport {
            stored: kept.len(),
            truncated,
        })
    }

    // ── Rendering ───────────────────────────────────────────────────

    /// Number of pages: 0 before initialization, 1 afterwards.
    pub fn page_count(&self) -> u32 {
        match self.state {
            SessionState::Uninitialized => 0,
            _ => 1,
        }
    }

    /// Render a 1-based page to SVG. Without a document this is the fixed
    /// placeholder image, whatever the page number or state.
    pub fn render_page(&mut self, page_number: i32) -> Result<String> {
        if self.state != SessionState::DocumentLoaded {
            return Ok(PLACEHOLDER_SVG.to_string());
        }
        if page_number < 1 || page_number as u32 > self.page_count() {
            return Err(ScoreError::InvalidInput(format!(
                "page {page_number} out of range 1..={}",
                self.page_count()
            )));
        }
        match self.current_page()? {
            Some(page) => Ok(page.image.svg.clone()),
            None => Ok(PLACEHOLDER_SVG.to_string()),
        }
    }

    /// The engraved page for the loaded document, rendering it on first use.
    fn current_page(&mut self) -> Result<Option<&RenderedPage>> {
        if self.state != SessionState::DocumentLoaded {
            return Ok(None);
        }
        if self.page.is_none() {
            let page = self.engraver.engrave(&self.document, &self.options)?;
            self.page = Some(page);
        }
        Ok(self.page.as_ref())
    }

    // ── Element queries ─────────────────────────────────────────────

    /// JSON attribute record of a rendered element, `None` if unknown.
    pub fn element_attributes(&mut self, id: &str) -> Result<Option<String>> {
        self.require_initialized()?;
        if id.is_empty() {
            return Err(ScoreError::InvalidInput("element id is empty".into()));
        }
        match self.current_page()? {
            Some(page) => element_attributes_json(&page.elements, id),
            None => Ok(None),
        }
    }

    /// Ids of the elements sounding at `time_ms`.
    pub fn elements_at_time(&mut self, time_ms: i32) -> Result<Vec<String>> {
        self.require_initialized()?;
        match self.current_page()? {
            Some(page) => Ok(elements_at_time(&page.elements, time_ms as f64)
                .into_iter()
                .map(String::from)
                .collect()),
            None => Ok(Vec::new()),
        }
    }

    /// Standard MIDI File bytes for the loaded document; empty without one.
    pub fn render_audio(&mut self) -> Result<Vec<u8>> {
        self.require_initialized()?;
        let tempo = self.options.tempo_bpm;
        match self.current_page()? {
            Some(page) => Ok(generate_midi(&page.elements, tempo)),
            None => Ok(Vec::new()),
        }
    }

    // ── Stateless helpers ───────────────────────────────────────────

    /// Check that `text` is a well-formed MusicXML score.
    pub fn validate(&self, text: &str) -> Result<()> {
        validate_document(text)
    }

    /// Convert `data` from the named format into MusicXML text.
    pub fn convert(&self, data: &[u8], from_format: &str) -> Result<String> {
        self.require_initialized()?;
        let format: SourceFormat = from_format.parse()?;
        convert(data, format)
    }

    pub fn version(&self) -> String {
        match self.state {
            SessionState::Uninitialized => FALLBACK_VERSION.to_string(),
            _ => self.engraver.version(),
        }
    }
}
