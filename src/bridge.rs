//! Boundary object behind the C and JNI entry points.
//!
//! [`ScoreBridge`] wraps a [`Session`] and owns one output buffer per result
//! category (image, record, audio). Every method returns a view into the
//! matching buffer, which stays valid until the next call that writes the
//! same category. Errors and panics never leave this layer: each is logged
//! and replaced with the operation's documented fallback value.

use std::ffi::{CStr, CString};
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::engine::{Engraver, TextScanEngraver};
use crate::error::{Result, ScoreError};
use crate::renderer::PLACEHOLDER_SVG;
use crate::session::{Session, FALLBACK_VERSION};

const EMPTY_RECORD: &str = "{}";
const EMPTY_LIST: &str = "[]";

pub struct ScoreBridge<E: Engraver = TextScanEngraver> {
    session: Session<E>,
    image: CString,
    record: CString,
    audio: Vec<u8>,
}

impl ScoreBridge<TextScanEngraver> {
    pub fn new() -> Self {
        Self::with_session(Session::new())
    }
}

impl Default for ScoreBridge<TextScanEngraver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Engraver> ScoreBridge<E> {
    pub fn with_session(session: Session<E>) -> Self {
        Self {
            session,
            image: CString::default(),
            record: CString::default(),
            audio: Vec::new(),
        }
    }

    pub fn session(&self) -> &Session<E> {
        &self.session
    }

    /// Run `op` against the session, converting an error or a panic into
    /// `None` with a log record.
    fn guarded<T>(&mut self, name: &str, op: impl FnOnce(&mut Session<E>) -> Result<T>) -> Option<T> {
        let session = &mut self.session;
        let outcome = catch_unwind(AssertUnwindSafe(|| op(session))).unwrap_or_else(|panic| {
            let msg = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panic with no message".to_string());
            Err(ScoreError::Unknown(msg))
        });
        match outcome {
            Ok(value) => Some(value),
            Err(ScoreError::NotInitialized) => {
                log::warn!("{name} called before initialize");
                None
            }
            Err(e) => {
                log::error!("{name} failed: {e}");
                None
            }
        }
    }

    // ── Flags ───────────────────────────────────────────────────────

    pub fn initialize(&mut self) -> bool {
        let ok = self.guarded("initialize", |s| s.initialize()).is_some();
        self.clear_buffers();
        ok
    }

    pub fn set_options(&mut self, options_json: Option<&str>) -> bool {
        self.guarded("set_options", |s| s.set_options(required(options_json, "options")?))
            .is_some()
    }

    pub fn load_document(&mut self, text: Option<&str>) -> bool {
        self.guarded("load_document", |s| s.load_document(required_present(text, "document")?))
            .is_some()
    }

    pub fn validate(&mut self, text: Option<&str>) -> bool {
        self.guarded("validate", |s| s.validate(required(text, "document")?))
            .is_some()
    }

    pub fn page_count(&mut self) -> i32 {
        self.guarded("page_count", |s| Ok(s.page_count() as i32)).unwrap_or(0)
    }

    pub fn cleanup(&mut self) {
        self.guarded("cleanup", |s| {
            s.cleanup();
            Ok(())
        });
        self.clear_buffers();
        self.audio.shrink_to_fit();
    }

    fn clear_buffers(&mut self) {
        self.image = CString::default();
        self.record = CString::default();
        self.audio.clear();
    }

    // ── Image category ──────────────────────────────────────────────

    /// Rendered SVG of `page_number`; the placeholder on any failure, so
    /// never empty.
    pub fn render_page(&mut self, page_number: i32) -> &CStr {
        let svg = match self.guarded("render_page", |s| s.render_page(page_number)) {
            Some(svg) if !svg.is_empty() => svg,
            Some(_) => {
                log::warn!("render_page produced an empty image");
                PLACEHOLDER_SVG.to_string()
            }
            None => PLACEHOLDER_SVG.to_string(),
        };
        self.image = to_c_string(svg);
        &self.image
    }

    // ── Record category ─────────────────────────────────────────────

    /// JSON attribute record of `id`; `{}` when missing.
    pub fn element_attributes(&mut self, id: Option<&str>) -> &CStr {
        let json = self
            .guarded("element_attributes", |s| s.element_attributes(required(id, "element id")?))
            .flatten()
            .unwrap_or_else(|| EMPTY_RECORD.to_string());
        self.record = to_c_string(json);
        &self.record
    }

    /// JSON array of the ids sounding at `time_ms`; `[]` when none.
    pub fn elements_at_time(&mut self, time_ms: i32) -> &CStr {
        let json = self
            .guarded("elements_at_time", |s| {
                let ids = s.elements_at_time(time_ms)?;
                Ok(serde_json::to_string(&ids)?)
            })
            .unwrap_or_else(|| EMPTY_LIST.to_string());
        self.record = to_c_string(json);
        &self.record
    }

    /// Converted MusicXML text; empty on failure.
    pub fn convert(&mut self, data: Option<&[u8]>, from_format: Option<&str>) -> &CStr {
        let text = self
            .guarded("convert", |s| {
                let data = data.ok_or_else(|| ScoreError::InvalidInput("no data".into()))?;
                s.convert(data, required(from_format, "source format")?)
            })
            .unwrap_or_default();
        self.record = to_c_string(text);
        &self.record
    }

    /// Version string; the fallback literal before initialization.
    pub fn version(&mut self) -> &CStr {
        let version = self
            .guarded("version", |s| Ok(s.version()))
            .unwrap_or_else(|| FALLBACK_VERSION.to_string());
        self.record = to_c_string(version);
        &self.record
    }

    // ── Audio category ──────────────────────────────────────────────

    /// Standard MIDI File bytes; empty when there is nothing to play.
    pub fn render_audio(&mut self) -> &[u8] {
        self.audio = self.guarded("render_audio", |s| s.render_audio()).unwrap_or_default();
        &self.audio
    }
}

/// A required string argument: present and non-empty.
fn required<'a>(value: Option<&'a str>, what: &str) -> Result<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ScoreError::InvalidInput(format!("{what} is missing or empty"))),
    }
}

/// A required argument that may legitimately be empty (an empty document
/// clears the staff).
fn required_present<'a>(value: Option<&'a str>, what: &str) -> Result<&'a str> {
    value.ok_or_else(|| ScoreError::InvalidInput(format!("{what} is missing")))
}

/// Copy into a C string, dropping interior NULs rather than failing.
fn to_c_string(s: String) -> CString {
    CString::new(s).unwrap_or_else(|e| {
        let mut bytes = e.into_vec();
        bytes.retain(|&b| b != 0);
        CString::new(bytes).unwrap_or_default()
    })
}
