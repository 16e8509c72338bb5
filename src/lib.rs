//! scorelite — lightweight score preview engine for mobile hosts.
//!
//! Scans a note-list document for `<note id="note-…">` elements and draws
//! them on a single treble staff as SVG. Element attributes, time lookups
//! and a MIDI rendition come from the same scan. The host talks to a
//! [`ScoreBridge`] through the C ABI below (iOS) or JNI (Android).
//!
//! # Example
//! ```no_run
//! use scorelite::Session;
//!
//! let mut session = Session::new();
//! session.initialize().unwrap();
//! session.load_document(r#"<note id="note-1"><step>E</step><type>quarter</type></note>"#).unwrap();
//! let svg = session.render_page(1).unwrap();
//! println!("{svg}");
//! ```

pub mod bridge;
pub mod convert;
pub mod engine;
pub mod error;
pub mod extract;
pub mod midi;
pub mod model;
pub mod mxl;
pub mod options;
pub mod playback;
pub mod renderer;
pub mod session;
pub mod timemap;
pub mod validate;
pub mod walker;

#[cfg(target_os = "android")]
pub mod android;

pub use bridge::ScoreBridge;
pub use engine::{Engraver, TextScanEngraver};
pub use error::{Result, ScoreError};
pub use model::{DurationType, GlyphVariant, NoteEvent, PitchStep, Placement};
pub use options::RenderOptions;
pub use renderer::{render_document, RenderedPage, PLACEHOLDER_SVG};
pub use session::{Session, SessionState};

// ═══════════════════════════════════════════════════════════════════════
// C FFI — for iOS (static library) and other native hosts
// ═══════════════════════════════════════════════════════════════════════
//
// Every call takes the handle returned by `scorelite_new`. Returned pointers
// borrow from buffers owned by the handle: they stay valid until the next
// call that writes the same category (image, record or audio) or until
// `scorelite_free`. Callers copy what they want to keep.

use std::ffi::{c_char, c_int, CStr, CString};
use std::sync::LazyLock;

/// Version returned for a null handle. Matches [`session::FALLBACK_VERSION`].
static NULL_HANDLE_VERSION: &CStr = c"scorelite-uninitialized";

/// Placeholder image for calls made with a null handle.
static NULL_HANDLE_IMAGE: LazyLock<CString> =
    LazyLock::new(|| CString::new(PLACEHOLDER_SVG).unwrap_or_default());

unsafe fn bridge_mut<'a>(handle: *mut ScoreBridge) -> Option<&'a mut ScoreBridge> {
    if handle.is_null() {
        log::warn!("scorelite call with a null handle");
        None
    } else {
        Some(unsafe { &mut *handle })
    }
}

/// A C string argument as UTF-8; `None` for null or invalid text.
unsafe fn arg_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    match unsafe { CStr::from_ptr(ptr) }.to_str() {
        Ok(s) => Some(s),
        Err(e) => {
            log::warn!("argument is not valid UTF-8: {e}");
            None
        }
    }
}

fn flag(ok: bool) -> c_int {
    ok as c_int
}

/// Create a new, uninitialized engine handle. Release it with
/// `scorelite_free`.
#[no_mangle]
pub extern "C" fn scorelite_new() -> *mut ScoreBridge {
    Box::into_raw(Box::new(ScoreBridge::new()))
}

/// Destroy a handle and every buffer it owns.
///
/// # Safety
/// `handle` must come from `scorelite_new` and not be used afterwards, or
/// be null.
#[no_mangle]
pub unsafe extern "C" fn scorelite_free(handle: *mut ScoreBridge) {
    if !handle.is_null() {
        drop(unsafe { Box::from_raw(handle) });
    }
}

/// # Safety
/// `handle` must be a live handle from `scorelite_new`, or null.
#[no_mangle]
pub unsafe extern "C" fn scorelite_initialize(handle: *mut ScoreBridge) -> c_int {
    match unsafe { bridge_mut(handle) } {
        Some(bridge) => flag(bridge.initialize()),
        None => 0,
    }
}

/// Merge a JSON object of render options. Returns 1 on success.
///
/// # Safety
/// `handle` must be a live handle or null; `options_json` must be a valid
/// null-terminated string or null.
#[no_mangle]
pub unsafe extern "C" fn scorelite_set_options(
    handle: *mut ScoreBridge,
    options_json: *const c_char,
) -> c_int {
    match unsafe { bridge_mut(handle) } {
        Some(bridge) => flag(bridge.set_options(unsafe { arg_str(options_json) })),
        None => 0,
    }
}

/// Load (replace) the document text. Returns 1 on success.
///
/// # Safety
/// `handle` must be a live handle or null; `data` must be a valid
/// null-terminated string or null.
#[no_mangle]
pub unsafe extern "C" fn scorelite_load_data(
    handle: *mut ScoreBridge,
    data: *const c_char,
) -> c_int {
    match unsafe { bridge_mut(handle) } {
        Some(bridge) => flag(bridge.load_document(unsafe { arg_str(data) })),
        None => 0,
    }
}

/// Render a 1-based page to SVG. Never returns null: any failure yields the
/// placeholder image.
///
/// # Safety
/// `handle` must be a live handle or null.
#[no_mangle]
pub unsafe extern "C" fn scorelite_render_to_svg(
    handle: *mut ScoreBridge,
    page_number: c_int,
) -> *const c_char {
    match unsafe { bridge_mut(handle) } {
        Some(bridge) => bridge.render_page(page_number).as_ptr(),
        None => NULL_HANDLE_IMAGE.as_ptr(),
    }
}

/// # Safety
/// `handle` must be a live handle or null.
#[no_mangle]
pub unsafe extern "C" fn scorelite_get_page_count(handle: *mut ScoreBridge) -> c_int {
    match unsafe { bridge_mut(handle) } {
        Some(bridge) => bridge.page_count(),
        None => 0,
    }
}

/// JSON attribute record of an element id; `{}` when unknown.
///
/// # Safety
/// `handle` must be a live handle; `id` must be a valid null-terminated
/// string or null.
#[no_mangle]
pub unsafe extern "C" fn scorelite_get_element_attr(
    handle: *mut ScoreBridge,
    id: *const c_char,
) -> *const c_char {
    match unsafe { bridge_mut(handle) } {
        Some(bridge) => bridge.element_attributes(unsafe { arg_str(id) }).as_ptr(),
        None => c"{}".as_ptr(),
    }
}

/// JSON array of the element ids sounding at `millis`; `[]` when none.
///
/// # Safety
/// `handle` must be a live handle or null.
#[no_mangle]
pub unsafe extern "C" fn scorelite_get_elements_at_time(
    handle: *mut ScoreBridge,
    millis: c_int,
) -> *const c_char {
    match unsafe { bridge_mut(handle) } {
        Some(bridge) => bridge.elements_at_time(millis).as_ptr(),
        None => c"[]".as_ptr(),
    }
}

/// Standard MIDI File bytes for the loaded document. The byte count is
/// written to `out_len`; zero means there is nothing to play.
///
/// # Safety
/// `handle` must be a live handle or null; `out_len` must be writable or
/// null.
#[no_mangle]
pub unsafe extern "C" fn scorelite_render_to_midi(
    handle: *mut ScoreBridge,
    out_len: *mut usize,
) -> *const u8 {
    let (ptr, len) = match unsafe { bridge_mut(handle) } {
        Some(bridge) => {
            let bytes = bridge.render_audio();
            (bytes.as_ptr(), bytes.len())
        }
        None => (std::ptr::null(), 0),
    };
    if !out_len.is_null() {
        unsafe { *out_len = len };
    }
    ptr
}

/// Returns 1 when `data` is a well-formed MusicXML score.
///
/// # Safety
/// `handle` must be a live handle or null; `data` must be a valid
/// null-terminated string or null.
#[no_mangle]
pub unsafe extern "C" fn scorelite_validate(
    handle: *mut ScoreBridge,
    data: *const c_char,
) -> c_int {
    match unsafe { bridge_mut(handle) } {
        Some(bridge) => flag(bridge.validate(unsafe { arg_str(data) })),
        None => 0,
    }
}

/// Convert `len` bytes in `from_format` (`musicxml`, `xml` or `mxl`) to
/// MusicXML text. Returns an empty string on failure.
///
/// # Safety
/// `handle` must be a live handle or null; `data` must point to `len`
/// readable bytes or be null; `from_format` must be a valid null-terminated
/// string or null.
#[no_mangle]
pub unsafe extern "C" fn scorelite_convert_file(
    handle: *mut ScoreBridge,
    data: *const u8,
    len: usize,
    from_format: *const c_char,
) -> *const c_char {
    let Some(bridge) = (unsafe { bridge_mut(handle) }) else {
        return c"".as_ptr();
    };
    let bytes = if data.is_null() {
        None
    } else {
        Some(unsafe { std::slice::from_raw_parts(data, len) })
    };
    bridge.convert(bytes, unsafe { arg_str(from_format) }).as_ptr()
}

/// Return the handle to the uninitialized state and release its buffers.
///
/// # Safety
/// `handle` must be a live handle or null.
#[no_mangle]
pub unsafe extern "C" fn scorelite_cleanup(handle: *mut ScoreBridge) {
    if let Some(bridge) = unsafe { bridge_mut(handle) } {
        bridge.cleanup();
    }
}

/// Engine version. A null or uninitialized handle reports the fallback
/// version string.
///
/// # Safety
/// `handle` must be a live handle or null.
#[no_mangle]
pub unsafe extern "C" fn scorelite_get_version(handle: *mut ScoreBridge) -> *const c_char {
    if handle.is_null() {
        return NULL_HANDLE_VERSION.as_ptr();
    }
    unsafe { &mut *handle }.version().as_ptr()
}
