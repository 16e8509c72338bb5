//! C ABI tests — drive the engine through the exported `scorelite_*` functions.

use pretty_assertions::assert_eq;
use scorelite::session::FALLBACK_VERSION;
use scorelite::*;
use std::ffi::{CStr, CString};

const ONE_NOTE: &str = r#"<note id="note-1"><pitch><step>E</step></pitch><type>quarter</type><lyric><text>La</text></lyric></note>"#;

fn c(s: &str) -> CString {
    CString::new(s).unwrap()
}

unsafe fn read(ptr: *const std::os::raw::c_char) -> String {
    assert!(!ptr.is_null(), "borrowed strings are never null");
    CStr::from_ptr(ptr).to_str().unwrap().to_string()
}

/// Owns a handle for the duration of a test.
struct Handle(*mut ScoreBridge);

impl Handle {
    fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Handle(scorelite_new())
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        unsafe { scorelite_free(self.0) };
    }
}

#[test]
fn ffi_render_session() {
    let h = Handle::new();
    unsafe {
        assert_eq!(read(scorelite_get_version(h.0)), FALLBACK_VERSION);
        assert_eq!(read(scorelite_render_to_svg(h.0, 1)), PLACEHOLDER_SVG);
        assert_eq!(scorelite_get_page_count(h.0), 0);
        assert_eq!(scorelite_load_data(h.0, c(ONE_NOTE).as_ptr()), 0, "load before initialize fails");

        assert_eq!(scorelite_initialize(h.0), 1);
        assert!(read(scorelite_get_version(h.0)).starts_with("scorelite-textscan"));
        assert_eq!(scorelite_get_page_count(h.0), 1);

        assert_eq!(scorelite_load_data(h.0, c(ONE_NOTE).as_ptr()), 1);
        let svg = read(scorelite_render_to_svg(h.0, 1));
        assert!(svg.contains(r#"<g id="note-1" class="note">"#));

        let attrs = read(scorelite_get_element_attr(h.0, c("note-1").as_ptr()));
        let value: serde_json::Value = serde_json::from_str(&attrs).unwrap();
        assert_eq!(value["step"], "E");
        assert_eq!(value["lyric"], "La");

        assert_eq!(read(scorelite_get_element_attr(h.0, c("note-2").as_ptr())), "{}");
        assert_eq!(read(scorelite_get_element_attr(h.0, std::ptr::null())), "{}");
        assert_eq!(read(scorelite_get_elements_at_time(h.0, 250)), r#"["note-1"]"#);
        assert_eq!(read(scorelite_get_elements_at_time(h.0, 9000)), "[]");

        scorelite_cleanup(h.0);
        assert_eq!(scorelite_get_page_count(h.0), 0);
        assert_eq!(read(scorelite_render_to_svg(h.0, 1)), PLACEHOLDER_SVG);
    }
}

#[test]
fn ffi_bad_page_falls_back_to_placeholder() {
    let h = Handle::new();
    unsafe {
        scorelite_initialize(h.0);
        scorelite_load_data(h.0, c(ONE_NOTE).as_ptr());
        assert_eq!(read(scorelite_render_to_svg(h.0, 0)), PLACEHOLDER_SVG);
        assert_eq!(read(scorelite_render_to_svg(h.0, 3)), PLACEHOLDER_SVG);
        assert!(read(scorelite_render_to_svg(h.0, 1)).contains("note-1"));
    }
}

#[test]
fn ffi_midi_is_length_prefixed() {
    let h = Handle::new();
    unsafe {
        scorelite_initialize(h.0);
        let mut len = usize::MAX;
        scorelite_render_to_midi(h.0, &mut len);
        assert_eq!(len, 0, "nothing to play before a load");

        scorelite_load_data(h.0, c(ONE_NOTE).as_ptr());
        let ptr = scorelite_render_to_midi(h.0, &mut len);
        assert!(len > 14);
        let bytes = std::slice::from_raw_parts(ptr, len);
        assert_eq!(&bytes[0..4], b"MThd");
        assert!(bytes.windows(3).any(|w| w == [0x90u8, 64, 80]), "E4 note-on");
    }
}

#[test]
fn ffi_options_validate_and_convert() {
    let h = Handle::new();
    unsafe {
        assert_eq!(scorelite_set_options(h.0, c("{}").as_ptr()), 0);
        scorelite_initialize(h.0);
        assert_eq!(scorelite_set_options(h.0, c(r#"{"footerText": "demo"}"#).as_ptr()), 1);
        assert_eq!(scorelite_set_options(h.0, c("{oops").as_ptr()), 0);
        assert_eq!(scorelite_set_options(h.0, std::ptr::null()), 0);

        let score = "<score-partwise version=\"3.1\"><part id=\"P1\"/></score-partwise>";
        assert_eq!(scorelite_validate(h.0, c(score).as_ptr()), 1);
        assert_eq!(scorelite_validate(h.0, c("<html/>").as_ptr()), 0);
        assert_eq!(scorelite_validate(h.0, std::ptr::null()), 0);

        let converted = scorelite_convert_file(h.0, score.as_ptr(), score.len(), c("musicxml").as_ptr());
        assert_eq!(read(converted), score);
        let failed = scorelite_convert_file(h.0, score.as_ptr(), score.len(), c("pdf").as_ptr());
        assert_eq!(read(failed), "");

        scorelite_load_data(h.0, c(ONE_NOTE).as_ptr());
        assert!(read(scorelite_render_to_svg(h.0, 1)).contains("demo"));
    }
}

#[test]
fn ffi_image_survives_record_calls() {
    let h = Handle::new();
    unsafe {
        scorelite_initialize(h.0);
        scorelite_load_data(h.0, c(ONE_NOTE).as_ptr());
        let svg_ptr = scorelite_render_to_svg(h.0, 1);
        let before = read(svg_ptr);
        // Record-category calls do not touch the image buffer
        scorelite_get_element_attr(h.0, c("note-1").as_ptr());
        scorelite_get_elements_at_time(h.0, 0);
        scorelite_get_version(h.0);
        assert_eq!(read(svg_ptr), before);
    }
}

#[test]
fn ffi_null_handle_is_harmless() {
    let null = std::ptr::null_mut();
    unsafe {
        assert_eq!(read(scorelite_get_version(null)), FALLBACK_VERSION);
        assert_eq!(scorelite_load_data(null, c(ONE_NOTE).as_ptr()), 0);
        assert_eq!(read(scorelite_get_element_attr(null, c("note-1").as_ptr())), "{}");
        assert_eq!(read(scorelite_get_elements_at_time(null, 0)), "[]");
        assert_eq!(read(scorelite_convert_file(null, std::ptr::null(), 0, std::ptr::null())), "");
        assert_eq!(scorelite_validate(null, c("<score-partwise/>").as_ptr()), 0);
    }
}
