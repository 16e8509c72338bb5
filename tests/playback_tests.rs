//! Element query tests — attribute records and time lookups for rendered notes.

use pretty_assertions::assert_eq;
use scorelite::{ScoreError, Session};
use std::path::PathBuf;

fn sheetmusic_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("sheetmusic")
}

fn twinkle_session() -> Session {
    let _ = env_logger::builder().is_test(true).try_init();
    let document = std::fs::read_to_string(sheetmusic_dir().join("twinkle.musicxml"))
        .expect("Failed to read twinkle sample");
    let mut session = Session::new();
    session.initialize().unwrap();
    session.load_document(&document).unwrap();
    session
}

#[test]
fn attributes_of_twinkle_notes() {
    let mut session = twinkle_session();

    let json = session.element_attributes("note-5").unwrap().expect("note-5 is rendered");
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["id"], "note-5");
    assert_eq!(value["step"], "A");
    assert_eq!(value["durationType"], "quarter");
    assert_eq!(value["lyric"], "lit");
    assert_eq!(value["x"], 340);
    assert_eq!(value["y"], 145);
    assert_eq!(value["glyph"], "filled-stemmed");
    assert_eq!(value["onsetMs"], 2000.0);
    assert_eq!(value["durationMs"], 500.0);

    let json = session.element_attributes("note-7").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["glyph"], "hollow-stemmed");
    assert_eq!(value["durationMs"], 1000.0);
}

#[test]
fn attributes_of_unknown_ids() {
    let mut session = twinkle_session();
    assert_eq!(session.element_attributes("note-99").unwrap(), None);
    assert_eq!(session.element_attributes("measure-1").unwrap(), None);
    assert_eq!(
        session.element_attributes(""),
        Err(ScoreError::InvalidInput("element id is empty".into()))
    );
}

#[test]
fn elements_sounding_over_time() {
    let mut session = twinkle_session();
    assert_eq!(session.elements_at_time(0).unwrap(), vec!["note-1"]);
    assert_eq!(session.elements_at_time(499).unwrap(), vec!["note-1"]);
    assert_eq!(session.elements_at_time(500).unwrap(), vec!["note-2"]);
    assert_eq!(session.elements_at_time(3999).unwrap(), vec!["note-7"]);
    assert!(session.elements_at_time(4000).unwrap().is_empty());
    assert!(session.elements_at_time(-1).unwrap().is_empty());
}

#[test]
fn tempo_option_rescales_the_timeline() {
    let mut session = twinkle_session();
    session.set_options(r#"{"tempoBpm": 60}"#).unwrap();
    assert_eq!(session.elements_at_time(1500).unwrap(), vec!["note-2"]);
    assert_eq!(session.elements_at_time(7000).unwrap(), vec!["note-7"]);
}

#[test]
fn queries_require_initialization() {
    let mut session = Session::new();
    assert_eq!(session.element_attributes("note-1"), Err(ScoreError::NotInitialized));
    assert_eq!(session.elements_at_time(0), Err(ScoreError::NotInitialized));
}
