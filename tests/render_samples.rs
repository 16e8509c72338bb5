//! Rendering tests — load note-list documents and render them to SVG.

use pretty_assertions::assert_eq;
use scorelite::{render_document, RenderOptions, Session, PLACEHOLDER_SVG};
use std::path::PathBuf;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sheetmusic_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("sheetmusic")
}

fn output_dir() -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_output");
    std::fs::create_dir_all(&dir).ok();
    dir
}

fn note(i: usize, step: &str, ty: &str, lyric: &str) -> String {
    format!(
        r#"<note id="note-{i}"><pitch><step>{step}</step><octave>4</octave></pitch><type>{ty}</type><lyric><text>{lyric}</text></lyric></note>"#
    )
}

fn group_count(svg: &str) -> usize {
    svg.matches(r#"class="note""#).count()
}

fn assert_balanced(svg: &str) {
    assert!(svg.starts_with("<svg"), "SVG should open with the root element");
    assert!(svg.trim_end().ends_with("</svg>"), "SVG should be closed");
    assert_eq!(svg.matches("<svg").count(), 1);
    assert_eq!(svg.matches("<g ").count(), svg.matches("</g>").count());
}

#[test]
fn render_single_quarter_note() {
    init_logging();
    let mut session = Session::new();
    session.initialize().unwrap();
    session
        .load_document(r#"<note id="note-1"><pitch><step>E</step></pitch><type>quarter</type><lyric><text>La</text></lyric></note>"#)
        .unwrap();

    let svg = session.render_page(1).unwrap();
    assert_balanced(&svg);
    assert_eq!(group_count(&svg), 1);
    assert!(svg.contains(r#"<g id="note-1" class="note">"#));

    // Filled notehead in the first slot, on the bottom staff line
    let group = &svg[svg.find(r#"<g id="note-1""#).unwrap()..];
    let group = &group[..group.find("</g>").unwrap()];
    assert!(group.contains(r##"<ellipse cx="160.0" cy="160.0""##));
    assert!(group.contains(r##"fill="#000000" stroke="none""##));
    assert_eq!(group.matches("<line").count(), 1, "quarter note has a stem and no ledger line");
    assert!(group.contains(">La</text>"));

    // Loading an empty document clears the staff
    session.load_document("").unwrap();
    let svg = session.render_page(1).unwrap();
    assert_balanced(&svg);
    assert_eq!(group_count(&svg), 0);
    assert!(svg.contains("scorelite preview"));
}

#[test]
fn render_twinkle_sample() {
    init_logging();
    let path = sheetmusic_dir().join("twinkle.musicxml");
    let document = std::fs::read_to_string(&path).expect("Failed to read twinkle sample");

    let page = render_document(&document, &RenderOptions::default());
    assert_balanced(&page.image.svg);
    assert_eq!(page.image.group_ids.len(), 7);
    assert_eq!(page.image.omitted, 0);

    let xs: Vec<i32> = page.elements.iter().map(|e| e.x).collect();
    assert_eq!(xs, vec![160, 205, 250, 295, 340, 385, 430]);
    let ys: Vec<i32> = page.elements.iter().map(|e| e.y).collect();
    assert_eq!(ys, vec![170, 170, 150, 150, 145, 145, 150]);

    assert!(page.image.svg.contains("Twin"));
    assert!(page.image.svg.contains("star"));

    let out = output_dir().join("twinkle.svg");
    std::fs::write(&out, &page.image.svg).expect("Failed to write SVG");
    println!("✓ Rendered twinkle.svg ({} bytes)", page.image.svg.len());
    println!("  Output: {}", out.display());
}

#[test]
fn render_caps_at_max_notes() {
    let doc: String = (1..=25).map(|i| note(i, "F", "quarter", "x")).collect();
    let page = render_document(&doc, &RenderOptions::default());
    assert_eq!(page.image.group_ids.len(), 20);
    assert_eq!(page.image.group_ids.last().map(String::as_str), Some("note-20"));
    assert_balanced(&page.image.svg);

    let doc: String = (1..=3).map(|i| note(i, "F", "quarter", "x")).collect();
    let page = render_document(&doc, &RenderOptions::default());
    assert_eq!(page.image.group_ids.len(), 3);
}

#[test]
fn render_unknown_step_uses_default_position() {
    let doc = note(1, "H", "quarter", "hm");
    let page = render_document(&doc, &RenderOptions::default());
    assert_eq!(page.elements.len(), 1);
    assert_eq!(page.elements[0].y, 170);
    assert_eq!(page.elements[0].step, "H");
}

#[test]
fn render_glyph_follows_duration() {
    let doc = format!(
        "{}{}{}",
        note(1, "B", "whole", "a"),
        note(2, "B", "half", "b"),
        note(3, "B", "eighth", "c"),
    );
    let page = render_document(&doc, &RenderOptions::default());
    let svg = &page.image.svg;
    assert_eq!(svg.matches(r#"fill="none" stroke="#).count(), 2, "whole and half are hollow");
    assert_eq!(svg.matches(r#"stroke="none""#).count(), 1, "eighth is filled");
}

#[test]
fn render_ignores_notes_without_the_id_prefix() {
    let doc = format!(
        r#"<note id="n1"><step>C</step><type>quarter</type><lyric><text>x</text></lyric></note>{}"#,
        note(2, "D", "quarter", "y")
    );
    let page = render_document(&doc, &RenderOptions::default());
    assert_eq!(page.image.group_ids, vec!["note-2"]);
}

#[test]
fn render_respects_page_options() {
    let mut session = Session::new();
    session.initialize().unwrap();
    session
        .set_options(r##"{"pageWidth": 600, "pageHeight": 240, "background": "#fafafa", "footerText": ""}"##)
        .unwrap();
    session.load_document(&note(1, "A", "quarter", "la")).unwrap();

    let svg = session.render_page(1).unwrap();
    assert!(svg.contains(r#"viewBox="0 0 600 240""#));
    assert!(svg.contains(r##"fill="#fafafa""##));
    assert!(!svg.contains("scorelite preview"));
}

#[test]
fn placeholder_before_any_load() {
    let mut session = Session::new();
    let first = session.render_page(1).unwrap();
    assert_eq!(first, PLACEHOLDER_SVG);
    session.initialize().unwrap();
    assert_eq!(session.render_page(1).unwrap(), first);
    assert_eq!(session.render_page(42).unwrap(), first);
}
