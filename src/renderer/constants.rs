//! Shared constants for the score renderer (all in SVG user units).

// ── Staff ───────────────────────────────────────────────────────────
pub(super) const STAFF_TOP: i32 = 120; // y of the top staff line
pub(super) const STAFF_LINE_SPACING: i32 = 10; // distance between staff lines
pub(super) const STAFF_HEIGHT: i32 = 40; // 5 lines, 4 spaces
pub(super) const STAFF_LEFT: f64 = 80.0;
pub(super) const STAFF_RIGHT_MARGIN: f64 = 100.0;

// ── Prefix (clef + time signature) ──────────────────────────────────
pub(super) const CLEF_X: f64 = 88.0;
pub(super) const TIME_SIG_X: f64 = 130.0;
pub(super) const TIME_SIG_SIZE: f64 = 22.0;

// ── Note dimensions ─────────────────────────────────────────────────
pub(super) const NOTEHEAD_RX: f64 = 5.5; // notehead ellipse x-radius
pub(super) const NOTEHEAD_RY: f64 = 4.0; // notehead ellipse y-radius
pub(super) const STEM_LENGTH: f64 = 30.0;
pub(super) const STEM_WIDTH: f64 = 1.2;
pub(super) const STAFF_LINE_WIDTH: f64 = 0.8;
pub(super) const LEDGER_LINE_WIDTH: f64 = 0.8;
pub(super) const LEDGER_LINE_EXTEND: f64 = 5.0;

// ── Text ────────────────────────────────────────────────────────────
pub(super) const LYRIC_OFFSET_Y: f64 = 35.0; // below the notehead
pub(super) const LYRIC_SIZE: f64 = 12.0;
pub(super) const FOOTER_SIZE: f64 = 12.0;
pub(super) const FOOTER_OFFSET_Y: f64 = 50.0; // above the canvas bottom

// ── Colors ──────────────────────────────────────────────────────────
pub(super) const NOTE_COLOR: &str = "#000000";
pub(super) const STAFF_COLOR: &str = "#000000";
pub(super) const FOOTER_COLOR: &str = "#888888";
