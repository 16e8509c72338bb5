//! Staff, clef, time signature and footer rendering.

use crate::options::RenderOptions;

use super::constants::*;
use super::svg_builder::SvgBuilder;

// ═══════════════════════════════════════════════════════════════════════
// Header: canvas, staff lines, clef, time signature
// ═══════════════════════════════════════════════════════════════════════

/// Fixed header: opening root tag plus everything drawn before the notes.
pub(super) fn render_header(options: &RenderOptions) -> String {
    let mut svg = SvgBuilder::new(options.page_width, options.page_height);
    svg.background(&options.background);

    let x2 = (options.page_width as f64 - STAFF_RIGHT_MARGIN).max(STAFF_LEFT);
    render_staff_lines(&mut svg, STAFF_LEFT, x2, STAFF_TOP as f64);
    render_clef(&mut svg, STAFF_TOP as f64);
    render_time_signature(&mut svg, STAFF_TOP as f64, 4, 4);

    let mut header = svg.root_open();
    header.push_str(&svg.into_fragment());
    header
}

pub(super) fn render_staff_lines(svg: &mut SvgBuilder, x1: f64, x2: f64, staff_y: f64) {
    for i in 0..5 {
        let y = staff_y + (i * STAFF_LINE_SPACING) as f64;
        svg.line(x1, y, x2, y, STAFF_COLOR, STAFF_LINE_WIDTH);
    }
}

fn render_clef(svg: &mut SvgBuilder, staff_y: f64) {
    // G line is the second line from the bottom.
    let g_line = staff_y + (3 * STAFF_LINE_SPACING) as f64;
    svg.treble_clef(CLEF_X, g_line);
}

fn render_time_signature(svg: &mut SvgBuilder, staff_y: f64, beats: u32, beat_type: u32) {
    let top_y = staff_y + (2 * STAFF_LINE_SPACING) as f64 - 1.0;
    let bot_y = staff_y + (4 * STAFF_LINE_SPACING) as f64 - 1.0;
    svg.text(TIME_SIG_X, top_y, &beats.to_string(), TIME_SIG_SIZE, "bold", NOTE_COLOR, "middle");
    svg.text(TIME_SIG_X, bot_y, &beat_type.to_string(), TIME_SIG_SIZE, "bold", NOTE_COLOR, "middle");
}

// ═══════════════════════════════════════════════════════════════════════
// Footer
// ═══════════════════════════════════════════════════════════════════════

/// Fixed footer: caption and the closing root tag.
pub(super) fn render_footer(options: &RenderOptions) -> String {
    let mut svg = SvgBuilder::new(options.page_width, options.page_height);
    if !options.footer_text.is_empty() {
        svg.text(
            options.page_width as f64 / 2.0,
            (options.page_height as f64 - FOOTER_OFFSET_Y).max(0.0),
            &options.footer_text,
            FOOTER_SIZE,
            "normal",
            FOOTER_COLOR,
            "middle",
        );
    }
    let mut footer = svg.into_fragment();
    footer.push_str("</svg>\n");
    footer
}
