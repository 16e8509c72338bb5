//! Per-note group rendering: notehead, stem, ledger lines and lyric.

use crate::model::{NoteEvent, Placement};
use crate::options::RenderOptions;

use super::constants::*;
use super::svg_builder::SvgBuilder;

/// One complete `<g>…</g>` fragment for a placed note.
pub(super) fn render_note_group(event: &NoteEvent, placement: &Placement, options: &RenderOptions) -> String {
    let mut svg = SvgBuilder::new(options.page_width, options.page_height);
    let x = placement.x as f64;
    let y = placement.y as f64;

    render_ledger_lines(&mut svg, x, y, STAFF_TOP as f64);
    svg.notehead(x, y, placement.glyph.is_filled());

    if placement.glyph.has_stem() {
        // Stem up on the right side of the notehead.
        let stem_x = x + NOTEHEAD_RX - STEM_WIDTH / 2.0;
        svg.line(stem_x, y, stem_x, y - STEM_LENGTH, NOTE_COLOR, STEM_WIDTH);
    }

    if let Some(ref lyric) = event.lyric {
        svg.text(x, y + LYRIC_OFFSET_Y, lyric, LYRIC_SIZE, "normal", &options.lyric_color, "middle");
    }

    let mut group = SvgBuilder::group_open(&event.id);
    group.push('\n');
    group.push_str(&svg.into_fragment());
    group.push_str(SvgBuilder::group_close());
    group.push('\n');
    group
}

fn render_ledger_lines(svg: &mut SvgBuilder, x: f64, note_y: f64, staff_y: f64) {
    let spacing = STAFF_LINE_SPACING as f64;
    let top = staff_y;
    let bottom = staff_y + STAFF_HEIGHT as f64;

    let mut draw = |y: f64| {
        svg.line(
            x - NOTEHEAD_RX - LEDGER_LINE_EXTEND,
            y,
            x + NOTEHEAD_RX + LEDGER_LINE_EXTEND,
            y,
            STAFF_COLOR,
            LEDGER_LINE_WIDTH,
        );
    };

    if note_y < top {
        let mut y = top - spacing;
        while y >= note_y - 1.0 {
            draw(y);
            y -= spacing;
        }
    }

    if note_y > bottom {
        let mut y = bottom + spacing;
        while y <= note_y + 1.0 {
            draw(y);
            y += spacing;
        }
    }
}
