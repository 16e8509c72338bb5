//! Score renderer — scans a note-list document and produces an SVG image.
//!
//! Pipeline: [`NoteWalker`] pulls note events out of the raw text,
//! [`StaffLayout`] places each one on the staff, and [`ImageEmitter`]
//! appends one group per note between a fixed header and footer.

mod constants;
mod layout;
mod notes;
mod staff;
mod svg_builder;

use crate::model::{DurationType, GlyphVariant, NoteEvent, PitchStep, Placement};
use crate::options::RenderOptions;
use crate::playback::ElementRecord;
use crate::timemap::Timeline;
use crate::walker::{NoteWalker, ID_CAPACITY, ID_PREFIX, LYRIC_CAPACITY};

pub use layout::StaffLayout;
pub use svg_builder::PLACEHOLDER_SVG;

use notes::render_note_group;
use staff::{render_footer, render_header};

// ═══════════════════════════════════════════════════════════════════════
// Output types
// ═══════════════════════════════════════════════════════════════════════

/// A finished image plus what went into it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedImage {
    pub svg: String,
    /// Ids of the note groups written, in order
    pub group_ids: Vec<String>,
    /// Note groups dropped because the image hit its capacity
    pub omitted: usize,
}

/// One rendered page: the image and the records of the notes on it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    pub image: RenderedImage,
    pub elements: Vec<ElementRecord>,
}

// ═══════════════════════════════════════════════════════════════════════
// ImageEmitter
// ═══════════════════════════════════════════════════════════════════════

/// Incremental SVG writer with a declared byte capacity.
///
/// Each note group is written whole or not at all, and room for the footer
/// is always kept, so the image stays balanced. Once one group does not fit,
/// every later group is dropped too and counted in
/// [`RenderedImage::omitted`].
pub struct ImageEmitter<'o> {
    options: &'o RenderOptions,
    svg: String,
    footer: String,
    capacity: usize,
    group_ids: Vec<String>,
    omitted: usize,
}

impl<'o> ImageEmitter<'o> {
    pub fn new(options: &'o RenderOptions) -> Self {
        let svg = render_header(options);
        let footer = render_footer(options);
        if svg.len() + footer.len() > options.image_capacity {
            log::warn!(
                "Header and footer alone ({} bytes) exceed the image capacity of {} bytes",
                svg.len() + footer.len(),
                options.image_capacity
            );
        }
        Self {
            options,
            svg,
            footer,
            capacity: options.image_capacity,
            group_ids: Vec::new(),
            omitted: 0,
        }
    }

    /// Append the group for one placed note. Returns `false` if it was
    /// dropped for lack of room.
    pub fn emit(&mut self, event: &NoteEvent, placement: &Placement) -> bool {
        if self.omitted > 0 {
            self.omitted += 1;
            return false;
        }
        let group = render_note_group(event, placement, self.options);
        if self.svg.len() + group.len() + self.footer.len() > self.capacity {
            log::warn!(
                "Image capacity of {} bytes reached; dropping note '{}' and every note after it",
                self.capacity,
                event.id
            );
            self.omitted += 1;
            return false;
        }
        self.svg.push_str(&group);
        self.group_ids.push(event.id.clone());
        true
    }

    pub fn finish(mut self) -> RenderedImage {
        self.svg.push_str(&self.footer);
        RenderedImage {
            svg: self.svg,
            group_ids: self.group_ids,
            omitted: self.omitted,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Capacity budget
// ═══════════════════════════════════════════════════════════════════════

/// Bytes taken by the header and footer alone.
pub fn frame_len(options: &RenderOptions) -> usize {
    render_header(options).len() + render_footer(options).len()
}

/// Smallest image capacity that holds the frame plus `max_notes` of the
/// largest groups any document can produce under `options`.
pub fn required_capacity(options: &RenderOptions) -> usize {
    let widest = widest_event();
    let mut layout = StaffLayout::new(options.note_origin_x, options.note_spacing);
    let groups: usize = (0..options.max_notes)
        .map(|_| {
            let placement = layout.place(&widest);
            [GlyphVariant::Hollow, GlyphVariant::HollowStemmed, GlyphVariant::FilledStemmed]
                .into_iter()
                .map(|glyph| render_note_group(&widest, &Placement { glyph, ..placement }, options).len())
                .max()
                .unwrap_or(0)
        })
        .sum();
    frame_len(options) + groups
}

/// A note whose id and lyric fill their field capacities with the character
/// that grows most under escaping, on the step that needs a ledger line.
fn widest_event() -> NoteEvent {
    NoteEvent {
        id: format!("{ID_PREFIX}{}", "&".repeat(ID_CAPACITY - ID_PREFIX.len())),
        step: PitchStep::C,
        duration: DurationType::Other("quarter".into()),
        lyric: Some("\"".repeat(LYRIC_CAPACITY)),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════

/// Render a note-list document into a page.
///
/// Never fails: a document with no recognizable notes renders as the bare
/// staff (header and footer only).
pub fn render_document(document: &str, options: &RenderOptions) -> RenderedPage {
    let mut layout = StaffLayout::new(options.note_origin_x, options.note_spacing);
    let mut emitter = ImageEmitter::new(options);
    let mut timeline = Timeline::new(options.tempo_bpm);
    let mut elements = Vec::new();

    for event in NoteWalker::new(document, options.max_notes) {
        let placement = layout.place(&event);
        if emitter.emit(&event, &placement) {
            let timing = timeline.advance(&event.duration);
            elements.push(ElementRecord::new(&event, &placement, &timing));
        }
    }

    let image = emitter.finish();
    log::debug!(
        "Rendered {} notes ({} omitted, {} bytes, {:.0} ms)",
        image.group_ids.len(),
        image.omitted,
        image.svg.len(),
        timeline.total_ms()
    );
    RenderedPage { image, elements }
}
