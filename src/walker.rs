//! Note stream walker — scans a note-list document for `<note id="note-…">`
//! elements and yields them as [`NoteEvent`]s in document order.
//!
//! The walk is best-effort: an element missing its id, step, type or lyric
//! text is skipped without error. It is also bounded: it never yields more
//! than `max_notes` events and every step moves the cursor forward.

use std::iter::FusedIterator;

use crate::extract::{extract_bounded, find_from};
use crate::model::{DurationType, NoteEvent, PitchStep};

/// Marker that opens a note element the walker understands.
pub const NOTE_OPEN: &str = "<note id=\"note-";
/// Marker that closes a note element.
pub const NOTE_CLOSE: &str = "</note>";
/// Prefix every yielded id starts with.
pub const ID_PREFIX: &str = "note-";

/// Default cap on events per render.
pub const DEFAULT_MAX_NOTES: usize = 20;

// Field capacities in bytes.
pub(crate) const ID_CAPACITY: usize = 15;
const STEP_CAPACITY: usize = 7;
const TYPE_CAPACITY: usize = 15;
pub(crate) const LYRIC_CAPACITY: usize = 31;

/// Lazy, finite, non-restartable iterator over the notes of a document.
pub struct NoteWalker<'a> {
    document: &'a str,
    cursor: Option<usize>,
    max_notes: usize,
    yielded: usize,
}

impl<'a> NoteWalker<'a> {
    pub fn new(document: &'a str, max_notes: usize) -> Self {
        Self {
            document,
            cursor: Some(0),
            max_notes,
            yielded: 0,
        }
    }

    /// Number of events yielded so far.
    pub fn yielded(&self) -> usize {
        self.yielded
    }
}

impl Iterator for NoteWalker<'_> {
    type Item = NoteEvent;

    fn next(&mut self) -> Option<NoteEvent> {
        while self.yielded < self.max_notes {
            let from = self.cursor?;
            let Some(start) = find_from(self.document, from, NOTE_OPEN) else {
                self.cursor = None;
                return None;
            };

            // Scope child lookups to this element so a note with a missing
            // field cannot borrow the next note's field. The scope ends at
            // `</note>` or at the next note's opening marker, whichever
            // comes first.
            let body = start + NOTE_OPEN.len();
            let close = find_from(self.document, body, NOTE_CLOSE);
            let next_open = find_from(self.document, body, NOTE_OPEN);
            let scope_end = match (close, next_open) {
                (Some(c), Some(n)) if n < c => n,
                (Some(c), _) => c + NOTE_CLOSE.len(),
                (None, n) => n.unwrap_or(self.document.len()),
            };
            let element = &self.document[start..scope_end];

            // No `</note>` left anywhere: this is the last element walked.
            self.cursor = close.map(|_| scope_end);

            match scan_element(element) {
                Some(event) => {
                    self.yielded += 1;
                    return Some(event);
                }
                None => {
                    log::debug!("Skipping malformed note element at byte {start}");
                }
            }
        }
        None
    }
}

impl FusedIterator for NoteWalker<'_> {}

/// Extract the four required fields of one note element.
fn scan_element(element: &str) -> Option<NoteEvent> {
    let suffix = extract_bounded(element, NOTE_OPEN, "\"", ID_CAPACITY - ID_PREFIX.len())?;
    let step = extract_bounded(element, "<step>", "</step>", STEP_CAPACITY)?;
    let note_type = extract_bounded(element, "<type>", "</type>", TYPE_CAPACITY)?;
    let lyric = extract_bounded(element, "<text>", "</text>", LYRIC_CAPACITY)?;

    Some(NoteEvent {
        id: format!("{ID_PREFIX}{suffix}"),
        step: PitchStep::parse(step),
        duration: DurationType::parse(note_type),
        lyric: if lyric.is_empty() { None } else { Some(lyric.to_string()) },
    })
}

/// Convenience: collect up to `max_notes` events from a document.
pub fn walk_notes(document: &str, max_notes: usize) -> Vec<NoteEvent> {
    NoteWalker::new(document, max_notes).collect()
}
