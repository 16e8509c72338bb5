//! MIDI file generation from the rendered note stream.
//!
//! Produces a Standard MIDI File (SMF) Type 1 as raw bytes. Track 0 is the
//! tempo map; track 1 carries the melody. This is event data for a host
//! synthesizer; no audio is synthesized here.

use crate::playback::ElementRecord;

/// Ticks per quarter note in our MIDI output.
pub const TICKS_PER_QUARTER: u16 = 480;

const MELODY_CHANNEL: u8 = 0;
const MELODY_PROGRAM: u8 = 0; // Acoustic Grand Piano
const VELOCITY: u8 = 80;

/// A single MIDI event (note on/off, program change, etc.)
#[derive(Debug, Clone)]
pub struct MidiEvent {
    /// Absolute time in ticks from the start of the track
    pub tick: u32,
    /// Raw MIDI message bytes (status + data)
    pub bytes: Vec<u8>,
}

/// Generate a complete Standard MIDI File for the given elements.
///
/// Elements whose step has no pitch sound as rests.
pub fn generate_midi(elements: &[ElementRecord], tempo_bpm: f64) -> Vec<u8> {
    let tracks = vec![
        build_tempo_track(tempo_bpm),
        encode_track(&melody_events(elements), "Melody"),
    ];
    build_smf(&tracks)
}

fn melody_events(elements: &[ElementRecord]) -> Vec<MidiEvent> {
    let mut events = vec![MidiEvent {
        tick: 0,
        bytes: vec![0xC0 | MELODY_CHANNEL, MELODY_PROGRAM],
    }];

    for element in elements {
        let Some(note) = element.midi_note else {
            continue;
        };
        let on_tick = beats_to_ticks(element.onset_beats);
        let off_tick = beats_to_ticks(element.onset_beats + element.beats);
        events.push(MidiEvent {
            tick: on_tick,
            bytes: vec![0x90 | MELODY_CHANNEL, note, VELOCITY],
        });
        events.push(MidiEvent {
            tick: off_tick,
            bytes: vec![0x80 | MELODY_CHANNEL, note, 0],
        });
    }
    events
}

fn beats_to_ticks(beats: f64) -> u32 {
    (beats * TICKS_PER_QUARTER as f64).round().max(0.0) as u32
}

// ═══════════════════════════════════════════════════════════════════════
// SMF byte encoding
// ═══════════════════════════════════════════════════════════════════════

/// Build the complete Standard MIDI File bytes.
fn build_smf(tracks: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Vec::new();

    // MThd header
    out.extend_from_slice(b"MThd");
    out.extend_from_slice(&6u32.to_be_bytes()); // header length
    out.extend_from_slice(&1u16.to_be_bytes()); // format type 1
    out.extend_from_slice(&(tracks.len() as u16).to_be_bytes());
    out.extend_from_slice(&TICKS_PER_QUARTER.to_be_bytes());

    for track_data in tracks {
        out.extend_from_slice(b"MTrk");
        out.extend_from_slice(&(track_data.len() as u32).to_be_bytes());
        out.extend_from_slice(track_data);
    }

    out
}

/// Build the tempo track (track 0) with a single tempo meta-event.
fn build_tempo_track(tempo_bpm: f64) -> Vec<u8> {
    let uspq = (60_000_000.0 / tempo_bpm) as u32; // microseconds per quarter
    // Meta event: FF 51 03 tt tt tt
    let events = [MidiEvent {
        tick: 0,
        bytes: vec![
            0xFF,
            0x51,
            0x03,
            ((uspq >> 16) & 0xFF) as u8,
            ((uspq >> 8) & 0xFF) as u8,
            (uspq & 0xFF) as u8,
        ],
    }];
    encode_track(&events, "Tempo")
}

/// Encode a track's events into raw MTrk bytes (delta-time encoded).
fn encode_track(events: &[MidiEvent], name: &str) -> Vec<u8> {
    let mut data = Vec::new();

    // Track name meta event
    let name_bytes = name.as_bytes();
    data.push(0x00); // delta time 0
    data.push(0xFF);
    data.push(0x03); // track name
    write_vlq(&mut data, name_bytes.len() as u32);
    data.extend_from_slice(name_bytes);

    // At equal ticks note-ons sort last, so a repeated pitch is released
    // before it sounds again.
    let mut sorted: Vec<&MidiEvent> = events.iter().collect();
    sorted.sort_by_key(|e| (e.tick, e.bytes.first().map_or(0, |s| (s & 0xF0 == 0x90) as u8)));

    let mut last_tick: u32 = 0;
    for event in &sorted {
        let delta = event.tick.saturating_sub(last_tick);
        write_vlq(&mut data, delta);
        data.extend_from_slice(&event.bytes);
        last_tick = event.tick;
    }

    // End of track
    data.extend_from_slice(&[0x00, 0xFF, 0x2F, 0x00]);

    data
}

/// Write a variable-length quantity (VLQ) to a byte vector.
fn write_vlq(out: &mut Vec<u8>, mut value: u32) {
    if value == 0 {
        out.push(0);
        return;
    }
    let mut buf = [0u8; 5];
    let mut i = 0;
    while value > 0 {
        buf[i] = (value & 0x7F) as u8;
        value >>= 7;
        if i > 0 {
            buf[i] |= 0x80;
        }
        i += 1;
    }
    // Write in reverse order
    for j in (0..i).rev() {
        out.push(buf[j]);
    }
}
