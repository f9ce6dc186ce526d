//! Document-to-MIDI conversion
//!
//! Reads the ordered measure/note sequence and lays it out on a tick
//! timeline. The document is never modified.

use super::defaults::{ticks_per_position, DEFAULT_VELOCITY};
use crate::config::Tuning;
use crate::models::TabDocument;

/// A sounding note on the tick timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedNote {
    pub start_tick: u32,
    pub dur_tick: u32,
    pub pitch: u8,
    pub vel: u8,
}

/// Convert the document to notes in playback order
///
/// Each position lasts one sixteenth. Measures follow each other with no
/// gap, so measure `m` position `p` starts at `(m * 16 + p) * sixteenth`.
pub fn document_to_notes(document: &TabDocument, tuning: &Tuning, tpq: u16) -> Vec<TimedNote> {
    let step = ticks_per_position(tpq);
    let mut notes = Vec::with_capacity(document.total_note_count());

    for (index, measure) in document.measures().iter().enumerate() {
        let measure_start = index as u32 * step * crate::models::POSITIONS_PER_MEASURE as u32;
        for note in measure.notes_by_position() {
            let pitch = tuning.open_pitch(note.string).saturating_add(note.fret.value()).min(127);
            notes.push(TimedNote {
                start_tick: measure_start + note.position.value() as u32 * step,
                dur_tick: step,
                pitch,
                vel: DEFAULT_VELOCITY,
            });
        }
    }

    notes
}

/// Ticks covered by the whole document, empty measures included
pub fn document_length_ticks(document: &TabDocument, tpq: u16) -> u32 {
    document.measure_count() as u32 * crate::models::POSITIONS_PER_MEASURE as u32 * ticks_per_position(tpq)
}
