//! Document-to-MIDI export
//!
//! A read-only consumer of the ordered measure/note sequence. The result
//! is a Standard MIDI File handed back to the host; nothing is played or
//! stored here.
//!
//! # Usage
//! ```rust,ignore
//! let bytes = document_to_smf(&document, &config)?;
//! ```

pub mod converter;
pub mod defaults;
pub mod write;

pub use converter::{document_length_ticks, document_to_notes, TimedNote};
pub use defaults::{DEFAULT_TPQ, DEFAULT_VELOCITY, GUITAR_PROGRAM};
pub use write::write_smf;

use crate::config::EditorConfig;
use crate::error::Result;
use crate::models::TabDocument;

/// Convert the document to SMF bytes at the configured tempo
pub fn document_to_smf(document: &TabDocument, config: &EditorConfig) -> Result<Vec<u8>> {
    let notes = document_to_notes(document, &config.tuning, DEFAULT_TPQ);
    let length = document_length_ticks(document, DEFAULT_TPQ);
    let mut out = Vec::new();
    write_smf(&notes, DEFAULT_TPQ, config.effective_tempo(), length, &mut out)?;
    log::info!("exported {} notes to MIDI ({} bytes)", notes.len(), out.len());
    Ok(out)
}
