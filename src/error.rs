//! Error types for the tablature editor
//!
//! Only boundary failures live here: values arriving from JavaScript or a
//! config file that cannot be represented, and export failures. Guarded
//! no-ops on the document (deleting the last measure, unknown measure ids)
//! are reported as [`MeasureRejection`](crate::models::MeasureRejection)
//! notices instead.

use thiserror::Error;

use crate::models::MeasureId;

/// Top-level editor error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    /// String index outside 0..=5
    #[error("string index {0} out of range (0-5)")]
    InvalidString(u8),

    /// Position outside the measure grid
    #[error("position {0} out of range (0-15)")]
    InvalidPosition(u8),

    /// Fret number above the highest fret
    #[error("fret {0} out of range (0-24)")]
    InvalidFret(u8),

    /// A loaded document has no measures
    #[error("document must contain at least one measure")]
    EmptyDocument,

    /// A loaded document uses the same measure id twice
    #[error("duplicate measure id {0}")]
    DuplicateMeasureId(MeasureId),

    /// A loaded document has used up the measure id space
    #[error("measure id {0} leaves no room for new measures")]
    MeasureIdExhausted(u32),

    /// Confirmation id was never issued or was already resolved
    #[error("unknown confirmation request {0}")]
    UnknownConfirmation(u32),

    /// Configuration failed to parse or validate
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Standard MIDI File serialization failed
    #[error("midi write error: {0}")]
    Midi(String),
}

pub type Result<T> = std::result::Result<T, EditorError>;
