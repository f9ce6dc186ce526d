//! Models module for the tablature editor
//!
//! This module contains the data model of a tab: notes keyed by
//! (string, position), measures that hold them, and the document that
//! orders the measures.

pub mod core;
pub mod document;
pub mod measure;
pub mod serde_helpers;

// Re-export commonly used types
pub use self::core::*;
pub use document::{DeletedMeasure, TabDocument, ToggleOutcome};
pub use measure::{Measure, MeasureId, MeasureRejection};
