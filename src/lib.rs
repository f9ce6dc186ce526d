//! Guitar Tablature Editor WASM Module
//!
//! Core of the tablature editor: a grid of 6 strings by 16 positions per
//! measure, the document of ordered measures, and the click/keystroke
//! state machine that turns typed digits into fret numbers.

pub mod api;
pub mod config;
pub mod entry;
pub mod error;
pub mod models;
pub mod renderers;
pub mod session;

// Re-export commonly used types
pub use config::EditorConfig;
pub use entry::{EntryController, EntryKey, EntryOutcome, EntryState, NoteChange, Selection, TimerToken};
pub use error::{EditorError, Result};
pub use models::{
    FretNumber, Measure, MeasureId, MeasureRejection, Note, NoteKey, PositionIndex, StringIndex, TabDocument,
    ToggleOutcome, MAX_FRET, POSITIONS_PER_MEASURE, STRING_COUNT,
};
pub use session::{EditorSession, Notice, NoticeKind, SessionUpdate};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // A second init (module re-instantiated in the same page) is harmless
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Debug);

    log::info!("Tablature editor WASM module initialized");
}
