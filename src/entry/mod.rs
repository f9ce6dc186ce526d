//! Click and keystroke handling for fret entry
//!
//! - `controller`: the Idle / AwaitingFret state machine
//! - `keys`: browser key names mapped to entry keys
//! - `timer`: the cancellable disambiguation timer

pub mod controller;
pub mod keys;
pub mod timer;

pub use controller::{EntryController, EntryOutcome, EntryState, NoteChange, Selection};
pub use keys::EntryKey;
pub use timer::{DisambiguationTimer, TimerRequest, TimerToken};
