//! Tablature Editor WASM API
//!
//! This module provides the JavaScript-facing API for the tablature editor.
//!
//! # Module Structure
//!
//! - `helpers`: Shared utilities for serialization, validation, error handling, and logging
//! - `editor`: The `TabEditor` class, one instance per editing session
//! - `export`: Stateless text/MIDI export of a document snapshot

pub mod helpers;
pub mod editor;
pub mod export;

pub use editor::TabEditor;
pub use export::{export_tab_midi, export_tab_text};
