//! Renderers module for the tablature editor
//!
//! This module contains rendering/export logic for turning a document
//! into something a host can display or hand to other software.

pub mod ascii;
pub mod grid;
pub mod midi;

// Re-export commonly used types
pub use ascii::render_text;
pub use grid::{build_grid_view, CellView, GridView, MeasureView, StringRow};
pub use midi::document_to_smf;
