//! Grid view for the tablature editor
//!
//! This module defines the structure handed to JavaScript for drawing the
//! editor. It contains everything needed to render the grid without any
//! further lookups: measures in reading order, string rows highest pitch
//! first, and the text and selection state of every cell.

use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::entry::EntryController;
use crate::models::{MeasureId, PositionIndex, StringIndex, TabDocument};

/// Top-level view of the whole editor
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GridView {
    pub measures: Vec<MeasureView>,

    /// Notes across all measures
    pub total_notes: usize,

    /// The "clear all" control is only offered when there is something to clear
    pub show_clear_all: bool,

    /// Digit typed into the selected cell, awaiting a possible second digit
    pub pending_input: Option<u8>,
}

/// One measure with its header actions
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeasureView {
    pub id: MeasureId,

    /// 1-based display number
    pub ordinal: usize,

    /// Delete is disabled while this is the only measure
    pub can_delete: bool,

    /// Highest-pitched string first
    pub rows: Vec<StringRow>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StringRow {
    pub string: StringIndex,
    pub label: String,
    pub cells: Vec<CellView>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CellView {
    pub position: PositionIndex,
    pub fret: Option<u8>,

    /// Fret number, or the placeholder glyph when empty
    pub text: String,

    /// This cell is the active fret-entry target
    pub selected: bool,
}

pub fn build_grid_view(document: &TabDocument, entry: &EntryController, config: &EditorConfig) -> GridView {
    let selection = entry.selection();
    let can_delete = document.measure_count() > 1;
    let total_notes = document.total_note_count();

    let measures = document
        .measures()
        .iter()
        .enumerate()
        .map(|(index, measure)| {
            let rows = StringIndex::display_order()
                .map(|string| {
                    let cells = PositionIndex::all()
                        .map(|position| {
                            let fret = measure.note_at(string, position).map(|note| note.fret.value());
                            CellView {
                                position,
                                fret,
                                text: fret.map_or_else(|| config.placeholder.clone(), |f| f.to_string()),
                                selected: selection.is_some_and(|sel| sel.is_at(measure.id, string, position)),
                            }
                        })
                        .collect();
                    StringRow {
                        string,
                        label: config.tuning.label(string).to_string(),
                        cells,
                    }
                })
                .collect();

            MeasureView {
                id: measure.id,
                ordinal: index + 1,
                can_delete,
                rows,
            }
        })
        .collect();

    GridView {
        measures,
        total_notes,
        show_clear_all: total_notes > 0,
        pending_input: entry.pending_input(),
    }
}
