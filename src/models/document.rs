//! The tablature document
//!
//! An ordered sequence of measures, addressed by id. The document always
//! holds at least one measure. Every operation here is a plain mutation of
//! an exclusively owned value; selection and timing live in
//! [`EntryController`](crate::entry::EntryController).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::core::{FretNumber, Note, NoteKey, PositionIndex, StringIndex};
use super::measure::{Measure, MeasureId, MeasureRejection};
use crate::error::{EditorError, Result};

/// Result of clicking a cell, as far as the document is concerned
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ToggleOutcome {
    /// The cell held a note and it was removed
    Removed { measure_id: MeasureId, note: Note },
    /// The cell is empty; the caller should select it for fret entry
    SelectionRequested { measure_id: MeasureId, key: NoteKey },
    /// No measure with that id; nothing happened
    UnknownMeasure { measure_id: MeasureId },
}

/// Result of a successful measure deletion
#[derive(Clone, Debug, PartialEq)]
pub struct DeletedMeasure {
    pub removed: Measure,
    /// The deleted measure held the active selection
    pub selection_cleared: bool,
}

/// Ordered collection of measures
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TabDocument {
    measures: Vec<Measure>,

    /// Highest id ever handed out, so deleted ids are not reissued
    #[serde(default)]
    id_high_water: u32,
}

impl Default for TabDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl TabDocument {
    /// A document with a single empty measure
    pub fn new() -> Self {
        Self::with_measures(1)
    }

    /// A document with `count` empty measures (at least one)
    pub fn with_measures(count: usize) -> Self {
        let mut document = Self {
            measures: Vec::with_capacity(count.max(1)),
            id_high_water: 0,
        };
        for _ in 0..count.max(1) {
            if document.add_measure().is_err() {
                break;
            }
        }
        document
    }

    /// Check the structural invariants of a document that came from outside
    ///
    /// Ids at `u32::MAX` are refused so the next allocation cannot wrap.
    pub fn validate(&self) -> Result<()> {
        if self.measures.is_empty() {
            return Err(EditorError::EmptyDocument);
        }
        if self.id_high_water == u32::MAX {
            return Err(EditorError::MeasureIdExhausted(self.id_high_water));
        }
        let mut seen = HashSet::with_capacity(self.measures.len());
        for measure in &self.measures {
            if measure.id.0 == u32::MAX {
                return Err(EditorError::MeasureIdExhausted(measure.id.0));
            }
            if !seen.insert(measure.id) {
                return Err(EditorError::DuplicateMeasureId(measure.id));
            }
        }
        Ok(())
    }

    pub fn measures(&self) -> &[Measure] {
        &self.measures
    }

    pub fn measure(&self, id: MeasureId) -> Option<&Measure> {
        self.measures.iter().find(|m| m.id == id)
    }

    fn measure_mut(&mut self, id: MeasureId) -> Option<&mut Measure> {
        self.measures.iter_mut().find(|m| m.id == id)
    }

    pub fn contains_measure(&self, id: MeasureId) -> bool {
        self.measure(id).is_some()
    }

    /// Index of a measure in reading order
    pub fn position_of(&self, id: MeasureId) -> Option<usize> {
        self.measures.iter().position(|m| m.id == id)
    }

    pub fn measure_ids(&self) -> Vec<MeasureId> {
        self.measures.iter().map(|m| m.id).collect()
    }

    pub fn measure_count(&self) -> usize {
        self.measures.len()
    }

    /// Look up the note at a cell. Unknown measures yield `None`.
    pub fn note_at(&self, measure_id: MeasureId, string: StringIndex, position: PositionIndex) -> Option<Note> {
        self.measure(measure_id)?.note_at(string, position)
    }

    /// Remove the note at a cell if there is one, otherwise ask for selection
    pub fn toggle_or_select(
        &mut self,
        measure_id: MeasureId,
        string: StringIndex,
        position: PositionIndex,
    ) -> ToggleOutcome {
        let Some(measure) = self.measure_mut(measure_id) else {
            log::warn!("toggle on unknown measure {}", measure_id);
            return ToggleOutcome::UnknownMeasure { measure_id };
        };

        match measure.remove(string, position) {
            Some(note) => {
                log::debug!("removed fret {} at m{} s{} p{}", note.fret, measure_id, string.index(), position.value());
                ToggleOutcome::Removed { measure_id, note }
            }
            None => ToggleOutcome::SelectionRequested {
                measure_id,
                key: NoteKey::new(string, position),
            },
        }
    }

    /// Write a note. A note already at the same key is superseded.
    ///
    /// Returns `false` if the measure does not exist.
    pub fn add_note(
        &mut self,
        measure_id: MeasureId,
        string: StringIndex,
        position: PositionIndex,
        fret: FretNumber,
    ) -> bool {
        let Some(measure) = self.measure_mut(measure_id) else {
            log::warn!("add_note on unknown measure {}", measure_id);
            return false;
        };

        if let Some(previous) = measure.insert(Note::new(string, position, fret)) {
            log::warn!(
                "fret {} at m{} s{} p{} superseded by {}",
                previous,
                measure_id,
                string.index(),
                position.value(),
                fret
            );
        }
        true
    }

    pub fn remove_note(&mut self, measure_id: MeasureId, string: StringIndex, position: PositionIndex) -> Option<Note> {
        self.measure_mut(measure_id)?.remove(string, position)
    }

    fn next_measure_id(&mut self) -> std::result::Result<MeasureId, MeasureRejection> {
        let max_existing = self.measures.iter().map(|m| m.id.0).max().unwrap_or(0);
        let Some(next) = max_existing.max(self.id_high_water).checked_add(1) else {
            log::warn!("measure id space exhausted");
            return Err(MeasureRejection::IdsExhausted);
        };
        self.id_high_water = next;
        Ok(MeasureId(next))
    }

    /// Append an empty measure
    pub fn add_measure(&mut self) -> std::result::Result<MeasureId, MeasureRejection> {
        let id = self.next_measure_id()?;
        self.measures.push(Measure::new(id));
        log::info!("added measure {} ({} total)", id, self.measures.len());
        Ok(id)
    }

    /// Delete a measure unless it is the only one left.
    ///
    /// `selected` is the measure holding the active selection, if any.
    pub fn delete_measure(
        &mut self,
        id: MeasureId,
        selected: Option<MeasureId>,
    ) -> std::result::Result<DeletedMeasure, MeasureRejection> {
        if self.measures.len() <= 1 {
            log::warn!("refusing to delete last measure {}", id);
            return Err(MeasureRejection::LastMeasure);
        }
        let index = self.position_of(id).ok_or(MeasureRejection::NotFound(id))?;
        let removed = self.measures.remove(index);
        log::info!("deleted measure {} ({} remaining)", id, self.measures.len());
        Ok(DeletedMeasure {
            removed,
            selection_cleared: selected == Some(id),
        })
    }

    /// Copy a measure's notes into a new measure placed right after it
    pub fn duplicate_measure(&mut self, id: MeasureId) -> std::result::Result<MeasureId, MeasureRejection> {
        let index = self.position_of(id).ok_or(MeasureRejection::NotFound(id))?;
        let new_id = self.next_measure_id()?;
        let copy = self.measures[index].duplicate_as(new_id);
        self.measures.insert(index + 1, copy);
        log::info!("duplicated measure {} as {}", id, new_id);
        Ok(new_id)
    }

    /// Empty every measure, keeping ids and order. Returns notes removed.
    pub fn clear_all(&mut self) -> usize {
        let removed = self.measures.iter_mut().map(Measure::clear).sum();
        log::info!("cleared {} notes", removed);
        removed
    }

    pub fn total_note_count(&self) -> usize {
        self.measures.iter().map(Measure::note_count).sum()
    }
}
