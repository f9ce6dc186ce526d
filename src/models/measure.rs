//! Measures: ordered containers of notes

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use super::core::{FretNumber, Note, NoteKey, PositionIndex, StringIndex};
use super::serde_helpers::{deserialize_notes, serialize_notes};

/// Session-unique measure identifier
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct MeasureId(pub u32);

impl fmt::Display for MeasureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a measure-level operation was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MeasureRejection {
    #[error("cannot delete the last remaining measure")]
    LastMeasure,

    #[error("measure {0} does not exist")]
    NotFound(MeasureId),

    #[error("no measure ids left to assign")]
    IdsExhausted,
}

/// A bar of tablature: 16 positions on each of 6 strings
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Measure {
    pub id: MeasureId,

    #[serde(serialize_with = "serialize_notes", deserialize_with = "deserialize_notes", default)]
    notes: BTreeMap<NoteKey, FretNumber>,
}

impl Measure {
    /// Create an empty measure
    pub fn new(id: MeasureId) -> Self {
        Self {
            id,
            notes: BTreeMap::new(),
        }
    }

    /// Copy of this measure's notes under a different id
    pub fn duplicate_as(&self, id: MeasureId) -> Self {
        Self {
            id,
            notes: self.notes.clone(),
        }
    }

    pub fn note_at(&self, string: StringIndex, position: PositionIndex) -> Option<Note> {
        let key = NoteKey::new(string, position);
        self.notes.get(&key).map(|fret| Note::new(string, position, *fret))
    }

    /// Insert a note, replacing whatever was at the same key
    pub fn insert(&mut self, note: Note) -> Option<FretNumber> {
        self.notes.insert(note.key(), note.fret)
    }

    pub fn remove(&mut self, string: StringIndex, position: PositionIndex) -> Option<Note> {
        self.notes
            .remove(&NoteKey::new(string, position))
            .map(|fret| Note::new(string, position, fret))
    }

    /// Notes ordered by (string, position)
    pub fn notes(&self) -> impl Iterator<Item = Note> + '_ {
        self.notes
            .iter()
            .map(|(key, fret)| Note::new(key.string, key.position, *fret))
    }

    /// Notes ordered by (position, string), i.e. reading order
    pub fn notes_by_position(&self) -> Vec<Note> {
        let mut notes: Vec<Note> = self.notes().collect();
        notes.sort_by_key(|note| (note.position, note.string));
        notes
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Remove every note, returning how many were removed
    pub fn clear(&mut self) -> usize {
        let removed = self.notes.len();
        self.notes.clear();
        removed
    }
}
