//! Serde serialization helpers for ensuring consistent JSON output

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

use super::core::{FretNumber, Note, NoteKey};

/// Serialize a keyed note map as a flat list of notes, ordered by key.
///
/// JSON objects cannot use a struct as a key, and JavaScript wants
/// `[{string, position, fret}, ...]` anyway.
pub fn serialize_notes<S>(notes: &BTreeMap<NoteKey, FretNumber>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let list: Vec<Note> = notes
        .iter()
        .map(|(key, fret)| Note::new(key.string, key.position, *fret))
        .collect();
    list.serialize(serializer)
}

/// Inverse of [`serialize_notes`]. A repeated key keeps the last entry.
pub fn deserialize_notes<'de, D>(deserializer: D) -> Result<BTreeMap<NoteKey, FretNumber>, D::Error>
where
    D: Deserializer<'de>,
{
    let list = Vec::<Note>::deserialize(deserializer)?;
    Ok(list.into_iter().map(|note| (note.key(), note.fret)).collect())
}
