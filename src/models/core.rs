//! Core value types for the tablature grid
//!
//! A note is addressed by the string it sits on and its rhythmic position
//! inside a measure; the pair forms the note's unique key. All three
//! coordinates are range-checked newtypes so a constructed value is always
//! in bounds.

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;

use crate::error::{EditorError, Result};

/// Number of rhythmic positions in every measure
pub const POSITIONS_PER_MEASURE: u8 = 16;

/// Highest fret that can be entered
pub const MAX_FRET: u8 = 24;

/// Number of strings on the instrument
pub const STRING_COUNT: usize = 6;

/// One of the six guitar strings, ordered by pitch (0 = lowest)
#[repr(u8)]
#[derive(Serialize_repr, Deserialize_repr, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StringIndex {
    LowE = 0,
    A = 1,
    D = 2,
    G = 3,
    B = 4,
    HighE = 5,
}

impl StringIndex {
    /// All strings, lowest pitch first
    pub const ALL: [StringIndex; STRING_COUNT] = [
        StringIndex::LowE,
        StringIndex::A,
        StringIndex::D,
        StringIndex::G,
        StringIndex::B,
        StringIndex::HighE,
    ];

    pub fn new(index: u8) -> Result<Self> {
        Self::ALL
            .get(index as usize)
            .copied()
            .ok_or(EditorError::InvalidString(index))
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Strings in the order they are drawn: highest pitch on top
    pub fn display_order() -> impl Iterator<Item = StringIndex> {
        Self::ALL.into_iter().rev()
    }
}

impl TryFrom<u8> for StringIndex {
    type Error = EditorError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

/// Rhythmic slot inside a measure (0..16)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub struct PositionIndex(u8);

impl PositionIndex {
    pub fn new(position: u8) -> Result<Self> {
        if position < POSITIONS_PER_MEASURE {
            Ok(Self(position))
        } else {
            Err(EditorError::InvalidPosition(position))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Every position of a measure in reading order
    pub fn all() -> impl Iterator<Item = PositionIndex> {
        (0..POSITIONS_PER_MEASURE).map(PositionIndex)
    }
}

impl TryFrom<u8> for PositionIndex {
    type Error = EditorError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<PositionIndex> for u8 {
    fn from(position: PositionIndex) -> u8 {
        position.0
    }
}

/// Fret value recorded at a note (0..=24)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub struct FretNumber(u8);

impl FretNumber {
    pub fn new(fret: u8) -> Result<Self> {
        if fret <= MAX_FRET {
            Ok(Self(fret))
        } else {
            Err(EditorError::InvalidFret(fret))
        }
    }

    /// A single typed digit is always a valid fret
    pub fn from_digit(digit: u8) -> Option<Self> {
        (digit <= 9).then_some(Self(digit))
    }

    /// Two typed digits read left to right, if the result is a playable fret
    pub fn from_digits(first: u8, second: u8) -> Option<Self> {
        if first > 9 || second > 9 {
            return None;
        }
        let candidate = first * 10 + second;
        (candidate <= MAX_FRET).then_some(Self(candidate))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for FretNumber {
    type Error = EditorError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<FretNumber> for u8 {
    fn from(fret: FretNumber) -> u8 {
        fret.0
    }
}

impl fmt::Display for FretNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique key of a note inside one measure
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteKey {
    pub string: StringIndex,
    pub position: PositionIndex,
}

impl NoteKey {
    pub fn new(string: StringIndex, position: PositionIndex) -> Self {
        Self { string, position }
    }
}

/// A fretted note on the grid
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Note {
    pub string: StringIndex,
    pub position: PositionIndex,
    pub fret: FretNumber,
}

impl Note {
    pub fn new(string: StringIndex, position: PositionIndex, fret: FretNumber) -> Self {
        Self { string, position, fret }
    }

    pub fn key(&self) -> NoteKey {
        NoteKey::new(self.string, self.position)
    }
}
