//! Fret entry state machine
//!
//! Two states:
//! - `Idle`: nothing selected, keys are ignored
//! - `AwaitingFret`: an empty cell is selected, holding zero or one typed digit
//!
//! A single digit is ambiguous between a whole fret and the first half of a
//! two-digit fret. It is held for the disambiguation window; a second digit
//! that forms a fret of 24 or less commits immediately, one that would
//! exceed 24 replaces the held digit and restarts the window.

use serde::{Deserialize, Serialize};

use super::keys::EntryKey;
use super::timer::{DisambiguationTimer, TimerRequest, TimerToken};
use crate::models::{FretNumber, MeasureId, Note, PositionIndex, StringIndex, TabDocument, ToggleOutcome};

/// The cell chosen for fret entry
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub measure_id: MeasureId,
    pub string: StringIndex,
    pub position: PositionIndex,
}

impl Selection {
    pub fn new(measure_id: MeasureId, string: StringIndex, position: PositionIndex) -> Self {
        Self {
            measure_id,
            string,
            position,
        }
    }

    pub fn is_at(&self, measure_id: MeasureId, string: StringIndex, position: PositionIndex) -> bool {
        self.measure_id == measure_id && self.string == string && self.position == position
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryState {
    Idle,
    AwaitingFret {
        cell: Selection,
        /// Digit typed so far, waiting for a possible second digit
        pending: Option<u8>,
    },
}

/// The document mutation a transition performed
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NoteChange {
    Added { measure_id: MeasureId, note: Note },
    Removed { measure_id: MeasureId, note: Note },
}

/// Side effects of one transition
///
/// At most one document mutation, plus the timer bookkeeping the host must
/// mirror: clear `cancelled_timer` first, then schedule `scheduled_timer`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntryOutcome {
    pub change: Option<NoteChange>,
    pub cancelled_timer: Option<TimerToken>,
    pub scheduled_timer: Option<TimerRequest>,
}

impl EntryOutcome {
    fn cancelled(token: Option<TimerToken>) -> Self {
        Self {
            cancelled_timer: token,
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug)]
pub struct EntryController {
    state: EntryState,
    timer: DisambiguationTimer,
}

impl EntryController {
    pub fn new(window_ms: u32) -> Self {
        Self {
            state: EntryState::Idle,
            timer: DisambiguationTimer::new(window_ms),
        }
    }

    pub fn state(&self) -> EntryState {
        self.state
    }

    pub fn selection(&self) -> Option<Selection> {
        match self.state {
            EntryState::AwaitingFret { cell, .. } => Some(cell),
            EntryState::Idle => None,
        }
    }

    pub fn selected_measure(&self) -> Option<MeasureId> {
        self.selection().map(|cell| cell.measure_id)
    }

    pub fn pending_input(&self) -> Option<u8> {
        match self.state {
            EntryState::AwaitingFret { pending, .. } => pending,
            EntryState::Idle => None,
        }
    }

    pub fn pending_timer(&self) -> Option<TimerToken> {
        self.timer.pending_token()
    }

    /// A click on a grid cell
    ///
    /// An occupied cell loses its note and the editor goes idle; an empty
    /// cell becomes the selection with no digits typed. Either way a
    /// pending timer is cancelled.
    pub fn click_cell(
        &mut self,
        document: &mut TabDocument,
        measure_id: MeasureId,
        string: StringIndex,
        position: PositionIndex,
    ) -> EntryOutcome {
        match document.toggle_or_select(measure_id, string, position) {
            ToggleOutcome::Removed { measure_id, note } => {
                let cancelled = self.timer.cancel();
                self.state = EntryState::Idle;
                EntryOutcome {
                    change: Some(NoteChange::Removed { measure_id, note }),
                    cancelled_timer: cancelled,
                    scheduled_timer: None,
                }
            }
            ToggleOutcome::SelectionRequested { measure_id, key } => {
                let cancelled = self.timer.cancel();
                let cell = Selection::new(measure_id, key.string, key.position);
                log::debug!("selected m{} s{} p{}", measure_id, key.string.index(), key.position.value());
                self.state = EntryState::AwaitingFret { cell, pending: None };
                EntryOutcome::cancelled(cancelled)
            }
            ToggleOutcome::UnknownMeasure { .. } => EntryOutcome::default(),
        }
    }

    pub fn key_down(&mut self, document: &mut TabDocument, key: EntryKey) -> EntryOutcome {
        let EntryState::AwaitingFret { cell, pending } = self.state else {
            return EntryOutcome::default();
        };

        match key {
            EntryKey::Digit(digit) if digit <= 9 => match pending {
                None => self.hold_digit(cell, digit),
                Some(first) => match FretNumber::from_digits(first, digit) {
                    Some(fret) => {
                        let cancelled = self.timer.cancel();
                        let mut outcome = self.commit(document, cell, fret);
                        outcome.cancelled_timer = cancelled;
                        outcome
                    }
                    None => {
                        log::debug!("{}{} exceeds max fret, restarting on {}", first, digit, digit);
                        self.hold_digit(cell, digit)
                    }
                },
            },
            EntryKey::Escape => {
                log::debug!("fret entry abandoned");
                self.clear_selection()
            }
            EntryKey::Backspace => {
                let cancelled = self.timer.cancel();
                self.state = EntryState::AwaitingFret { cell, pending: None };
                EntryOutcome::cancelled(cancelled)
            }
            EntryKey::Digit(_) | EntryKey::Other => EntryOutcome::default(),
        }
    }

    /// The host's timer for `token` elapsed
    pub fn timer_fired(&mut self, document: &mut TabDocument, token: TimerToken) -> EntryOutcome {
        let Some(digit) = self.timer.fire(token) else {
            log::debug!("ignoring stale timer {}", token);
            return EntryOutcome::default();
        };

        match self.state {
            EntryState::AwaitingFret { cell, pending: Some(current) } if current == digit => {
                match FretNumber::from_digit(digit) {
                    Some(fret) => self.commit(document, cell, fret),
                    None => EntryOutcome::default(),
                }
            }
            _ => {
                log::warn!("timer {} fired but input changed, ignoring", token);
                EntryOutcome::default()
            }
        }
    }

    /// Abandon any selection and pending input
    pub fn clear_selection(&mut self) -> EntryOutcome {
        let cancelled = self.timer.cancel();
        self.state = EntryState::Idle;
        EntryOutcome::cancelled(cancelled)
    }

    fn hold_digit(&mut self, cell: Selection, digit: u8) -> EntryOutcome {
        self.state = EntryState::AwaitingFret {
            cell,
            pending: Some(digit),
        };
        let (cancelled, request) = self.timer.arm(digit);
        EntryOutcome {
            change: None,
            cancelled_timer: cancelled,
            scheduled_timer: Some(request),
        }
    }

    fn commit(&mut self, document: &mut TabDocument, cell: Selection, fret: FretNumber) -> EntryOutcome {
        self.state = EntryState::Idle;
        if !document.add_note(cell.measure_id, cell.string, cell.position, fret) {
            return EntryOutcome::default();
        }
        log::debug!(
            "committed fret {} at m{} s{} p{}",
            fret,
            cell.measure_id,
            cell.string.index(),
            cell.position.value()
        );
        EntryOutcome {
            change: Some(NoteChange::Added {
                measure_id: cell.measure_id,
                note: Note::new(cell.string, cell.position, fret),
            }),
            cancelled_timer: None,
            scheduled_timer: None,
        }
    }
}
