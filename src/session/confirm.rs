//! Two-phase confirmation for destructive actions
//!
//! A destructive action is first turned into a [`ConfirmationRequest`] that
//! the host shows to the user. Nothing is mutated until the host resolves
//! the request by id.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::MeasureId;

pub type ConfirmationId = u32;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ConfirmAction {
    DeleteMeasure { measure_id: MeasureId },
    ClearAll,
}

impl ConfirmAction {
    /// Prompt text shown to the user; `ordinal` is the 1-based display number
    pub fn prompt(&self, ordinal: Option<usize>) -> String {
        match self {
            ConfirmAction::DeleteMeasure { measure_id } => match ordinal {
                Some(n) => format!("Delete measure {}?", n),
                None => format!("Delete measure #{}?", measure_id),
            },
            ConfirmAction::ClearAll => "Clear all notes? This cannot be undone.".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationRequest {
    pub id: ConfirmationId,
    pub action: ConfirmAction,
    pub prompt: String,
}

/// Outstanding confirmation requests, keyed by id
#[derive(Clone, Debug, Default)]
pub struct PendingConfirmations {
    next_id: ConfirmationId,
    pending: BTreeMap<ConfirmationId, ConfirmAction>,
}

impl PendingConfirmations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `action`, or hand back the outstanding request for it
    ///
    /// At most one request per action is pending, so a host that drops a
    /// dialog without resolving it does not accumulate entries.
    pub fn request(&mut self, action: ConfirmAction, prompt: String) -> ConfirmationRequest {
        if let Some((&id, _)) = self.pending.iter().find(|(_, pending)| **pending == action) {
            log::debug!("reusing confirmation {} for {:?}", id, action);
            return ConfirmationRequest { id, action, prompt };
        }
        self.next_id = self.next_id.wrapping_add(1);
        let id = self.next_id;
        self.pending.insert(id, action);
        ConfirmationRequest { id, action, prompt }
    }

    /// Remove and return the action for `id`
    pub fn take(&mut self, id: ConfirmationId) -> Option<ConfirmAction> {
        self.pending.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
