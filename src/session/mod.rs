//! Editing session
//!
//! One session owns one document, its entry controller and the outstanding
//! confirmation requests. Sessions share nothing with each other.

pub mod confirm;

use serde::{Deserialize, Serialize};

pub use confirm::{ConfirmAction, ConfirmationId, ConfirmationRequest, PendingConfirmations};

use crate::config::EditorConfig;
use crate::entry::{EntryController, EntryKey, EntryOutcome, NoteChange, Selection, TimerRequest, TimerToken};
use crate::error::{EditorError, Result};
use crate::models::{MeasureId, MeasureRejection, PositionIndex, StringIndex, TabDocument};
use crate::renderers::{ascii, grid, midi};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum NoticeKind {
    LastMeasure,
    MeasureNotFound,
    IdsExhausted,
}

/// User-visible feedback for a refused operation
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl From<MeasureRejection> for Notice {
    fn from(rejection: MeasureRejection) -> Self {
        let kind = match rejection {
            MeasureRejection::LastMeasure => NoticeKind::LastMeasure,
            MeasureRejection::NotFound(_) => NoticeKind::MeasureNotFound,
            MeasureRejection::IdsExhausted => NoticeKind::IdsExhausted,
        };
        Self {
            kind,
            message: rejection.to_string(),
        }
    }
}

/// Everything the host needs after one session operation
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionUpdate {
    /// The document was mutated
    pub changed: bool,
    pub change: Option<NoteChange>,
    pub notice: Option<Notice>,
    pub confirmation: Option<ConfirmationRequest>,
    pub cancelled_timer: Option<TimerToken>,
    pub scheduled_timer: Option<TimerRequest>,
    /// Selection and typed digit after the operation
    pub selection: Option<Selection>,
    pub pending_input: Option<u8>,
}

impl SessionUpdate {
    fn changed() -> Self {
        Self {
            changed: true,
            ..Self::default()
        }
    }

    fn notice(notice: impl Into<Notice>) -> Self {
        Self {
            notice: Some(notice.into()),
            ..Self::default()
        }
    }

    fn merge_entry(&mut self, outcome: EntryOutcome) {
        if let Some(change) = outcome.change {
            self.changed = true;
            self.change = Some(change);
        }
        if outcome.cancelled_timer.is_some() {
            self.cancelled_timer = outcome.cancelled_timer;
        }
        if outcome.scheduled_timer.is_some() {
            self.scheduled_timer = outcome.scheduled_timer;
        }
    }
}

impl From<EntryOutcome> for SessionUpdate {
    fn from(outcome: EntryOutcome) -> Self {
        let mut update = Self::default();
        update.merge_entry(outcome);
        update
    }
}

#[derive(Clone, Debug)]
pub struct EditorSession {
    config: EditorConfig,
    document: TabDocument,
    entry: EntryController,
    confirmations: PendingConfirmations,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorSession {
    pub fn new(config: EditorConfig) -> Self {
        let document = TabDocument::with_measures(config.initial_measures);
        let entry = EntryController::new(config.disambiguation_window_ms);
        Self {
            config,
            document,
            entry,
            confirmations: PendingConfirmations::new(),
        }
    }

    pub fn with_document(config: EditorConfig, document: TabDocument) -> Result<Self> {
        document.validate()?;
        let mut session = Self::new(config);
        session.document = document;
        Ok(session)
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn document(&self) -> &TabDocument {
        &self.document
    }

    pub fn entry(&self) -> &EntryController {
        &self.entry
    }

    pub fn pending_confirmations(&self) -> usize {
        self.confirmations.len()
    }

    /// Swap in a different document, abandoning selection and confirmations
    pub fn replace_document(&mut self, document: TabDocument) -> Result<SessionUpdate> {
        document.validate()?;
        let outcome = self.entry.clear_selection();
        self.confirmations = PendingConfirmations::new();
        self.document = document;
        log::info!("loaded document with {} measures", self.document.measure_count());
        let mut update = SessionUpdate::changed();
        update.merge_entry(outcome);
        Ok(self.finish(update))
    }

    pub fn click_cell(&mut self, measure_id: MeasureId, string: StringIndex, position: PositionIndex) -> SessionUpdate {
        let outcome = self.entry.click_cell(&mut self.document, measure_id, string, position);
        self.finish(outcome.into())
    }

    pub fn key_down(&mut self, key: EntryKey) -> SessionUpdate {
        let outcome = self.entry.key_down(&mut self.document, key);
        self.finish(outcome.into())
    }

    pub fn timer_fired(&mut self, token: TimerToken) -> SessionUpdate {
        let outcome = self.entry.timer_fired(&mut self.document, token);
        self.finish(outcome.into())
    }

    pub fn add_measure(&mut self) -> SessionUpdate {
        let update = match self.document.add_measure() {
            Ok(_) => SessionUpdate::changed(),
            Err(rejection) => SessionUpdate::notice(rejection),
        };
        self.finish(update)
    }

    pub fn duplicate_measure(&mut self, measure_id: MeasureId) -> SessionUpdate {
        let update = match self.document.duplicate_measure(measure_id) {
            Ok(_) => SessionUpdate::changed(),
            Err(rejection) => SessionUpdate::notice(rejection),
        };
        self.finish(update)
    }

    /// First phase of deleting a measure
    ///
    /// The sole remaining measure is refused straight away with a notice
    /// rather than asking the user to confirm something that cannot happen.
    pub fn request_delete_measure(&mut self, measure_id: MeasureId) -> SessionUpdate {
        if self.document.measure_count() <= 1 {
            return self.finish(SessionUpdate::notice(MeasureRejection::LastMeasure));
        }
        let Some(index) = self.document.position_of(measure_id) else {
            return self.finish(SessionUpdate::notice(MeasureRejection::NotFound(measure_id)));
        };

        let action = ConfirmAction::DeleteMeasure { measure_id };
        let request = self.confirmations.request(action, action.prompt(Some(index + 1)));
        self.finish(SessionUpdate {
            confirmation: Some(request),
            ..SessionUpdate::default()
        })
    }

    /// First phase of clearing every note
    pub fn request_clear_all(&mut self) -> SessionUpdate {
        let action = ConfirmAction::ClearAll;
        let request = self.confirmations.request(action, action.prompt(None));
        self.finish(SessionUpdate {
            confirmation: Some(request),
            ..SessionUpdate::default()
        })
    }

    /// Second phase: apply or drop a confirmed action
    ///
    /// Guards are checked again here since the document may have changed
    /// while the user was deciding.
    pub fn resolve_confirmation(&mut self, id: ConfirmationId, accepted: bool) -> Result<SessionUpdate> {
        let action = self
            .confirmations
            .take(id)
            .ok_or(EditorError::UnknownConfirmation(id))?;

        if !accepted {
            log::debug!("confirmation {} declined", id);
            return Ok(self.finish(SessionUpdate::default()));
        }

        let update = match action {
            ConfirmAction::DeleteMeasure { measure_id } => {
                match self.document.delete_measure(measure_id, self.entry.selected_measure()) {
                    Ok(deleted) => {
                        let mut update = SessionUpdate::changed();
                        if deleted.selection_cleared {
                            update.merge_entry(self.entry.clear_selection());
                        }
                        update
                    }
                    Err(rejection) => SessionUpdate::notice(rejection),
                }
            }
            ConfirmAction::ClearAll => {
                self.document.clear_all();
                let mut update = SessionUpdate::changed();
                update.merge_entry(self.entry.clear_selection());
                update
            }
        };
        Ok(self.finish(update))
    }

    pub fn grid_view(&self) -> grid::GridView {
        grid::build_grid_view(&self.document, &self.entry, &self.config)
    }

    pub fn export_text(&self) -> String {
        ascii::render_text(&self.document, &self.config.tuning)
    }

    pub fn export_midi(&self) -> Result<Vec<u8>> {
        midi::document_to_smf(&self.document, &self.config)
    }

    fn finish(&self, mut update: SessionUpdate) -> SessionUpdate {
        update.selection = self.entry.selection();
        update.pending_input = self.entry.pending_input();
        update
    }
}
