// Session tests: confirmation protocol, notices, and selection bookkeeping

use tab_editor_wasm::config::EditorConfig;
use tab_editor_wasm::entry::EntryKey;
use tab_editor_wasm::models::{MeasureId, PositionIndex, StringIndex, TabDocument};
use tab_editor_wasm::session::{ConfirmAction, EditorSession, NoticeKind};
use tab_editor_wasm::EditorError;

fn cell(string: u8, position: u8) -> (StringIndex, PositionIndex) {
    (StringIndex::new(string).unwrap(), PositionIndex::new(position).unwrap())
}

fn enter_fret(session: &mut EditorSession, measure: u32, string: u8, position: u8, keys: &[&str]) {
    let (s, p) = cell(string, position);
    session.click_cell(MeasureId(measure), s, p);
    for key in keys {
        session.key_down(EntryKey::from_key(key));
    }
}

#[test]
fn test_delete_measure_two_phase() {
    let mut session = EditorSession::default();
    session.add_measure();

    let update = session.request_delete_measure(MeasureId(1));
    assert!(!update.changed);
    let request = update.confirmation.unwrap();
    assert_eq!(request.action, ConfirmAction::DeleteMeasure { measure_id: MeasureId(1) });
    assert_eq!(request.prompt, "Delete measure 1?");
    assert_eq!(session.document().measure_count(), 2);

    let update = session.resolve_confirmation(request.id, true).unwrap();
    assert!(update.changed);
    assert_eq!(session.document().measure_ids(), vec![MeasureId(2)]);

    // Already resolved
    assert_eq!(
        session.resolve_confirmation(request.id, true),
        Err(EditorError::UnknownConfirmation(request.id))
    );
}

#[test]
fn test_sole_measure_blocked_with_notice() {
    let mut session = EditorSession::default();
    let update = session.request_delete_measure(MeasureId(1));
    let notice = update.notice.unwrap();
    assert_eq!(notice.kind, NoticeKind::LastMeasure);
    assert_eq!(notice.message, "cannot delete the last remaining measure");
    assert!(update.confirmation.is_none());
}

#[test]
fn test_guard_rechecked_when_confirmed() {
    let mut session = EditorSession::default();
    session.add_measure();

    let first = session.request_delete_measure(MeasureId(1)).confirmation.unwrap();
    let second = session.request_delete_measure(MeasureId(2)).confirmation.unwrap();

    assert!(session.resolve_confirmation(first.id, true).unwrap().changed);
    let update = session.resolve_confirmation(second.id, true).unwrap();
    assert!(!update.changed);
    assert_eq!(update.notice.map(|n| n.kind), Some(NoticeKind::LastMeasure));
    assert_eq!(session.document().measure_count(), 1);
}

#[test]
fn test_delete_unknown_measure_notice() {
    let mut session = EditorSession::default();
    session.add_measure();
    let update = session.request_delete_measure(MeasureId(77));
    assert_eq!(update.notice.map(|n| n.kind), Some(NoticeKind::MeasureNotFound));
}

#[test]
fn test_deleting_selected_measure_clears_selection() {
    let mut session = EditorSession::default();
    session.add_measure();
    enter_fret(&mut session, 2, 0, 0, &["1"]);
    let armed = session.entry().pending_timer().unwrap();

    let request = session.request_delete_measure(MeasureId(2)).confirmation.unwrap();
    let update = session.resolve_confirmation(request.id, true).unwrap();

    assert_eq!(update.cancelled_timer, Some(armed));
    assert_eq!(update.selection, None);
    assert_eq!(update.pending_input, None);
    assert!(session.entry().selection().is_none());

    // The late timer does nothing
    let update = session.timer_fired(armed);
    assert!(!update.changed);
    assert_eq!(session.document().total_note_count(), 0);
}

#[test]
fn test_deleting_other_measure_keeps_selection() {
    let mut session = EditorSession::default();
    session.add_measure();
    enter_fret(&mut session, 1, 0, 0, &[]);

    let request = session.request_delete_measure(MeasureId(2)).confirmation.unwrap();
    let update = session.resolve_confirmation(request.id, true).unwrap();
    assert_eq!(update.selection.map(|s| s.measure_id), Some(MeasureId(1)));
}

#[test]
fn test_clear_all_two_phase() {
    let mut session = EditorSession::default();
    session.add_measure();
    enter_fret(&mut session, 1, 0, 0, &["1", "2"]);
    enter_fret(&mut session, 2, 5, 3, &["2", "0"]);
    enter_fret(&mut session, 2, 2, 2, &["4"]);
    assert_eq!(session.document().total_note_count(), 2);
    assert!(session.grid_view().show_clear_all);

    let request = session.request_clear_all().confirmation.unwrap();
    assert_eq!(request.action, ConfirmAction::ClearAll);

    // Declining keeps everything, including the selection
    let declined = session.resolve_confirmation(request.id, false).unwrap();
    assert!(!declined.changed);
    assert_eq!(session.document().total_note_count(), 2);
    assert!(declined.selection.is_some());

    let request = session.request_clear_all().confirmation.unwrap();
    let update = session.resolve_confirmation(request.id, true).unwrap();
    assert!(update.changed);
    assert!(update.cancelled_timer.is_some());
    assert_eq!(update.selection, None);
    assert_eq!(session.document().total_note_count(), 0);
    assert_eq!(session.document().measure_ids(), vec![MeasureId(1), MeasureId(2)]);
    assert!(!session.grid_view().show_clear_all);
}

#[test]
fn test_update_reports_selection_and_pending_digit() {
    let mut session = EditorSession::default();
    let (s, p) = cell(2, 6);
    let update = session.click_cell(MeasureId(1), s, p);
    assert_eq!(update.selection.map(|sel| (sel.string, sel.position)), Some((s, p)));
    assert_eq!(update.pending_input, None);

    let update = session.key_down(EntryKey::Digit(1));
    assert_eq!(update.pending_input, Some(1));
    let request = update.scheduled_timer.unwrap();

    let update = session.timer_fired(request.token);
    assert!(update.changed);
    assert_eq!(update.selection, None);
    assert_eq!(session.grid_view().total_notes, 1);
}

#[test]
fn test_duplicate_measure_notice_for_unknown() {
    let mut session = EditorSession::default();
    let update = session.duplicate_measure(MeasureId(3));
    assert_eq!(update.notice.map(|n| n.kind), Some(NoticeKind::MeasureNotFound));
    assert!(session.duplicate_measure(MeasureId(1)).changed);
    assert_eq!(session.document().measure_count(), 2);
}

#[test]
fn test_window_comes_from_config() {
    let config = EditorConfig {
        disambiguation_window_ms: 250,
        initial_measures: 3,
        ..EditorConfig::default()
    };
    let mut session = EditorSession::new(config);
    assert_eq!(session.document().measure_count(), 3);
    assert_eq!(session.config().disambiguation_window_ms, 250);

    enter_fret(&mut session, 1, 0, 0, &[]);
    let update = session.key_down(EntryKey::Digit(4));
    assert_eq!(update.scheduled_timer.map(|t| t.delay_ms), Some(250));
}

#[test]
fn test_replace_document_resets_interaction() {
    let mut session = EditorSession::default();
    session.add_measure();
    enter_fret(&mut session, 1, 0, 0, &["3"]);
    session.request_clear_all();
    assert_eq!(session.pending_confirmations(), 1);

    let update = session.replace_document(TabDocument::with_measures(4)).unwrap();
    assert!(update.changed);
    assert!(update.cancelled_timer.is_some());
    assert_eq!(session.pending_confirmations(), 0);
    assert!(session.entry().selection().is_none());
    assert_eq!(session.document().measure_count(), 4);
}

#[test]
fn test_with_document_rejects_empty() {
    let empty: TabDocument = serde_json::from_str(r#"{"measures": []}"#).unwrap();
    assert_eq!(
        EditorSession::with_document(EditorConfig::default(), empty).err(),
        Some(EditorError::EmptyDocument)
    );
}

#[test]
fn test_add_measure_when_ids_exhausted_is_notice() {
    let document: TabDocument = serde_json::from_str(r#"{"measures": [{"id": 4294967294, "notes": []}]}"#).unwrap();
    let mut session = EditorSession::with_document(EditorConfig::default(), document).unwrap();

    assert!(session.add_measure().changed);
    let update = session.add_measure();
    assert!(!update.changed);
    assert_eq!(update.notice.map(|n| n.kind), Some(NoticeKind::IdsExhausted));
    assert_eq!(session.document().measure_count(), 2);
}

#[test]
fn test_load_rejects_exhausted_ids() {
    let document: TabDocument =
        serde_json::from_str(r#"{"measures": [{"id": 4294967295, "notes": []}]}"#).unwrap();
    let mut session = EditorSession::default();
    assert_eq!(
        session.replace_document(document),
        Err(EditorError::MeasureIdExhausted(u32::MAX))
    );
    assert_eq!(session.document().measure_ids(), vec![MeasureId(1)]);
}

#[test]
fn test_repeated_requests_share_one_confirmation() {
    let mut session = EditorSession::default();
    session.add_measure();

    let first = session.request_clear_all().confirmation.unwrap();
    let again = session.request_clear_all().confirmation.unwrap();
    assert_eq!(first.id, again.id);

    let delete = session.request_delete_measure(MeasureId(2)).confirmation.unwrap();
    let delete_again = session.request_delete_measure(MeasureId(2)).confirmation.unwrap();
    assert_eq!(delete.id, delete_again.id);
    assert_ne!(delete.id, first.id);
    assert_eq!(session.pending_confirmations(), 2);

    assert!(session.resolve_confirmation(first.id, true).unwrap().changed);
    assert_eq!(session.pending_confirmations(), 1);
}
