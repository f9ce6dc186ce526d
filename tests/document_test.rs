// Tab document tests: note round-trips and measure lifecycle

use tab_editor_wasm::EditorError;
use tab_editor_wasm::models::{
    FretNumber, MeasureId, MeasureRejection, Note, PositionIndex, StringIndex, TabDocument, ToggleOutcome,
};

fn s(index: u8) -> StringIndex {
    StringIndex::new(index).unwrap()
}

fn p(position: u8) -> PositionIndex {
    PositionIndex::new(position).unwrap()
}

fn f(fret: u8) -> FretNumber {
    FretNumber::new(fret).unwrap()
}

#[test]
fn test_add_lookup_toggle_round_trip_every_cell() {
    let mut doc = TabDocument::with_measures(2);
    for measure_id in doc.measure_ids() {
        for string in 0..6 {
            for position in 0..16 {
                let fret = f((string * 16 + position) % 25);
                assert!(doc.add_note(measure_id, s(string), p(position), fret));
                assert_eq!(doc.note_at(measure_id, s(string), p(position)).map(|n| n.fret), Some(fret));

                let before = doc.total_note_count();
                let outcome = doc.toggle_or_select(measure_id, s(string), p(position));
                assert!(matches!(outcome, ToggleOutcome::Removed { .. }));
                assert_eq!(doc.note_at(measure_id, s(string), p(position)), None);
                assert_eq!(doc.total_note_count(), before - 1);
            }
        }
    }
}

#[test]
fn test_notes_in_one_measure_do_not_leak_into_another() {
    let mut doc = TabDocument::with_measures(2);
    doc.add_note(MeasureId(1), s(0), p(0), f(5));
    assert_eq!(doc.note_at(MeasureId(2), s(0), p(0)), None);
    assert_eq!(doc.measure(MeasureId(2)).unwrap().note_count(), 0);
}

#[test]
fn test_delete_only_measure_rejected() {
    let mut doc = TabDocument::new();
    doc.add_note(MeasureId(1), s(3), p(3), f(3));

    assert_eq!(doc.delete_measure(MeasureId(1), None), Err(MeasureRejection::LastMeasure));
    assert_eq!(doc.measure_count(), 1);
    assert_eq!(doc.total_note_count(), 1);
}

#[test]
fn test_delete_keeps_order_of_others() {
    let mut doc = TabDocument::with_measures(4);
    doc.delete_measure(MeasureId(2), None).unwrap();
    assert_eq!(doc.measure_ids(), vec![MeasureId(1), MeasureId(3), MeasureId(4)]);
}

#[test]
fn test_duplicate_inserts_copy_after_source() {
    let mut doc = TabDocument::with_measures(3);
    let notes = [(0, 0, 3), (1, 4, 12), (5, 15, 24)];
    for (string, position, fret) in notes {
        doc.add_note(MeasureId(2), s(string), p(position), f(fret));
    }

    let new_id = doc.duplicate_measure(MeasureId(2)).unwrap();
    assert_eq!(new_id, MeasureId(4));
    assert_eq!(doc.measure_ids(), vec![MeasureId(1), MeasureId(2), MeasureId(4), MeasureId(3)]);

    let source: Vec<Note> = doc.measure(MeasureId(2)).unwrap().notes().collect();
    let copy: Vec<Note> = doc.measure(new_id).unwrap().notes().collect();
    assert_eq!(copy.len(), 3);
    assert_eq!(source, copy);
}

#[test]
fn test_duplicate_is_a_value_copy() {
    let mut doc = TabDocument::new();
    doc.add_note(MeasureId(1), s(0), p(0), f(1));
    let copy_id = doc.duplicate_measure(MeasureId(1)).unwrap();

    doc.add_note(copy_id, s(0), p(1), f(2));
    doc.toggle_or_select(MeasureId(1), s(0), p(0));

    assert_eq!(doc.measure(MeasureId(1)).unwrap().note_count(), 0);
    assert_eq!(doc.measure(copy_id).unwrap().note_count(), 2);
}

#[test]
fn test_duplicate_unknown_measure_is_noop() {
    let mut doc = TabDocument::new();
    assert_eq!(
        doc.duplicate_measure(MeasureId(8)),
        Err(MeasureRejection::NotFound(MeasureId(8)))
    );
    assert_eq!(doc.measure_count(), 1);
}

#[test]
fn test_clear_all_keeps_measures() {
    let mut doc = TabDocument::with_measures(3);
    doc.add_note(MeasureId(1), s(0), p(0), f(0));
    doc.add_note(MeasureId(3), s(5), p(9), f(9));
    let ids = doc.measure_ids();

    assert_eq!(doc.clear_all(), 2);
    assert_eq!(doc.total_note_count(), 0);
    assert_eq!(doc.measure_ids(), ids);
}

#[test]
fn test_ids_increase_after_duplicate_and_delete() {
    let mut doc = TabDocument::new();
    let a = doc.add_measure().unwrap();
    let b = doc.duplicate_measure(MeasureId(1)).unwrap();
    doc.delete_measure(b, None).unwrap();
    let c = doc.add_measure().unwrap();
    assert!(a < b && b < c);
}

#[test]
fn test_json_round_trip_preserves_document() {
    let mut doc = TabDocument::with_measures(2);
    doc.add_note(MeasureId(2), s(4), p(8), f(15));

    let json = serde_json::to_string(&doc).unwrap();
    let back: TabDocument = serde_json::from_str(&json).unwrap();
    assert!(back.validate().is_ok());
    assert_eq!(back, doc);
}

#[test]
fn test_document_at_max_measure_id_rejected() {
    let doc: TabDocument = serde_json::from_str(r#"{"measures": [{"id": 4294967295, "notes": []}]}"#).unwrap();
    assert_eq!(doc.validate(), Err(EditorError::MeasureIdExhausted(u32::MAX)));
}

#[test]
fn test_last_free_id_then_exhausted() {
    let mut doc: TabDocument = serde_json::from_str(r#"{"measures": [{"id": 4294967294, "notes": []}]}"#).unwrap();
    assert!(doc.validate().is_ok());

    assert_eq!(doc.add_measure(), Ok(MeasureId(u32::MAX)));
    assert_eq!(doc.add_measure(), Err(MeasureRejection::IdsExhausted));
    assert_eq!(doc.measure_count(), 2);

    // The ids already issued stay distinct
    let ids = doc.measure_ids();
    assert_ne!(ids[0], ids[1]);
}

#[test]
fn test_remove_note_and_contains_measure() {
    let mut doc = TabDocument::with_measures(2);
    doc.add_note(MeasureId(2), s(1), p(6), f(8));

    assert!(doc.contains_measure(MeasureId(2)));
    assert!(!doc.contains_measure(MeasureId(3)));

    assert_eq!(doc.remove_note(MeasureId(2), s(1), p(6)), Some(Note::new(s(1), p(6), f(8))));
    assert_eq!(doc.remove_note(MeasureId(2), s(1), p(6)), None);
    assert_eq!(doc.remove_note(MeasureId(3), s(1), p(6)), None);
    assert_eq!(doc.total_note_count(), 0);
}
