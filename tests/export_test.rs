// Export tests: grid view, text tab, and MIDI through a session

use midly::{MetaMessage, MidiMessage, Smf, TrackEventKind};
use tab_editor_wasm::config::EditorConfig;
use tab_editor_wasm::entry::EntryKey;
use tab_editor_wasm::models::{MeasureId, PositionIndex, StringIndex};
use tab_editor_wasm::session::EditorSession;

fn type_fret(session: &mut EditorSession, measure: u32, string: u8, position: u8, keys: &str) {
    session.click_cell(
        MeasureId(measure),
        StringIndex::new(string).unwrap(),
        PositionIndex::new(position).unwrap(),
    );
    for key in keys.chars() {
        session.key_down(EntryKey::from_key(&key.to_string()));
    }
}

#[test]
fn test_grid_view_after_edits() {
    let mut session = EditorSession::default();
    session.add_measure();
    type_fret(&mut session, 2, 0, 15, "17");
    type_fret(&mut session, 1, 5, 0, "");

    let view = session.grid_view();
    assert_eq!(view.measures.len(), 2);
    assert_eq!(view.total_notes, 1);
    assert!(view.show_clear_all);

    // Low E is the bottom row
    let low_e = &view.measures[1].rows[5];
    assert_eq!(low_e.string, StringIndex::LowE);
    assert_eq!(low_e.cells[15].text, "17");

    // High E top row of measure 1 holds the selection
    let high_e = &view.measures[0].rows[0];
    assert!(high_e.cells[0].selected);
    assert_eq!(high_e.cells[0].text, "─");
}

#[test]
fn test_grid_view_serializes_camel_case() {
    let session = EditorSession::default();
    let json = serde_json::to_value(session.grid_view()).unwrap();
    assert!(json.get("showClearAll").is_some());
    assert!(json.get("totalNotes").is_some());
    assert_eq!(json["measures"][0]["canDelete"], serde_json::json!(false));
    assert_eq!(json["measures"][0]["rows"][0]["string"], serde_json::json!(5));
}

#[test]
fn test_text_export() {
    let mut session = EditorSession::default();
    type_fret(&mut session, 1, 5, 0, "0");
    session.timer_fired(session.entry().pending_timer().unwrap());
    type_fret(&mut session, 1, 4, 1, "13");

    let text = session.export_text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("E|-0--"));
    assert!(lines[1].starts_with("B|---13-"));
    assert!(lines[5].starts_with("E|-----"));
}

#[test]
fn test_midi_export() {
    let mut session = EditorSession::new(EditorConfig {
        tempo_bpm: 90,
        ..EditorConfig::default()
    });
    session.add_measure();
    type_fret(&mut session, 1, 0, 0, "3");
    session.timer_fired(session.entry().pending_timer().unwrap());
    type_fret(&mut session, 2, 5, 8, "12");

    let bytes = session.export_midi().unwrap();
    let smf = Smf::parse(&bytes).unwrap();
    assert_eq!(smf.tracks.len(), 2);

    let tempo = smf.tracks[0].iter().find_map(|e| match e.kind {
        TrackEventKind::Meta(MetaMessage::Tempo(t)) => Some(t.as_int()),
        _ => None,
    });
    assert_eq!(tempo, Some(60_000_000 / 90));

    let keys: Vec<u8> = smf.tracks[1]
        .iter()
        .filter_map(|e| match e.kind {
            TrackEventKind::Midi { message: MidiMessage::NoteOn { key, .. }, .. } => Some(key.as_int()),
            _ => None,
        })
        .collect();
    // G2 (40 + 3) then E5 (64 + 12)
    assert_eq!(keys, vec![43, 76]);
}
