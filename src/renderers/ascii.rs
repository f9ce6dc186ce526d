//! Plain-text tablature export
//!
//! ```text
//! E|----------------3--|
//! B|-----------1-------|
//! ...
//! ```
//!
//! One line per string, highest first. Every position is a column as wide
//! as its widest fret (one `-` of padding on each side), so two-digit
//! frets stay aligned across strings.

use crate::config::Tuning;
use crate::models::{Measure, PositionIndex, StringIndex, TabDocument};

/// Render the whole document as ASCII tab
pub fn render_text(document: &TabDocument, tuning: &Tuning) -> String {
    let label_width = StringIndex::ALL
        .iter()
        .map(|s| tuning.label(*s).chars().count())
        .max()
        .unwrap_or(1);

    let column_widths: Vec<Vec<usize>> = document.measures().iter().map(column_widths).collect();

    let mut out = String::new();
    for string in StringIndex::display_order() {
        let label = tuning.label(string);
        out.push_str(label);
        for _ in label.chars().count()..label_width {
            out.push(' ');
        }
        out.push('|');

        for (measure, widths) in document.measures().iter().zip(&column_widths) {
            for (position, width) in PositionIndex::all().zip(widths) {
                let cell = measure
                    .note_at(string, position)
                    .map(|note| note.fret.to_string())
                    .unwrap_or_default();
                out.push('-');
                out.push_str(&cell);
                for _ in cell.len()..*width {
                    out.push('-');
                }
            }
            out.push_str("-|");
        }
        out.push('\n');
    }
    out
}

fn column_widths(measure: &Measure) -> Vec<usize> {
    PositionIndex::all()
        .map(|position| {
            StringIndex::ALL
                .iter()
                .filter_map(|string| measure.note_at(*string, position))
                .map(|note| note.fret.to_string().len())
                .max()
                .unwrap_or(1)
        })
        .collect()
}
