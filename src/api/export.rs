//! Export operations for the WASM API
//!
//! Stateless variants of the editor's exports, for hosts that hold a
//! document snapshot (from `getDocument`) rather than a live editor:
//! - Text: plain ASCII tablature
//! - MIDI: Standard MIDI File Format 1

use wasm_bindgen::prelude::*;

use super::helpers::{deserialize, editor_error};
use crate::config::EditorConfig;
use crate::models::TabDocument;
use crate::renderers::{document_to_smf, render_text};
use crate::{wasm_info, wasm_log};

fn load_inputs(document_js: JsValue, config_js: JsValue) -> Result<(TabDocument, EditorConfig), JsValue> {
    let document: TabDocument = deserialize(document_js, "Document deserialization error")?;
    document.validate().map_err(editor_error)?;

    let config = if config_js.is_undefined() || config_js.is_null() {
        EditorConfig::default()
    } else {
        deserialize(config_js, "Config deserialization error")?
    };
    config.validate().map_err(editor_error)?;
    Ok((document, config))
}

/// Render a document snapshot as ASCII tab
#[wasm_bindgen(js_name = exportTabText)]
pub fn export_tab_text(document_js: JsValue, config_js: JsValue) -> Result<String, JsValue> {
    wasm_info!("exportTabText called");
    let (document, config) = load_inputs(document_js, config_js)?;
    let text = render_text(&document, &config.tuning);
    wasm_log!("  {} measures, {} chars", document.measure_count(), text.len());
    Ok(text)
}

/// Convert a document snapshot to SMF bytes
#[wasm_bindgen(js_name = exportTabMidi)]
pub fn export_tab_midi(document_js: JsValue, config_js: JsValue) -> Result<Vec<u8>, JsValue> {
    wasm_info!("exportTabMidi called");
    let (document, config) = load_inputs(document_js, config_js)?;
    let bytes = document_to_smf(&document, &config).map_err(editor_error)?;
    wasm_info!("  MIDI generated: {} bytes", bytes.len());
    Ok(bytes)
}
