//! The `TabEditor` class exposed to JavaScript
//!
//! Each instance is one editing session. Operations return a serialized
//! [`SessionUpdate`]; the host re-renders from `gridView()` afterwards.
//!
//! Disambiguation timers: when a browser `window` exists the editor arms
//! `setTimeout` itself and calls the `setOnChange` callback after a timed
//! commit. Without a window the host must schedule the `scheduledTimer`
//! of each update and call `timerFired(token)` when it elapses.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::helpers::{deserialize, editor_error, serialize, validate_cell};
use crate::config::EditorConfig;
use crate::entry::{EntryKey, TimerToken};
use crate::models::{MeasureId, TabDocument};
use crate::session::{EditorSession, SessionUpdate};
use crate::{wasm_error, wasm_info, wasm_log, wasm_warn};

struct Shared {
    session: RefCell<EditorSession>,
    /// `setTimeout` handle of the armed disambiguation timer
    timer_handle: Cell<Option<i32>>,
    on_change: RefCell<Option<js_sys::Function>>,
}

#[wasm_bindgen]
pub struct TabEditor {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl TabEditor {
    /// Create an editor; `config` may be omitted for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<TabEditor, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            deserialize::<EditorConfig>(config, "Config deserialization error")?
        };
        config.validate().map_err(editor_error)?;

        wasm_info!(
            "TabEditor created: {} measure(s), {}ms window",
            config.initial_measures,
            config.disambiguation_window_ms
        );

        Ok(TabEditor {
            shared: Rc::new(Shared {
                session: RefCell::new(EditorSession::new(config)),
                timer_handle: Cell::new(None),
                on_change: RefCell::new(None),
            }),
        })
    }

    /// Register a callback invoked with the update after a timed commit
    #[wasm_bindgen(js_name = setOnChange)]
    pub fn set_on_change(&self, callback: Option<js_sys::Function>) {
        *self.shared.on_change.borrow_mut() = callback;
    }

    #[wasm_bindgen(js_name = clickCell)]
    pub fn click_cell(&self, measure_id: u32, string: u8, position: u8) -> Result<JsValue, JsValue> {
        let (measure_id, string, position) = validate_cell(measure_id, string, position)?;
        let update = self.shared.session.borrow_mut().click_cell(measure_id, string, position);
        self.finish(update, "clickCell")
    }

    /// Feed a `KeyboardEvent.key` value
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&self, key: &str) -> Result<JsValue, JsValue> {
        let update = self.shared.session.borrow_mut().key_down(EntryKey::from_key(key));
        self.finish(update, "keyDown")
    }

    /// Report that the host-scheduled timer for `token` elapsed
    #[wasm_bindgen(js_name = timerFired)]
    pub fn timer_fired(&self, token: u32) -> Result<JsValue, JsValue> {
        let update = self.shared.session.borrow_mut().timer_fired(TimerToken(token));
        self.finish(update, "timerFired")
    }

    #[wasm_bindgen(js_name = addMeasure)]
    pub fn add_measure(&self) -> Result<JsValue, JsValue> {
        let update = self.shared.session.borrow_mut().add_measure();
        self.finish(update, "addMeasure")
    }

    #[wasm_bindgen(js_name = duplicateMeasure)]
    pub fn duplicate_measure(&self, measure_id: u32) -> Result<JsValue, JsValue> {
        let update = self.shared.session.borrow_mut().duplicate_measure(MeasureId(measure_id));
        self.finish(update, "duplicateMeasure")
    }

    #[wasm_bindgen(js_name = requestDeleteMeasure)]
    pub fn request_delete_measure(&self, measure_id: u32) -> Result<JsValue, JsValue> {
        let update = self.shared.session.borrow_mut().request_delete_measure(MeasureId(measure_id));
        self.finish(update, "requestDeleteMeasure")
    }

    #[wasm_bindgen(js_name = requestClearAll)]
    pub fn request_clear_all(&self) -> Result<JsValue, JsValue> {
        let update = self.shared.session.borrow_mut().request_clear_all();
        self.finish(update, "requestClearAll")
    }

    #[wasm_bindgen(js_name = resolveConfirmation)]
    pub fn resolve_confirmation(&self, id: u32, accepted: bool) -> Result<JsValue, JsValue> {
        let result = self.shared.session.borrow_mut().resolve_confirmation(id, accepted);
        let update = result.map_err(editor_error)?;
        self.finish(update, "resolveConfirmation")
    }

    #[wasm_bindgen(js_name = gridView)]
    pub fn grid_view(&self) -> Result<JsValue, JsValue> {
        let view = self.shared.session.borrow().grid_view();
        serialize(&view, "Grid view serialization error")
    }

    #[wasm_bindgen(js_name = getDocument)]
    pub fn get_document(&self) -> Result<JsValue, JsValue> {
        let session = self.shared.session.borrow();
        serialize(session.document(), "Document serialization error")
    }

    #[wasm_bindgen(js_name = loadDocument)]
    pub fn load_document(&self, document: JsValue) -> Result<JsValue, JsValue> {
        let document: TabDocument = deserialize(document, "Document deserialization error")?;
        let result = self.shared.session.borrow_mut().replace_document(document);
        let update = result.map_err(editor_error)?;
        self.finish(update, "loadDocument")
    }

    #[wasm_bindgen(js_name = totalNoteCount)]
    pub fn total_note_count(&self) -> usize {
        self.shared.session.borrow().document().total_note_count()
    }

    #[wasm_bindgen(js_name = exportText)]
    pub fn export_text(&self) -> String {
        self.shared.session.borrow().export_text()
    }

    #[wasm_bindgen(js_name = exportMidi)]
    pub fn export_midi(&self) -> Result<Vec<u8>, JsValue> {
        self.shared.session.borrow().export_midi().map_err(editor_error)
    }
}

impl TabEditor {
    fn finish(&self, update: SessionUpdate, operation: &str) -> Result<JsValue, JsValue> {
        if let Some(notice) = &update.notice {
            wasm_warn!("{}: {}", operation, notice.message);
        } else if update.changed {
            wasm_log!("{}: document changed", operation);
        }
        sync_timer(&self.shared, &update);
        serialize(&update, "Update serialization error")
    }
}

impl Drop for TabEditor {
    fn drop(&mut self) {
        if let (Some(handle), Some(window)) = (self.shared.timer_handle.take(), web_sys::window()) {
            window.clear_timeout_with_handle(handle);
        }
    }
}

/// Mirror the controller's timer bookkeeping onto `setTimeout`
fn sync_timer(shared: &Rc<Shared>, update: &SessionUpdate) {
    if update.cancelled_timer.is_none() && update.scheduled_timer.is_none() {
        return;
    }
    let Some(window) = web_sys::window() else {
        return;
    };

    if let Some(handle) = shared.timer_handle.take() {
        window.clear_timeout_with_handle(handle);
    }

    let Some(request) = update.scheduled_timer else {
        return;
    };

    let weak: Weak<Shared> = Rc::downgrade(shared);
    let callback = Closure::once_into_js(move || {
        if let Some(shared) = weak.upgrade() {
            on_timer_elapsed(&shared, request.token);
        }
    });

    match window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        request.delay_ms as i32,
    ) {
        Ok(handle) => shared.timer_handle.set(Some(handle)),
        Err(e) => wasm_error!("setTimeout failed for timer {}: {:?}", request.token, e),
    }
}

fn on_timer_elapsed(shared: &Rc<Shared>, token: TimerToken) {
    shared.timer_handle.set(None);
    let update = shared.session.borrow_mut().timer_fired(token);

    // Clone out so the callback may call back into the editor
    let callback = shared.on_change.borrow().clone();
    let Some(callback) = callback else {
        return;
    };
    if let Ok(value) = serialize(&update, "Update serialization error") {
        if let Err(e) = callback.call1(&JsValue::NULL, &value) {
            wasm_error!("onChange callback threw: {:?}", e);
        }
    }
}
