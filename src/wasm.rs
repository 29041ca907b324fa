//! WebAssembly bindings for the cube animator.
//!
//! Provides a thin wrapper around `EditorSession` for browser front ends.
//! Timers stay on the JavaScript side: `togglePlayback` and `tick` return
//! `{ delay, token }`, and the timer passes that token back to `tick`. A
//! timer left over from an earlier run carries an old token and is ignored.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::{
    EditorSession, ScanOrder,
    playback::{ScheduledTick, TickOutcome, TickToken},
    schema::EditorConfig,
};

/// Initialize WASM module with panic hook and logging.
#[wasm_bindgen(start)]
pub fn init() {
    // Set panic hook for better error messages in browser
    console_error_panic_hook::set_once();

    wasm_logger::init(wasm_logger::Config::default());
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Frame data handed to the renderer.
#[derive(Serialize)]
struct FrameView<'a> {
    index: usize,
    width: usize,
    height: usize,
    depth: usize,
    cells: &'a [bool],
    duration: u32,
    #[serde(rename = "minDuration")]
    min_duration: u32,
}

/// Next playback step handed to the JS timer.
#[derive(Serialize)]
struct TickView {
    delay: f64,
    token: f64,
}

fn tick_value(tick: Option<ScheduledTick>) -> Result<JsValue, JsValue> {
    let Some(tick) = tick else {
        return Ok(JsValue::NULL);
    };
    let view = TickView {
        delay: tick.delay.as_millis() as f64,
        token: tick.token.generation() as f64,
    };
    serde_wasm_bindgen::to_value(&view)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// WebAssembly wrapper for an editing session.
#[wasm_bindgen]
pub struct WasmEditor {
    session: EditorSession,
}

#[wasm_bindgen]
impl WasmEditor {
    /// Create an editor from an optional JSON `EditorConfig` (empty for defaults).
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WasmEditor, JsValue> {
        let config: EditorConfig = if config_json.trim().is_empty() {
            EditorConfig::default()
        } else {
            serde_json::from_str(config_json)
                .map_err(|e| JsValue::from_str(&format!("Invalid config JSON: {e}")))?
        };
        let session = EditorSession::new(&config).map_err(js_err)?;
        Ok(WasmEditor { session })
    }

    /// Get the selected frame for rendering.
    #[wasm_bindgen(js_name = getFrame)]
    pub fn get_frame(&self) -> Result<JsValue, JsValue> {
        let frame = self.session.current_frame();
        let view = FrameView {
            index: self.session.current(),
            width: frame.width(),
            height: frame.height(),
            depth: frame.depth(),
            cells: frame.cells(),
            duration: frame.duration_ms(),
            min_duration: frame.min_duration(),
        };
        serde_wasm_bindgen::to_value(&view)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Onion-skin neighbours as `[previous, next]`, -1 when hidden.
    #[wasm_bindgen(js_name = onionSkin)]
    pub fn onion_skin(&self) -> Vec<i32> {
        let skin = self.session.onion_skin();
        [skin.previous, skin.next]
            .iter()
            .map(|i| i.map_or(-1, |v| v as i32))
            .collect()
    }

    #[wasm_bindgen(js_name = setOnionSkin)]
    pub fn set_onion_skin(&mut self, enabled: bool) {
        self.session.set_onion_skin(enabled);
    }

    #[wasm_bindgen(js_name = frameCount)]
    pub fn frame_count(&self) -> usize {
        self.session.document().frame_count()
    }

    #[wasm_bindgen(js_name = current)]
    pub fn current(&self) -> usize {
        self.session.current()
    }

    #[wasm_bindgen]
    pub fn select(&mut self, index: usize) -> Result<(), JsValue> {
        self.session.select(index).map_err(js_err)
    }

    #[wasm_bindgen(js_name = nextFrame)]
    pub fn next_frame(&mut self) -> usize {
        self.session.next_frame()
    }

    #[wasm_bindgen(js_name = prevFrame)]
    pub fn prev_frame(&mut self) -> usize {
        self.session.prev_frame()
    }

    #[wasm_bindgen(js_name = toggleCell)]
    pub fn toggle_cell(&mut self, index: usize) -> Result<bool, JsValue> {
        self.session.toggle_cell(index).map_err(js_err)
    }

    #[wasm_bindgen(js_name = setSlice)]
    pub fn set_slice(&mut self, z: usize, lit: bool) -> Result<(), JsValue> {
        self.session.set_slice(z, lit).map_err(js_err)
    }

    #[wasm_bindgen]
    pub fn fill(&mut self, lit: bool) -> Result<(), JsValue> {
        self.session.fill(lit).map_err(js_err)
    }

    #[wasm_bindgen(js_name = insertFrame)]
    pub fn insert_frame(&mut self, copy_current: bool) -> Result<usize, JsValue> {
        self.session.insert_frame(copy_current).map_err(js_err)
    }

    #[wasm_bindgen(js_name = deleteFrame)]
    pub fn delete_frame(&mut self) -> Result<usize, JsValue> {
        self.session.delete_frame().map_err(js_err)
    }

    /// Apply a typed duration; the error message names the minimum.
    #[wasm_bindgen(js_name = editDuration)]
    pub fn edit_duration(&mut self, text: &str) -> Result<u32, JsValue> {
        self.session.edit_duration(text).map_err(js_err)
    }

    #[wasm_bindgen(js_name = minDuration)]
    pub fn min_duration(&self) -> u32 {
        self.session.min_duration()
    }

    #[wasm_bindgen(js_name = newAnimation)]
    pub fn new_animation(&mut self, width: &str, height: &str, depth: &str) -> Result<(), JsValue> {
        self.session.new_animation(width, height, depth).map_err(js_err)
    }

    /// Toggle playback. Returns `{ delay, token }` for the first `tick`, or
    /// `null` when returning to edit mode.
    #[wasm_bindgen(js_name = togglePlayback)]
    pub fn toggle_playback(&mut self) -> Result<JsValue, JsValue> {
        tick_value(self.session.toggle_playback())
    }

    /// Fire the timer scheduled with `token`. Returns the next
    /// `{ delay, token }`, or `null` if the token is stale or playback ended.
    #[wasm_bindgen]
    pub fn tick(&mut self, token: f64) -> Result<JsValue, JsValue> {
        match self.session.tick(TickToken::from_generation(token as u64)) {
            TickOutcome::Advanced { next, .. } => tick_value(Some(next)),
            TickOutcome::Stale => tick_value(None),
        }
    }

    #[wasm_bindgen(js_name = toSnapshot)]
    pub fn to_snapshot(&self) -> Result<String, JsValue> {
        self.session.snapshot().map_err(js_err)
    }

    #[wasm_bindgen(js_name = loadSnapshot)]
    pub fn load_snapshot(&mut self, text: &str) -> Result<(), JsValue> {
        self.session.load_snapshot(text).map_err(js_err)
    }

    #[wasm_bindgen(js_name = toSourceTable)]
    pub fn to_source_table(&self, depth_before_height: bool) -> String {
        self.session
            .source_table(ScanOrder::from_depth_before_height(depth_before_height))
    }
}
