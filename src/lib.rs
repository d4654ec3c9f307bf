// polish_core: Rust/WASM engine for a portfolio page's client-side polish.
// All logic lives here; the page's JS is plumbing that feeds event batches
// in and applies the returned DOM commands.

mod counter;
mod debounce;
mod effects;
mod engine;
mod error;
mod stats;
mod types;
mod watcher;

use wasm_bindgen::prelude::*;

pub use counter::{
    ease_out_quart, format_value, parse_counter_text, CounterBank, CounterRun, CounterSpec,
    SuffixKind,
};
pub use debounce::Debouncer;
pub use effects::{parallax_offset, shine_position, tilt_angles, EffectEngine};
pub use engine::Engine;
pub use error::EngineError;
pub use stats::StatsTrigger;
pub use types::*;
pub use watcher::{intersection_ratio, RevealState, RevealWatcher};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// WASM-exposed engine for JavaScript interop.
/// Batch interface to minimize JS↔WASM crossings: one
/// `process_signals` call per event-loop turn.
#[wasm_bindgen]
pub struct WasmEngine {
    inner: Engine,
}

#[wasm_bindgen]
impl WasmEngine {
    /// Create an engine from JSON configuration. An empty object gets the
    /// stock thresholds (reveal 0.1 with a -50px bottom margin, stats 0.3,
    /// 2s counters).
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WasmEngine, JsValue> {
        let config: EngineConfig = serde_json::from_str(config_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;
        Ok(WasmEngine {
            inner: Engine::new(config),
        })
    }

    /// Register the page's marked elements from a `PageSnapshot` JSON
    /// batch. Returns a `RegisterReport` as JSON; counter parse warnings
    /// are also logged to the console.
    pub fn register_page(&mut self, snapshot_json: &str) -> Result<String, JsValue> {
        let snapshot: PageSnapshot = serde_json::from_str(snapshot_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid snapshot: {}", e)))?;

        let report = self.inner.register_page(snapshot);
        for warning in &report.warnings {
            web_sys::console::warn_1(&JsValue::from_str(warning));
        }

        serde_json::to_string(&report)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Process a batch of input signals and return the command batch to
    /// apply. The `animating` flag in the result tells the caller whether
    /// to keep requesting animation frames.
    pub fn process_signals(&mut self, signals_json: &str) -> Result<String, JsValue> {
        let batch: SignalBatch = serde_json::from_str(signals_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid signals: {}", e)))?;

        let commands = self.inner.process(batch);

        serde_json::to_string(&commands)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Whether counter animations are still in flight.
    pub fn is_animating(&self) -> bool {
        self.inner.is_animating()
    }

    /// Forget a removed element, cancelling any in-flight animation.
    pub fn remove_element(&mut self, id: u32) {
        self.inner.remove_element(ElementId::new(id));
    }
}

/// Styled console greeting for visitors who open devtools.
#[wasm_bindgen]
pub fn console_banner() {
    let lines: [(&str, &str); 3] = [
        (
            "%c👋 Hello there!",
            "color: #667eea; font-size: 24px; font-weight: bold;",
        ),
        (
            "%c🔍 Checking out the console, I see.",
            "color: #f5576c; font-size: 16px;",
        ),
        (
            "%c🦀 The polish on this page is a Rust/WASM engine.",
            "color: #00f2fe; font-size: 14px;",
        ),
    ];
    for (message, style) in lines {
        web_sys::console::log_2(&JsValue::from_str(message), &JsValue::from_str(style));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_creation_works() {
        let engine = WasmEngine::new("{}");
        assert!(engine.is_ok());
    }

    #[test]
    fn full_json_round_trip() {
        let mut engine = WasmEngine::new("{}").unwrap();

        let report = engine
            .register_page(
                r#"{
                    "reveal_targets": [1],
                    "stats_sections": [{
                        "container": 2,
                        "counters": [{ "id": 3, "text": "95%" }]
                    }]
                }"#,
            )
            .unwrap();
        let report: RegisterReport = serde_json::from_str(&report).unwrap();
        assert_eq!(report.counters_registered, 1);

        let result = engine
            .process_signals(
                r#"{
                    "viewport": { "width": 1000.0, "height": 800.0 },
                    "events": [
                        { "timestamp": 0, "event_type": {
                            "type": "BoundsUpdate", "id": 2,
                            "rect": { "x": 0.0, "y": 100.0, "width": 400.0, "height": 300.0 }
                        }},
                        { "timestamp": 2000000, "event_type": { "type": "Frame" } }
                    ]
                }"#,
            )
            .unwrap();
        let result: CommandBatch = serde_json::from_str(&result).unwrap();
        assert_eq!(
            result.commands,
            vec![Command::SetText {
                id: ElementId::new(3),
                text: "95%".to_string()
            }]
        );
        assert!(!result.animating);
    }
}
