//! WebAssembly bindings for the hexmatch engine.
//!
//! JavaScript drives the session itself: it calls `advance` and waits as
//! told, then polls `drainEvents` to animate what happened.

use wasm_bindgen::prelude::*;

use crate::bot::{Bot, BotDifficulty};
use crate::config::GameConfig;
use crate::engine::{Pace, Session, SwapOutcome};
use crate::events::{EffectId, EventLog};
use crate::hex::{Coord, Direction, WorldPos};
use serde::Serialize;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// JSON shape of a pacing instruction
#[derive(Serialize)]
#[serde(tag = "kind")]
enum PaceJson {
    Idle,
    Wait { ms: u64 },
    Falls { ms: u64, count: usize },
}

impl From<Pace> for PaceJson {
    fn from(pace: Pace) -> Self {
        match pace {
            Pace::Idle => PaceJson::Idle,
            Pace::Wait(d) => PaceJson::Wait {
                ms: d.as_millis() as u64,
            },
            Pace::Falls { falls, duration } => PaceJson::Falls {
                ms: duration.as_millis() as u64,
                count: falls.len(),
            },
        }
    }
}

fn to_json<T: Serialize>(value: &T, fallback: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| fallback.to_string())
}

/// WASM-exposed session wrapper
#[wasm_bindgen]
pub struct WasmSession {
    session: Session,
    log: EventLog,
}

#[wasm_bindgen]
impl WasmSession {
    /// Create a session from a JSON config (may be `"{}"` for defaults)
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, seed: u64) -> Result<WasmSession, JsValue> {
        let config = GameConfig::from_json(config_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;
        let mut session = Session::with_seed(config, seed)
            .map_err(|e| JsValue::from_str(&format!("Failed to start: {}", e)))?;

        let log = EventLog::new();
        session.subscribe(log.listener());
        session.start();
        Ok(WasmSession { session, log })
    }

    /// Request a swap from a drag vector in world units. Returns
    /// `{"Accepted": {...}}` or `{"Rejected": "..."}` as JSON.
    #[wasm_bindgen(js_name = requestSwap)]
    pub fn request_swap(
        &mut self,
        col: i32,
        row: i32,
        drag_x: f64,
        drag_y: f64,
    ) -> Result<String, JsValue> {
        let outcome = self
            .session
            .request_swap(Coord::new(col, row), WorldPos::new(drag_x, drag_y))
            .map_err(|e| JsValue::from_str(&format!("Engine error: {}", e)))?;

        let json = match outcome {
            SwapOutcome::Accepted { target, settle, .. } => serde_json::json!({
                "Accepted": { "target": target, "settle_ms": settle.as_millis() as u64 }
            }),
            SwapOutcome::Rejected(reason) => serde_json::json!({ "Rejected": reason }),
        };
        Ok(json.to_string())
    }

    /// Run one engine step and return what to wait for, as JSON
    pub fn advance(&mut self) -> Result<String, JsValue> {
        let pace = self
            .session
            .advance()
            .map_err(|e| JsValue::from_str(&format!("Engine error: {}", e)))?;
        Ok(to_json(&PaceJson::from(pace), "{\"kind\":\"Idle\"}"))
    }

    /// Report that a bonus effect animation finished
    #[wasm_bindgen(js_name = completeBonusEffect)]
    pub fn complete_bonus_effect(&mut self, effect: u32) -> bool {
        self.session.complete_bonus_effect(EffectId(effect))
    }

    /// Events since the last call, as a JSON array
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&self) -> String {
        to_json(&self.log.drain(), "[]")
    }

    /// Board state as JSON (for rendering)
    #[wasm_bindgen(js_name = getBoard)]
    pub fn get_board(&self) -> String {
        to_json(&self.session.board().snapshot(), "{}")
    }

    /// Mission counters as JSON
    #[wasm_bindgen(js_name = getMission)]
    pub fn get_mission(&self) -> String {
        to_json(self.session.mission(), "{}")
    }

    #[wasm_bindgen(js_name = getScoreProgress)]
    pub fn get_score_progress(&self) -> f64 {
        self.session.score_progress()
    }

    #[wasm_bindgen(js_name = isIdle)]
    pub fn is_idle(&self) -> bool {
        self.session.is_idle()
    }

    /// A bot's suggested swap as `[col, row, direction]`, or `null`.
    /// difficulty: "Easy" or "Greedy"
    #[wasm_bindgen(js_name = getBotSwap)]
    pub fn get_bot_swap(&self, difficulty: &str) -> String {
        let difficulty = match difficulty {
            "Greedy" => BotDifficulty::Greedy,
            _ => BotDifficulty::Easy,
        };
        let mut bot = Bot::new(difficulty);
        match bot.choose_swap(self.session.board()) {
            Some(c) => to_json(&(c.origin.col, c.origin.row, c.direction), "null"),
            None => "null".to_string(),
        }
    }

    /// Swap toward a neighbor by direction name, e.g. `"UpRight"`
    #[wasm_bindgen(js_name = requestSwapToward)]
    pub fn request_swap_toward(&mut self, col: i32, row: i32, direction: &str) -> Result<bool, JsValue> {
        let direction: Direction = serde_json::from_value(serde_json::Value::String(direction.into()))
            .map_err(|e| JsValue::from_str(&format!("Invalid direction: {}", e)))?;
        let outcome = self
            .session
            .request_swap_toward(Coord::new(col, row), direction)
            .map_err(|e| JsValue::from_str(&format!("Engine error: {}", e)))?;
        Ok(matches!(outcome, SwapOutcome::Accepted { .. }))
    }
}
