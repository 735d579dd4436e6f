//! WebAssembly bindings for the LexiGrid engine.
//!
//! This module exposes the game engine to JavaScript through wasm-bindgen.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::actions::{Move, MoveResult};
#[cfg(feature = "wasm")]
use crate::dictionary::WordList;
#[cfg(feature = "wasm")]
use crate::game::Game;

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed game wrapper
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct WasmGame {
    game: Game<WordList>,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl WasmGame {
    /// Create a standard game from a JSON array of names and a JSON array
    /// of accepted words
    #[wasm_bindgen(constructor)]
    pub fn new(player_names_json: &str, words_json: &str) -> Result<WasmGame, JsValue> {
        let player_names: Vec<String> = serde_json::from_str(player_names_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid player names: {}", e)))?;
        let words: Vec<String> = serde_json::from_str(words_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid word list: {}", e)))?;

        if player_names.is_empty() {
            return Err(JsValue::from_str("At least one player is required"));
        }

        Ok(WasmGame {
            game: Game::new(player_names, WordList::from_words(words)),
        })
    }

    /// Get the current game state as JSON
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        serde_json::to_string(&self.game.export_snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Get the current player ID
    #[wasm_bindgen(js_name = getCurrentPlayer)]
    pub fn get_current_player(&self) -> u8 {
        self.game.current_player
    }

    /// Apply a move from JSON. Returns the events as JSON, or the rejection
    /// reason as an error.
    #[wasm_bindgen(js_name = makeMove)]
    pub fn make_move(&mut self, move_json: &str) -> Result<String, JsValue> {
        let mv: Move = serde_json::from_str(move_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid move JSON: {}", e)))?;

        match self.game.apply_move(mv) {
            Ok(events) => Ok(serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())),
            Err(e) => Err(JsValue::from_str(&format!("Move rejected: {}", e))),
        }
    }

    /// Outcome-only variant: "Next", "End", or the retry reason as JSON
    #[wasm_bindgen(js_name = submitMove)]
    pub fn submit_move(&mut self, move_json: &str) -> Result<String, JsValue> {
        let mv: Move = serde_json::from_str(move_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid move JSON: {}", e)))?;
        let result: MoveResult = self.game.make_move(mv);
        Ok(serde_json::to_string(&result).unwrap_or_else(|_| "null".to_string()))
    }

    /// Check if the game is finished
    #[wasm_bindgen(js_name = isFinished)]
    pub fn is_finished(&self) -> bool {
        self.game.is_finished()
    }

    /// Get the leading player
    #[wasm_bindgen(js_name = getLeader)]
    pub fn get_leader(&self) -> Option<u8> {
        self.game.leader()
    }

    /// Get the board as a JSON array of row strings, `.` for empty squares
    #[wasm_bindgen(js_name = getBoard)]
    pub fn get_board(&self) -> String {
        serde_json::to_string(&self.game.board.export_snapshot('.'))
            .unwrap_or_else(|_| "[]".to_string())
    }

    /// Get a specific player's state as JSON
    #[wasm_bindgen(js_name = getPlayer)]
    pub fn get_player(&self, player: u8) -> String {
        if let Some(p) = self.game.get_player(player) {
            serde_json::to_string(p).unwrap_or_else(|_| "{}".to_string())
        } else {
            "null".to_string()
        }
    }

    /// Get the most recent turn score as JSON
    #[wasm_bindgen(js_name = getLastTurnScore)]
    pub fn get_last_turn_score(&self) -> String {
        serde_json::to_string(&self.game.last_turn_score).unwrap_or_else(|_| "null".to_string())
    }
}
