//! LexiGrid - a word placement game engine
//!
//! This crate provides the core game logic for LexiGrid, including:
//! - Grid coordinates and the bonus-square board
//! - Letter multisets, racks and the shared tile pool
//! - Word resolution: new versus existing letters and crossing words
//! - Scoring with letter and word multipliers and the full-rack bonus
//! - A turn state machine with challenges that can take back a play
//!
//! # Architecture
//!
//! The engine is platform-agnostic and never does IO itself. It can be
//! compiled to:
//! - Native Rust for the terminal driver
//! - WebAssembly for a browser front end
//!
//! Word validity is supplied by the caller through the [`Dictionary`] trait,
//! and persistence works on the plain [`GameSnapshot`] value.
//!
//! # Modules
//!
//! - [`coord`]: Positions and directions on the grid
//! - [`board`]: Cells, bonuses and bulk import/export
//! - [`resolver`]: Reconciles a placement with the board
//! - [`scoring`]: Word and turn scores
//! - [`game`]: Turn state machine and snapshots

pub mod actions;
pub mod board;
pub mod config;
pub mod coord;
pub mod dictionary;
pub mod error;
pub mod game;
pub mod player;
pub mod resolver;
pub mod scoring;
pub mod tiles;
#[cfg(feature = "wasm")]
pub mod wasm;
pub mod word;

// Re-export commonly used types
pub use actions::{GameEvent, Move, MoveKind, MoveRecord, MoveResult};
pub use board::{Board, BoardSnapshot, Bonus, Cell, PlacedLetter, PlayerId};
pub use config::{BonusSquare, GameConfig};
pub use coord::{Direction, Position};
pub use dictionary::{AcceptAll, Dictionary, WordList};
pub use error::{BoardError, ConfigError, MoveError, SnapshotError};
pub use game::{Game, GameSnapshot};
pub use player::{LetterCounts, Player, Rack};
pub use scoring::{ChallengeRecord, ScoredWord, TurnScore};
pub use tiles::TilePool;
pub use word::{PlayedWord, PositionKey, Word};
