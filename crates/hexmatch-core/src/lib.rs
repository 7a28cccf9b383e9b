//! Hexmatch - a hexagonal tile-matching puzzle engine
//!
//! This crate provides the rules engine for a match-3 style puzzle on an
//! offset hex grid, including:
//! - Hex grid topology and world-space layout
//! - Board state with immovable bonus tiles, generation and gravity
//! - Match detection for straight runs and four-tile rhombus clusters
//! - A paced resolution state machine with cascades, scoring and a
//!   move-limited bonus-trigger mission
//!
//! # Architecture
//!
//! The engine performs no timing of its own. A driver calls
//! [`Session::advance`] and waits as instructed by the returned [`Pace`].
//! It can be compiled to:
//! - Native Rust, driven by the async `hexmatch` binary or by tests
//! - WebAssembly, driven from JavaScript (`wasm` feature)
//!
//! # Modules
//!
//! - [`hex`]: Grid coordinates, neighbor tables and world layout
//! - [`board`]: Tiles, slots, generation and column collapse
//! - [`matcher`]: Run and rhombus detection
//! - [`mission`]: Moves, bonus target and score
//! - [`events`]: Game events and the listener registry
//! - [`config`]: Session constants
//! - [`engine`]: Swap handling and cascade resolution
//! - [`bot`]: Automated swap selection

pub mod board;
pub mod bot;
pub mod config;
pub mod engine;
pub mod events;
pub mod hex;
pub mod matcher;
pub mod mission;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use board::{Board, BoardSnapshot, ColorValue, Tile, TileFall, TileId, TileKind};
pub use bot::{find_productive_swaps, Bot, BotDifficulty, SwapCandidate};
pub use config::{ConfigError, GameConfig, Timing};
pub use engine::{EngineError, EngineState, Pace, ResolveStep, Session, SwapOutcome, SwapRejection};
pub use events::{EffectId, EventBus, EventLog, GameEvent, SubscriptionId};
pub use hex::{Coord, Dimensions, Direction, Layout, WorldPos};
pub use matcher::{find_all_matches, MatchSet};
pub use mission::{Mission, Outcome};
