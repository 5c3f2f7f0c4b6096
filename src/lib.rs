//! Hexfront: rules engine for a two-player hex-board tactical card game
//!
//! Layering, bottom to top:
//! - `core`: identifiers, cards, status, error taxonomy
//! - `board`: map parsing, adjacency, pathfinding
//! - `game`: decks, turn economy, movement, combat, tactics, victory
//! - `scenario`: transactional battlefield setup from scenario files
//! - `session`: command execution with one-action-per-turn gating

pub mod board;
pub mod core;
pub mod game;
pub mod scenario;
pub mod session;

pub use crate::board::Board;
pub use crate::core::error::{EngineError, LoadError, Result, RuleError};
pub use crate::core::types::{AgentType, Card, GameStatus, PlayerId};
pub use crate::game::{AttackResult, GameState};
pub use crate::session::{Command, CommandResult, Session};
