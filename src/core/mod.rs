//! Shared types and error handling

pub mod error;
pub mod types;

pub use error::{EngineError, LoadError, Result, RuleError};
pub use types::{AgentType, Card, GameStatus, PlayerId};
