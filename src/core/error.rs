//! Error taxonomy: structural load failures vs. rule-level rejections
//!
//! Rule checks never panic or throw for control flow; validators return the
//! first failing precondition and mutators reuse the same validators, so a
//! `can_x` query and the matching `do_x` cannot disagree.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::{AgentType, PlayerId};

/// Structural failure while loading a board or scenario file. Loads are
/// all-or-nothing: on error the prior state is untouched or fully rolled back.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {path}: {source}")]
    FileOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("duplicate cell id in map: {0}")]
    DuplicateCell(String),

    #[error("map contains no cells: {0}")]
    EmptyBoard(String),

    #[error("board must be loaded before a scenario")]
    BoardNotLoaded,

    #[error("scenario line {line}: {reason}")]
    ScenarioLine { line: usize, reason: String },

    #[error("scenario must place Scout, Sniper, and Sergeant for both players")]
    AgentsMissing,
}

/// A rejected game operation. One variant per distinct precondition.
/// Serializable so combat records carrying a rejection stay serializable.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RuleError {
    #[error("game is already finished")]
    GameFinished,

    #[error("a card is already active this turn")]
    CardAlreadyActive,

    #[error("player {0} has no cards left to draw")]
    DrawPileEmpty(PlayerId),

    #[error("no active card for the current turn")]
    NoActiveCard,

    #[error("active card does not name the {0}")]
    ActiveCardMismatch(AgentType),

    #[error("no other active agent card available")]
    NoSwitchCandidate,

    #[error("no {kind} card left for player {owner}")]
    NoCardToBurn { owner: PlayerId, kind: AgentType },

    #[error("{0} is not alive")]
    AgentDead(AgentType),

    #[error("{0} is not placed on the board")]
    AgentNotPlaced(AgentType),

    #[error("unknown cell: {0}")]
    UnknownCell(String),

    #[error("target cell {0} is the current cell")]
    SameCell(String),

    #[error("{target} is not adjacent to {from}")]
    NotAdjacent { from: String, target: String },

    #[error("target cell {0} is occupied")]
    CellOccupied(String),

    #[error("{0} can only enter cells marked by its owner")]
    UnmarkedCell(AgentType),

    #[error("cell {0} holds no enemy agent")]
    NoEnemyOnCell(String),

    #[error("no path between attacker and target")]
    NoPath,

    #[error("target agent has no cards left")]
    TargetOutOfCards,

    #[error("current cell is already marked")]
    AlreadyMarked,

    #[error("cannot take control while an enemy agent is on the cell")]
    EnemyOnCell,

    #[error("cell is controlled by the enemy; release it first")]
    EnemyControlsCell,

    #[error("current cell is not controlled by the enemy")]
    NotEnemyControlled,

    #[error("an action was already used this turn")]
    ActionAlreadyUsed,

    #[error("an action must be used before ending the turn")]
    ActionNotUsed,

    #[error("battle is not loaded")]
    BattleNotLoaded,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
