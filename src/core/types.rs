//! Core type definitions used throughout the engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two players at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    A,
    B,
}

impl PlayerId {
    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::A => PlayerId::B,
            PlayerId::B => PlayerId::A,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerId::A => write!(f, "A"),
            PlayerId::B => write!(f, "B"),
        }
    }
}

/// The three agent kinds. This set is closed; rule dispatch matches on it
/// exhaustively (see `game::behavior`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentType {
    Scout,
    Sniper,
    Sergeant,
}

impl AgentType {
    /// Fixed rotation order, also the deck build order.
    pub const ALL: [AgentType; 3] = [AgentType::Scout, AgentType::Sniper, AgentType::Sergeant];

    /// Stable index into per-player agent arrays.
    pub fn index(self) -> usize {
        match self {
            AgentType::Scout => 0,
            AgentType::Sniper => 1,
            AgentType::Sergeant => 2,
        }
    }
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentType::Scout => write!(f, "Scout"),
            AgentType::Sniper => write!(f, "Sniper"),
            AgentType::Sergeant => write!(f, "Sergeant"),
        }
    }
}

/// Battle outcome so far. Once a game is won it never returns to `InProgress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    InProgress,
    WonByA,
    WonByB,
}

impl GameStatus {
    pub fn winner(self) -> Option<PlayerId> {
        match self {
            GameStatus::InProgress => None,
            GameStatus::WonByA => Some(PlayerId::A),
            GameStatus::WonByB => Some(PlayerId::B),
        }
    }

    pub fn won_by(player: PlayerId) -> GameStatus {
        match player {
            PlayerId::A => GameStatus::WonByA,
            PlayerId::B => GameStatus::WonByB,
        }
    }
}

/// A single deck card. Cards are fungible; only the agent tag matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub agent: AgentType,
}

impl Card {
    pub fn new(agent: AgentType) -> Self {
        Self { agent }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_flips_both_ways() {
        assert_eq!(PlayerId::A.opponent(), PlayerId::B);
        assert_eq!(PlayerId::B.opponent(), PlayerId::A);
    }

    #[test]
    fn test_agent_indices_are_distinct() {
        let mut seen = [false; 3];
        for kind in AgentType::ALL {
            assert!(!seen[kind.index()]);
            seen[kind.index()] = true;
        }
    }

    #[test]
    fn test_winner_matches_status() {
        assert_eq!(GameStatus::InProgress.winner(), None);
        assert_eq!(GameStatus::WonByA.winner(), Some(PlayerId::A));
        assert_eq!(GameStatus::WonByB.winner(), Some(PlayerId::B));
        assert_eq!(GameStatus::won_by(PlayerId::B), GameStatus::WonByB);
    }
}
