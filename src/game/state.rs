//! Shared game state: players, agents, and the turn record
//!
//! The state is built once per battle and then mutated only through the
//! validated operations in the sibling modules.

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::core::types::{AgentType, Card, GameStatus, PlayerId};
use crate::game::deck::Deck;

/// One playing piece. An agent occupies a cell iff `cell` is set and that
/// cell's occupant slot for its owner names this kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub kind: AgentType,
    pub owner: PlayerId,
    pub cell: Option<String>,
    pub hp: u32,
    pub alive: bool,
}

impl Agent {
    pub fn new(kind: AgentType, owner: PlayerId) -> Self {
        Self {
            kind,
            owner,
            cell: None,
            hp: kind.max_hp(),
            alive: true,
        }
    }

    pub fn is_placed(&self) -> bool {
        self.cell.is_some()
    }

    /// Back to pre-scenario defaults: alive, full hp, off the board.
    pub fn reset(&mut self) {
        self.cell = None;
        self.hp = self.kind.max_hp();
        self.alive = true;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub deck: Deck,
    /// Exactly one agent per kind, indexed by `AgentType::index`.
    pub agents: [Agent; 3],
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            deck: Deck::starting(),
            agents: [
                Agent::new(AgentType::Scout, id),
                Agent::new(AgentType::Sniper, id),
                Agent::new(AgentType::Sergeant, id),
            ],
        }
    }

    pub fn agent(&self, kind: AgentType) -> &Agent {
        &self.agents[kind.index()]
    }

    pub fn agent_mut(&mut self, kind: AgentType) -> &mut Agent {
        &mut self.agents[kind.index()]
    }

    pub fn alive_agents(&self) -> usize {
        self.agents.iter().filter(|a| a.alive).count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnState {
    pub current_player: PlayerId,
    /// Counts up from 1; each end-turn increments it.
    pub turn_index: u32,
    /// Drawn but not yet spent card, if any.
    pub active_card: Option<Card>,
}

impl Default for TurnState {
    fn default() -> Self {
        Self {
            current_player: PlayerId::A,
            turn_index: 1,
            active_card: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub player_a: Player,
    pub player_b: Player,
    pub turn: TurnState,
    pub status: GameStatus,
}

impl GameState {
    /// Fresh battle state with both decks shuffled. The board starts empty
    /// and is loaded separately.
    pub fn new(name_a: impl Into<String>, name_b: impl Into<String>, rng: &mut ChaCha8Rng) -> Self {
        let mut player_a = Player::new(PlayerId::A, name_a);
        let mut player_b = Player::new(PlayerId::B, name_b);
        player_a.deck.shuffle(rng);
        player_b.deck.shuffle(rng);

        Self {
            board: Board::default(),
            player_a,
            player_b,
            turn: TurnState::default(),
            status: GameStatus::InProgress,
        }
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        match id {
            PlayerId::A => &self.player_a,
            PlayerId::B => &self.player_b,
        }
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        match id {
            PlayerId::A => &mut self.player_a,
            PlayerId::B => &mut self.player_b,
        }
    }

    pub fn current_player(&self) -> &Player {
        self.player(self.turn.current_player)
    }

    pub fn active_card(&self) -> Option<Card> {
        self.turn.active_card
    }
}
