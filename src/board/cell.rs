//! A single hex cell and its per-battle state

use serde::{Deserialize, Serialize};

use crate::core::types::{AgentType, PlayerId};

/// One hex space on the board. Neighbor edges are stored as indices into the
/// owning board's cell arena rather than owning links, which keeps the cyclic
/// adjacency graph out of the ownership story.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    pub id: String,
    /// Terrain cost summed along attack paths.
    pub shield: u32,
    pub row: usize,
    pub col: usize,
    /// Half-step horizontal shift (odd row in the axial layout).
    pub offset: bool,
    pub neighbors: Vec<usize>,

    pub marked_by_a: bool,
    pub marked_by_b: bool,
    pub controlled_by: Option<PlayerId>,
    pub occupant_a: Option<AgentType>,
    pub occupant_b: Option<AgentType>,
}

impl Cell {
    pub fn new(id: String, shield: u32, row: usize, col: usize, offset: bool) -> Self {
        Self {
            id,
            shield,
            row,
            col,
            offset,
            neighbors: Vec::new(),
            marked_by_a: false,
            marked_by_b: false,
            controlled_by: None,
            occupant_a: None,
            occupant_b: None,
        }
    }

    pub fn marked_by(&self, player: PlayerId) -> bool {
        match player {
            PlayerId::A => self.marked_by_a,
            PlayerId::B => self.marked_by_b,
        }
    }

    pub fn set_mark(&mut self, player: PlayerId) {
        match player {
            PlayerId::A => self.marked_by_a = true,
            PlayerId::B => self.marked_by_b = true,
        }
    }

    pub fn occupant(&self, player: PlayerId) -> Option<AgentType> {
        match player {
            PlayerId::A => self.occupant_a,
            PlayerId::B => self.occupant_b,
        }
    }

    pub fn set_occupant(&mut self, player: PlayerId, kind: AgentType) {
        match player {
            PlayerId::A => self.occupant_a = Some(kind),
            PlayerId::B => self.occupant_b = Some(kind),
        }
    }

    pub fn clear_occupant(&mut self, player: PlayerId) {
        match player {
            PlayerId::A => self.occupant_a = None,
            PlayerId::B => self.occupant_b = None,
        }
    }

    /// Occupied by either player.
    pub fn is_occupied(&self) -> bool {
        self.occupant_a.is_some() || self.occupant_b.is_some()
    }

    pub fn has_enemy_of(&self, player: PlayerId) -> bool {
        self.occupant(player.opponent()).is_some()
    }

    /// Wipe marks, control, and occupants. Topology is untouched.
    pub fn reset_battle_state(&mut self) {
        self.marked_by_a = false;
        self.marked_by_b = false;
        self.controlled_by = None;
        self.occupant_a = None;
        self.occupant_b = None;
    }
}
