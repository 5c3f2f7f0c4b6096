//! Per-type agent policy
//!
//! The agent set is fixed at three kinds, so policy is a closed dispatch table
//! on `AgentType` rather than an open trait-object hierarchy.

use serde::{Deserialize, Serialize};

use crate::board::Cell;
use crate::core::error::RuleError;
use crate::core::types::{AgentType, PlayerId};

/// The special actions an agent kind may perform on its own cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialAction {
    Mark,
    ClaimControl,
    ReleaseControl,
}

impl AgentType {
    /// Hit points this kind starts a battle with.
    pub fn max_hp(self) -> u32 {
        match self {
            AgentType::Scout => 5,
            AgentType::Sniper => 4,
            AgentType::Sergeant => 3,
        }
    }

    /// Cards of this kind in a fresh deck.
    pub fn starting_cards(self) -> usize {
        match self {
            AgentType::Scout => 4,
            AgentType::Sniper => 3,
            AgentType::Sergeant => 3,
        }
    }

    /// Dice rolled when this kind attacks.
    pub fn attack_dice(self) -> usize {
        match self {
            AgentType::Sniper => 3,
            AgentType::Scout | AgentType::Sergeant => 1,
        }
    }

    /// Movement policy: may this kind step into `target`? Adjacency and
    /// occupancy are checked by the movement rules, not here.
    pub fn can_enter(self, target: &Cell, owner: PlayerId) -> Result<(), RuleError> {
        match self {
            AgentType::Scout => Ok(()),
            AgentType::Sniper | AgentType::Sergeant => {
                if target.marked_by(owner) {
                    Ok(())
                } else {
                    Err(RuleError::UnmarkedCell(self))
                }
            }
        }
    }

    pub fn supports(self, action: SpecialAction) -> bool {
        match self {
            AgentType::Scout => action == SpecialAction::Mark,
            AgentType::Sniper => false,
            AgentType::Sergeant => {
                matches!(action, SpecialAction::ClaimControl | SpecialAction::ReleaseControl)
            }
        }
    }
}
