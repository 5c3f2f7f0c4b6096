//! Agent movement: legality checks and the relocation mutation

use crate::core::error::RuleError;
use crate::core::types::{AgentType, GameStatus, PlayerId};
use crate::game::state::GameState;

/// Check every movement precondition in order, returning the first failure.
pub fn can_move(
    state: &GameState,
    owner: PlayerId,
    kind: AgentType,
    to_id: &str,
) -> Result<(), RuleError> {
    if state.status != GameStatus::InProgress {
        return Err(RuleError::GameFinished);
    }

    let agent = state.player(owner).agent(kind);
    if !agent.alive {
        return Err(RuleError::AgentDead(kind));
    }
    let from_id = agent.cell.as_deref().ok_or(RuleError::AgentNotPlaced(kind))?;

    let from = state
        .board
        .cell(from_id)
        .ok_or_else(|| RuleError::UnknownCell(from_id.to_string()))?;
    let to = state
        .board
        .cell(to_id)
        .ok_or_else(|| RuleError::UnknownCell(to_id.to_string()))?;

    if from.id == to.id {
        return Err(RuleError::SameCell(to_id.to_string()));
    }
    if !state.board.are_neighbors(&from.id, &to.id) {
        return Err(RuleError::NotAdjacent {
            from: from.id.clone(),
            target: to.id.clone(),
        });
    }
    if to.is_occupied() {
        return Err(RuleError::CellOccupied(to.id.clone()));
    }

    kind.can_enter(to, owner)
}

/// Relocate the agent. Clears the source occupant slot, fills the target
/// slot, and updates the agent's cell; nothing else changes.
pub fn move_agent(
    state: &mut GameState,
    owner: PlayerId,
    kind: AgentType,
    to_id: &str,
) -> Result<(), RuleError> {
    can_move(state, owner, kind, to_id)?;

    // Resolutions cannot fail past can_move.
    let agent = state.player(owner).agent(kind);
    let from_id = agent.cell.clone().ok_or(RuleError::AgentNotPlaced(kind))?;
    let from_index = state
        .board
        .index_of(&from_id)
        .ok_or_else(|| RuleError::UnknownCell(from_id.clone()))?;
    let to_index = state
        .board
        .index_of(to_id)
        .ok_or_else(|| RuleError::UnknownCell(to_id.to_string()))?;

    state.board.cell_at_mut(from_index).clear_occupant(owner);
    state.board.cell_at_mut(to_index).set_occupant(owner, kind);
    state.player_mut(owner).agent_mut(kind).cell = Some(to_id.to_string());

    tracing::debug!(%owner, %kind, from = %from_id, to = %to_id, "agent moved");
    Ok(())
}

/// Move on behalf of whoever's turn it is.
pub fn move_current_player(
    state: &mut GameState,
    kind: AgentType,
    to_id: &str,
) -> Result<(), RuleError> {
    move_agent(state, state.turn.current_player, kind, to_id)
}
