//! Special actions performed on the agent's own cell: marking and control

use crate::core::error::RuleError;
use crate::core::types::{AgentType, GameStatus, PlayerId};
use crate::game::behavior::SpecialAction;
use crate::game::state::GameState;
use crate::game::victory;

/// Shared readiness check: the battle is live, the agent is alive and
/// standing on a known cell. Returns the cell's arena index.
fn ready_cell_index(
    state: &GameState,
    owner: PlayerId,
    kind: AgentType,
) -> Result<usize, RuleError> {
    if state.status != GameStatus::InProgress {
        return Err(RuleError::GameFinished);
    }
    let agent = state.player(owner).agent(kind);
    if !agent.alive {
        return Err(RuleError::AgentDead(kind));
    }
    let cell_id = agent.cell.as_deref().ok_or(RuleError::AgentNotPlaced(kind))?;
    state
        .board
        .index_of(cell_id)
        .ok_or_else(|| RuleError::UnknownCell(cell_id.to_string()))
}

pub fn can_mark(state: &GameState, owner: PlayerId) -> Result<(), RuleError> {
    let index = ready_cell_index(state, owner, AgentType::Scout)?;
    if state.board.cell_at(index).marked_by(owner) {
        return Err(RuleError::AlreadyMarked);
    }
    Ok(())
}

/// Scout marks its own cell for `owner`. Marks are per player and permanent
/// for the battle; marking never affects victory.
pub fn mark(state: &mut GameState, owner: PlayerId) -> Result<String, RuleError> {
    can_mark(state, owner)?;
    let index = ready_cell_index(state, owner, AgentType::Scout)?;
    let cell = state.board.cell_at_mut(index);
    cell.set_mark(owner);
    let id = cell.id.clone();
    tracing::debug!(%owner, cell = %id, "cell marked");
    Ok(id)
}

pub fn can_claim_control(state: &GameState, owner: PlayerId) -> Result<(), RuleError> {
    let index = ready_cell_index(state, owner, AgentType::Sergeant)?;
    let cell = state.board.cell_at(index);
    if cell.has_enemy_of(owner) {
        return Err(RuleError::EnemyOnCell);
    }
    if cell.controlled_by == Some(owner.opponent()) {
        return Err(RuleError::EnemyControlsCell);
    }
    Ok(())
}

/// Sergeant claims its own cell. Control flips victory checks, so the status
/// is re-evaluated immediately.
pub fn claim_control(state: &mut GameState, owner: PlayerId) -> Result<String, RuleError> {
    can_claim_control(state, owner)?;
    let index = ready_cell_index(state, owner, AgentType::Sergeant)?;
    let cell = state.board.cell_at_mut(index);
    cell.controlled_by = Some(owner);
    let id = cell.id.clone();
    tracing::debug!(%owner, cell = %id, "control claimed");
    victory::update_status(state);
    Ok(id)
}

pub fn can_release_control(state: &GameState, owner: PlayerId) -> Result<(), RuleError> {
    let index = ready_cell_index(state, owner, AgentType::Sergeant)?;
    let cell = state.board.cell_at(index);
    if cell.controlled_by != Some(owner.opponent()) {
        return Err(RuleError::NotEnemyControlled);
    }
    if cell.has_enemy_of(owner) {
        return Err(RuleError::EnemyOnCell);
    }
    Ok(())
}

/// Sergeant strips enemy control from its own cell, leaving it neutral.
pub fn release_control(state: &mut GameState, owner: PlayerId) -> Result<String, RuleError> {
    can_release_control(state, owner)?;
    let index = ready_cell_index(state, owner, AgentType::Sergeant)?;
    let cell = state.board.cell_at_mut(index);
    cell.controlled_by = None;
    let id = cell.id.clone();
    tracing::debug!(%owner, cell = %id, "control released");
    victory::update_status(state);
    Ok(id)
}

/// Resolve the active card and require it to support `action`.
fn active_kind_for(state: &GameState, action: SpecialAction) -> Result<AgentType, RuleError> {
    let card = state.turn.active_card.ok_or(RuleError::NoActiveCard)?;
    if !card.agent.supports(action) {
        return Err(RuleError::ActiveCardMismatch(card.agent));
    }
    Ok(card.agent)
}

pub fn mark_current_player(state: &mut GameState) -> Result<String, RuleError> {
    active_kind_for(state, SpecialAction::Mark)?;
    mark(state, state.turn.current_player)
}

pub fn claim_control_current_player(state: &mut GameState) -> Result<String, RuleError> {
    active_kind_for(state, SpecialAction::ClaimControl)?;
    claim_control(state, state.turn.current_player)
}

pub fn release_control_current_player(state: &mut GameState) -> Result<String, RuleError> {
    active_kind_for(state, SpecialAction::ReleaseControl)?;
    release_control(state, state.turn.current_player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::core::types::Card;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const MAP: &str = "\
|A01:0|A02:0|A03:0
 |B01:0|B02:0|B03:0
|C01:0|C02:0|C03:0
";

    fn place(state: &mut GameState, owner: PlayerId, kind: AgentType, cell: &str) {
        state
            .board
            .cell_mut(cell)
            .expect("cell exists")
            .set_occupant(owner, kind);
        state.player_mut(owner).agent_mut(kind).cell = Some(cell.to_string());
    }

    fn state() -> GameState {
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        let mut s = GameState::new("Ada", "Bea", &mut rng);
        s.board = Board::parse(MAP, "test").expect("map parses");
        s
    }

    #[test]
    fn test_mark_sets_own_flag_only() {
        let mut s = state();
        place(&mut s, PlayerId::A, AgentType::Scout, "B02");

        let id = mark(&mut s, PlayerId::A).expect("mark succeeds");
        assert_eq!(id, "B02");

        let cell = s.board.cell("B02").unwrap();
        assert!(cell.marked_by(PlayerId::A));
        assert!(!cell.marked_by(PlayerId::B));
    }

    #[test]
    fn test_mark_twice_rejected() {
        let mut s = state();
        place(&mut s, PlayerId::A, AgentType::Scout, "B02");
        mark(&mut s, PlayerId::A).expect("first mark");
        assert_eq!(mark(&mut s, PlayerId::A), Err(RuleError::AlreadyMarked));
    }

    #[test]
    fn test_both_players_may_mark_same_cell() {
        let mut s = state();
        place(&mut s, PlayerId::A, AgentType::Scout, "B02");
        mark(&mut s, PlayerId::A).expect("A marks");
        // Move A away, walk B's scout on, mark again.
        s.board.cell_mut("B02").unwrap().clear_occupant(PlayerId::A);
        s.player_a.agent_mut(AgentType::Scout).cell = None;
        place(&mut s, PlayerId::B, AgentType::Scout, "B02");

        mark(&mut s, PlayerId::B).expect("B marks");
        let cell = s.board.cell("B02").unwrap();
        assert!(cell.marked_by(PlayerId::A) && cell.marked_by(PlayerId::B));
    }

    #[test]
    fn test_mark_requires_placed_scout() {
        let mut s = state();
        assert_eq!(
            mark(&mut s, PlayerId::A),
            Err(RuleError::AgentNotPlaced(AgentType::Scout))
        );
    }

    #[test]
    fn test_claim_sets_control() {
        let mut s = state();
        place(&mut s, PlayerId::A, AgentType::Sergeant, "C01");
        let id = claim_control(&mut s, PlayerId::A).expect("claim succeeds");
        assert_eq!(id, "C01");
        assert_eq!(s.board.cell("C01").unwrap().controlled_by, Some(PlayerId::A));
    }

    #[test]
    fn test_claim_rejected_on_enemy_controlled_cell() {
        let mut s = state();
        place(&mut s, PlayerId::A, AgentType::Sergeant, "C01");
        s.board.cell_mut("C01").unwrap().controlled_by = Some(PlayerId::B);
        assert_eq!(
            claim_control(&mut s, PlayerId::A),
            Err(RuleError::EnemyControlsCell)
        );
    }

    #[test]
    fn test_release_requires_enemy_control() {
        let mut s = state();
        place(&mut s, PlayerId::A, AgentType::Sergeant, "C01");

        // Neutral cell.
        assert_eq!(
            release_control(&mut s, PlayerId::A),
            Err(RuleError::NotEnemyControlled)
        );

        // Own control.
        s.board.cell_mut("C01").unwrap().controlled_by = Some(PlayerId::A);
        assert_eq!(
            release_control(&mut s, PlayerId::A),
            Err(RuleError::NotEnemyControlled)
        );

        // Enemy control releases to neutral.
        s.board.cell_mut("C01").unwrap().controlled_by = Some(PlayerId::B);
        release_control(&mut s, PlayerId::A).expect("release succeeds");
        assert_eq!(s.board.cell("C01").unwrap().controlled_by, None);
    }

    #[test]
    fn test_seventh_claim_wins() {
        let mut s = state();
        // Six cells already held; the sergeant claims the seventh.
        let held: Vec<String> = s.board.cells().iter().take(6).map(|c| c.id.clone()).collect();
        for id in held {
            s.board.cell_mut(&id).unwrap().controlled_by = Some(PlayerId::A);
        }
        place(&mut s, PlayerId::A, AgentType::Sergeant, "C02");

        claim_control(&mut s, PlayerId::A).expect("claim succeeds");
        assert_eq!(s.status, GameStatus::WonByA);
    }

    #[test]
    fn test_wrappers_validate_active_card() {
        let mut s = state();
        place(&mut s, PlayerId::A, AgentType::Scout, "A01");
        place(&mut s, PlayerId::A, AgentType::Sergeant, "C01");

        assert_eq!(mark_current_player(&mut s), Err(RuleError::NoActiveCard));

        s.turn.active_card = Some(Card::new(AgentType::Sniper));
        assert_eq!(
            mark_current_player(&mut s),
            Err(RuleError::ActiveCardMismatch(AgentType::Sniper))
        );
        assert_eq!(
            claim_control_current_player(&mut s),
            Err(RuleError::ActiveCardMismatch(AgentType::Sniper))
        );

        s.turn.active_card = Some(Card::new(AgentType::Scout));
        mark_current_player(&mut s).expect("scout card marks");

        s.turn.active_card = Some(Card::new(AgentType::Sergeant));
        claim_control_current_player(&mut s).expect("sergeant card claims");
    }
}
