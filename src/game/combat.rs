//! Dice combat resolution
//!
//! An attack rolls the attacker's dice against a threshold built from the
//! shortest-path shields between the two cells plus the target's hit points.
//! Any single die at or above the threshold is a hit.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::board::path_shield_sum;
use crate::core::error::RuleError;
use crate::core::types::{AgentType, GameStatus, PlayerId};
use crate::game::constants::{DIE_SIDES, THRESHOLD_MAX, THRESHOLD_MIN};
use crate::game::state::GameState;
use crate::game::turn;
use crate::game::victory;

/// Full record of one attack attempt, rejected or resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackResult {
    /// False when a precondition failed and nothing was rolled.
    pub executed: bool,
    /// At least one die met the threshold.
    pub success: bool,
    /// A card of the target's kind left the defender's pool.
    pub card_burned: bool,
    pub target_eliminated: bool,
    pub threshold: u32,
    pub rolls: Vec<u32>,
    pub attacker_owner: PlayerId,
    pub attacker_kind: AgentType,
    pub target_owner: Option<PlayerId>,
    pub target_kind: Option<AgentType>,
    pub target_cell: String,
    pub error: Option<RuleError>,
}

impl AttackResult {
    fn rejected(
        error: RuleError,
        attacker_owner: PlayerId,
        attacker_kind: AgentType,
        target_cell: &str,
    ) -> Self {
        Self {
            executed: false,
            success: false,
            card_burned: false,
            target_eliminated: false,
            threshold: 0,
            rolls: Vec::new(),
            attacker_owner,
            attacker_kind,
            target_owner: None,
            target_kind: None,
            target_cell: target_cell.to_string(),
            error: Some(error),
        }
    }
}

/// The enemy agent kind standing on `cell_id`, from `attacker`'s side.
fn resolve_target(
    state: &GameState,
    attacker: PlayerId,
    cell_id: &str,
) -> Result<(PlayerId, AgentType), RuleError> {
    let cell = state
        .board
        .cell(cell_id)
        .ok_or_else(|| RuleError::UnknownCell(cell_id.to_string()))?;
    let defender = attacker.opponent();
    let kind = cell
        .occupant(defender)
        .ok_or_else(|| RuleError::NoEnemyOnCell(cell_id.to_string()))?;
    Ok((defender, kind))
}

/// Check every attack precondition in order, returning the first failure.
pub fn can_attack(
    state: &GameState,
    owner: PlayerId,
    kind: AgentType,
    target_cell: &str,
) -> Result<(), RuleError> {
    if state.status != GameStatus::InProgress {
        return Err(RuleError::GameFinished);
    }

    let agent = state.player(owner).agent(kind);
    if !agent.alive {
        return Err(RuleError::AgentDead(kind));
    }
    let from_id = agent.cell.as_deref().ok_or(RuleError::AgentNotPlaced(kind))?;

    let (defender, target_kind) = resolve_target(state, owner, target_cell)?;
    if state.board.shortest_path(from_id, target_cell).is_empty() {
        return Err(RuleError::NoPath);
    }

    if turn::card_count(state.player(defender), target_kind) == 0 {
        return Err(RuleError::TargetOutOfCards);
    }
    Ok(())
}

/// Threshold for an attack from `owner`'s agent onto `target_cell`: inner
/// path shields plus target hp, clamped to the die range.
pub fn attack_threshold(
    state: &GameState,
    owner: PlayerId,
    kind: AgentType,
    target_cell: &str,
) -> Result<u32, RuleError> {
    let agent = state.player(owner).agent(kind);
    let from_id = agent.cell.as_deref().ok_or(RuleError::AgentNotPlaced(kind))?;

    let (defender, target_kind) = resolve_target(state, owner, target_cell)?;
    let target_hp = state.player(defender).agent(target_kind).hp;

    let path = state.board.shortest_path(from_id, target_cell);
    if path.is_empty() {
        return Err(RuleError::NoPath);
    }

    let shields = path_shield_sum(&path, true);
    Ok((shields + target_hp).clamp(THRESHOLD_MIN, THRESHOLD_MAX))
}

/// Resolve one attack. Precondition failures come back in the result rather
/// than as an `Err`, so the caller always gets the full record.
pub fn attack(
    state: &mut GameState,
    rng: &mut ChaCha8Rng,
    owner: PlayerId,
    kind: AgentType,
    target_cell: &str,
) -> AttackResult {
    if let Err(error) = can_attack(state, owner, kind, target_cell) {
        return AttackResult::rejected(error, owner, kind, target_cell);
    }

    // can_attack guarantees these resolve.
    let Ok((defender, target_kind)) = resolve_target(state, owner, target_cell) else {
        return AttackResult::rejected(
            RuleError::NoEnemyOnCell(target_cell.to_string()),
            owner,
            kind,
            target_cell,
        );
    };
    let Ok(threshold) = attack_threshold(state, owner, kind, target_cell) else {
        return AttackResult::rejected(RuleError::NoPath, owner, kind, target_cell);
    };

    let rolls: Vec<u32> = (0..kind.attack_dice())
        .map(|_| rng.gen_range(1..=DIE_SIDES))
        .collect();
    let success = rolls.iter().any(|&roll| roll >= threshold);

    let mut result = AttackResult {
        executed: true,
        success,
        card_burned: false,
        target_eliminated: false,
        threshold,
        rolls,
        attacker_owner: owner,
        attacker_kind: kind,
        target_owner: Some(defender),
        target_kind: Some(target_kind),
        target_cell: target_cell.to_string(),
        error: None,
    };

    if success {
        match turn::burn_card(state.player_mut(defender), target_kind) {
            Ok(()) => {
                result.card_burned = true;
                let target = state.player_mut(defender).agent_mut(target_kind);
                if target.hp > 0 {
                    target.hp -= 1;
                }
                if turn::card_count(state.player(defender), target_kind) == 0 {
                    eliminate(state, defender, target_kind, target_cell);
                    result.target_eliminated = true;
                }
                victory::update_status(state);
            }
            // Guarded against by can_attack; still recorded, never swallowed.
            Err(error) => result.error = Some(error),
        }
    }

    tracing::debug!(
        attacker = %owner,
        kind = %kind,
        target = %target_cell,
        threshold = result.threshold,
        hit = result.success,
        eliminated = result.target_eliminated,
        "attack resolved"
    );
    result
}

/// Attack with whoever's turn it is, using the active card's agent kind.
pub fn attack_current_player(
    state: &mut GameState,
    rng: &mut ChaCha8Rng,
    target_cell: &str,
) -> AttackResult {
    let owner = state.turn.current_player;
    let Some(card) = state.turn.active_card else {
        return AttackResult::rejected(
            RuleError::NoActiveCard,
            owner,
            AgentType::Scout,
            target_cell,
        );
    };
    attack(state, rng, owner, card.agent, target_cell)
}

/// Permanent removal: the agent leaves the board and cannot come back.
fn eliminate(state: &mut GameState, owner: PlayerId, kind: AgentType, cell_id: &str) {
    if let Some(cell) = state.board.cell_mut(cell_id) {
        cell.clear_occupant(owner);
    }
    let agent = state.player_mut(owner).agent_mut(kind);
    agent.alive = false;
    agent.hp = 0;
    agent.cell = None;
    tracing::info!(%owner, %kind, "agent eliminated");
}
