//! Turn-level deck operations: draw, recycle, switch, count, burn

use crate::core::error::RuleError;
use crate::core::types::{AgentType, Card, GameStatus};
use crate::game::state::{GameState, Player};

/// Draw the front card of the current player's pile and make it active.
pub fn draw_active_card(state: &mut GameState) -> Result<Card, RuleError> {
    if state.status != GameStatus::InProgress {
        return Err(RuleError::GameFinished);
    }
    if state.turn.active_card.is_some() {
        return Err(RuleError::CardAlreadyActive);
    }

    let player_id = state.turn.current_player;
    let card = state
        .player_mut(player_id)
        .deck
        .draw()
        .ok_or(RuleError::DrawPileEmpty(player_id))?;

    state.turn.active_card = Some(card);
    Ok(card)
}

/// Recycle the active card to the back of the pile, flip the current player,
/// and advance the turn counter. Phase gating (an action must have been
/// spent) lives in the session layer.
pub fn end_turn(state: &mut GameState) -> Result<(), RuleError> {
    if state.status != GameStatus::InProgress {
        return Err(RuleError::GameFinished);
    }
    let card = state.turn.active_card.ok_or(RuleError::NoActiveCard)?;

    let player_id = state.turn.current_player;
    state.player_mut(player_id).deck.recycle(card);
    state.turn.active_card = None;
    state.turn.current_player = player_id.opponent();
    state.turn.turn_index += 1;
    Ok(())
}

/// Rotation the switch walks, starting just after `current`.
fn switch_order_from(current: AgentType) -> [AgentType; 2] {
    let start = current.index();
    [
        AgentType::ALL[(start + 1) % 3],
        AgentType::ALL[(start + 2) % 3],
    ]
}

fn agent_usable(player: &Player, kind: AgentType) -> bool {
    let agent = player.agent(kind);
    agent.alive && agent.is_placed()
}

/// Swap the active card for the first card of the next usable agent kind in
/// rotation order. The previous active card goes to the back of the pile.
pub fn switch_active_agent(state: &mut GameState) -> Result<AgentType, RuleError> {
    if state.status != GameStatus::InProgress {
        return Err(RuleError::GameFinished);
    }
    let active = state.turn.active_card.ok_or(RuleError::NoActiveCard)?;

    let player_id = state.turn.current_player;
    let player = state.player(player_id);

    let mut replacement_index = None;
    for next_kind in switch_order_from(active.agent) {
        if !agent_usable(player, next_kind) {
            continue;
        }
        if let Some(index) = player.deck.first_index_of(next_kind) {
            replacement_index = Some(index);
            break;
        }
    }

    let index = replacement_index.ok_or(RuleError::NoSwitchCandidate)?;
    let player = state.player_mut(player_id);
    let replacement = player.deck.take_at(index);
    player.deck.recycle(active);
    state.turn.active_card = Some(replacement);
    Ok(replacement.agent)
}

/// Cards of `kind` still available to `player`. The active card is not
/// counted: the only deck queried mid-combat belongs to the off-turn player,
/// whose cards are all in the pile.
pub fn card_count(player: &Player, kind: AgentType) -> usize {
    player.deck.count(kind)
}

/// Permanently remove one card of `kind` from `player`'s pool.
pub fn burn_card(player: &mut Player, kind: AgentType) -> Result<(), RuleError> {
    if player.deck.burn(kind) {
        Ok(())
    } else {
        Err(RuleError::NoCardToBurn {
            owner: player.id,
            kind,
        })
    }
}
