//! Victory evaluation
//!
//! Two ways to win: control enough cells, or outlive the other side.
//! Terminal status is sticky; once a winner is recorded it never reverts.

use crate::core::types::{GameStatus, PlayerId};
use crate::game::constants::CONTROL_WIN_COUNT;
use crate::game::state::GameState;

/// Cells currently controlled by `player`.
pub fn controlled_cell_count(state: &GameState, player: PlayerId) -> usize {
    state
        .board
        .cells()
        .iter()
        .filter(|c| c.controlled_by == Some(player))
        .count()
}

/// Compute the status the battlefield implies right now, without looking at
/// the recorded status. Control wins take precedence over eliminations.
pub fn evaluate_status(state: &GameState) -> GameStatus {
    if controlled_cell_count(state, PlayerId::A) >= CONTROL_WIN_COUNT {
        return GameStatus::WonByA;
    }
    if controlled_cell_count(state, PlayerId::B) >= CONTROL_WIN_COUNT {
        return GameStatus::WonByB;
    }

    let alive_a = state.player_a.alive_agents();
    let alive_b = state.player_b.alive_agents();
    // TODO: decide whether simultaneous elimination should be a draw.
    if alive_a == 0 && alive_b == 0 {
        return GameStatus::InProgress;
    }
    if alive_a == 0 {
        return GameStatus::WonByB;
    }
    if alive_b == 0 {
        return GameStatus::WonByA;
    }
    GameStatus::InProgress
}

/// Re-evaluate and record the status. Returns true when the battle just
/// ended. A finished battle stays finished regardless of later mutations.
pub fn update_status(state: &mut GameState) -> bool {
    if state.status != GameStatus::InProgress {
        return false;
    }
    let next = evaluate_status(state);
    if next == state.status {
        return false;
    }
    state.status = next;
    if let Some(winner) = next.winner() {
        tracing::info!(%winner, "battle decided");
    }
    true
}
