//! Transactional scenario loader
//!
//! A scenario file seeds the battlefield: one directive per line, shaped
//! `CELL:OWNER,TOKEN`. The token is either an agent kind to place or one of
//! the `mark` / `control` keywords. Loads are all-or-nothing: any bad line
//! clears the battlefield back to its pre-load blank state.

use std::fs;
use std::path::Path;

use crate::core::error::LoadError;
use crate::core::types::{AgentType, PlayerId};
use crate::game::state::GameState;
use crate::game::victory;

fn parse_owner(raw: &str) -> Option<PlayerId> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "A" => Some(PlayerId::A),
        "B" => Some(PlayerId::B),
        _ => None,
    }
}

/// Agent token, tolerant of the misspellings found in circulating scenario
/// files.
fn parse_agent_token(raw: &str) -> Option<AgentType> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "scout" => Some(AgentType::Scout),
        "sniper" => Some(AgentType::Sniper),
        "sergeant" | "seregent" | "seargeant" => Some(AgentType::Sergeant),
        _ => None,
    }
}

/// Wipe all scenario-applied state: marks, control, occupants, placements.
pub fn clear_battlefield(state: &mut GameState) {
    state.board.reset_battle_state();
    for player in [PlayerId::A, PlayerId::B] {
        for agent in &mut state.player_mut(player).agents {
            agent.reset();
        }
    }
}

fn place_agent(
    state: &mut GameState,
    owner: PlayerId,
    kind: AgentType,
    cell_id: &str,
) -> Result<(), String> {
    let index = state
        .board
        .index_of(cell_id)
        .ok_or_else(|| format!("unknown cell: {cell_id}"))?;
    if state.board.cell_at(index).is_occupied() {
        return Err(format!("cell is already occupied: {cell_id}"));
    }
    if let Some(existing) = &state.player(owner).agent(kind).cell {
        return Err(format!(
            "{kind} for player {owner} is already placed at {existing}"
        ));
    }

    state.board.cell_at_mut(index).set_occupant(owner, kind);
    let agent = state.player_mut(owner).agent_mut(kind);
    agent.cell = Some(cell_id.to_string());
    agent.alive = true;
    agent.hp = kind.max_hp();
    Ok(())
}

fn apply_mark(state: &mut GameState, owner: PlayerId, cell_id: &str) -> Result<(), String> {
    let cell = state
        .board
        .cell_mut(cell_id)
        .ok_or_else(|| format!("unknown cell: {cell_id}"))?;
    cell.set_mark(owner);
    Ok(())
}

fn apply_control(state: &mut GameState, owner: PlayerId, cell_id: &str) -> Result<(), String> {
    let cell = state
        .board
        .cell_mut(cell_id)
        .ok_or_else(|| format!("unknown cell: {cell_id}"))?;
    cell.controlled_by = Some(owner);
    Ok(())
}

fn apply_line(state: &mut GameState, raw: &str) -> Result<(), String> {
    let (cell_id, rhs) = raw
        .split_once(':')
        .ok_or_else(|| format!("malformed directive: {raw}"))?;
    let cell_id = cell_id.trim();

    let (owner_raw, token) = rhs
        .split_once(',')
        .ok_or_else(|| format!("malformed directive: {raw}"))?;
    let owner =
        parse_owner(owner_raw).ok_or_else(|| format!("invalid owner: {}", owner_raw.trim()))?;
    let token = token.trim();

    match token.to_ascii_lowercase().as_str() {
        "mark" => apply_mark(state, owner, cell_id),
        "control" => apply_control(state, owner, cell_id),
        _ => {
            let kind =
                parse_agent_token(token).ok_or_else(|| format!("invalid token: {token}"))?;
            place_agent(state, owner, kind, cell_id)
        }
    }
}

/// Apply scenario text to `state`. The board must already be loaded. On any
/// error the battlefield is cleared, never left half-applied.
pub fn load_scenario(state: &mut GameState, text: &str) -> Result<(), LoadError> {
    if state.board.is_empty() {
        return Err(LoadError::BoardNotLoaded);
    }

    clear_battlefield(state);

    for (number, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if let Err(reason) = apply_line(state, line) {
            clear_battlefield(state);
            return Err(LoadError::ScenarioLine {
                line: number + 1,
                reason,
            });
        }
    }

    let all_placed = [PlayerId::A, PlayerId::B].iter().all(|&player| {
        AgentType::ALL
            .iter()
            .all(|&kind| state.player(player).agent(kind).is_placed())
    });
    if !all_placed {
        clear_battlefield(state);
        return Err(LoadError::AgentsMissing);
    }

    victory::update_status(state);
    tracing::info!("scenario applied");
    Ok(())
}

/// Load and apply a scenario file from disk.
pub fn load_scenario_file(state: &mut GameState, path: &Path) -> Result<(), LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::FileOpen {
        path: path.display().to_string(),
        source,
    })?;
    load_scenario(state, &text)
}
