//! Battle session: one-action-per-turn gating over the rules layer
//!
//! The session owns the game state and the RNG, enforces the turn economy
//! (draw, one primary action, end turn), and renders command outcomes as
//! player-facing text. The rules modules stay free of any phase bookkeeping.

pub mod command;

use std::path::Path;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::board::Board;
use crate::core::error::{EngineError, RuleError};
use crate::core::types::{AgentType, GameStatus, PlayerId};
use crate::game::combat::{self, AttackResult};
use crate::game::state::GameState;
use crate::game::{movement, tactics, turn, victory};
use crate::scenario;

pub use command::Command;

/// Outcome of one executed command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub ok: bool,
    pub message: String,
    /// Full combat record when the command was an attack that rolled dice.
    pub attack: Option<AttackResult>,
}

impl CommandResult {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
            attack: None,
        }
    }

    fn failure(error: RuleError) -> Self {
        Self {
            ok: false,
            message: error.to_string(),
            attack: None,
        }
    }
}

pub struct Session {
    state: GameState,
    rng: ChaCha8Rng,
    action_used: bool,
    loaded: bool,
}

impl Session {
    /// Session with a seeded RNG; the same seed replays the same battle.
    pub fn new(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_rng(mut rng: ChaCha8Rng) -> Self {
        let state = GameState::new("A", "B", &mut rng);
        Self {
            state,
            rng,
            action_used: false,
            loaded: false,
        }
    }

    /// Build a fresh battle: new state and decks, board from `board_path`,
    /// optional scenario, then the first card drawn. On error the session
    /// stays unloaded.
    pub fn start_battle(
        &mut self,
        name_a: &str,
        name_b: &str,
        board_path: &Path,
        scenario_path: Option<&Path>,
    ) -> Result<(), EngineError> {
        self.loaded = false;
        self.action_used = false;
        self.state = GameState::new(name_a, name_b, &mut self.rng);
        self.state.board = Board::from_map_file(board_path)?;

        match scenario_path {
            Some(path) => scenario::load_scenario_file(&mut self.state, path)?,
            None => {
                scenario::clear_battlefield(&mut self.state);
                victory::update_status(&mut self.state);
            }
        }

        if self.state.status == GameStatus::InProgress {
            turn::draw_active_card(&mut self.state)?;
        }

        self.loaded = true;
        tracing::info!(board = %board_path.display(), "battle started");
        Ok(())
    }

    fn can_use_primary_action(&self) -> Result<(), RuleError> {
        if self.state.status != GameStatus::InProgress {
            return Err(RuleError::GameFinished);
        }
        if self.state.turn.active_card.is_none() {
            return Err(RuleError::NoActiveCard);
        }
        if self.action_used {
            return Err(RuleError::ActionAlreadyUsed);
        }
        Ok(())
    }

    fn can_switch_agent(&self) -> Result<(), RuleError> {
        // Switching counts as free, but only before the action is spent.
        self.can_use_primary_action()
    }

    fn can_end_turn(&self) -> Result<(), RuleError> {
        if self.state.status != GameStatus::InProgress {
            return Err(RuleError::GameFinished);
        }
        if self.state.turn.active_card.is_none() {
            return Err(RuleError::NoActiveCard);
        }
        if !self.action_used {
            return Err(RuleError::ActionNotUsed);
        }
        Ok(())
    }

    fn active_kind(&self) -> Result<AgentType, RuleError> {
        self.state
            .turn
            .active_card
            .map(|card| card.agent)
            .ok_or(RuleError::NoActiveCard)
    }

    /// Run one command against the battle and report the outcome as text.
    pub fn execute(&mut self, command: &Command) -> CommandResult {
        if !self.loaded {
            return CommandResult::failure(RuleError::BattleNotLoaded);
        }

        match command {
            Command::Move { target } => self.execute_move(target),
            Command::Attack { target } => self.execute_attack(target),
            Command::Mark => self.execute_mark(),
            Command::ClaimControl => self.execute_claim(),
            Command::ReleaseControl => self.execute_release(),
            Command::SwitchAgent => self.execute_switch(),
            Command::EndTurn => self.execute_end_turn(),
        }
    }

    fn execute_move(&mut self, target: &str) -> CommandResult {
        if let Err(error) = self.can_use_primary_action() {
            return CommandResult::failure(error);
        }
        let kind = match self.active_kind() {
            Ok(kind) => kind,
            Err(error) => return CommandResult::failure(error),
        };
        if let Err(error) = movement::move_current_player(&mut self.state, kind, target) {
            return CommandResult::failure(error);
        }
        self.action_used = true;
        CommandResult::success(format!("{kind} moved to {target}."))
    }

    fn execute_attack(&mut self, target: &str) -> CommandResult {
        if let Err(error) = self.can_use_primary_action() {
            return CommandResult::failure(error);
        }

        let result = combat::attack_current_player(&mut self.state, &mut self.rng, target);
        if !result.executed {
            let error = result
                .error
                .clone()
                .unwrap_or(RuleError::NoEnemyOnCell(target.to_string()));
            return CommandResult {
                ok: false,
                message: error.to_string(),
                attack: Some(result),
            };
        }

        let rolls = result
            .rolls
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let mut message = format!("Attack threshold {} | Rolls: [{rolls}]", result.threshold);
        if result.success {
            message.push_str(" | Hit");
            if result.target_eliminated {
                if let Some(kind) = result.target_kind {
                    message.push_str(&format!(" | Enemy {kind} eliminated"));
                }
            }
        } else {
            message.push_str(" | Miss");
        }
        if let Some(winner) = self.state.status.winner() {
            message.push_str(&format!(" | Winner: {winner}"));
        }

        self.action_used = true;
        CommandResult {
            ok: true,
            message,
            attack: Some(result),
        }
    }

    fn execute_mark(&mut self) -> CommandResult {
        if let Err(error) = self.can_use_primary_action() {
            return CommandResult::failure(error);
        }
        match tactics::mark_current_player(&mut self.state) {
            Ok(cell) => {
                self.action_used = true;
                CommandResult::success(format!("Scout marked {cell}."))
            }
            Err(error) => CommandResult::failure(error),
        }
    }

    fn execute_claim(&mut self) -> CommandResult {
        if let Err(error) = self.can_use_primary_action() {
            return CommandResult::failure(error);
        }
        match tactics::claim_control_current_player(&mut self.state) {
            Ok(cell) => {
                self.action_used = true;
                let mut message = format!("Sergeant took control of {cell}.");
                if let Some(winner) = self.state.status.winner() {
                    message.push_str(&format!(" Winner: {winner}"));
                }
                CommandResult::success(message)
            }
            Err(error) => CommandResult::failure(error),
        }
    }

    fn execute_release(&mut self) -> CommandResult {
        if let Err(error) = self.can_use_primary_action() {
            return CommandResult::failure(error);
        }
        match tactics::release_control_current_player(&mut self.state) {
            Ok(cell) => {
                self.action_used = true;
                CommandResult::success(format!("Sergeant released {cell}."))
            }
            Err(error) => CommandResult::failure(error),
        }
    }

    fn execute_switch(&mut self) -> CommandResult {
        if let Err(error) = self.can_switch_agent() {
            return CommandResult::failure(error);
        }
        match turn::switch_active_agent(&mut self.state) {
            Ok(kind) => CommandResult::success(format!("Active agent switched to {kind}.")),
            Err(error) => CommandResult::failure(error),
        }
    }

    fn execute_end_turn(&mut self) -> CommandResult {
        if let Err(error) = self.can_end_turn() {
            return CommandResult::failure(error);
        }
        if let Err(error) = turn::end_turn(&mut self.state) {
            return CommandResult::failure(error);
        }
        self.action_used = false;

        if self.state.status != GameStatus::InProgress {
            return match self.state.status.winner() {
                Some(winner) => CommandResult::success(format!("Winner: {winner}")),
                None => CommandResult::success("Game finished."),
            };
        }

        if let Err(error) = turn::draw_active_card(&mut self.state) {
            return CommandResult::failure(error);
        }
        CommandResult::success(format!(
            "Turn passed to {}.",
            self.state.turn.current_player
        ))
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn action_used(&self) -> bool {
        self.action_used
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn current_player(&self) -> PlayerId {
        self.state.turn.current_player
    }

    pub fn active_card_kind(&self) -> Option<AgentType> {
        self.state.turn.active_card.map(|card| card.agent)
    }

    pub fn controlled_cells(&self, player: PlayerId) -> usize {
        victory::controlled_cell_count(&self.state, player)
    }

    pub fn alive_agents(&self, player: PlayerId) -> usize {
        self.state.player(player).alive_agents()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Card;

    const MAP: &str = "\
|A01:0|A02:0|A03:0
 |B01:0|B02:0|B03:0
|C01:0|C02:0|C03:0
";

    fn loaded_session() -> Session {
        let mut session = Session::new(42);
        session.state.board = Board::parse(MAP, "test").expect("map parses");
        let scenario_text = "\
A01:A,scout
A02:A,sniper
A03:A,sergeant
C01:B,scout
C02:B,sniper
C03:B,sergeant
";
        scenario::load_scenario(&mut session.state, scenario_text).expect("scenario loads");
        turn::draw_active_card(&mut session.state).expect("first draw");
        session.loaded = true;
        session
    }

    #[test]
    fn test_unloaded_session_rejects_commands() {
        let mut session = Session::new(1);
        let result = session.execute(&Command::EndTurn);
        assert!(!result.ok);
        assert_eq!(result.message, RuleError::BattleNotLoaded.to_string());
    }

    #[test]
    fn test_end_turn_requires_an_action() {
        let mut session = loaded_session();
        let result = session.execute(&Command::EndTurn);
        assert!(!result.ok);
        assert_eq!(result.message, RuleError::ActionNotUsed.to_string());
    }

    #[test]
    fn test_move_spends_the_action_and_turn_passes() {
        let mut session = loaded_session();
        // Make the active card a scout so the move is unrestricted.
        session.state.turn.active_card = Some(Card::new(AgentType::Scout));

        let result = session.execute(&Command::Move {
            target: "B01".into(),
        });
        assert!(result.ok, "{}", result.message);
        assert!(session.action_used());

        // Second primary action is rejected.
        let again = session.execute(&Command::Move {
            target: "A01".into(),
        });
        assert!(!again.ok);
        assert_eq!(again.message, RuleError::ActionAlreadyUsed.to_string());

        let end = session.execute(&Command::EndTurn);
        assert!(end.ok);
        assert_eq!(end.message, "Turn passed to B.");
        assert_eq!(session.current_player(), PlayerId::B);
        assert!(session.active_card_kind().is_some());
        assert!(!session.action_used());
    }

    #[test]
    fn test_switch_rejected_after_action() {
        let mut session = loaded_session();
        session.state.turn.active_card = Some(Card::new(AgentType::Scout));
        let moved = session.execute(&Command::Move {
            target: "B01".into(),
        });
        assert!(moved.ok, "{}", moved.message);

        let result = session.execute(&Command::SwitchAgent);
        assert!(!result.ok);
        assert_eq!(result.message, RuleError::ActionAlreadyUsed.to_string());
    }

    #[test]
    fn test_switch_is_free_before_action() {
        let mut session = loaded_session();
        session.state.turn.active_card = Some(Card::new(AgentType::Scout));
        session.state.player_a.deck.draw_pile = vec![
            Card::new(AgentType::Sniper),
            Card::new(AgentType::Scout),
        ];

        let result = session.execute(&Command::SwitchAgent);
        assert!(result.ok, "{}", result.message);
        assert_eq!(result.message, "Active agent switched to Sniper.");
        assert!(!session.action_used());
    }

    #[test]
    fn test_mark_requires_scout_card() {
        let mut session = loaded_session();
        session.state.turn.active_card = Some(Card::new(AgentType::Sniper));
        let result = session.execute(&Command::Mark);
        assert!(!result.ok);
        assert_eq!(
            result.message,
            RuleError::ActiveCardMismatch(AgentType::Sniper).to_string()
        );
    }

    #[test]
    fn test_attack_reports_rolls_and_threshold() {
        let mut session = loaded_session();
        session.state.turn.active_card = Some(Card::new(AgentType::Sniper));
        // Sniper on A02 can see B's scout two cells away on C01; force a
        // threshold-1 shot by dropping the scout to 1 hp.
        session.state.player_b.agent_mut(AgentType::Scout).hp = 1;

        let result = session.execute(&Command::Attack {
            target: "C01".into(),
        });
        assert!(result.ok, "{}", result.message);
        let record = result.attack.expect("attack record present");
        assert!(record.executed);
        assert_eq!(record.threshold, 1);
        assert!(record.success);
        assert!(result.message.starts_with("Attack threshold 1 | Rolls: ["));
        assert!(result.message.contains("| Hit"));
        assert!(session.action_used());
    }

    #[test]
    fn test_attack_failure_does_not_spend_action() {
        let mut session = loaded_session();
        session.state.turn.active_card = Some(Card::new(AgentType::Scout));
        let result = session.execute(&Command::Attack {
            target: "B02".into(),
        });
        assert!(!result.ok);
        assert!(!session.action_used());
    }

    #[test]
    fn test_commands_rejected_after_victory() {
        let mut session = loaded_session();
        session.state.status = GameStatus::WonByA;
        for command in [
            Command::Move {
                target: "B01".into(),
            },
            Command::Mark,
            Command::SwitchAgent,
            Command::EndTurn,
        ] {
            let result = session.execute(&command);
            assert!(!result.ok);
            assert_eq!(result.message, RuleError::GameFinished.to_string());
        }
    }
}
