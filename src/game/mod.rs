//! Battle rules: state, turn economy, movement, combat, tactics, victory

pub mod behavior;
pub mod combat;
pub mod constants;
pub mod deck;
pub mod movement;
pub mod state;
pub mod tactics;
pub mod turn;
pub mod victory;

pub use behavior::SpecialAction;
pub use combat::AttackResult;
pub use deck::Deck;
pub use state::{Agent, GameState, Player, TurnState};
