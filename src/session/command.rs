//! Player commands and their text form

use serde::{Deserialize, Serialize};

/// One player order against the running battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Move { target: String },
    Attack { target: String },
    Mark,
    ClaimControl,
    ReleaseControl,
    SwitchAgent,
    EndTurn,
}

impl Command {
    /// Parse a console line. Cell ids are normalized to uppercase so `move
    /// b02` works. Returns `None` for anything unrecognized.
    pub fn parse(input: &str) -> Option<Command> {
        let mut parts = input.split_whitespace();
        let verb = parts.next()?.to_ascii_lowercase();
        let arg = parts.next();
        if parts.next().is_some() {
            return None;
        }

        match (verb.as_str(), arg) {
            ("move", Some(cell)) => Some(Command::Move {
                target: cell.to_ascii_uppercase(),
            }),
            ("attack", Some(cell)) => Some(Command::Attack {
                target: cell.to_ascii_uppercase(),
            }),
            ("mark", None) => Some(Command::Mark),
            ("control" | "claim", None) => Some(Command::ClaimControl),
            ("release", None) => Some(Command::ReleaseControl),
            ("switch", None) => Some(Command::SwitchAgent),
            ("end" | "endturn", None) => Some(Command::EndTurn),
            _ => None,
        }
    }
}
