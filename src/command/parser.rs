//! Command parsing - turns one input line into a player command

use thiserror::Error;

use crate::arena::tower::TowerId;

/// Literal that ends the session for whoever sends it
pub const EXIT_COMMAND: &str = "exit";

/// A parsed player command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `<TroopName> <TowerID>`; tokens are kept verbatim for validation
    Attack { troop: String, tower: String },
    Exit,
}

/// Rejected move; the `Display` text is what the player sees
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("Invalid move format. Use 'TroopName TowerType'.")]
    InvalidFormat,

    #[error("Invalid attack, Troop {0} not found.")]
    TroopNotFound(String),

    #[error("Invalid attack, Target tower {0} not found.")]
    TowerNotFound(String),

    #[error("Invalid attack, Tower {0} is already destroyed.")]
    TowerDestroyed(TowerId),

    #[error("Invalid attack, you must destroy Guard Tower 1 before attacking Guard Tower 2.")]
    FirstGuardStanding,

    #[error("Invalid attack, You must destroy both Guard Towers before attacking the King Tower.")]
    GuardsStanding,
}

/// Parse one line of input
///
/// `exit` must match exactly after trimming; anything else has to be two
/// whitespace-separated tokens.
pub fn parse_command(line: &str) -> Result<Command, MoveError> {
    let line = line.trim();
    if line == EXIT_COMMAND {
        return Ok(Command::Exit);
    }

    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(troop), Some(tower), None) => Ok(Command::Attack {
            troop: troop.to_string(),
            tower: tower.to_string(),
        }),
        _ => Err(MoveError::InvalidFormat),
    }
}
