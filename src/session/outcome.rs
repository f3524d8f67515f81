//! How a session ended and who won
//!
//! Leaving (`exit`) and dropping the connection are both forfeits: the
//! player who left loses and the one still present wins.

use serde::{Deserialize, Serialize};

use crate::core::types::Side;
use crate::session::battle::Battle;

/// The single event that terminated a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    KingDestroyed { winner: Side },
    Forfeit { quitter: Side },
    Disconnected { side: Side },
    TimeUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Winner(Side),
    Draw,
}

impl Verdict {
    pub fn winner(self) -> Option<Side> {
        match self {
            Verdict::Winner(side) => Some(side),
            Verdict::Draw => None,
        }
    }
}

/// Decide the verdict; on timeout the side with more kills wins
pub fn decide(reason: EndReason, battle: &Battle) -> Verdict {
    match reason {
        EndReason::KingDestroyed { winner } => Verdict::Winner(winner),
        EndReason::Forfeit { quitter } => Verdict::Winner(quitter.opponent()),
        EndReason::Disconnected { side } => Verdict::Winner(side.opponent()),
        EndReason::TimeUp => {
            let by_a = battle.towers_destroyed_by(Side::A);
            let by_b = battle.towers_destroyed_by(Side::B);
            match by_a.cmp(&by_b) {
                std::cmp::Ordering::Greater => Verdict::Winner(Side::A),
                std::cmp::Ordering::Less => Verdict::Winner(Side::B),
                std::cmp::Ordering::Equal => Verdict::Draw,
            }
        }
    }
}

/// Final message for the player in seat `side`
pub fn final_notice(reason: EndReason, verdict: Verdict, side: Side) -> &'static str {
    let won = verdict.winner() == Some(side);
    match reason {
        EndReason::KingDestroyed { .. } if won => "You destroyed the King Tower! You win!",
        EndReason::KingDestroyed { .. } => "Your King Tower was destroyed. You lose.",
        EndReason::Forfeit { .. } if won => "Opponent exited. Game over. You win!",
        EndReason::Forfeit { .. } => "You exited the game. You lose.",
        EndReason::Disconnected { .. } if won => "Opponent disconnected. Game over. You win!",
        EndReason::Disconnected { .. } => "Connection lost. You lose.",
        EndReason::TimeUp => match verdict {
            Verdict::Draw => "Time's up! It's a draw.",
            Verdict::Winner(_) if won => "Time's up! You win by destroying more towers.",
            Verdict::Winner(_) => "Time's up! You lose.",
        },
    }
}
