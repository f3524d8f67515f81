//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a battle session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which of the two seats a participant occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::A, Side::B];

    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }

    /// 1-based seat number shown to players
    pub fn seat(self) -> u8 {
        self.index() as u8 + 1
    }
}

/// Persisted progression of a player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    pub level: u32,
    pub exp: u32,
}

impl Profile {
    pub fn new(username: impl Into<String>, level: u32, exp: u32) -> Self {
        Self {
            username: username.into(),
            level,
            exp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_is_involution() {
        for side in Side::BOTH {
            assert_ne!(side, side.opponent());
            assert_eq!(side, side.opponent().opponent());
        }
    }

    #[test]
    fn test_seat_numbers() {
        assert_eq!(Side::A.seat(), 1);
        assert_eq!(Side::B.seat(), 2);
    }
}
