//! Towers - the targets of every attack

use crate::arena::stats::TowerStats;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier a player types to target a tower
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerId {
    King,
    Guard1,
    Guard2,
}

impl TowerId {
    /// All towers in position order
    pub const ALL: [TowerId; 3] = [TowerId::King, TowerId::Guard1, TowerId::Guard2];

    /// Parse the wire form ("K", "G1", "G2"), case-sensitive
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "K" => Some(TowerId::King),
            "G1" => Some(TowerId::Guard1),
            "G2" => Some(TowerId::Guard2),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            TowerId::King => "K",
            TowerId::Guard1 => "G1",
            TowerId::Guard2 => "G2",
        }
    }

    /// Slot in a participant's tower array; doubles as the board position
    pub fn index(self) -> usize {
        match self {
            TowerId::King => 0,
            TowerId::Guard1 => 1,
            TowerId::Guard2 => 2,
        }
    }

    pub fn kind(self) -> TowerKind {
        match self {
            TowerId::King => TowerKind::King,
            TowerId::Guard1 | TowerId::Guard2 => TowerKind::Guard,
        }
    }
}

impl fmt::Display for TowerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TowerKind {
    King,
    Guard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tower {
    pub id: TowerId,
    pub kind: TowerKind,
    pub position: u8,
    pub stats: TowerStats,
    alive: bool,
}

impl Tower {
    pub fn new(id: TowerId, stats: TowerStats) -> Self {
        Self {
            id,
            kind: id.kind(),
            position: id.index() as u8,
            stats,
            alive: true,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Subtract damage, clamping HP at zero
    ///
    /// Returns true only on the hit that destroys the tower. `alive` never
    /// flips back.
    pub fn take_damage(&mut self, damage: u32) -> bool {
        self.stats.hp = self.stats.hp.saturating_sub(damage);
        if self.alive && self.stats.hp == 0 {
            self.alive = false;
            return true;
        }
        false
    }
}
