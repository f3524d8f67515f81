//! Troop cards and the hand a participant holds

use crate::arena::stats::TroopStats;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TroopKind {
    Pawn,
    Bishop,
    Rook,
    Knight,
    Prince,
    Queen,
}

impl TroopKind {
    pub const ALL: [TroopKind; 6] = [
        TroopKind::Pawn,
        TroopKind::Bishop,
        TroopKind::Rook,
        TroopKind::Knight,
        TroopKind::Prince,
        TroopKind::Queen,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TroopKind::Pawn => "Pawn",
            TroopKind::Bishop => "Bishop",
            TroopKind::Rook => "Rook",
            TroopKind::Knight => "Knight",
            TroopKind::Prince => "Prince",
            TroopKind::Queen => "Queen",
        }
    }

    /// Unscaled card stats: HP, ATK, DEF, MANA, EXP
    pub fn base_stats(self) -> TroopStats {
        match self {
            TroopKind::Pawn => TroopStats::new(50, 150, 100, 3, 5),
            TroopKind::Bishop => TroopStats::new(100, 200, 150, 4, 10),
            TroopKind::Rook => TroopStats::new(250, 200, 200, 5, 25),
            TroopKind::Knight => TroopStats::new(200, 300, 150, 5, 25),
            TroopKind::Prince => TroopStats::new(500, 400, 300, 6, 50),
            TroopKind::Queen => TroopStats::new(0, 0, 0, 5, 30),
        }
    }

    /// Card identifier, "T1" through "T6" in pool order
    pub fn card_id(self) -> String {
        let slot = TroopKind::ALL
            .iter()
            .position(|k| *k == self)
            .unwrap_or_default();
        format!("T{}", slot + 1)
    }
}

impl fmt::Display for TroopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Troop {
    pub id: String,
    pub name: String,
    pub kind: TroopKind,
    pub stats: TroopStats,
}

impl Troop {
    pub fn new(kind: TroopKind, stats: TroopStats) -> Self {
        Self {
            id: kind.card_id(),
            name: kind.name().to_string(),
            kind,
            stats,
        }
    }
}

/// Troops dealt to one participant, addressable by name
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Troop>,
    by_name: AHashMap<String, usize>,
}

impl Hand {
    pub fn new(cards: Vec<Troop>) -> Self {
        let by_name = cards
            .iter()
            .enumerate()
            .map(|(slot, troop)| (troop.name.clone(), slot))
            .collect();
        Self { cards, by_name }
    }

    /// Exact, case-sensitive lookup by troop name
    pub fn get(&self, name: &str) -> Option<&Troop> {
        self.by_name.get(name).map(|&slot| &self.cards[slot])
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Troop> {
        self.cards.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Troop> {
        self.cards.iter_mut()
    }
}
