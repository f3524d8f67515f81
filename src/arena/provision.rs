//! Session-start provisioning
//!
//! Every stat is scaled by 1.1^level (truncated) so that a returning player
//! starts stronger than a fresh one. The hand is three cards dealt from a
//! freshly shuffled six-card pool.

use crate::arena::constants::*;
use crate::arena::participant::Participant;
use crate::arena::stats::{TowerStats, TroopStats};
use crate::arena::tower::{Tower, TowerId};
use crate::arena::troop::{Hand, Troop, TroopKind};
use crate::core::types::Profile;
use rand::seq::SliceRandom;
use rand::Rng;

/// Stat multiplier for a given progression level
pub fn level_multiplier(level: u32) -> f64 {
    LEVEL_GROWTH.powf(f64::from(level))
}

pub fn king_stats(level: u32) -> TowerStats {
    TowerStats {
        hp: KING_HP,
        atk: KING_ATK,
        def: KING_DEF,
        crit: KING_CRIT,
        exp: KING_EXP,
    }
    .scaled(level_multiplier(level))
}

pub fn guard_stats(level: u32) -> TowerStats {
    TowerStats {
        hp: GUARD_HP,
        atk: GUARD_ATK,
        def: GUARD_DEF,
        crit: GUARD_CRIT,
        exp: GUARD_EXP,
    }
    .scaled(level_multiplier(level))
}

/// King plus two identical guards, in `TowerId::ALL` order
pub fn build_towers(level: u32) -> [Tower; 3] {
    let guard = guard_stats(level);
    [
        Tower::new(TowerId::King, king_stats(level)),
        Tower::new(TowerId::Guard1, guard),
        Tower::new(TowerId::Guard2, guard),
    ]
}

/// The full six-card pool scaled to `level`, in pool order
pub fn troop_pool(level: u32) -> Vec<Troop> {
    let multiplier = level_multiplier(level);
    TroopKind::ALL
        .iter()
        .map(|&kind| Troop::new(kind, scaled_troop(kind, multiplier)))
        .collect()
}

fn scaled_troop(kind: TroopKind, multiplier: f64) -> TroopStats {
    kind.base_stats().scaled(multiplier)
}

/// Shuffle the pool and keep the first `HAND_SIZE` cards
pub fn deal_hand<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Hand {
    let mut pool = troop_pool(level);
    pool.shuffle(rng);
    pool.truncate(HAND_SIZE);
    Hand::new(pool)
}

/// Build a participant's full starting kit from their persisted profile
pub fn provision<R: Rng + ?Sized>(profile: Profile, rng: &mut R) -> Participant {
    let towers = build_towers(profile.level);
    let hand = deal_hand(profile.level, rng);
    tracing::debug!(
        username = %profile.username,
        level = profile.level,
        hand = ?hand.iter().map(|t| t.kind).collect::<Vec<_>>(),
        "Provisioned participant"
    );
    Participant::new(profile, towers, hand)
}
