//! Damage resolution between a troop and a tower
//!
//! One uniform roll decides whether the hit is critical. The roll is
//! compared against the DEFENDER's crit chance.

use crate::arena::constants::CRIT_BONUS;
use crate::arena::stats::{TowerStats, TroopStats};
use rand::Rng;

/// Result of a single hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub damage: u32,
    pub critical: bool,
}

/// Resolve a hit for an explicit roll in [0, 1)
pub fn hit_for_roll(attacker: &TroopStats, defender: &TowerStats, roll: f64) -> Hit {
    let critical = roll < defender.crit;
    let attack = if critical {
        attacker
            .atk
            .saturating_add((f64::from(attacker.atk) * CRIT_BONUS) as u32)
    } else {
        attacker.atk
    };
    Hit {
        damage: attack.saturating_sub(defender.def),
        critical,
    }
}

/// Resolve a hit, drawing the crit roll from `rng`
pub fn resolve_hit<R: Rng + ?Sized>(
    attacker: &TroopStats,
    defender: &TowerStats,
    rng: &mut R,
) -> Hit {
    let roll: f64 = rng.gen();
    hit_for_roll(attacker, defender, roll)
}

/// Damage dealt by `attacker` against `defender`, never negative
pub fn resolve_damage<R: Rng + ?Sized>(
    attacker: &TroopStats,
    defender: &TowerStats,
    rng: &mut R,
) -> u32 {
    resolve_hit(attacker, defender, rng).damage
}
