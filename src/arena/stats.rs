//! Stat blocks for towers and troops

use serde::{Deserialize, Serialize};

/// Multiply an integer stat, truncating toward zero
pub fn scale(value: u32, multiplier: f64) -> u32 {
    (f64::from(value) * multiplier) as u32
}

/// Combat stats of a tower
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TowerStats {
    pub hp: u32,
    pub atk: u32,
    pub def: u32,
    /// Chance in [0, 1] that an incoming hit is critical
    pub crit: f64,
    /// Experience granted to whoever destroys the tower
    pub exp: u32,
}

impl TowerStats {
    /// Scale every integer field; `crit` is a probability and stays fixed
    pub fn scaled(self, multiplier: f64) -> Self {
        Self {
            hp: scale(self.hp, multiplier),
            atk: scale(self.atk, multiplier),
            def: scale(self.def, multiplier),
            crit: self.crit,
            exp: scale(self.exp, multiplier),
        }
    }
}

/// Combat stats of a troop card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TroopStats {
    pub hp: u32,
    pub atk: u32,
    pub def: u32,
    pub mana: u32,
    pub exp: u32,
}

impl TroopStats {
    pub const fn new(hp: u32, atk: u32, def: u32, mana: u32, exp: u32) -> Self {
        Self {
            hp,
            atk,
            def,
            mana,
            exp,
        }
    }

    pub fn scaled(self, multiplier: f64) -> Self {
        Self {
            hp: scale(self.hp, multiplier),
            atk: scale(self.atk, multiplier),
            def: scale(self.def, multiplier),
            mana: scale(self.mana, multiplier),
            exp: scale(self.exp, multiplier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_truncates() {
        assert_eq!(scale(1000, 1.1), 1100);
        assert_eq!(scale(3, 1.1), 3);
        assert_eq!(scale(5, 1.1), 5);
        assert_eq!(scale(150, 1.21), 181);
        assert_eq!(scale(0, 1.1), 0);
    }

    #[test]
    fn test_tower_crit_is_not_scaled() {
        let stats = TowerStats {
            hp: 1000,
            atk: 300,
            def: 100,
            crit: 0.05,
            exp: 100,
        };
        let buffed = stats.scaled(1.1);
        assert_eq!(buffed.hp, 1100);
        assert_eq!(buffed.def, 110);
        assert_eq!(buffed.exp, 110);
        assert_eq!(buffed.crit, 0.05);
    }

    #[test]
    fn test_troop_scaling_covers_all_fields() {
        let stats = TroopStats::new(100, 200, 150, 4, 10).scaled(1.1);
        assert_eq!(stats, TroopStats::new(110, 220, 165, 4, 11));
    }
}
