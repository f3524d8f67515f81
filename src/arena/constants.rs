//! Arena balance constants - all tunable values in one place

// Progression curve
pub const BASE_LEVEL_EXP: f64 = 100.0;
pub const LEVEL_GROWTH: f64 = 1.1;
pub const LEVEL_UP_BUFF: f64 = 1.1;

// Critical hits add this fraction of ATK on top of ATK
pub const CRIT_BONUS: f64 = 1.2;

// Hand size dealt from the six-card pool
pub const HAND_SIZE: usize = 3;

// King Tower base stats: HP, ATK, DEF, CRIT, EXP
pub const KING_HP: u32 = 2000;
pub const KING_ATK: u32 = 500;
pub const KING_DEF: u32 = 300;
pub const KING_CRIT: f64 = 0.10;
pub const KING_EXP: u32 = 200;

// Guard Tower base stats: HP, ATK, DEF, CRIT, EXP
pub const GUARD_HP: u32 = 1000;
pub const GUARD_ATK: u32 = 300;
pub const GUARD_DEF: u32 = 100;
pub const GUARD_CRIT: f64 = 0.05;
pub const GUARD_EXP: u32 = 100;
