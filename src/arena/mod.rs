//! Arena assets: towers, troops and the participants who own them

pub mod constants;
pub mod participant;
pub mod provision;
pub mod stats;
pub mod tower;
pub mod troop;

pub use participant::Participant;
pub use provision::{build_towers, deal_hand, provision, troop_pool};
pub use stats::{TowerStats, TroopStats};
pub use tower::{Tower, TowerId, TowerKind};
pub use troop::{Hand, Troop, TroopKind};
