//! A contestant's side of the arena: progression, towers and hand

use crate::arena::tower::{Tower, TowerId};
use crate::arena::troop::Hand;
use crate::core::types::Profile;

#[derive(Debug, Clone)]
pub struct Participant {
    pub profile: Profile,
    towers: [Tower; 3],
    pub hand: Hand,
}

impl Participant {
    /// Towers must be given in `TowerId::ALL` order (King, G1, G2)
    pub fn new(profile: Profile, towers: [Tower; 3], hand: Hand) -> Self {
        debug_assert!(towers
            .iter()
            .zip(TowerId::ALL)
            .all(|(tower, id)| tower.id == id));
        Self {
            profile,
            towers,
            hand,
        }
    }

    pub fn username(&self) -> &str {
        &self.profile.username
    }

    pub fn level(&self) -> u32 {
        self.profile.level
    }

    pub fn exp(&self) -> u32 {
        self.profile.exp
    }

    pub fn tower(&self, id: TowerId) -> &Tower {
        &self.towers[id.index()]
    }

    pub fn tower_mut(&mut self, id: TowerId) -> &mut Tower {
        &mut self.towers[id.index()]
    }

    pub fn towers(&self) -> &[Tower; 3] {
        &self.towers
    }

    pub fn towers_mut(&mut self) -> impl Iterator<Item = &mut Tower> {
        self.towers.iter_mut()
    }

    pub fn king_destroyed(&self) -> bool {
        !self.tower(TowerId::King).is_alive()
    }

    /// Number of this participant's towers that have fallen
    pub fn destroyed_towers(&self) -> usize {
        self.towers.iter().filter(|t| !t.is_alive()).count()
    }

    /// Listing sent to the player when the hand is dealt
    pub fn hand_listing(&self) -> String {
        let mut listing = String::from("Your available Troops:\n");
        for (i, troop) in self.hand.iter().enumerate() {
            let s = troop.stats;
            listing.push_str(&format!(
                "{}. {}: HP = {}, ATK = {}, DEF = {}, MANA = {}, EXP = {}\n",
                i + 1,
                troop.name,
                s.hp,
                s.atk,
                s.def,
                s.mana,
                s.exp
            ));
        }
        listing
    }
}
