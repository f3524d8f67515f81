//! Experience and level-ups
//!
//! Reaching a new level costs floor(100 * 1.1^level) experience. Each
//! level gained buffs every tower and troop the participant currently owns
//! by 10%, so a single large award can cascade and compound.

use crate::arena::constants::{BASE_LEVEL_EXP, LEVEL_GROWTH, LEVEL_UP_BUFF};
use crate::arena::participant::Participant;

/// Experience needed to advance from `level` to `level + 1`
pub fn required_exp(level: u32) -> u32 {
    (BASE_LEVEL_EXP * LEVEL_GROWTH.powf(f64::from(level))) as u32
}

/// Add experience and apply any level-ups it unlocks
///
/// Returns true if at least one level was gained.
pub fn apply_experience(participant: &mut Participant, amount: u32) -> bool {
    let mut leveled_up = false;
    participant.profile.exp = participant.profile.exp.saturating_add(amount);

    loop {
        let required = required_exp(participant.profile.level);
        if participant.profile.exp < required {
            break;
        }
        participant.profile.exp -= required;
        participant.profile.level += 1;
        apply_level_up_buff(participant);
        leveled_up = true;

        tracing::debug!(
            username = %participant.profile.username,
            level = participant.profile.level,
            "Level up"
        );
    }

    leveled_up
}

/// Buff every tower and troop by the level-up multiplier
pub fn apply_level_up_buff(participant: &mut Participant) {
    for tower in participant.towers_mut() {
        tower.stats = tower.stats.scaled(LEVEL_UP_BUFF);
    }
    for troop in participant.hand.iter_mut() {
        troop.stats = troop.stats.scaled(LEVEL_UP_BUFF);
    }
}
