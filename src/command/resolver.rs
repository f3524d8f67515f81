//! Move resolution - validates one attack and applies it
//!
//! Validation order: token count, troop in hand, tower exists, tower still
//! standing, gating. Any failure leaves both participants untouched.

use rand::Rng;

use crate::arena::participant::Participant;
use crate::arena::tower::TowerId;
use crate::combat::resolve_hit;
use crate::command::parser::{parse_command, Command, MoveError};
use crate::progression::apply_experience;

/// Result of an attack that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub troop: String,
    pub tower: TowerId,
    pub damage: u32,
    pub critical: bool,
    /// HP left on the target after the hit
    pub remaining_hp: u32,
    pub tower_destroyed: bool,
    /// Experience the actor earned from this move
    pub exp_gained: u32,
    pub leveled_up: bool,
    /// Report for the attacking player
    pub actor_text: String,
    /// Report for the defending player
    pub opponent_text: String,
}

/// Parse and apply one attack line
///
/// `exit` is not an attack; the session loop handles it before calling
/// this, so here it is reported as a format error.
pub fn apply_move<R: Rng + ?Sized>(
    actor: &mut Participant,
    opponent: &mut Participant,
    line: &str,
    rng: &mut R,
) -> Result<MoveOutcome, MoveError> {
    match parse_command(line)? {
        Command::Attack { troop, tower } => apply_attack(actor, opponent, &troop, &tower, rng),
        Command::Exit => Err(MoveError::InvalidFormat),
    }
}

/// Apply an attack of `troop_name` against the opponent's `tower_code`
pub fn apply_attack<R: Rng + ?Sized>(
    actor: &mut Participant,
    opponent: &mut Participant,
    troop_name: &str,
    tower_code: &str,
    rng: &mut R,
) -> Result<MoveOutcome, MoveError> {
    let attacker = actor
        .hand
        .get(troop_name)
        .map(|t| t.stats)
        .ok_or_else(|| MoveError::TroopNotFound(troop_name.to_string()))?;
    let tower_id =
        TowerId::parse(tower_code).ok_or_else(|| MoveError::TowerNotFound(tower_code.to_string()))?;
    if !opponent.tower(tower_id).is_alive() {
        return Err(MoveError::TowerDestroyed(tower_id));
    }
    check_gate(opponent, tower_id)?;

    let target = opponent.tower_mut(tower_id);
    let hit = resolve_hit(&attacker, &target.stats, rng);
    let tower_destroyed = target.take_damage(hit.damage);
    let remaining_hp = target.stats.hp;
    let tower_exp = target.stats.exp;

    let (exp_gained, leveled_up) = if tower_destroyed {
        (tower_exp, apply_experience(actor, tower_exp))
    } else {
        (0, false)
    };

    tracing::debug!(
        actor = %actor.username(),
        troop = troop_name,
        tower = %tower_id,
        damage = hit.damage,
        critical = hit.critical,
        remaining_hp,
        tower_destroyed,
        "Attack resolved"
    );

    let mut outcome = MoveOutcome {
        troop: troop_name.to_string(),
        tower: tower_id,
        damage: hit.damage,
        critical: hit.critical,
        remaining_hp,
        tower_destroyed,
        exp_gained,
        leveled_up,
        actor_text: String::new(),
        opponent_text: String::new(),
    };
    outcome.actor_text = actor_report(&outcome);
    outcome.opponent_text = opponent_report(&outcome, actor.username());
    Ok(outcome)
}

/// Guard Tower 1 shields Guard Tower 2; both guards shield the King
pub fn check_gate(opponent: &Participant, target: TowerId) -> Result<(), MoveError> {
    let g1_alive = opponent.tower(TowerId::Guard1).is_alive();
    let g2_alive = opponent.tower(TowerId::Guard2).is_alive();
    match target {
        TowerId::Guard2 if g1_alive => Err(MoveError::FirstGuardStanding),
        TowerId::King if g1_alive || g2_alive => Err(MoveError::GuardsStanding),
        _ => Ok(()),
    }
}

fn actor_report(outcome: &MoveOutcome) -> String {
    let mut text = format!("You attack {} with {}!", outcome.tower, outcome.troop);
    if outcome.critical {
        text.push_str(" Critical hit!");
    }
    text.push_str(&format!(" You deal {} damage.\n", outcome.damage));
    if outcome.tower_destroyed {
        text.push_str(&format!("Opponent's {} tower is destroyed!", outcome.tower));
        text.push_str(&format!("\nYou gain {} EXP.", outcome.exp_gained));
        if outcome.leveled_up {
            text.push_str("\nLevel up! Your stats increased by 10%!");
        }
    } else {
        text.push_str(&format!(
            "Opponent's {} tower has {} HP left.",
            outcome.tower, outcome.remaining_hp
        ));
    }
    text
}

fn opponent_report(outcome: &MoveOutcome, attacker: &str) -> String {
    let mut text = format!(
        "{} attacks your {} tower with {}!\n",
        attacker, outcome.tower, outcome.troop
    );
    if outcome.tower_destroyed {
        text.push_str(&format!("Your {} tower is destroyed!", outcome.tower));
    } else {
        text.push_str(&format!(
            "Your {} tower has {} HP left.",
            outcome.tower, outcome.remaining_hp
        ));
    }
    text
}
