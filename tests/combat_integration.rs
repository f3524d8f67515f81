//! Combat and move resolution integration tests
//!
//! Walks full attack sequences through the public API: damage, tower
//! destruction, experience and gating.

use rand::rngs::mock::StepRng;
use tower_clash::arena::{build_towers, troop_pool, Hand, Participant, TowerId, TroopKind};
use tower_clash::command::{apply_move, MoveError};
use tower_clash::core::types::Profile;

/// Every roll lands just below 1.0, so no hit is ever critical
fn no_crit() -> StepRng {
    StepRng::new(u64::MAX, 0)
}

fn participant(name: &str, level: u32, kinds: &[TroopKind]) -> Participant {
    let hand = troop_pool(level)
        .into_iter()
        .filter(|t| kinds.contains(&t.kind))
        .collect();
    Participant::new(
        Profile::new(name, level, 0),
        build_towers(level),
        Hand::new(hand),
    )
}

fn duel() -> (Participant, Participant) {
    (
        participant("alice", 0, &[TroopKind::Pawn, TroopKind::Knight, TroopKind::Prince]),
        participant("bob", 0, &[TroopKind::Bishop, TroopKind::Rook, TroopKind::Queen]),
    )
}

#[test]
fn test_single_pawn_hit_on_guard() {
    let (mut alice, mut bob) = duel();

    let outcome = apply_move(&mut alice, &mut bob, "Pawn G1", &mut no_crit()).unwrap();

    assert_eq!(outcome.damage, 50);
    assert!(!outcome.tower_destroyed);
    let g1 = bob.tower(TowerId::Guard1);
    assert_eq!(g1.stats.hp, 950);
    assert!(g1.is_alive());
    assert_eq!(alice.exp(), 0);
}

#[test]
fn test_twenty_pawn_hits_destroy_guard() {
    let (mut alice, mut bob) = duel();

    for hit in 1..=19 {
        let outcome = apply_move(&mut alice, &mut bob, "Pawn G1", &mut no_crit()).unwrap();
        assert!(!outcome.tower_destroyed, "destroyed early on hit {}", hit);
        assert_eq!(outcome.remaining_hp, 1000 - 50 * hit);
    }
    assert_eq!(alice.exp(), 0);

    let last = apply_move(&mut alice, &mut bob, "Pawn G1", &mut no_crit()).unwrap();
    assert!(last.tower_destroyed);
    assert_eq!(last.remaining_hp, 0);
    assert_eq!(last.exp_gained, 100);
    assert!(!bob.tower(TowerId::Guard1).is_alive());

    // 100 EXP is exactly one level at level 0
    assert_eq!(alice.level(), 1);
    assert_eq!(alice.exp(), 0);
}

#[test]
fn test_destroyed_tower_cannot_be_farmed() {
    let (mut alice, mut bob) = duel();
    for _ in 0..20 {
        apply_move(&mut alice, &mut bob, "Pawn G1", &mut no_crit()).unwrap();
    }
    let level = alice.level();
    let exp = alice.exp();

    for _ in 0..3 {
        let result = apply_move(&mut alice, &mut bob, "Pawn G1", &mut no_crit());
        assert_eq!(result, Err(MoveError::TowerDestroyed(TowerId::Guard1)));
    }
    assert_eq!(alice.level(), level);
    assert_eq!(alice.exp(), exp);
    assert_eq!(bob.tower(TowerId::Guard1).stats.hp, 0);
}

#[test]
fn test_full_siege_respects_gating() {
    let (mut alice, mut bob) = duel();

    assert_eq!(
        apply_move(&mut alice, &mut bob, "Prince G2", &mut no_crit()),
        Err(MoveError::FirstGuardStanding)
    );
    assert_eq!(
        apply_move(&mut alice, &mut bob, "Prince K", &mut no_crit()),
        Err(MoveError::GuardsStanding)
    );

    // Prince deals 300 to a level-0 guard: four hits each
    for _ in 0..4 {
        apply_move(&mut alice, &mut bob, "Prince G1", &mut no_crit()).unwrap();
    }
    assert!(!bob.tower(TowerId::Guard1).is_alive());
    assert_eq!(
        apply_move(&mut alice, &mut bob, "Prince K", &mut no_crit()),
        Err(MoveError::GuardsStanding)
    );

    let mut guard2_destroyed = false;
    while !guard2_destroyed {
        guard2_destroyed = apply_move(&mut alice, &mut bob, "Prince G2", &mut no_crit())
            .unwrap()
            .tower_destroyed;
    }

    let outcome = apply_move(&mut alice, &mut bob, "Prince K", &mut no_crit()).unwrap();
    assert!(outcome.damage > 0);
    assert!(bob.tower(TowerId::King).stats.hp < 2000);
    assert!(!bob.king_destroyed());
}

#[test]
fn test_rejections_leave_both_sides_untouched() {
    let (mut alice, mut bob) = duel();
    let before_alice = alice.clone();
    let before_bob = bob.clone();

    for line in ["", "Pawn", "Pawn G1 extra", "Rook G1", "Pawn X", "Pawn G2", "Pawn K", "pawn G1"] {
        assert!(apply_move(&mut alice, &mut bob, line, &mut no_crit()).is_err(), "{line}");
    }

    assert_eq!(alice.profile, before_alice.profile);
    assert_eq!(alice.towers(), before_alice.towers());
    assert_eq!(bob.towers(), before_bob.towers());
}

#[test]
fn test_level_up_mid_battle_strengthens_next_hit() {
    let (mut alice, mut bob) = duel();
    for _ in 0..4 {
        apply_move(&mut alice, &mut bob, "Prince G1", &mut no_crit()).unwrap();
    }
    assert_eq!(alice.level(), 1);

    // Prince ATK 400 -> 440 after the buff; guard DEF stays 100
    let outcome = apply_move(&mut alice, &mut bob, "Prince G2", &mut no_crit()).unwrap();
    assert_eq!(outcome.damage, 340);
}

#[test]
fn test_critical_hits_when_roll_is_low() {
    let (mut alice, mut bob) = duel();
    let mut always = StepRng::new(0, 0);

    let outcome = apply_move(&mut alice, &mut bob, "Knight G1", &mut always).unwrap();
    // 300 + floor(300 * 1.2) = 660, minus DEF 100
    assert!(outcome.critical);
    assert_eq!(outcome.damage, 560);
    assert!(outcome.actor_text.contains("Critical hit!"));
}
