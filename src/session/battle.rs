//! Shared battle state for one session
//!
//! Everything here is mutated only while the session lock is held.

use rand::RngCore;
use tokio::time::Instant;

use crate::arena::participant::Participant;
use crate::command::{apply_move, MoveError, MoveOutcome};
use crate::core::types::Side;
use crate::session::outcome::EndReason;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Provisioning,
    Active,
    Terminated,
}

pub struct Battle {
    sides: [Participant; 2],
    rng: Box<dyn RngCore + Send>,
    phase: Phase,
    end: Option<EndReason>,
    started_at: Instant,
}

impl std::fmt::Debug for Battle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Battle")
            .field("sides", &self.sides)
            .field("phase", &self.phase)
            .field("end", &self.end)
            .finish_non_exhaustive()
    }
}

impl Battle {
    /// `rng` drives every critical roll of the session
    pub fn new(a: Participant, b: Participant, rng: Box<dyn RngCore + Send>) -> Self {
        Self {
            sides: [a, b],
            rng,
            phase: Phase::Provisioning,
            end: None,
            started_at: Instant::now(),
        }
    }

    pub fn participant(&self, side: Side) -> &Participant {
        &self.sides[side.index()]
    }

    pub fn participant_mut(&mut self, side: Side) -> &mut Participant {
        &mut self.sides[side.index()]
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    /// Provisioning -> Active; restarts the clock
    pub fn activate(&mut self) {
        if self.phase == Phase::Provisioning {
            self.phase = Phase::Active;
            self.started_at = Instant::now();
        }
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Resolve one command from `side` against the other participant
    pub fn apply(&mut self, side: Side, line: &str) -> Result<MoveOutcome, MoveError> {
        let [a, b] = &mut self.sides;
        let (actor, opponent) = match side {
            Side::A => (a, b),
            Side::B => (b, a),
        };
        apply_move(actor, opponent, line, &mut *self.rng)
    }

    /// Towers of the opponent that `side` has destroyed
    pub fn towers_destroyed_by(&self, side: Side) -> usize {
        self.participant(side.opponent()).destroyed_towers()
    }

    /// Record the terminal event; only the first call wins
    pub fn conclude(&mut self, reason: EndReason) -> bool {
        if self.phase == Phase::Terminated {
            return false;
        }
        self.phase = Phase::Terminated;
        self.end = Some(reason);
        true
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end
    }
}
