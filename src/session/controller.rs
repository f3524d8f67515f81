//! Session controller
//!
//! One controller task per session owns the countdown. Two intake tasks,
//! one per player, read commands and resolve them under the session lock.
//! The lock is never held while sending or receiving.
//!
//! Termination is single-fire: whoever first flips the battle to
//! `Terminated` (under the lock) decides the `EndReason`, then broadcasts it
//! on a watch channel so every other task stops. The controller joins both
//! intake tasks before it finalizes, so finalization runs exactly once.

use std::sync::Arc;
use std::time::Duration;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::arena::provision::provision;
use crate::arena::tower::TowerId;
use crate::command::EXIT_COMMAND;
use crate::core::config::SessionConfig;
use crate::core::error::{ClashError, Result};
use crate::core::types::{Profile, SessionId, Side};
use crate::progression::apply_experience;
use crate::session::battle::Battle;
use crate::session::link::{Inbox, Link, Outbox};
use crate::session::outcome::{decide, final_notice, EndReason, Verdict};
use crate::store::ProfileStore;

/// Prompt sent before every read
pub const MOVE_PROMPT: &str = "Type your move (e.g., Pawn G1):";

/// An authenticated player ready to be seated
#[derive(Debug)]
pub struct Contestant {
    pub profile: Profile,
    pub link: Link,
}

impl Contestant {
    pub fn new(profile: Profile, link: Link) -> Self {
        Self { profile, link }
    }
}

/// Summary of a finished session
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub id: SessionId,
    pub reason: EndReason,
    pub verdict: Verdict,
    /// Progression of seats A and B as persisted
    pub profiles: [Profile; 2],
    pub elapsed: Duration,
}

type EndSignal = watch::Sender<Option<EndReason>>;

/// Provision both contestants and run a session to completion
///
/// Returns only after the session has terminated and progression has been
/// handed to `store`.
pub async fn start_session(
    a: Contestant,
    b: Contestant,
    config: &SessionConfig,
    store: Arc<dyn ProfileStore>,
) -> Result<SessionReport> {
    let seed = config.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let pa = provision(a.profile, &mut rng);
    let pb = provision(b.profile, &mut rng);
    let battle = Battle::new(pa, pb, Box::new(rng) as Box<dyn RngCore + Send>);

    run_battle(battle, [a.link, b.link], config, store).await
}

/// Run an already provisioned battle: announce, play, finalize
pub async fn run_battle(
    mut battle: Battle,
    links: [Link; 2],
    config: &SessionConfig,
    store: Arc<dyn ProfileStore>,
) -> Result<SessionReport> {
    let id = SessionId::new();
    let [link_a, link_b] = links;
    let outboxes = [link_a.outbox, link_b.outbox];
    let inboxes = [link_a.inbox, link_b.inbox];

    for side in Side::BOTH {
        let outbox = &outboxes[side.index()];
        outbox.send(battle.participant(side).hand_listing());
        outbox.send(format!("Game started! You are Player {}.", side.seat()));
    }
    battle.activate();
    tracing::info!(
        session = %id,
        player_a = %battle.participant(Side::A).username(),
        player_b = %battle.participant(Side::B).username(),
        "Session started"
    );

    let battle = Arc::new(Mutex::new(battle));
    let (signal, mut ended) = watch::channel(None);
    let signal = Arc::new(signal);

    let [inbox_a, inbox_b] = inboxes;
    let intakes: Vec<JoinHandle<()>> = [(Side::A, inbox_a), (Side::B, inbox_b)]
        .into_iter()
        .map(|(side, inbox)| {
            let intake = Intake {
                session: id,
                side,
                inbox,
                outboxes: outboxes.clone(),
                battle: Arc::clone(&battle),
                signal: Arc::clone(&signal),
                ended: signal.subscribe(),
            };
            tokio::spawn(intake.run())
        })
        .collect();

    tokio::select! {
        _ = tokio::time::sleep(config.time_limit()) => {
            let mut state = battle.lock().await;
            fire(&mut state, &signal, EndReason::TimeUp);
        }
        _ = ended.changed() => {}
    }

    for handle in intakes {
        if let Err(e) = handle.await {
            tracing::warn!(session = %id, "Intake task failed: {}", e);
        }
    }

    let (reason, verdict, profiles, elapsed) = {
        let mut state = battle.lock().await;
        let reason = state.end_reason().unwrap_or(EndReason::TimeUp);
        let verdict = settle(&mut state, reason, &outboxes, config);
        let profiles = [
            state.participant(Side::A).profile.clone(),
            state.participant(Side::B).profile.clone(),
        ];
        (reason, verdict, profiles, state.started_at().elapsed())
    };
    tracing::info!(
        session = %id,
        ?reason,
        ?verdict,
        elapsed_secs = elapsed.as_secs(),
        "Session ended"
    );

    persist(id, store, &profiles).await?;
    Ok(SessionReport {
        id,
        reason,
        verdict,
        profiles,
        elapsed,
    })
}

/// Flip the battle to terminated and broadcast; no-op if already ended
fn fire(battle: &mut Battle, signal: &EndSignal, reason: EndReason) -> bool {
    if !battle.conclude(reason) {
        return false;
    }
    signal.send_replace(Some(reason));
    true
}

/// Command-intake loop for one seat
struct Intake {
    session: SessionId,
    side: Side,
    inbox: Inbox,
    outboxes: [Outbox; 2],
    battle: Arc<Mutex<Battle>>,
    signal: Arc<EndSignal>,
    ended: watch::Receiver<Option<EndReason>>,
}

impl Intake {
    async fn run(mut self) {
        let me = self.side;
        loop {
            if self.ended.borrow().is_some() {
                return;
            }
            if !self.outboxes[me.index()].send(MOVE_PROMPT) {
                self.end(EndReason::Disconnected { side: me }).await;
                return;
            }

            let line = tokio::select! {
                line = self.inbox.recv() => line,
                _ = self.ended.changed() => return,
            };
            let Some(line) = line else {
                tracing::warn!(session = %self.session, side = ?me, "Connection lost");
                self.end(EndReason::Disconnected { side: me }).await;
                return;
            };

            let command = line.trim();
            if command == EXIT_COMMAND {
                tracing::info!(session = %self.session, side = ?me, "Player exited");
                self.end(EndReason::Forfeit { quitter: me }).await;
                return;
            }

            let (result, king_destroyed) = {
                let mut battle = self.battle.lock().await;
                if !battle.is_active() {
                    return;
                }
                let result = battle.apply(me, command);
                let king_destroyed = matches!(
                    &result,
                    Ok(outcome) if outcome.tower_destroyed && outcome.tower == TowerId::King
                );
                if king_destroyed {
                    fire(&mut battle, &self.signal, EndReason::KingDestroyed { winner: me });
                }
                (result, king_destroyed)
            };

            match result {
                Ok(outcome) => {
                    if !self.outboxes[me.index()].send(outcome.actor_text) {
                        self.end(EndReason::Disconnected { side: me }).await;
                        return;
                    }
                    if !self.outboxes[me.opponent().index()].send(outcome.opponent_text) {
                        self.end(EndReason::Disconnected { side: me.opponent() }).await;
                        return;
                    }
                }
                Err(rejected) => {
                    if !self.outboxes[me.index()].send(rejected.to_string()) {
                        self.end(EndReason::Disconnected { side: me }).await;
                        return;
                    }
                }
            }

            if king_destroyed {
                return;
            }
        }
    }

    async fn end(&self, reason: EndReason) {
        let mut battle = self.battle.lock().await;
        fire(&mut battle, &self.signal, reason);
    }
}

/// Award the win bonus and send both players their final notice
fn settle(
    battle: &mut Battle,
    reason: EndReason,
    outboxes: &[Outbox; 2],
    config: &SessionConfig,
) -> Verdict {
    let verdict = decide(reason, battle);

    let mut leveled_up = false;
    if let Some(winner) = verdict.winner() {
        leveled_up = apply_experience(battle.participant_mut(winner), config.win_exp);
    }

    for side in Side::BOTH {
        let mut notice = final_notice(reason, verdict, side).to_string();
        if verdict.winner() == Some(side) && config.win_exp > 0 {
            notice.push_str(&format!("\nYou gain {} EXP.", config.win_exp));
            if leveled_up {
                notice.push_str("\nLevel up! Your stats increased by 10%!");
            }
        }
        // Best effort: a player who already left simply misses this
        outboxes[side.index()].send(notice);
    }
    verdict
}

/// Hand both profiles to the store as one batch
async fn persist(id: SessionId, store: Arc<dyn ProfileStore>, profiles: &[Profile; 2]) -> Result<()> {
    let batch = profiles.to_vec();
    let persisted = tokio::task::spawn_blocking(move || store.persist(&batch))
        .await
        .map_err(|e| ClashError::Persistence(e.to_string()))
        .and_then(|result| result);
    if let Err(e) = &persisted {
        tracing::error!(session = %id, "Failed to persist progression: {}", e);
    }
    persisted
}
