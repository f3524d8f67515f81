//! Matchmaking: pairs authenticated players in arrival order

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::core::config::SessionConfig;
use crate::core::error::{ClashError, Result};
use crate::session::controller::{start_session, Contestant};
use crate::store::ProfileStore;

pub const BOTH_CONNECTED: &str = "Both players are connected! You can now start playing.";

/// Handle for queueing players; cheap to clone
#[derive(Debug, Clone)]
pub struct Lobby {
    queue: mpsc::Sender<Contestant>,
}

impl Lobby {
    /// Spawn the pairing task
    pub fn start(config: SessionConfig, store: Arc<dyn ProfileStore>) -> (Self, JoinHandle<()>) {
        let (queue, waiting) = mpsc::channel(64);
        let handle = tokio::spawn(pair_contestants(waiting, config, store));
        (Self { queue }, handle)
    }

    /// Put a player in line for the next session
    pub async fn enqueue(&self, contestant: Contestant) -> Result<()> {
        self.queue
            .send(contestant)
            .await
            .map_err(|_| ClashError::Disconnected("lobby is closed".into()))
    }
}

async fn pair_contestants(
    mut waiting: mpsc::Receiver<Contestant>,
    config: SessionConfig,
    store: Arc<dyn ProfileStore>,
) {
    let config = Arc::new(config);
    let mut first: Option<Contestant> = None;

    while let Some(next) = waiting.recv().await {
        // A player who left while waiting gives up their place
        let host = match first.take() {
            Some(host) if host.link.is_connected() => host,
            Some(host) => {
                tracing::info!(username = %host.profile.username, "Dropped stale lobby entry");
                first = Some(next);
                continue;
            }
            None => {
                first = Some(next);
                continue;
            }
        };

        host.link.outbox.send(BOTH_CONNECTED);
        next.link.outbox.send(BOTH_CONNECTED);
        tracing::info!(
            player_a = %host.profile.username,
            player_b = %next.profile.username,
            "Paired players"
        );

        let config = Arc::clone(&config);
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            match start_session(host, next, &config, store).await {
                Ok(report) => tracing::info!(
                    session = %report.id,
                    verdict = ?report.verdict,
                    "Session finished"
                ),
                Err(e) => tracing::error!("Session finished with error: {}", e),
            }
        });
    }
}
