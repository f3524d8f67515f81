//! Line-oriented links between a session and its players
//!
//! A session never touches sockets. Each player is reached through an
//! `Outbox` (best-effort line send) and an `Inbox` (next line, or `None`
//! once the connection is gone). The network layer feeds these channels;
//! tests drive them directly through a `Peer`.

use tokio::sync::mpsc;

/// Buffered inbound lines per player before the reader waits
pub const INBOX_CAPACITY: usize = 16;

/// Sending half towards a player
#[derive(Debug, Clone)]
pub struct Outbox(mpsc::UnboundedSender<String>);

impl Outbox {
    pub fn new(tx: mpsc::UnboundedSender<String>) -> Self {
        Self(tx)
    }

    /// Queue one message; false means the player's connection is gone
    pub fn send(&self, text: impl Into<String>) -> bool {
        self.0.send(text.into()).is_ok()
    }

    pub fn is_connected(&self) -> bool {
        !self.0.is_closed()
    }
}

/// Receiving half from a player
#[derive(Debug)]
pub struct Inbox(mpsc::Receiver<String>);

impl Inbox {
    pub fn new(rx: mpsc::Receiver<String>) -> Self {
        Self(rx)
    }

    /// Next line from the player, `None` after a disconnect or read error
    pub async fn recv(&mut self) -> Option<String> {
        self.0.recv().await
    }

    /// True once the player can send nothing more
    pub fn is_closed(&self) -> bool {
        self.0.is_closed()
    }
}

#[derive(Debug)]
pub struct Link {
    pub outbox: Outbox,
    pub inbox: Inbox,
}

impl Link {
    pub fn new(outbox: Outbox, inbox: Inbox) -> Self {
        Self { outbox, inbox }
    }

    /// Both directions still open
    ///
    /// A socket hangup closes the inbox first while the outbox may keep
    /// accepting messages, so both halves are checked.
    pub fn is_connected(&self) -> bool {
        self.outbox.is_connected() && !self.inbox.is_closed()
    }

    /// In-memory link plus the player-side end that drives it
    pub fn loopback() -> (Link, Peer) {
        let (to_server, inbound) = mpsc::channel(INBOX_CAPACITY);
        let (outbound, from_server) = mpsc::unbounded_channel();
        (
            Link::new(Outbox::new(outbound), Inbox::new(inbound)),
            Peer {
                to_server,
                from_server,
            },
        )
    }
}

/// Player-side end of a loopback link
#[derive(Debug)]
pub struct Peer {
    to_server: mpsc::Sender<String>,
    from_server: mpsc::UnboundedReceiver<String>,
}

impl Peer {
    /// Send a line as if typed by the player
    pub async fn say(&self, line: impl Into<String>) -> bool {
        self.to_server.send(line.into()).await.is_ok()
    }

    /// Wait for the next message the session sends
    pub async fn next_message(&mut self) -> Option<String> {
        self.from_server.recv().await
    }

    /// Everything the session has sent so far without waiting
    pub fn drain(&mut self) -> Vec<String> {
        let mut messages = Vec::new();
        while let Ok(message) = self.from_server.try_recv() {
            messages.push(message);
        }
        messages
    }

    /// Drop the inbound half, which the session sees as a disconnect
    pub fn hang_up(self) -> mpsc::UnboundedReceiver<String> {
        self.from_server
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_loopback_carries_lines_both_ways() {
        let (mut link, mut peer) = Link::loopback();

        assert!(peer.say("Pawn G1").await);
        assert_eq!(link.inbox.recv().await.as_deref(), Some("Pawn G1"));

        assert!(link.outbox.send("hello"));
        assert_eq!(peer.next_message().await.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_hang_up_closes_inbox() {
        let (mut link, peer) = Link::loopback();
        let _outbound = peer.hang_up();
        assert_eq!(link.inbox.recv().await, None);
    }

    #[tokio::test]
    async fn test_hang_up_disconnects_link() {
        let (link, peer) = Link::loopback();
        assert!(link.is_connected());

        let _outbound = peer.hang_up();
        assert!(link.outbox.is_connected());
        assert!(link.inbox.is_closed());
        assert!(!link.is_connected());
    }

    #[tokio::test]
    async fn test_send_fails_when_player_is_gone() {
        let (link, peer) = Link::loopback();
        drop(peer);
        assert!(!link.outbox.send("anyone there?"));
    }
}
