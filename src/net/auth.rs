//! Login handshake run on every new connection

use crate::core::error::{ClashError, Result};
use crate::session::link::Link;
use crate::store::{UserRecord, UserStore};

pub const USERNAME_PROMPT: &str = "Username:";
pub const PASSWORD_PROMPT: &str = "Password: ";
pub const AUTH_FAILED: &str = "Authentication failed.";

/// Prompt for credentials until they check out
///
/// Fails only if the connection drops or the store is unusable.
pub async fn login(link: &mut Link, store: &UserStore) -> Result<UserRecord> {
    loop {
        let username = ask(link, USERNAME_PROMPT).await?;
        let password = ask(link, PASSWORD_PROMPT).await?;

        match store.authenticate(username.trim(), password.trim())? {
            Some(user) => {
                tracing::info!(username = %user.username, level = user.level, "Login succeeded");
                link.outbox.send(welcome(&user));
                return Ok(user);
            }
            None => {
                tracing::warn!(username = %username.trim(), "Login rejected");
                link.outbox.send(AUTH_FAILED);
            }
        }
    }
}

pub fn welcome(user: &UserRecord) -> String {
    format!(
        "Welcome, {} (Level {})! You're now connected.",
        user.fullname, user.level
    )
}

async fn ask(link: &mut Link, prompt: &str) -> Result<String> {
    link.outbox.send(prompt);
    link.inbox
        .recv()
        .await
        .ok_or_else(|| ClashError::Disconnected("connection closed during login".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn store() -> UserStore {
        UserStore::from_records(
            Path::new("unused.json"),
            vec![UserRecord::new("alice", "secret", "Alice Liddell")],
        )
    }

    #[tokio::test]
    async fn test_login_retries_until_success() {
        let store = store();
        let (mut link, mut peer) = Link::loopback();

        for line in ["alice", "wrong", " alice ", "secret\r"] {
            assert!(peer.say(line).await);
        }
        let user = login(&mut link, &store).await.unwrap();
        assert_eq!(user.username, "alice");

        assert_eq!(
            peer.drain(),
            vec![
                USERNAME_PROMPT,
                PASSWORD_PROMPT,
                AUTH_FAILED,
                USERNAME_PROMPT,
                PASSWORD_PROMPT,
                "Welcome, Alice Liddell (Level 0)! You're now connected.",
            ]
        );
    }

    #[tokio::test]
    async fn test_disconnect_during_login() {
        let store = store();
        let (mut link, peer) = Link::loopback();
        assert!(peer.say("alice").await);
        let _outbound = peer.hang_up();

        let result = login(&mut link, &store).await;
        assert!(matches!(result, Err(ClashError::Disconnected(_))));
    }
}
