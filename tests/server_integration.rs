//! End-to-end test over real TCP sockets
//!
//! Two clients log in, get paired, play one exchange and one of them
//! exits. The winner's progression must land in the users file.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};

use tower_clash::core::config::{ServerConfig, SessionConfig};
use tower_clash::net::serve_on;
use tower_clash::store::{UserRecord, UserStore};

struct Client {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl Client {
    async fn connect(addr: std::net::SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).await.unwrap();
        let (read_half, writer) = stream.into_split();
        Self {
            lines: BufReader::new(read_half).lines(),
            writer,
        }
    }

    async fn send(&mut self, line: &str) {
        self.writer
            .write_all(format!("{}\n", line).as_bytes())
            .await
            .unwrap();
    }

    /// Read lines until one matches exactly, returning everything read
    async fn expect_line(&mut self, wanted: &str) -> Vec<String> {
        let mut seen = Vec::new();
        let read = async {
            while let Some(line) = self.lines.next_line().await.unwrap() {
                let done = line.trim_end() == wanted.trim_end();
                seen.push(line);
                if done {
                    return true;
                }
            }
            false
        };
        let found = tokio::time::timeout(Duration::from_secs(10), read)
            .await
            .unwrap_or(false);
        assert!(found, "never saw {:?}, got {:?}", wanted, seen);
        seen
    }

    async fn login(&mut self, username: &str, password: &str) {
        self.expect_line("Username:").await;
        self.send(username).await;
        self.expect_line("Password:").await;
        self.send(password).await;
    }
}

fn write_users(path: &Path) {
    UserStore::from_records(
        path,
        vec![
            UserRecord::new("alice", "wonderland", "Alice Liddell"),
            UserRecord::new("bob", "builder", "Bob Builder"),
        ],
    )
    .save()
    .unwrap();
}

async fn wait_for_exp(path: &Path, username: &str, exp: u32) -> UserRecord {
    for _ in 0..100 {
        let store = UserStore::load(path).unwrap();
        if let Some(user) = store
            .records()
            .unwrap()
            .into_iter()
            .find(|u| u.username == username && u.exp == exp)
        {
            return user;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("{} never reached {} EXP on disk", username, exp);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_two_clients_play_and_progress_is_saved() {
    let dir = tempfile::tempdir().unwrap();
    let users_path = dir.path().join("users.json");
    write_users(&users_path);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let config = ServerConfig {
        bind: addr,
        users_path: users_path.clone(),
        session: SessionConfig {
            seed: Some(7),
            ..SessionConfig::default()
        },
    };
    let store = Arc::new(UserStore::load(&users_path).unwrap());
    let server = tokio::spawn(serve_on(listener, config, store));

    let mut alice = Client::connect(addr).await;
    alice.login("alice", "wrong").await;
    alice.expect_line("Authentication failed.").await;
    alice.login("alice", "wonderland").await;
    alice
        .expect_line("Welcome, Alice Liddell (Level 0)! You're now connected.")
        .await;

    let mut bob = Client::connect(addr).await;
    bob.login("bob", "builder").await;
    bob.expect_line("Welcome, Bob Builder (Level 0)! You're now connected.")
        .await;

    for (client, seat) in [(&mut alice, 1), (&mut bob, 2)] {
        client
            .expect_line("Both players are connected! You can now start playing.")
            .await;
        let intro = client
            .expect_line(&format!("Game started! You are Player {}.", seat))
            .await;
        assert!(intro.iter().any(|l| l == "Your available Troops:"));
        client.expect_line("Type your move (e.g., Pawn G1):").await;
    }

    bob.send("Bogus").await;
    bob.expect_line("Invalid move format. Use 'TroopName TowerType'.")
        .await;

    alice.send("exit").await;
    alice.expect_line("You exited the game. You lose.").await;
    bob.expect_line("Opponent exited. Game over. You win!").await;
    bob.expect_line("You gain 30 EXP.").await;

    let saved = wait_for_exp(&users_path, "bob", 30).await;
    assert_eq!(saved.level, 0);
    assert_eq!(saved.fullname, "Bob Builder");

    let alice_saved = UserStore::load(&users_path)
        .unwrap()
        .records()
        .unwrap()
        .into_iter()
        .find(|u| u.username == "alice")
        .unwrap();
    assert_eq!(alice_saved.exp, 0);

    server.abort();
}
