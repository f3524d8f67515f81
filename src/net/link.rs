//! TCP plumbing behind a session `Link`
//!
//! A reader task forwards newline-delimited lines into the inbox and a
//! writer task drains the outbox onto the socket. Either side closing its
//! channel is how a disconnect surfaces to the session.

use std::net::SocketAddr;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::TcpStream;
use tokio::sync::mpsc;

use crate::session::link::{Inbox, Link, Outbox, INBOX_CAPACITY};

/// Split `stream` into reader and writer tasks and wrap them in a `Link`
pub fn spawn_link(stream: TcpStream, addr: SocketAddr) -> Link {
    let (read_half, write_half) = stream.into_split();
    let (in_tx, in_rx) = mpsc::channel::<String>(INBOX_CAPACITY);
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        let mut lines = BufReader::new(read_half).lines();
        loop {
            let next = tokio::select! {
                next = lines.next_line() => next,
                _ = in_tx.closed() => break,
            };
            match next {
                Ok(Some(line)) => {
                    if in_tx.send(line).await.is_err() {
                        break;
                    }
                }
                Ok(None) => {
                    tracing::debug!(%addr, "Client closed connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!(%addr, "Read error: {}", e);
                    break;
                }
            }
        }
    });

    tokio::spawn(async move {
        let mut writer = BufWriter::new(write_half);
        while let Some(mut text) = out_rx.recv().await {
            if !text.ends_with('\n') {
                text.push('\n');
            }
            let written = async {
                writer.write_all(text.as_bytes()).await?;
                writer.flush().await
            };
            if let Err(e) = written.await {
                tracing::warn!(%addr, "Write error: {}", e);
                break;
            }
        }
    });

    Link::new(Outbox::new(out_tx), Inbox::new(in_rx))
}
