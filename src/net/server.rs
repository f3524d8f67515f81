//! TCP accept loop

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};

use crate::core::config::ServerConfig;
use crate::core::error::Result;
use crate::net::auth::login;
use crate::net::link::spawn_link;
use crate::net::lobby::Lobby;
use crate::session::controller::Contestant;
use crate::store::UserStore;

/// Bind the configured address and serve forever
pub async fn serve(config: ServerConfig, store: Arc<UserStore>) -> Result<()> {
    let listener = TcpListener::bind(config.bind).await?;
    serve_on(listener, config, store).await
}

/// Serve on an already bound listener
pub async fn serve_on(listener: TcpListener, config: ServerConfig, store: Arc<UserStore>) -> Result<()> {
    tracing::info!(addr = %listener.local_addr()?, "Server listening");
    let (lobby, _pairing) = Lobby::start(config.session.clone(), store.clone());

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                tracing::debug!(%addr, "Accepted connection");
                tokio::spawn(handle_client(stream, addr, Arc::clone(&store), lobby.clone()));
            }
            Err(e) => {
                tracing::warn!("Accept error: {}", e);
            }
        }
    }
}

async fn handle_client(stream: TcpStream, addr: SocketAddr, store: Arc<UserStore>, lobby: Lobby) {
    let mut link = spawn_link(stream, addr);
    let user = match login(&mut link, &store).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(%addr, "Login abandoned: {}", e);
            return;
        }
    };

    if let Err(e) = lobby.enqueue(Contestant::new(user.profile(), link)).await {
        tracing::error!(%addr, "Could not queue player: {}", e);
    }
}
