//! Tower Clash - Entry Point
//!
//! Loads configuration and user records, then accepts players over TCP,
//! pairs them two at a time and runs each battle as its own session.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tower_clash::core::config::ServerConfig;
use tower_clash::core::error::Result;
use tower_clash::net::serve;
use tower_clash::store::UserStore;

/// Tower Clash battle server
#[derive(Parser, Debug)]
#[command(name = "tower-clash")]
#[command(about = "Run the two-player tower battle server")]
struct Args {
    /// TOML config file; flags below override its values
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// JSON file with user records
    #[arg(long)]
    users: Option<PathBuf>,

    /// Session length in seconds
    #[arg(long)]
    time_limit: Option<u64>,

    /// Fixed seed for shuffles and critical rolls
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn into_config(self) -> Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load_from_toml(path)?,
            None => ServerConfig::default(),
        };
        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        if let Some(users) = self.users {
            config.users_path = users;
        }
        if let Some(secs) = self.time_limit {
            config.session.time_limit_secs = secs;
        }
        if self.seed.is_some() {
            config.session.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tower_clash=info")),
        )
        .init();

    let config = Args::parse().into_config()?;
    tracing::info!("Tower Clash starting...");

    let store = match UserStore::load(&config.users_path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!(path = %config.users_path.display(), "Error loading users: {}", e);
            return Err(e);
        }
    };

    serve(config, store).await
}
