use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClashError {
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("Participant disconnected: {0}")]
    Disconnected(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ClashError>;
