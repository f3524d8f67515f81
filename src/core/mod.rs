pub mod config;
pub mod error;
pub mod types;

pub use config::{ServerConfig, SessionConfig};
pub use error::{ClashError, Result};
pub use types::{Profile, SessionId, Side};
