//! Persistence of player progression

pub mod users;

pub use users::{hash_password, UserRecord, UserStore};

use crate::core::error::Result;
use crate::core::types::Profile;

/// Destination for progression at the end of a session
///
/// Both participants are handed over together as one batch.
pub trait ProfileStore: Send + Sync {
    fn persist(&self, profiles: &[Profile]) -> Result<()>;
}
