//! JSON-backed user records
//!
//! The file is a single array of records. Passwords are stored as
//! lowercase hex SHA-256 digests.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::core::error::{ClashError, Result};
use crate::core::types::Profile;
use crate::store::ProfileStore;

/// One registered player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
    #[serde(rename = "Fullname")]
    pub fullname: String,
    #[serde(rename = "EXP")]
    pub exp: u32,
    #[serde(rename = "Level")]
    pub level: u32,
}

impl UserRecord {
    /// New record with a plaintext password that gets hashed here
    pub fn new(username: &str, password: &str, fullname: &str) -> Self {
        Self {
            username: username.to_string(),
            password: hash_password(password),
            fullname: fullname.to_string(),
            exp: 0,
            level: 0,
        }
    }

    pub fn profile(&self) -> Profile {
        Profile::new(self.username.clone(), self.level, self.exp)
    }
}

/// Lowercase hex SHA-256 of a password
pub fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

/// User records loaded from, and written back to, one JSON file
#[derive(Debug)]
pub struct UserStore {
    path: PathBuf,
    users: Mutex<Vec<UserRecord>>,
}

impl UserStore {
    /// Load records from `path`
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let users: Vec<UserRecord> = serde_json::from_str(&content)?;
        tracing::info!(path = %path.display(), users = users.len(), "Loaded user store");
        Ok(Self::from_records(path, users))
    }

    /// Wrap records that will be saved to `path`
    pub fn from_records(path: &Path, users: Vec<UserRecord>) -> Self {
        Self {
            path: path.to_path_buf(),
            users: Mutex::new(users),
        }
    }

    /// Check credentials; `None` for an unknown user or a wrong password
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Option<UserRecord>> {
        let hashed = hash_password(password);
        let users = self.lock()?;
        Ok(users
            .iter()
            .find(|u| u.username == username && u.password == hashed)
            .cloned())
    }

    /// Snapshot of every record
    pub fn records(&self) -> Result<Vec<UserRecord>> {
        Ok(self.lock()?.clone())
    }

    /// Write every record to disk, pretty-printed
    pub fn save(&self) -> Result<()> {
        let users = self.lock()?;
        self.write(&users)
    }

    fn write(&self, users: &[UserRecord]) -> Result<()> {
        let data = serde_json::to_string_pretty(users)?;
        std::fs::write(&self.path, data)?;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<UserRecord>>> {
        self.users
            .lock()
            .map_err(|_| ClashError::Persistence("user store lock poisoned".into()))
    }
}

impl ProfileStore for UserStore {
    /// Update the matching records in place and rewrite the whole file
    ///
    /// Nothing is changed if any profile names an unknown user or the file
    /// cannot be written.
    fn persist(&self, profiles: &[Profile]) -> Result<()> {
        let mut users = self.lock()?;
        if let Some(missing) = profiles
            .iter()
            .find(|p| !users.iter().any(|u| u.username == p.username))
        {
            return Err(ClashError::UnknownUser(missing.username.clone()));
        }

        // Memory only moves forward once the file holds the same records
        let mut updated = users.clone();
        for profile in profiles {
            for user in updated.iter_mut().filter(|u| u.username == profile.username) {
                user.level = profile.level;
                user.exp = profile.exp;
            }
        }
        self.write(&updated)?;
        *users = updated;
        Ok(())
    }
}
