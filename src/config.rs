//! Open-time configuration.
//!
//! Beyond a bare path and an optional passphrase, this adds the handful of
//! engine-level knobs a single-connection relational library reasonably
//! exposes, loadable from TOML via `serde` so a host process can keep them
//! in its own config file rather than hardcoding them.

use std::time::Duration;

use serde::Deserialize;
use zeroize::Zeroize;

/// Options controlling how [`crate::Filesystem::open`] opens the database.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OpenOptions {
    /// Passphrase to unlock (or newly apply to) the database file. Empty
    /// means unencrypted. Zeroed on drop.
    pub passphrase: Passphrase,
    /// `busy_timeout` applied to the connection, so a momentarily-locked
    /// file (e.g. mid-`VACUUM`) doesn't fail a call outright.
    #[serde(with = "duration_ms")]
    pub busy_timeout: Duration,
    /// Enable WAL journal mode instead of SQLite's default rollback journal.
    pub wal: bool,
}

impl Default for OpenOptions {
    fn default() -> Self {
        OpenOptions { passphrase: Passphrase::default(), busy_timeout: Duration::from_secs(5), wal: true }
    }
}

/// A passphrase buffer that is zeroed when it goes out of scope.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Passphrase(String);

impl Passphrase {
    pub fn new(value: impl Into<String>) -> Self {
        Passphrase(value.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Drop for Passphrase {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let millis = u64::deserialize(d)?;
        Ok(Duration::from_millis(millis))
    }
}
