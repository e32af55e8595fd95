//! The public facade: single connection, single mutex, open/init.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;
use tracing::{debug, trace, warn};

use crate::blob;
use crate::codec::Registry;
use crate::config::OpenOptions;
use crate::error::{FsError, Result};
use crate::node::{self, NodeRow};
use crate::ops;
use crate::path;
use crate::schema::{self, ROOT_ID};

struct Inner {
    conn: Connection,
    cwd: u32,
    last_error: Option<String>,
}

/// The virtual hierarchical filesystem facade.
///
/// Owns exactly one database connection and one mutex; every public
/// operation acquires that mutex for its whole duration, except the
/// payload-encoding step of [`Filesystem::write`] (before acquisition) and
/// the payload-decoding step of [`Filesystem::read`] (between two
/// acquisitions) — both gaps exist so a codec callback can safely recurse
/// into the registry without deadlocking against the database lock.
pub struct Filesystem {
    inner: Mutex<Inner>,
    registry: Arc<Registry>,
    db_path: PathBuf,
}

impl Filesystem {
    /// Opens (or creates) the database at `path` with default options.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_options(path, OpenOptions::default())
    }

    /// Opens (or creates) the database at `path`, applying `options`.
    pub fn open_with_options(path: impl AsRef<Path>, options: OpenOptions) -> Result<Self> {
        let db_path = path.as_ref().to_path_buf();
        debug!(path = %db_path.display(), "opening filesystem database");

        let unencrypted_on_disk = is_unencrypted_or_absent(&db_path);
        let conn = Connection::open(&db_path)?;

        if !options.passphrase.is_empty() {
            apply_passphrase(&conn, options.passphrase.as_str(), unencrypted_on_disk)?;
        }

        conn.busy_timeout(options.busy_timeout)?;
        conn.execute_batch(schema::PRAGMA_FOREIGN_KEYS)?;
        if options.wal {
            conn.pragma_update(None, "journal_mode", "WAL")?;
        }

        bootstrap_schema(&conn)?;

        Ok(Filesystem {
            inner: Mutex::new(Inner { conn, cwd: ROOT_ID, last_error: None }),
            registry: Registry::new(),
            db_path,
        })
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn fail(&self, inner: &mut Inner, err: FsError) {
        warn!(error = %err, "operation failed");
        inner.last_error = Some(err.to_string());
    }

    /// Returns and clears the last-error string.
    pub fn error(&self) -> String {
        self.lock().last_error.take().unwrap_or_default()
    }

    /// Returns the database file path.
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Absolute path of `cwd`.
    pub fn pwd(&self) -> String {
        let mut inner = self.lock();
        match node::build_absolute_path(&inner.conn, inner.cwd) {
            Ok(p) => p,
            Err(e) => {
                self.fail(&mut inner, e);
                String::new()
            }
        }
    }

    /// Lists the children of `path` (default `.`), or a singleton list if
    /// `path` names a file.
    pub fn ls(&self, path: &str) -> Vec<NodeRow> {
        let mut inner = self.lock();
        trace!(path, "ls");
        match self.ls_inner(&mut inner, path) {
            Ok(rows) => rows,
            Err(e) => {
                self.fail(&mut inner, e);
                Vec::new()
            }
        }
    }

    fn ls_inner(&self, inner: &mut Inner, path: &str) -> Result<Vec<NodeRow>> {
        let id = path::resolve(&inner.conn, inner.cwd, path)?;
        let target = node::lookup_by_id(&inner.conn, id)?.ok_or(FsError::NotFound)?;
        if target.is_file() {
            return Ok(vec![target]);
        }
        node::list_children(&inner.conn, id)
    }

    /// Creates a directory at `path`.
    pub fn mkdir(&self, path: &str) -> bool {
        let mut inner = self.lock();
        trace!(path, "mkdir");
        self.run(&mut inner, |inner| ops::mkdir(&inner.conn, inner.cwd, path))
    }

    /// Changes `cwd` to `path`. Fails for file targets.
    pub fn cd(&self, path: &str) -> bool {
        let mut inner = self.lock();
        trace!(path, "cd");
        let result = (|| -> Result<u32> {
            let id = path::resolve(&inner.conn, inner.cwd, path)?;
            let node_row = node::lookup_by_id(&inner.conn, id)?.ok_or(FsError::NotFound)?;
            if node_row.is_file() {
                return Err(FsError::NotFound);
            }
            Ok(id)
        })();
        match result {
            Ok(id) => {
                inner.cwd = id;
                true
            }
            Err(e) => {
                self.fail(&mut inner, e);
                false
            }
        }
    }

    /// Deletes the node at `path` and its subtree. Fails for `/`.
    pub fn rm(&self, path: &str) -> bool {
        let mut inner = self.lock();
        trace!(path, "rm");
        let result = ops::rm(&inner.conn, inner.cwd, path);
        match result {
            Ok(reset_cwd) => {
                if reset_cwd {
                    inner.cwd = ROOT_ID;
                }
                true
            }
            Err(e) => {
                self.fail(&mut inner, e);
                false
            }
        }
    }

    /// Creates a file at `path` from `data`, passed through `codec` on the
    /// way in. Never overwrites an existing path.
    pub fn write(&self, path: &str, data: &[u8], codec: &str) -> bool {
        trace!(path, codec, len = data.len(), "write");
        // Encode outside the mutex: codec callbacks may recurse into the
        // registry and must never observe it holding the database lock.
        let encoded = self.registry.call_encode(codec, data);

        let mut inner = self.lock();
        self.run(&mut inner, |inner| {
            blob::write_transaction(&inner.conn, inner.cwd, path, &encoded, data.len(), codec)
        })
    }

    /// Reads and decodes the file at `path`. Returns an empty vector on error.
    pub fn read(&self, path: &str) -> Vec<u8> {
        trace!(path, "read");
        let mut inner = self.lock();

        let resolved = (|| -> Result<(NodeRow, Vec<u8>)> {
            let id = path::resolve(&inner.conn, inner.cwd, path)?;
            blob::read_encoded(&inner.conn, id)
        })();

        let (node_row, encoded) = match resolved {
            Ok(pair) => pair,
            Err(e) => {
                self.fail(&mut inner, e);
                return Vec::new();
            }
        };

        // Release the lock across decode: the codec may call back into
        // call_decode/call_encode, which must never deadlock against us.
        drop(inner);
        let codec_name = node_row.codec.as_deref().unwrap_or("raw");
        let decoded = self.registry.call_decode(codec_name, &encoded);

        let mut inner = self.lock();
        if let Some(expected) = node_row.size_raw {
            if decoded.len() as i64 != expected {
                self.fail(
                    &mut inner,
                    FsError::BrokenInvariant(format!(
                        "File size doesn't match.\nFS meta - {expected}, File - {}",
                        decoded.len()
                    )),
                );
                return Vec::new();
            }
        }
        decoded
    }

    /// Moves/renames `from` to `to`. A trailing `/` in `to` keeps the
    /// source's leaf name.
    pub fn mv(&self, from: &str, to: &str) -> bool {
        let mut inner = self.lock();
        trace!(from, to, "mv");
        self.run(&mut inner, |inner| ops::mv(&inner.conn, inner.cwd, from, to))
    }

    /// Copies the file at `from` to `to`. Directories are not supported.
    pub fn cp(&self, from: &str, to: &str) -> bool {
        let mut inner = self.lock();
        trace!(from, to, "cp");
        self.run(&mut inner, |inner| ops::cp(&inner.conn, inner.cwd, from, to))
    }

    /// Runs the engine's storage-compaction command.
    pub fn vacuum(&self) -> bool {
        let mut inner = self.lock();
        self.run(&mut inner, |inner| ops::vacuum(&inner.conn))
    }

    /// Registers an encode function under `name`. Panics if `name` is
    /// already registered.
    pub fn register_encode<F>(&self, name: &str, f: F)
    where
        F: Fn(&Registry, &[u8]) -> Vec<u8> + Send + Sync + 'static,
    {
        self.registry.register_encode(name, f);
    }

    /// Registers a decode function under `name`. Panics if `name` is
    /// already registered.
    pub fn register_decode<F>(&self, name: &str, f: F)
    where
        F: Fn(&Registry, &[u8]) -> Vec<u8> + Send + Sync + 'static,
    {
        self.registry.register_decode(name, f);
    }

    /// Invokes the encode function registered under `name`.
    pub fn call_encode(&self, name: &str, bytes: &[u8]) -> Vec<u8> {
        self.registry.call_encode(name, bytes)
    }

    /// Invokes the decode function registered under `name`.
    pub fn call_decode(&self, name: &str, bytes: &[u8]) -> Vec<u8> {
        self.registry.call_decode(name, bytes)
    }

    /// Escape hatch: invokes `callback` with the raw database connection
    /// under the facade's mutex, for advanced queries outside this design
    ///
    pub fn with_raw_connection<R>(&self, callback: impl FnOnce(&Connection) -> R) -> R {
        let inner = self.lock();
        callback(&inner.conn)
    }

    /// Runs `op`, turning any [`FsError`] into a `false` return plus a
    /// stashed last-error string — the boolean-contract collapse described
    /// at the public API boundary.
    fn run(&self, inner: &mut Inner, op: impl FnOnce(&mut Inner) -> Result<()>) -> bool {
        match op(inner) {
            Ok(()) => true,
            Err(e) => {
                self.fail(inner, e);
                false
            }
        }
    }
}

fn bootstrap_schema(conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    for statement in schema::INIT_DB {
        tx.execute_batch(statement)?;
    }
    tx.commit()?;
    Ok(())
}

/// Mirrors `SQLite::Database::isUnencrypted`: a brand new (nonexistent)
/// file, or one whose first bytes are the plaintext SQLite header, counts
/// as unencrypted — a passphrase given for either is applied as a new key
/// rather than an unlock attempt.
fn is_unencrypted_or_absent(path: &Path) -> bool {
    const SQLITE_HEADER: &[u8] = b"SQLite format 3\0";
    match std::fs::read(path) {
        Ok(bytes) => bytes.len() < SQLITE_HEADER.len() || &bytes[..SQLITE_HEADER.len()] == SQLITE_HEADER,
        Err(_) => true,
    }
}

#[cfg(feature = "encryption")]
fn apply_passphrase(conn: &Connection, passphrase: &str, unencrypted_on_disk: bool) -> Result<()> {
    let pragma = if unencrypted_on_disk { "rekey" } else { "key" };
    conn.pragma_update(None, pragma, passphrase)?;
    Ok(())
}

#[cfg(not(feature = "encryption"))]
fn apply_passphrase(_conn: &Connection, _passphrase: &str, _unencrypted_on_disk: bool) -> Result<()> {
    Err(FsError::EncryptionUnavailable)
}
