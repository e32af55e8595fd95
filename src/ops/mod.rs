//! Transactional tree operations: `mkdir`, `rm`, `mv`, `cp`, `vacuum`.
//!
//! Each function operates on an already-locked [`rusqlite::Connection`];
//! the facade owns lock acquisition.

mod cp;
mod mkdir;
mod mv;
mod rm;
mod vacuum;

pub use cp::cp;
pub use mkdir::mkdir;
pub use mv::mv;
pub use rm::rm;
pub use vacuum::vacuum;

use rusqlite::Connection;

use crate::error::{FsError, Result};
use crate::node;

/// Rejects `mv`/`cp` if a node already occupies `(parent, name)`, whatever
/// kind it is. A directory there would otherwise fall through to the
/// `(parent, name)` unique constraint and surface as a raw engine error
/// instead of a clean one.
fn reject_existing_target(conn: &Connection, parent: u32, name: &str) -> Result<()> {
    if let Some(existing) = node::lookup_by_parent_and_name(conn, parent, name)? {
        let message =
            if existing.is_file() { "target cannot be an existing file" } else { "target cannot be an existing directory" };
        return Err(FsError::WrongKind(message));
    }
    Ok(())
}
