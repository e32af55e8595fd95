use rusqlite::Connection;

use crate::error::{FsError, Result};
use crate::node;
use crate::path;
use crate::schema::ROOT_ID;

/// Deletes the node at `path` (and, via cascade, its whole subtree).
/// Rejects the root, however it is spelled (`/`, `..` from root, `//`, …).
/// Returns whether `cwd` was the removed node or a descendant of it, in
/// which case the facade resets `cwd` to root.
pub fn rm(conn: &Connection, cwd: u32, path: &str) -> Result<bool> {
    let id = path::resolve(conn, cwd, path)?;
    if id == ROOT_ID {
        return Err(FsError::WrongKind("cannot remove the root"));
    }

    let cwd_affected = node::is_ancestor_or_self(conn, id, cwd)?;

    let deleted = node::delete_subtree(conn, id)?;
    if !deleted {
        return Err(FsError::NotFound);
    }

    Ok(cwd_affected)
}
