use rusqlite::Connection;

use crate::error::{FsError, Result};
use crate::node;
use crate::path;

/// Splits `path` into parent/leaf and inserts a directory row.
pub fn mkdir(conn: &Connection, cwd: u32, path: &str) -> Result<()> {
    let (parent_id, leaf) = path::split_parent_and_leaf(conn, cwd, path)?;
    if node::is_reserved_name(&leaf) {
        return Err(FsError::NotFound);
    }
    node::insert_dir(conn, parent_id, &leaf)
}
