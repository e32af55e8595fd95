use rusqlite::Connection;

use crate::error::{FsError, Result};
use crate::node;
use crate::ops::reject_existing_target;
use crate::path;

/// Copies the file at `from` to `to`. Directories are not supported.
pub fn cp(conn: &Connection, cwd: u32, from: &str, to: &str) -> Result<()> {
    let (target_parent, target_leaf) = path::split_parent_and_leaf(conn, cwd, to)?;
    let source = path::resolve(conn, cwd, from)?;
    let source_node = node::lookup_by_id(conn, source)?.ok_or(FsError::NotFound)?;

    if !source_node.is_file() {
        return Err(FsError::WrongKind("you can only copy files"));
    }

    let target_name = if target_leaf.is_empty() { source_node.name.clone() } else { target_leaf };
    reject_existing_target(conn, target_parent, &target_name)?;

    let tx = conn.unchecked_transaction()?;
    node::copy_node(&tx, target_parent, &target_name, source_node.id)?;
    let new_node = node::lookup_by_parent_and_name(&tx, target_parent, &target_name)?.ok_or(
        FsError::BrokenInvariant("copied node vanished immediately after insert".to_string()),
    )?;
    node::copy_blob(&tx, new_node.id, source_node.id)?;
    tx.commit()?;
    Ok(())
}
