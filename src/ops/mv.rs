use rusqlite::Connection;

use crate::error::{FsError, Result};
use crate::node;
use crate::ops::reject_existing_target;
use crate::path;

/// Reparents/renames the node at `from` to `to`.
///
/// A trailing `/` in `to` (so its leaf name is empty) keeps the source's
/// current name. Fails if any node already occupies the destination
/// `(parent, name)`, or if the destination would place the source inside
/// its own subtree, keeping the tree acyclic.
pub fn mv(conn: &Connection, cwd: u32, from: &str, to: &str) -> Result<()> {
    let (target_parent, target_leaf) = path::split_parent_and_leaf(conn, cwd, to)?;
    let source = path::resolve(conn, cwd, from)?;
    let source_node = node::lookup_by_id(conn, source)?.ok_or(FsError::NotFound)?;

    let target_name = if target_leaf.is_empty() { source_node.name.clone() } else { target_leaf };
    reject_existing_target(conn, target_parent, &target_name)?;

    if node::is_ancestor_or_self(conn, source, target_parent)? {
        return Err(FsError::WrongKind("cannot move a directory into its own subtree"));
    }

    let tx = conn.unchecked_transaction()?;
    node::set_parent(&tx, source_node.id, target_parent)?;
    if source_node.name != target_name {
        node::set_name(&tx, source_node.id, &target_name)?;
    }
    tx.commit()?;
    Ok(())
}
