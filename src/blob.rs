//! The transactional write/read of file payloads.
//!
//! Codec interposition itself (encode before the mutex is acquired, decode
//! between two separate acquisitions) is choreographed by the facade
//! ([`crate::Filesystem::write`], [`crate::Filesystem::read`]); this module
//! holds the part that runs *with* the connection in hand.

use rusqlite::Connection;

use crate::error::{FsError, Result};
use crate::node::{self, NodeRow};
use crate::path;
use crate::schema;

/// Creates a file node plus its blob row in one transaction. Never
/// overwrites: the `(parent, name)` unique constraint rejects a second
/// write at the same path.
pub fn write_transaction(
    conn: &Connection,
    cwd: u32,
    full_path: &str,
    encoded: &[u8],
    raw_len: usize,
    codec_name: &str,
) -> Result<()> {
    let (parent_id, leaf) = path::split_parent_and_leaf(conn, cwd, full_path)?;
    if node::is_reserved_name(&leaf) {
        return Err(FsError::NotFound);
    }

    let tx = conn.unchecked_transaction()?;

    node::insert_file_meta(&tx, parent_id, &leaf, encoded.len() as i64, raw_len as i64, codec_name)?;
    let new_node = node::lookup_by_parent_and_name(&tx, parent_id, &leaf)?.ok_or(FsError::BrokenInvariant(
        "file metadata row vanished immediately after insert".to_string(),
    ))?;
    tx.execute(schema::INSERT_BLOB, rusqlite::params![new_node.id, encoded])?;

    tx.commit()?;
    Ok(())
}

/// Fetches the node and its raw (encoded) blob bytes for `id`. The blob row
/// must exist for a FILE node; its absence is a broken
/// invariant, not a plain not-found.
pub fn read_encoded(conn: &Connection, id: u32) -> Result<(NodeRow, Vec<u8>)> {
    let node_row = node::lookup_by_id(conn, id)?.ok_or(FsError::NotFound)?;
    if !node_row.is_file() {
        return Err(FsError::WrongKind("Can't read folder data"));
    }
    let data: Vec<u8> = conn
        .query_row(schema::SELECT_BLOB, rusqlite::params![id], |row| row.get(0))
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => {
                FsError::BrokenInvariant(format!("file node {id} has no blob row"))
            }
            other => FsError::from(other),
        })?;
    Ok((node_row, data))
}
