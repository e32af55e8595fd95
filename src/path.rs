//! Path resolution from a path string to a node id.

use rusqlite::Connection;

use crate::error::{FsError, Result};
use crate::node;
use crate::schema::ROOT_ID;

/// Resolves `path` (taken relative to `cwd` unless absolute) to a node id.
///
/// Rules, in order:
/// 1. empty path ⇒ `cwd`
/// 2. `"/"` ⇒ root
/// 3. split on `/`, dropping empty components
/// 4. start from root if absolute, else from `cwd`
/// 5. walk each component (`.` no-op, `..` to parent, otherwise child lookup)
pub fn resolve(conn: &Connection, cwd: u32, path: &str) -> Result<u32> {
    if path.is_empty() {
        return Ok(cwd);
    }
    if path == "/" {
        return Ok(ROOT_ID);
    }

    let mut id = if path.starts_with('/') { ROOT_ID } else { cwd };

    for component in path.split('/').filter(|c| !c.is_empty()) {
        match component {
            "." => continue,
            ".." => {
                id = parent_of(conn, id)?;
            }
            name => {
                let child = node::lookup_by_parent_and_name(conn, id, name)?;
                match child {
                    Some(row) => id = row.id,
                    None => return Err(FsError::NotFound),
                }
            }
        }
    }

    Ok(id)
}

/// Parent of `id`; the parent of root is root.
fn parent_of(conn: &Connection, id: u32) -> Result<u32> {
    if id == ROOT_ID {
        return Ok(ROOT_ID);
    }
    match node::lookup_by_id(conn, id)? {
        Some(row) => Ok(row.parent_id.unwrap_or(ROOT_ID)),
        None => Err(FsError::NotFound),
    }
}

/// Splits `full_path` into `(parent_id, leaf_name)` at the last `/`.
///
/// Everything up to and including the final `/` is resolved as a directory
/// path; the remainder is the leaf name. A path with no `/` resolves its
/// parent to `cwd`. This is the sole input-shaping step for `mkdir`,
/// `write`, `rm`, `mv`, `cp`.
pub fn split_parent_and_leaf(conn: &Connection, cwd: u32, full_path: &str) -> Result<(u32, String)> {
    match full_path.rfind('/') {
        None => Ok((cwd, full_path.to_string())),
        Some(pos) => {
            let (dir, name) = full_path.split_at(pos + 1);
            let parent_id = resolve(conn, cwd, dir)?;
            Ok((parent_id, name.to_string()))
        }
    }
}
