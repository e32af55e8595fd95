//! CRUD over the `fs` table.

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{FsError, Result};
use crate::schema::{self, ATTR_FILE, ROOT_ID};

/// A single row of the `fs` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRow {
    pub id: u32,
    /// `None` only for the root sentinel.
    pub parent_id: Option<u32>,
    pub name: String,
    pub attributes: i64,
    /// Byte length of the payload as persisted (encoded). `None` for directories.
    pub size_stored: Option<i64>,
    /// Byte length of the payload as supplied by the caller. `None` for directories.
    pub size_raw: Option<i64>,
    /// Registered codec name used on write. `None` for directories.
    pub codec: Option<String>,
}

impl NodeRow {
    pub fn is_file(&self) -> bool {
        self.attributes & ATTR_FILE != 0
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(NodeRow {
            id: row.get(0)?,
            parent_id: row.get(1)?,
            name: row.get(2)?,
            attributes: row.get(3)?,
            size_stored: row.get(4)?,
            size_raw: row.get(5)?,
            codec: row.get(6)?,
        })
    }
}

/// Reserved names a leaf component may never take.
pub fn is_reserved_name(name: &str) -> bool {
    name.is_empty() || name == "." || name == ".." || name.contains('/')
}

pub fn lookup_by_id(conn: &Connection, id: u32) -> Result<Option<NodeRow>> {
    conn.query_row(schema::SELECT_NODE_BY_ID, params![id], NodeRow::from_row)
        .optional()
        .map_err(FsError::from)
}

pub fn lookup_by_parent_and_name(conn: &Connection, parent_id: u32, name: &str) -> Result<Option<NodeRow>> {
    conn.query_row(schema::SELECT_NODE_BY_PARENT_AND_NAME, params![parent_id, name], NodeRow::from_row)
        .optional()
        .map_err(FsError::from)
}

pub fn list_children(conn: &Connection, parent_id: u32) -> Result<Vec<NodeRow>> {
    let mut stmt = conn.prepare(schema::SELECT_CHILDREN)?;
    let rows = stmt.query_map(params![parent_id], NodeRow::from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn insert_dir(conn: &Connection, parent_id: u32, name: &str) -> Result<()> {
    conn.execute(schema::INSERT_DIR, params![parent_id, name])?;
    Ok(())
}

pub fn insert_file_meta(
    conn: &Connection,
    parent_id: u32,
    name: &str,
    size_stored: i64,
    size_raw: i64,
    codec: &str,
) -> Result<()> {
    conn.execute(
        schema::INSERT_FILE_META,
        params![parent_id, name, size_stored, size_raw, codec, ATTR_FILE],
    )?;
    Ok(())
}

pub fn delete_subtree(conn: &Connection, id: u32) -> Result<bool> {
    let affected = conn.execute(schema::DELETE_NODE, params![id])?;
    Ok(affected > 0)
}

pub fn set_parent(conn: &Connection, id: u32, new_parent_id: u32) -> Result<()> {
    conn.execute(schema::SET_PARENT, params![new_parent_id, id])?;
    Ok(())
}

pub fn set_name(conn: &Connection, id: u32, new_name: &str) -> Result<()> {
    conn.execute(schema::SET_NAME, params![new_name, id])?;
    Ok(())
}

pub fn copy_node(conn: &Connection, target_parent: u32, target_name: &str, source_id: u32) -> Result<()> {
    conn.execute(schema::COPY_NODE_META, params![target_parent, target_name, source_id])?;
    Ok(())
}

pub fn copy_blob(conn: &Connection, new_id: u32, source_id: u32) -> Result<()> {
    conn.execute(schema::COPY_BLOB, params![new_id, source_id])?;
    Ok(())
}

/// Reconstructs the absolute path of `id` via the recursive CTE in
/// [`schema::BUILD_ABSOLUTE_PATH`]. The root itself has no ancestor rows to
/// walk, so it is special-cased to `"/"`.
pub fn build_absolute_path(conn: &Connection, id: u32) -> Result<String> {
    if id == ROOT_ID {
        return Ok("/".to_string());
    }
    let joined: Option<String> = conn
        .query_row(schema::BUILD_ABSOLUTE_PATH, params![id], |row| row.get(0))
        .optional()?
        .flatten();
    Ok(format!("/{}", joined.unwrap_or_default()))
}

/// True if `ancestor_id` is `id` itself or an ancestor of it, walking
/// `parent` links up to the root. Used by `mv`'s cycle check.
pub fn is_ancestor_or_self(conn: &Connection, ancestor_id: u32, id: u32) -> Result<bool> {
    let mut current = id;
    loop {
        if current == ancestor_id {
            return Ok(true);
        }
        if current == ROOT_ID {
            return Ok(false);
        }
        match lookup_by_id(conn, current)? {
            Some(node) => match node.parent_id {
                Some(parent) => current = parent,
                None => return Ok(false),
            },
            None => return Ok(false),
        }
    }
}
