use rusqlite::Connection;

use crate::error::Result;

/// Runs the engine's storage-compaction command.
pub fn vacuum(conn: &Connection) -> Result<()> {
    conn.execute_batch("VACUUM")?;
    Ok(())
}
