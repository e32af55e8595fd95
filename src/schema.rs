//! Schema & query catalogue.
//!
//! Fixed DDL, run once at open time, and the fixed parameterized query
//! strings used throughout the rest of the crate. Table and column names
//! (`fs`, `data`, `attrib`, `size_raw`, `compression`, …) match the format
//! produced by the reference implementation this crate is wire-compatible
//! with, so a database file written by one is readable by the other.

/// Root sentinel node id. Reserved, never reused.
pub const ROOT_ID: u32 = 0;

/// FILE bit within the `attrib` column. All other bits are reserved.
pub const ATTR_FILE: i64 = 1;

/// DDL run inside a single transaction at open time. Idempotent.
pub const INIT_DB: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS "fs" (
        "id"          INTEGER,
        "parent"      INTEGER,
        "name"        TEXT NOT NULL,
        "attrib"      INTEGER NOT NULL DEFAULT 0,
        "size"        INTEGER,
        "size_raw"    INTEGER,
        "compression" TEXT,
        PRIMARY KEY("id" AUTOINCREMENT),
        UNIQUE("parent","name"),
        CONSTRAINT "parent_fk" FOREIGN KEY("parent") REFERENCES "fs"("id") ON UPDATE CASCADE ON DELETE CASCADE
    )"#,
    r#"CREATE TABLE IF NOT EXISTS "data" (
        "id"   INTEGER,
        "data" BLOB NOT NULL,
        PRIMARY KEY("id"),
        CONSTRAINT "file_id" FOREIGN KEY("id") REFERENCES "fs"("id") ON UPDATE CASCADE ON DELETE CASCADE
    )"#,
    r#"INSERT OR IGNORE INTO "fs" ("id", "name") VALUES (0, '/')"#,
];

pub const PRAGMA_FOREIGN_KEYS: &str = "PRAGMA foreign_keys = ON";

/// Absolute-path reconstruction via a recursive CTE walking `id` → `parent`
/// → … → root. `depth` counts steps away from the starting node, so
/// ordering by it descending yields root-to-leaf order regardless of how
/// node ids relate to tree depth (a `mv` can reparent a low-id node under a
/// higher-id directory, so id order does not track path order). Returns a
/// single row with the `/`-joined path, or no row for the root itself
/// (handled specially by the caller).
pub const BUILD_ABSOLUTE_PATH: &str = r#"
    WITH RECURSIVE
    walk(id, parent, name, depth) AS (
        SELECT id, parent, name, 0 FROM fs WHERE id IS ?1 AND parent IS NOT NULL
        UNION ALL
        SELECT fs.id, fs.parent, fs.name, walk.depth + 1 FROM fs, walk WHERE fs.id IS walk.parent AND fs.parent IS NOT NULL
    )
    SELECT group_concat(name, '/') FROM (SELECT * FROM walk ORDER BY depth DESC)
"#;

pub const SELECT_NODE_BY_ID: &str =
    r#"SELECT "id","parent","name","attrib","size","size_raw","compression" FROM "fs" WHERE "id" IS ?1"#;

pub const SELECT_NODE_BY_PARENT_AND_NAME: &str =
    r#"SELECT "id","parent","name","attrib","size","size_raw","compression" FROM "fs" WHERE "parent" IS ?1 AND "name" IS ?2"#;

pub const SELECT_CHILDREN: &str =
    r#"SELECT "id","parent","name","attrib","size","size_raw","compression" FROM "fs" WHERE "parent" IS ?1 ORDER BY "id" ASC"#;

pub const INSERT_DIR: &str = r#"INSERT INTO "fs" ("parent", "name") VALUES (?1, ?2)"#;

pub const INSERT_FILE_META: &str = r#"INSERT INTO "fs" ("parent", "name", "size", "size_raw", "compression", "attrib") VALUES (?1, ?2, ?3, ?4, ?5, ?6)"#;

pub const DELETE_NODE: &str = r#"DELETE FROM "fs" WHERE "id" IS ?1"#;

pub const SET_PARENT: &str = r#"UPDATE "fs" SET "parent" = ?1 WHERE "id" IS ?2"#;

pub const SET_NAME: &str = r#"UPDATE "fs" SET "name" = ?1 WHERE "id" IS ?2"#;

pub const COPY_NODE_META: &str = r#"INSERT INTO "fs" ("parent", "name", "attrib", "size", "size_raw", "compression") SELECT ?1, ?2, "attrib", "size", "size_raw", "compression" FROM "fs" WHERE "id" IS ?3"#;

pub const COPY_BLOB: &str = r#"INSERT INTO "data" ("id", "data") SELECT ?1, "data" FROM "data" WHERE "id" IS ?2"#;

pub const INSERT_BLOB: &str = r#"INSERT INTO "data" ("id", "data") VALUES (?1, ?2)"#;

pub const SELECT_BLOB: &str = r#"SELECT "data" FROM "data" WHERE "id" IS ?1"#;
