//! SQL schema for the Campus SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per document. `fields` is a JSON object of top-level fields.
CREATE TABLE IF NOT EXISTS documents (
    collection  TEXT NOT NULL,
    id          TEXT NOT NULL,
    fields      TEXT NOT NULL DEFAULT '{}',
    PRIMARY KEY (collection, id)
);

PRAGMA user_version = 1;
";
