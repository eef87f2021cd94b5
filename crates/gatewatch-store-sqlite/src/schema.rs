//! SQL schema for the Gatewatch SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Detection events are strictly append-only.
-- `seq` gives the insertion order used for newest-first listing.
CREATE TABLE IF NOT EXISTS events (
    seq           INTEGER PRIMARY KEY AUTOINCREMENT,
    event_id      TEXT NOT NULL UNIQUE,
    subject_label TEXT NOT NULL CHECK (length(trim(subject_label)) > 0),
    observed_at   TEXT NOT NULL,   -- client-supplied, kept verbatim
    image_data    BLOB,
    content_type  TEXT,
    recorded_at   TEXT NOT NULL,   -- RFC 3339 UTC; server-assigned
    CHECK ((image_data IS NULL) = (content_type IS NULL))
);

CREATE TABLE IF NOT EXISTS subjects (
    seq          INTEGER PRIMARY KEY AUTOINCREMENT,
    subject_id   TEXT NOT NULL UNIQUE,
    name         TEXT NOT NULL CHECK (length(trim(name)) > 0),
    image_data   BLOB NOT NULL CHECK (length(image_data) > 0),
    content_type TEXT NOT NULL,
    enrolled_at  TEXT NOT NULL
);

PRAGMA user_version = 1;
";
