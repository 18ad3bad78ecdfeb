//! SQL schema for the Perfit SQLite store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS garments (
    garment_id      TEXT PRIMARY KEY,
    image_ref       TEXT NOT NULL,
    raw_category    TEXT NOT NULL,   -- as supplied at upload
    category        TEXT NOT NULL,   -- canonical label
    subcategory     TEXT,
    occasion_tags   TEXT NOT NULL DEFAULT '[]',
    weather_tags    TEXT NOT NULL DEFAULT '[]',
    event_formality TEXT,
    created_at      TEXT NOT NULL    -- ISO 8601 UTC
);

-- Layers are a JSON snapshot of the garments at save time, so closet edits
-- and deletions never reach back into saved outfits.
CREATE TABLE IF NOT EXISTS outfits (
    outfit_id      TEXT PRIMARY KEY,
    layers_json    TEXT NOT NULL,
    occasion       TEXT NOT NULL,
    tags           TEXT NOT NULL DEFAULT '[]',
    scheduled_date TEXT NOT NULL UNIQUE,   -- YYYY-MM-DD; one outfit per day
    created_at     TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS garments_category_idx ON garments(category);
CREATE INDEX IF NOT EXISTS outfits_created_idx   ON outfits(created_at);

PRAGMA user_version = 1;
";
