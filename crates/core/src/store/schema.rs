/// Schema for the content table. Every statement is idempotent.
///
/// `created_at` keeps millisecond precision so ordering by it is stable for
/// records saved within the same second. Older databases hold second-precision
/// values, so listings order by `julianday(created_at)` rather than the raw
/// text; `rowid` breaks any remaining tie.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS content (
    id TEXT PRIMARY KEY,
    session_id TEXT NOT NULL,
    topic TEXT NOT NULL,
    content TEXT NOT NULL,
    citations TEXT NOT NULL,
    generated_at TEXT NOT NULL,
    metadata TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
);

CREATE INDEX IF NOT EXISTS idx_session ON content(session_id);
CREATE INDEX IF NOT EXISTS idx_content_created_julian ON content(julianday(created_at) DESC);
"#;
