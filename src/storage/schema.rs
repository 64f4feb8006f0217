//! Database schema definitions

/// SQL to create the analyses table
///
/// Rows are ordered by `timestamp`; the implicit `rowid` breaks ties.
pub const CREATE_ANALYSES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS analyses (
    id TEXT PRIMARY KEY,
    text TEXT NOT NULL,
    label TEXT NOT NULL,
    compound REAL NOT NULL,
    neg REAL NOT NULL,
    neu REAL NOT NULL,
    pos REAL NOT NULL,
    timestamp TEXT NOT NULL
)
"#;

pub const INSERT_ANALYSIS: &str = r#"
INSERT INTO analyses (id, text, label, compound, neg, neu, pos, timestamp)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
"#;

pub const SELECT_RECENT: &str = r#"
SELECT id, text, label, compound, neg, neu, pos, timestamp
FROM analyses
ORDER BY timestamp DESC, rowid DESC
LIMIT ?1
"#;

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![CREATE_ANALYSES_TABLE]
}
