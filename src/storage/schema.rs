//! Database schema definitions

/// SQL to create the preferences table
pub const CREATE_PREFERENCES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS preferences (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL
)
"#;

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![CREATE_PREFERENCES_TABLE]
}
