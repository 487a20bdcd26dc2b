use crate::domain::error::DomainError;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), DomainError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS model_runs (
            run_id TEXT PRIMARY KEY,
            trained_at TEXT NOT NULL,
            corpus_size INTEGER NOT NULL,
            vocabulary_size INTEGER NOT NULL,
            pruned INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS active_model (
            slot INTEGER PRIMARY KEY CHECK (slot = 0),
            run_id TEXT NOT NULL REFERENCES model_runs(run_id)
        );

        CREATE TABLE IF NOT EXISTS vocabulary (
            run_id TEXT NOT NULL REFERENCES model_runs(run_id),
            col INTEGER NOT NULL,
            term TEXT NOT NULL,
            PRIMARY KEY (run_id, col)
        );

        CREATE TABLE IF NOT EXISTS corpus_members (
            run_id TEXT NOT NULL REFERENCES model_runs(run_id),
            position INTEGER NOT NULL,
            user_id TEXT NOT NULL,
            full_name TEXT NOT NULL,
            email TEXT NOT NULL,
            company TEXT NOT NULL,
            location TEXT NOT NULL,
            features TEXT NOT NULL,
            PRIMARY KEY (run_id, position)
        );

        CREATE TABLE IF NOT EXISTS feature_rows (
            run_id TEXT NOT NULL REFERENCES model_runs(run_id),
            position INTEGER NOT NULL,
            counts BLOB NOT NULL,
            PRIMARY KEY (run_id, position)
        );

        CREATE TABLE IF NOT EXISTS similarity_matrices (
            run_id TEXT PRIMARY KEY REFERENCES model_runs(run_id),
            n INTEGER NOT NULL,
            matrix BLOB NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_runs_trained ON model_runs(trained_at);
        "
    ).map_err(|e| DomainError::Storage(format!("Migration failed: {e}")))
}
