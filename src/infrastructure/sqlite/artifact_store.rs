use crate::domain::entities::corpus::{Corpus, CorpusMember};
use crate::domain::error::DomainError;
use crate::domain::model::artifacts::{ModelRun, TrainedModel};
use crate::domain::model::similarity::SimilarityMatrix;
use crate::domain::model::sparse::SparseVector;
use crate::domain::model::vectorizer::{FeatureMatrix, Vocabulary};
use crate::domain::ports::artifact_store::ArtifactStore;
use crate::domain::values::run_id::RunId;
use chrono::DateTime;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;

/// Runs whose artifacts are kept: the active run and the one before it.
pub const RETAINED_RUNS: usize = 2;

pub struct SqliteArtifactStore {
    conn: Mutex<Connection>,
    retained: usize,
}

impl SqliteArtifactStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
            retained: RETAINED_RUNS,
        }
    }

    /// Keeps artifacts for the `n` newest runs. The active run is always kept.
    pub fn with_retention(mut self, n: usize) -> Self {
        self.retained = n.max(1);
        self
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, DomainError> {
        self.conn
            .lock()
            .map_err(|e| DomainError::Storage(e.to_string()))
    }

    fn row_to_run(row: &rusqlite::Row) -> Result<(String, String, i64, i64), rusqlite::Error> {
        Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
    }

    fn parse_run(raw: (String, String, i64, i64)) -> Result<ModelRun, DomainError> {
        let (run_id, trained_at, corpus_size, vocabulary_size) = raw;
        let trained_at = DateTime::parse_from_rfc3339(&trained_at)
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .map_err(|e| DomainError::Parse(format!("trained_at of run {run_id}: {e}")))?;
        Ok(ModelRun {
            run_id: RunId::from(run_id),
            trained_at,
            corpus_size: corpus_size as usize,
            vocabulary_size: vocabulary_size as usize,
        })
    }

    /// A run whose artifacts are still stored. Pruned runs count as absent.
    fn run(conn: &Connection, run_id: &RunId) -> Result<Option<ModelRun>, DomainError> {
        conn.query_row(
            "SELECT run_id, trained_at, corpus_size, vocabulary_size FROM model_runs WHERE run_id = ?1 AND pruned = 0",
            params![run_id.as_str()],
            Self::row_to_run,
        )
        .optional()?
        .map(Self::parse_run)
        .transpose()
    }

    fn active(conn: &Connection) -> Result<Option<RunId>, DomainError> {
        let id: Option<String> = conn
            .query_row("SELECT run_id FROM active_model WHERE slot = 0", [], |r| r.get(0))
            .optional()?;
        Ok(id.map(RunId::from))
    }

    fn vocabulary(conn: &Connection, run_id: &RunId) -> Result<Option<Vocabulary>, DomainError> {
        if Self::run(conn, run_id)?.is_none() {
            return Ok(None);
        }
        let mut stmt = conn.prepare("SELECT term FROM vocabulary WHERE run_id = ?1 ORDER BY col")?;
        let terms = stmt
            .query_map(params![run_id.as_str()], |r| r.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(Vocabulary::from_terms(run_id.clone(), terms)))
    }

    fn feature_matrix(conn: &Connection, run_id: &RunId) -> Result<Option<FeatureMatrix>, DomainError> {
        let Some(run) = Self::run(conn, run_id)? else {
            return Ok(None);
        };
        let mut stmt = conn.prepare("SELECT counts FROM feature_rows WHERE run_id = ?1 ORDER BY position")?;
        let rows = stmt
            .query_map(params![run_id.as_str()], |r| r.get::<_, Vec<u8>>(0))?
            .map(|blob| blob.map(|b| SparseVector::from_bytes(&b)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(FeatureMatrix::new(run_id.clone(), run.vocabulary_size, rows)))
    }

    fn similarity(conn: &Connection, run_id: &RunId) -> Result<Option<SimilarityMatrix>, DomainError> {
        let row: Option<(i64, Vec<u8>)> = conn
            .query_row(
                "SELECT n, matrix FROM similarity_matrices WHERE run_id = ?1",
                params![run_id.as_str()],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .optional()?;
        Ok(row.map(|(n, blob)| SimilarityMatrix::from_bytes(run_id.clone(), n as usize, &blob)))
    }

    fn corpus(conn: &Connection, run_id: &RunId) -> Result<Option<Corpus>, DomainError> {
        if Self::run(conn, run_id)?.is_none() {
            return Ok(None);
        }
        let mut stmt = conn.prepare(
            "SELECT user_id, full_name, email, company, location, features
             FROM corpus_members WHERE run_id = ?1 ORDER BY position",
        )?;
        let members = stmt
            .query_map(params![run_id.as_str()], |r| {
                Ok(CorpusMember {
                    user_id: r.get(0)?,
                    full_name: r.get(1)?,
                    email: r.get(2)?,
                    company: r.get(3)?,
                    location: r.get(4)?,
                    features: r.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(Corpus::new(run_id.clone(), members)))
    }

    /// Marks runs beyond the retention window as pruned and drops their
    /// artifacts. Their `model_runs` rows stay for the run history.
    fn prune(tx: &rusqlite::Transaction, active: &str, retained: usize) -> Result<usize, DomainError> {
        let pruned = tx
            .execute(
                "UPDATE model_runs SET pruned = 1
                 WHERE pruned = 0 AND run_id != ?1 AND run_id NOT IN (
                     SELECT run_id FROM model_runs ORDER BY trained_at DESC, rowid DESC LIMIT ?2
                 )",
                params![active, retained as i64],
            )
            .map_err(|e| DomainError::Storage(format!("Failed to prune runs: {e}")))?;
        if pruned > 0 {
            tx.execute_batch(
                "DELETE FROM vocabulary WHERE run_id IN (SELECT run_id FROM model_runs WHERE pruned = 1);
                 DELETE FROM corpus_members WHERE run_id IN (SELECT run_id FROM model_runs WHERE pruned = 1);
                 DELETE FROM feature_rows WHERE run_id IN (SELECT run_id FROM model_runs WHERE pruned = 1);
                 DELETE FROM similarity_matrices WHERE run_id IN (SELECT run_id FROM model_runs WHERE pruned = 1);",
            )
            .map_err(|e| DomainError::Storage(format!("Failed to drop pruned artifacts: {e}")))?;
        }
        Ok(pruned)
    }

    fn missing(run_id: &RunId, what: &str) -> DomainError {
        DomainError::ArtifactMismatch(format!("run {run_id} has no stored {what}"))
    }
}

impl ArtifactStore for SqliteArtifactStore {
    fn save(&self, model: &TrainedModel) -> Result<(), DomainError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let run = model.run();
        let run_id = run.run_id.as_str();

        tx.execute(
            "INSERT INTO model_runs (run_id, trained_at, corpus_size, vocabulary_size) VALUES (?1, ?2, ?3, ?4)",
            params![run_id, run.trained_at.to_rfc3339(), run.corpus_size as i64, run.vocabulary_size as i64],
        )
        .map_err(|e| DomainError::Storage(format!("Failed to record run: {e}")))?;

        {
            let mut stmt = tx.prepare("INSERT INTO vocabulary (run_id, col, term) VALUES (?1, ?2, ?3)")?;
            for (col, term) in model.vocabulary().terms().iter().enumerate() {
                stmt.execute(params![run_id, col as i64, term])?;
            }

            let mut stmt = tx.prepare(
                "INSERT INTO corpus_members (run_id, position, user_id, full_name, email, company, location, features)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for (pos, m) in model.corpus().members.iter().enumerate() {
                stmt.execute(params![
                    run_id,
                    pos as i64,
                    m.user_id,
                    m.full_name,
                    m.email,
                    m.company,
                    m.location,
                    m.features,
                ])?;
            }

            let mut stmt = tx.prepare("INSERT INTO feature_rows (run_id, position, counts) VALUES (?1, ?2, ?3)")?;
            for (pos, row) in model.features().rows.iter().enumerate() {
                stmt.execute(params![run_id, pos as i64, row.to_bytes()])?;
            }
        }

        tx.execute(
            "INSERT INTO similarity_matrices (run_id, n, matrix) VALUES (?1, ?2, ?3)",
            params![run_id, model.similarity().n as i64, model.similarity().to_bytes()],
        )?;
        tx.execute(
            "INSERT INTO active_model (slot, run_id) VALUES (0, ?1)
             ON CONFLICT(slot) DO UPDATE SET run_id = excluded.run_id",
            params![run_id],
        )?;
        let pruned = Self::prune(&tx, run_id, self.retained)?;

        tx.commit()
            .map_err(|e| DomainError::Storage(format!("Failed to commit run {run_id}: {e}")))?;
        if pruned > 0 {
            tracing::info!(run_id, pruned, "dropped artifacts of old runs");
        }
        Ok(())
    }

    fn load(&self) -> Result<Option<TrainedModel>, DomainError> {
        let conn = self.lock()?;
        let Some(run_id) = Self::active(&conn)? else {
            return Ok(None);
        };
        let run = Self::run(&conn, &run_id)?.ok_or_else(|| Self::missing(&run_id, "run record"))?;
        let vocabulary = Self::vocabulary(&conn, &run_id)?.ok_or_else(|| Self::missing(&run_id, "vocabulary"))?;
        let features = Self::feature_matrix(&conn, &run_id)?.ok_or_else(|| Self::missing(&run_id, "feature matrix"))?;
        let similarity = Self::similarity(&conn, &run_id)?.ok_or_else(|| Self::missing(&run_id, "similarity matrix"))?;
        let corpus = Self::corpus(&conn, &run_id)?.ok_or_else(|| Self::missing(&run_id, "corpus"))?;

        TrainedModel::from_parts(run.trained_at, vocabulary, features, similarity, corpus).map(Some)
    }

    fn active_run(&self) -> Result<Option<RunId>, DomainError> {
        Self::active(&*self.lock()?)
    }

    fn runs(&self) -> Result<Vec<ModelRun>, DomainError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT run_id, trained_at, corpus_size, vocabulary_size FROM model_runs ORDER BY trained_at DESC, rowid DESC",
        )?;
        let raw = stmt
            .query_map([], Self::row_to_run)?
            .collect::<Result<Vec<_>, _>>()?;
        raw.into_iter().map(Self::parse_run).collect()
    }

    fn load_vocabulary(&self, run_id: &RunId) -> Result<Option<Vocabulary>, DomainError> {
        Self::vocabulary(&*self.lock()?, run_id)
    }

    fn load_feature_matrix(&self, run_id: &RunId) -> Result<Option<FeatureMatrix>, DomainError> {
        Self::feature_matrix(&*self.lock()?, run_id)
    }

    fn load_similarity(&self, run_id: &RunId) -> Result<Option<SimilarityMatrix>, DomainError> {
        Self::similarity(&*self.lock()?, run_id)
    }

    fn load_corpus(&self, run_id: &RunId) -> Result<Option<Corpus>, DomainError> {
        Self::corpus(&*self.lock()?, run_id)
    }
}
