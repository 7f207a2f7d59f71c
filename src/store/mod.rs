//! Read-only access to the `swim_results` table.
//!
//! The table is populated by an out-of-band ingestion process; this layer
//! only reads. Every query goes through bound parameters: filter values
//! are never interpolated into SQL text.
//!
//! Expected schema (all columns TEXT):
//! `race_date, meet_name, event_name, result_time, finish_rank, lane,
//! division, swimmer_name, gender, birth_year`.

use std::time::Duration;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use thiserror::Error;

use crate::config::PoolConfig;
use crate::models::RaceResult;

/// Errors from the data store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

const COLUMNS: &str = "race_date, meet_name, event_name, result_time, \
     finish_rank, lane, division, swimmer_name, gender, birth_year";

/// Pooled handle over the results table.
#[derive(Clone)]
pub struct ResultStore {
    pool: SqlitePool,
}

impl ResultStore {
    /// Connect with the configured pool limits. The acquire timeout is the
    /// resource-exhaustion safeguard; a held-up pool surfaces as a store
    /// error, not a hang.
    pub async fn connect(url: &str, cfg: &PoolConfig) -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(cfg.max_connections)
            .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_seconds))
            .idle_timeout(Duration::from_secs(cfg.idle_timeout_seconds))
            .connect(url)
            .await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool (tests).
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Cheap liveness probe.
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// One swimmer's rows matching an event pattern, ascending by date.
    pub async fn results_for_swimmer_event(
        &self,
        name: &str,
        event_pattern: &str,
    ) -> Result<Vec<RaceResult>, StoreError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM swim_results \
             WHERE swimmer_name = ?1 AND event_name LIKE ?2 \
             ORDER BY race_date ASC"
        );
        let rows = sqlx::query_as::<_, RaceResult>(&sql)
            .bind(name)
            .bind(event_pattern)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// All of one swimmer's rows, any event.
    pub async fn results_for_swimmer(&self, name: &str) -> Result<Vec<RaceResult>, StoreError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM swim_results \
             WHERE swimmer_name = ?1 \
             ORDER BY race_date ASC"
        );
        let rows = sqlx::query_as::<_, RaceResult>(&sql)
            .bind(name)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Every swimmer's rows matching an event pattern, ascending by date.
    pub async fn results_for_event(
        &self,
        event_pattern: &str,
    ) -> Result<Vec<RaceResult>, StoreError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM swim_results \
             WHERE event_name LIKE ?1 \
             ORDER BY race_date ASC"
        );
        let rows = sqlx::query_as::<_, RaceResult>(&sql)
            .bind(event_pattern)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

/// LIKE pattern for substring event matching. An exact label is just a
/// pattern that happens to match exactly.
pub fn like_pattern(event: &str) -> String {
    let t = event.trim();
    if t.is_empty() {
        "%".to_string()
    } else {
        format!("%{t}%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern() {
        assert_eq!(like_pattern("50 meter breaststroke"), "%50 meter breaststroke%");
        assert_eq!(like_pattern("  breaststroke "), "%breaststroke%");
        assert_eq!(like_pattern(""), "%");
    }

    #[tokio::test]
    async fn test_queries_against_memory_db() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query(
            "CREATE TABLE swim_results (
                race_date TEXT, meet_name TEXT, event_name TEXT,
                result_time TEXT, finish_rank TEXT, lane TEXT,
                division TEXT, swimmer_name TEXT, gender TEXT,
                birth_year TEXT
            )",
        )
        .execute(&pool)
        .await
        .unwrap();
        for (name, date, time) in [("A", "20230601", "31.50"), ("B", "20220101", "30.00")] {
            sqlx::query(
                "INSERT INTO swim_results \
                 (race_date, meet_name, event_name, result_time, swimmer_name) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .bind(date)
            .bind("Y Open")
            .bind("50 meter breaststroke")
            .bind(time)
            .bind(name)
            .execute(&pool)
            .await
            .unwrap();
        }

        let store = ResultStore::from_pool(pool);
        store.ping().await.unwrap();

        let rows = store
            .results_for_swimmer_event("A", &like_pattern("breaststroke"))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].swimmer_name, "A");
        assert_eq!(rows[0].seconds(), Some(31.5));

        let rows = store
            .results_for_event(&like_pattern("50 meter breaststroke"))
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        // Ascending by race_date.
        assert_eq!(rows[0].swimmer_name, "B");

        let rows = store.results_for_swimmer("A").await.unwrap();
        assert_eq!(rows.len(), 1);
    }
}
