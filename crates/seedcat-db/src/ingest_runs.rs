//! Database operations for `ingest_runs`.

use chrono::{DateTime, Utc};
use seedcat_core::IngestSummary;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

const INGEST_RUN_COLUMNS: &str = "id, public_id, source_path, trigger_source, status, \
     rows_seen, rows_rejected, rows_created, rows_replaced, rows_failed, \
     error_message, started_at, completed_at";

/// A row from the `ingest_runs` table.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct IngestRunRow {
    pub id: i64,
    pub public_id: Uuid,
    pub source_path: String,
    pub trigger_source: String,
    /// One of `running`, `succeeded`, or `failed`.
    pub status: String,
    pub rows_seen: i32,
    pub rows_rejected: i32,
    pub rows_created: i32,
    pub rows_replaced: i32,
    pub rows_failed: i32,
    pub error_message: Option<String>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

fn to_count(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Opens a new run in `running` status with `started_at = NOW()`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn create_ingest_run(
    pool: &PgPool,
    source_path: &str,
    trigger_source: &str,
) -> Result<IngestRunRow, DbError> {
    let row = sqlx::query_as::<_, IngestRunRow>(&format!(
        "INSERT INTO ingest_runs (public_id, source_path, trigger_source, status) \
         VALUES ($1, $2, $3, 'running') \
         RETURNING {INGEST_RUN_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(source_path)
    .bind(trigger_source)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Marks a running run as `succeeded` and records the batch tally.
///
/// # Errors
///
/// Returns [`DbError::InvalidIngestRunTransition`] if the run is not
/// `running`, or [`DbError::Sqlx`] if the update fails.
pub async fn complete_ingest_run(
    pool: &PgPool,
    id: i64,
    summary: &IngestSummary,
) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE ingest_runs \
         SET status = 'succeeded', completed_at = NOW(), \
             rows_seen = $1, rows_rejected = $2, rows_created = $3, \
             rows_replaced = $4, rows_failed = $5 \
         WHERE id = $6 AND status = 'running'",
    )
    .bind(to_count(summary.seen))
    .bind(to_count(summary.rejected))
    .bind(to_count(summary.created))
    .bind(to_count(summary.replaced))
    .bind(to_count(summary.failed))
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::InvalidIngestRunTransition {
            id,
            expected_status: "running",
        });
    }

    Ok(())
}

/// Marks a running run as `failed` with the given message.
///
/// # Errors
///
/// Returns [`DbError::InvalidIngestRunTransition`] if the run is not
/// `running`, or [`DbError::Sqlx`] if the update fails.
pub async fn fail_ingest_run(pool: &PgPool, id: i64, error_message: &str) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE ingest_runs \
         SET status = 'failed', completed_at = NOW(), error_message = $1 \
         WHERE id = $2 AND status = 'running'",
    )
    .bind(error_message)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::InvalidIngestRunTransition {
            id,
            expected_status: "running",
        });
    }

    Ok(())
}

/// Fetches a single run by its internal `id`.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row exists with the given `id`, or
/// [`DbError::Sqlx`] if the query fails.
pub async fn get_ingest_run(pool: &PgPool, id: i64) -> Result<IngestRunRow, DbError> {
    sqlx::query_as::<_, IngestRunRow>(&format!(
        "SELECT {INGEST_RUN_COLUMNS} FROM ingest_runs WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)
}

/// Returns the most recent `limit` runs, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_ingest_runs(pool: &PgPool, limit: i64) -> Result<Vec<IngestRunRow>, DbError> {
    let rows = sqlx::query_as::<_, IngestRunRow>(&format!(
        "SELECT {INGEST_RUN_COLUMNS} FROM ingest_runs \
         ORDER BY started_at DESC, id DESC \
         LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
