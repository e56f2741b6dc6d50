//! Writes a normalized batch into the catalog store.
//!
//! Records are applied one at a time in input order, so when a batch holds
//! two records with the same name the later one wins. A failed write is
//! logged and counted; it never stops the rest of the batch.

use std::future::Future;

use seedcat_core::{IngestSummary, ProductRecord, UpsertOutcome};
use sqlx::PgPool;

use crate::products::upsert_product;
use crate::retry::{retry_transient, RetryPolicy};
use crate::DbError;

/// A store that can upsert one product by name.
pub trait CatalogStore {
    fn upsert(
        &self,
        record: &ProductRecord,
    ) -> impl Future<Output = Result<UpsertOutcome, DbError>> + Send;
}

/// The Postgres-backed catalog. Transient failures are retried per
/// [`RetryPolicy`].
#[derive(Debug, Clone)]
pub struct PgCatalog {
    pool: PgPool,
    retry: RetryPolicy,
}

impl PgCatalog {
    #[must_use]
    pub fn new(pool: PgPool, retry: RetryPolicy) -> Self {
        Self { pool, retry }
    }
}

impl CatalogStore for PgCatalog {
    fn upsert(
        &self,
        record: &ProductRecord,
    ) -> impl Future<Output = Result<UpsertOutcome, DbError>> + Send {
        retry_transient(self.retry, move || upsert_product(&self.pool, record))
    }
}

/// Upserts every record in order and folds the outcomes into `summary`.
///
/// Returns the updated summary. `created`, `replaced`, and `failed` are
/// incremented; `seen` and `rejected` are left to the caller.
pub async fn upsert_all<S>(
    store: &S,
    records: &[ProductRecord],
    mut summary: IngestSummary,
) -> IngestSummary
where
    S: CatalogStore + Sync,
{
    for record in records {
        match store.upsert(record).await {
            Ok(outcome) => {
                tracing::debug!(name = %record.name, ?outcome, "product upserted");
                summary.record_outcome(outcome);
            }
            Err(e) => {
                tracing::warn!(name = %record.name, error = %e, "product upsert failed");
                summary.failed += 1;
            }
        }
    }

    summary
}
