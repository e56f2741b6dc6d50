//! The `ingest` command: spreadsheet to catalog in one sequential pass.
//!
//! The source is read and normalized before any database work, so a missing
//! or unreadable file exits non-zero without opening a connection or
//! recording a run.

use std::path::Path;

use seedcat_core::{AppConfig, IngestSummary};
use seedcat_db::{PgCatalog, RetryPolicy};
use seedcat_ingest::{NormalizedBatch, Normalizer};

const TRIGGER_SOURCE: &str = "cli";

/// Reads `source`, normalizes every row, and upserts the accepted records.
///
/// With `dry_run` the store is never contacted; the would-be writes are
/// printed instead.
///
/// # Errors
///
/// Returns an error if the source cannot be read, the store cannot be
/// reached, or the run record cannot be created. Per-row rejections and
/// failed writes are counted, not propagated.
pub(crate) async fn run_ingest(
    config: &AppConfig,
    source: &Path,
    dry_run: bool,
) -> anyhow::Result<()> {
    let sheet = seedcat_ingest::read_source(source)?;
    tracing::info!(
        path = %source.display(),
        sheet = %sheet.sheet_name,
        rows = sheet.rows.len(),
        "starting ingestion"
    );

    let batch = Normalizer::new(config.placeholder_image_url.clone()).normalize_all(&sheet.rows);
    let summary = IngestSummary {
        seen: batch.seen,
        rejected: batch.rejections.len(),
        ..IngestSummary::default()
    };

    if dry_run {
        print_dry_run(&batch);
        return Ok(());
    }

    let pool = crate::connect(config).await?;
    seedcat_db::run_migrations(&pool).await?;

    let source_label = source.display().to_string();
    let run = seedcat_db::create_ingest_run(&pool, &source_label, TRIGGER_SOURCE).await?;

    let catalog = PgCatalog::new(pool.clone(), RetryPolicy::from_app_config(config));
    let summary = seedcat_db::upsert_all(&catalog, &batch.records, summary).await;

    if summary.written() == 0 && summary.failed > 0 {
        let message = format!("all {} upserts failed", summary.failed);
        fail_run_best_effort(&pool, run.id, message).await;
    } else if let Err(err) = seedcat_db::complete_ingest_run(&pool, run.id, &summary).await {
        tracing::error!(run_id = run.id, error = %err, "failed to record ingest run summary");
    }

    tracing::info!(run_id = run.id, %summary, "ingestion finished");
    println!("{summary}");

    Ok(())
}

fn print_dry_run(batch: &NormalizedBatch) {
    for record in &batch.records {
        println!(
            "would upsert: {} [{}] slug={}",
            record.name, record.category, record.slug
        );
    }
    for rejection in &batch.rejections {
        println!("would skip: {rejection}");
    }
    println!(
        "dry-run: seen {}, rejected {}, accepted {}",
        batch.seen,
        batch.rejections.len(),
        batch.records.len()
    );
}

/// Attempt to mark an ingest run as failed, logging any secondary error.
async fn fail_run_best_effort(pool: &sqlx::PgPool, run_id: i64, message: String) {
    tracing::warn!(run_id, reason = %message, "marking ingest run as failed");
    if let Err(mark_err) = seedcat_db::fail_ingest_run(pool, run_id, &message).await {
        tracing::error!(
            run_id,
            error = %mark_err,
            "failed to mark ingest run as failed"
        );
    }
}
