//! Command handlers. Each loads the state snapshot, applies the taxonomy
//! seed file and writes the snapshot back when it changed anything.

use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use jobsync_core::{load_taxonomy, AppConfig, JobSource};
use jobsync_db::MemoryStore;
use jobsync_reconcile::{expire_stale, IngestionRun, ReconcileSettings, RunContext, RunSummary};

use crate::adapter::JsonFileAdapter;

fn open_store(config: &AppConfig) -> anyhow::Result<MemoryStore> {
    let mut store = MemoryStore::load_snapshot(&config.state_path)
        .with_context(|| format!("loading state from {}", config.state_path.display()))?;
    let taxonomy = load_taxonomy(&config.taxonomy_path)
        .with_context(|| format!("loading taxonomy from {}", config.taxonomy_path.display()))?;
    store.seed_taxonomy(taxonomy);
    Ok(store)
}

/// Reconcile the candidates in `input` as one run of `source`.
///
/// When `dry_run` is `true` candidates are only decoded and counted; the
/// state file is not written.
///
/// # Errors
///
/// Returns an error if the state or taxonomy cannot be loaded, the input
/// cannot be read, or the state cannot be saved. Bad candidates are logged
/// and counted, not propagated.
pub(crate) fn run_ingest(
    config: &AppConfig,
    source: JobSource,
    input: &Path,
    partition: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<RunSummary> {
    let mut store = open_store(config)?;
    let ctx = RunContext::load(&store, &store, ReconcileSettings::from_app_config(config))?;
    let mut adapter = JsonFileAdapter::new(source, input);

    let summary = IngestionRun::new(&ctx)
        .dry_run(dry_run)
        .execute(&mut store, &mut adapter, partition, Utc::now())
        .with_context(|| format!("ingesting {source} from {}", input.display()))?;

    if !dry_run {
        store
            .save_snapshot(&config.state_path)
            .with_context(|| format!("saving state to {}", config.state_path.display()))?;
    }
    Ok(summary)
}

/// Run the stale-listing sweep for `source` on its own.
///
/// # Errors
///
/// Returns an error if the state cannot be loaded or saved.
pub(crate) fn run_expire(config: &AppConfig, source: JobSource) -> anyhow::Result<u64> {
    let mut store = open_store(config)?;
    let disabled = expire_stale(
        &mut store,
        source.as_str(),
        Utc::now(),
        config.stale_after(),
    )?;
    store
        .save_snapshot(&config.state_path)
        .with_context(|| format!("saving state to {}", config.state_path.display()))?;
    Ok(disabled)
}

pub(crate) fn print_summary(summary: &RunSummary, dry_run: bool) {
    if dry_run {
        println!(
            "dry-run: {} candidates from {} ({} undecodable), nothing written",
            summary.fetched, summary.source, summary.failed
        );
        return;
    }
    println!(
        "run {}: {} fetched from {}; {} created, {} enabled, {} new locations, {} unmatched, \
         {} duplicates ({} refreshed), {} failed, {} expired",
        summary.run_id,
        summary.fetched,
        summary.source,
        summary.created,
        summary.enabled,
        summary.location_created,
        summary.no_company,
        summary.duplicates,
        summary.refreshed,
        summary.failed,
        summary.expired,
    );
}
