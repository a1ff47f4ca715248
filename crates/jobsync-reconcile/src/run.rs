//! One ingestion run: fetch a source, reconcile every candidate, then sweep
//! listings that were not seen.

use chrono::{DateTime, Utc};
use jobsync_core::{AdapterError, JobSource, SourceAdapter};
use jobsync_db::JobStore;
use uuid::Uuid;

use crate::context::RunContext;
use crate::engine::{CreatedState, ReconcileOutcome, Reconciler};
use crate::lifecycle::expire_stale;
use crate::refresh::RefreshOutcome;

/// Counters for a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub source: JobSource,
    pub fetched: usize,
    /// New listings, whatever state they ended in.
    pub created: usize,
    /// Listings that went live during this run, new or refreshed.
    pub enabled: usize,
    pub location_created: usize,
    pub no_company: usize,
    pub duplicates: usize,
    /// Duplicates that were stale and got touched.
    pub refreshed: usize,
    pub failed: usize,
    pub expired: u64,
}

impl RunSummary {
    fn new(source: JobSource) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            source,
            fetched: 0,
            created: 0,
            enabled: 0,
            location_created: 0,
            no_company: 0,
            duplicates: 0,
            refreshed: 0,
            failed: 0,
            expired: 0,
        }
    }

    fn record(&mut self, outcome: ReconcileOutcome) {
        match outcome {
            ReconcileOutcome::Created { state, .. } => {
                self.created += 1;
                match state {
                    CreatedState::Enabled => self.enabled += 1,
                    CreatedState::LocationCreated => self.location_created += 1,
                    CreatedState::NoCompanyMatch => self.no_company += 1,
                }
            }
            ReconcileOutcome::Duplicate { refresh, .. } => {
                self.duplicates += 1;
                match refresh {
                    RefreshOutcome::AlreadyFresh => {}
                    RefreshOutcome::Enabled => {
                        self.refreshed += 1;
                        self.enabled += 1;
                    }
                    RefreshOutcome::LocationCreated => {
                        self.refreshed += 1;
                        self.location_created += 1;
                    }
                    RefreshOutcome::Touched | RefreshOutcome::Retagged => self.refreshed += 1,
                }
            }
        }
    }
}

/// Drives a single source through the engine.
#[derive(Debug, Clone, Copy)]
pub struct IngestionRun<'a> {
    ctx: &'a RunContext,
    dry_run: bool,
}

impl<'a> IngestionRun<'a> {
    #[must_use]
    pub fn new(ctx: &'a RunContext) -> Self {
        Self {
            ctx,
            dry_run: false,
        }
    }

    /// Fetch and count candidates without writing anything.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run the adapter once and reconcile what it returns, in feed order.
    ///
    /// Bad candidates are logged and counted in `failed`; they never stop the
    /// run. The stale-listing sweep runs once at the end unless this is a dry
    /// run.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] only when the adapter cannot produce the feed
    /// at all.
    pub fn execute<S, A>(
        &self,
        store: &mut S,
        adapter: &mut A,
        partition: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<RunSummary, AdapterError>
    where
        S: JobStore + ?Sized,
        A: SourceAdapter + ?Sized,
    {
        let source = adapter.source();
        let mut summary = RunSummary::new(source);
        tracing::info!(
            run_id = %summary.run_id,
            source = %source,
            partition = partition.unwrap_or("-"),
            dry_run = self.dry_run,
            "ingestion run started"
        );

        let candidates = adapter.fetch(partition)?;
        summary.fetched = candidates.len();

        if self.dry_run {
            summary.failed = candidates.iter().filter(|c| c.is_err()).count();
            tracing::info!(run_id = %summary.run_id, fetched = summary.fetched, "dry run; nothing written");
            return Ok(summary);
        }

        let mut reconciler = Reconciler::new(self.ctx, &mut *store);
        for (index, candidate) in candidates.into_iter().enumerate() {
            let candidate = match candidate {
                Ok(c) if c.feed() == source => c,
                Ok(c) => {
                    let e = AdapterError::WrongSource {
                        index,
                        expected: source,
                        found: c.feed(),
                    };
                    tracing::warn!(source = %source, error = %e, "skipping candidate");
                    summary.failed += 1;
                    continue;
                }
                Err(e) => {
                    tracing::warn!(source = %source, error = %e, "skipping candidate");
                    summary.failed += 1;
                    continue;
                }
            };

            match reconciler.reconcile(candidate, now) {
                Ok(outcome) => summary.record(outcome),
                Err(e) => {
                    tracing::warn!(source = %source, index, error = %e, "failed to reconcile candidate");
                    summary.failed += 1;
                }
            }
        }

        summary.expired =
            match expire_stale(&mut *store, source.as_str(), now, self.ctx.settings().stale_after) {
                Ok(n) => n,
                Err(e) => {
                    tracing::warn!(source = %source, error = %e, "stale listing sweep failed");
                    0
                }
            };

        if summary.failed > 0 {
            tracing::warn!(
                failed = summary.failed,
                fetched = summary.fetched,
                "some candidates failed during ingestion"
            );
        }
        tracing::info!(
            run_id = %summary.run_id,
            created = summary.created,
            enabled = summary.enabled,
            duplicates = summary.duplicates,
            expired = summary.expired,
            "ingestion run finished"
        );
        Ok(summary)
    }
}
