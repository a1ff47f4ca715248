use chrono::{DateTime, Duration, Utc};
use jobsync_db::{JobStore, StoreError};

/// Disable enabled listings of `source` that were not modified within the
/// `stale_after` window ending at `now`.
///
/// Listings re-seen during the run had `date_modified` bumped, so only ads
/// that dropped out of the feed are swept. Company, location and
/// `date_expired` are left as they are.
///
/// # Errors
///
/// Returns [`StoreError`] if the bulk update fails.
pub fn expire_stale<S: JobStore + ?Sized>(
    store: &mut S,
    source: &str,
    now: DateTime<Utc>,
    stale_after: Duration,
) -> Result<u64, StoreError> {
    let cutoff = now - stale_after;
    let disabled = store.disable_stale_listings(source, cutoff)?;
    tracing::info!(source, disabled, cutoff = %cutoff, "expired stale listings");
    Ok(disabled)
}
