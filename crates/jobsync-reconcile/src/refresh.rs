//! Handling for candidates that already have a stored listing.

use chrono::{DateTime, Duration, Utc};
use jobsync_core::JobSource;
use jobsync_db::{JobListing, JobStore};

use crate::engine::Reconciler;
use crate::error::ReconcileError;
use crate::location::{create_location, find_existing_location};
use crate::tagger::tag_location;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Touched since yesterday's date; nothing written.
    AlreadyFresh,
    /// `date_modified` bumped, nothing else changed.
    Touched,
    /// A previously disabled listing found its location and went live.
    Enabled,
    /// A disabled listing got a new company location created for it.
    LocationCreated,
    /// An enabled listing's location was tagged again.
    Retagged,
}

/// True when `date_modified` falls on yesterday's calendar date (UTC) or
/// later. Compares dates, not a rolling 24 hour window.
#[must_use]
pub fn is_fresh(date_modified: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    date_modified.date_naive() >= (now - Duration::days(1)).date_naive()
}

impl<S: JobStore + ?Sized> Reconciler<'_, S> {
    /// Bring an existing listing up to date with a repeat sighting.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::Store`] if a store call fails.
    pub fn refresh(
        &mut self,
        mut listing: JobListing,
        now: DateTime<Utc>,
    ) -> Result<RefreshOutcome, ReconcileError> {
        if is_fresh(listing.date_modified, now) {
            return Ok(RefreshOutcome::AlreadyFresh);
        }

        listing.date_modified = now;
        self.store.update_listing(&listing)?;

        if listing.enabled {
            return Ok(self.retag(&listing));
        }

        let ctx = self.ctx;
        if listing.company_id.is_none() {
            if let Some(company) = ctx.companies().match_company(&listing.raw_company_name) {
                listing.company_id = Some(company.id);
                self.store.update_listing(&listing)?;
            }
        }
        let Some(company_id) = listing.company_id else {
            return Ok(RefreshOutcome::Touched);
        };

        if let Some(location) =
            find_existing_location(&*self.store, company_id, &listing.raw_location)?
        {
            self.enable(&mut listing, location.id)?;
            tag_location(&mut *self.store, ctx, location.id, &listing.description);
            tracing::debug!(listing_id = listing.id, location_id = location.id, "listing enabled on refresh");
            return Ok(RefreshOutcome::Enabled);
        }

        // Indeed never creates locations on refresh.
        if listing.source == JobSource::Indeed.as_str() {
            return Ok(RefreshOutcome::Touched);
        }

        let location = create_location(&mut *self.store, company_id, &listing.raw_location)?;
        tag_location(&mut *self.store, ctx, location.id, &listing.description);
        Ok(RefreshOutcome::LocationCreated)
    }

    fn retag(&mut self, listing: &JobListing) -> RefreshOutcome {
        match listing.company_location_id {
            Some(location_id) if !listing.description.trim().is_empty() => {
                tag_location(&mut *self.store, self.ctx, location_id, &listing.description);
                RefreshOutcome::Retagged
            }
            _ => RefreshOutcome::Touched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn yesterday_counts_as_fresh() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 0, 30, 0).unwrap();
        let yesterday_morning = Utc.with_ymd_and_hms(2026, 10, 17, 0, 1, 0).unwrap();
        assert!(is_fresh(yesterday_morning, now));
    }

    #[test]
    fn two_calendar_days_back_is_stale() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 0, 30, 0).unwrap();
        let late_two_days_ago = Utc.with_ymd_and_hms(2026, 10, 16, 23, 59, 0).unwrap();
        assert!(!is_fresh(late_two_days_ago, now));
    }

    #[test]
    fn same_day_is_fresh() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
        assert!(is_fresh(now, now));
    }
}
