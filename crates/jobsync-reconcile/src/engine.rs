//! Per-candidate reconciliation: deduplicate, match company and location,
//! enable and tag.

use chrono::{DateTime, Duration, Utc};
use jobsync_core::{normalize_company_name, CandidatePosting, ExternalIdentity};
use jobsync_db::{JobListing, JobStore, NewJobListing};

use crate::context::RunContext;
use crate::error::ReconcileError;
use crate::location::{resolve_location, LocationResolution};
use crate::refresh::RefreshOutcome;
use crate::tagger::tag_location;

/// Where a newly created listing ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatedState {
    /// Linked to a known company location and live.
    Enabled,
    /// Company matched but the location was new; the listing stays disabled
    /// until a refresh finds the location.
    LocationCreated,
    /// Stored disabled with no company.
    NoCompanyMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Created {
        listing_id: i64,
        state: CreatedState,
    },
    Duplicate {
        listing_id: i64,
        refresh: RefreshOutcome,
    },
}

impl ReconcileOutcome {
    #[must_use]
    pub fn listing_id(&self) -> i64 {
        match self {
            ReconcileOutcome::Created { listing_id, .. }
            | ReconcileOutcome::Duplicate { listing_id, .. } => *listing_id,
        }
    }
}

/// Applies candidates to a store using one run's taxonomy snapshot.
pub struct Reconciler<'a, S: JobStore + ?Sized> {
    pub(crate) ctx: &'a RunContext,
    pub(crate) store: &'a mut S,
}

impl<'a, S: JobStore + ?Sized> Reconciler<'a, S> {
    pub fn new(ctx: &'a RunContext, store: &'a mut S) -> Self {
        Self { ctx, store }
    }

    /// Reconcile one candidate against the store.
    ///
    /// Reprocessing a candidate that is already stored never creates a
    /// second listing; it goes through [`Reconciler::refresh`] instead.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::InvalidCandidate`] for a candidate with no
    /// title or link or whose expiry would overflow, and
    /// [`ReconcileError::Store`] if a store call fails.
    /// Tagging failures are logged, not returned.
    pub fn reconcile(
        &mut self,
        candidate: CandidatePosting,
        now: DateTime<Utc>,
    ) -> Result<ReconcileOutcome, ReconcileError> {
        validate(&candidate, self.ctx.settings().listing_ttl)?;

        let identity = candidate.identity();
        if let Some(existing) = self.store.find_listing(&identity)? {
            let listing_id = existing.id;
            let refresh = self.refresh(existing, now)?;
            tracing::debug!(listing_id, ?refresh, "duplicate candidate");
            return Ok(ReconcileOutcome::Duplicate {
                listing_id,
                refresh,
            });
        }

        if let Some(listing_id) = self.try_partition_shortcut(&candidate, &identity, now)? {
            return Ok(ReconcileOutcome::Created {
                listing_id,
                state: CreatedState::Enabled,
            });
        }

        let mut listing = self
            .store
            .insert_listing(new_listing(candidate, &identity, now))?;

        let ctx = self.ctx;
        let Some(company) = ctx.companies().match_company(&listing.raw_company_name) else {
            tracing::debug!(
                listing_id = listing.id,
                company = %listing.raw_company_name,
                "no company match"
            );
            return Ok(ReconcileOutcome::Created {
                listing_id: listing.id,
                state: CreatedState::NoCompanyMatch,
            });
        };
        listing.company_id = Some(company.id);
        self.store.update_listing(&listing)?;

        let state = match resolve_location(&mut *self.store, company.id, &listing.raw_location)? {
            LocationResolution::Matched(location) => {
                self.enable(&mut listing, location.id)?;
                tag_location(&mut *self.store, ctx, location.id, &listing.description);
                CreatedState::Enabled
            }
            LocationResolution::Created(location) => {
                tag_location(&mut *self.store, ctx, location.id, &listing.description);
                CreatedState::LocationCreated
            }
        };

        tracing::debug!(listing_id = listing.id, ?state, "created listing");
        Ok(ReconcileOutcome::Created {
            listing_id: listing.id,
            state,
        })
    }

    /// Link the listing to a location, enable it and persist.
    pub(crate) fn enable(
        &mut self,
        listing: &mut JobListing,
        location_id: i64,
    ) -> Result<(), ReconcileError> {
        let expires = expiry(
            &listing.source,
            listing.date_published,
            self.ctx.settings().listing_ttl,
        )?;
        listing.company_location_id = Some(location_id);
        listing.enabled = true;
        listing.date_expired = Some(expires);
        self.store.update_listing(listing)?;
        Ok(())
    }

    /// Indeed candidates fetched for a specific enabled company location are
    /// created enabled against it when the company name agrees.
    fn try_partition_shortcut(
        &mut self,
        candidate: &CandidatePosting,
        identity: &ExternalIdentity,
        now: DateTime<Utc>,
    ) -> Result<Option<i64>, ReconcileError> {
        let Some(location_id) = candidate.company_location_hint() else {
            return Ok(None);
        };
        let Some(location) = self.store.get_location(location_id)? else {
            tracing::debug!(location_id, "partition location not found");
            return Ok(None);
        };
        if !location.enabled {
            tracing::debug!(location_id, "partition location disabled");
            return Ok(None);
        }
        let ctx = self.ctx;
        let Some(company) = ctx.companies().get(location.company_id) else {
            return Ok(None);
        };
        if normalize_company_name(&company.name)
            != normalize_company_name(&candidate.fields().raw_company_name)
        {
            return Ok(None);
        }

        let mut new = new_listing(candidate.clone(), identity, now);
        new.date_expired = Some(expiry(
            &new.source,
            new.date_published,
            ctx.settings().listing_ttl,
        )?);
        new.company_id = Some(company.id);
        new.company_location_id = Some(location.id);
        new.enabled = true;
        let listing = self.store.insert_listing(new)?;

        tracing::debug!(listing_id = listing.id, location_id, "created listing from partition");
        Ok(Some(listing.id))
    }
}

fn validate(candidate: &CandidatePosting, listing_ttl: Duration) -> Result<(), ReconcileError> {
    let fields = candidate.fields();
    let missing = if fields.title.trim().is_empty() {
        Some("title")
    } else if fields.link.trim().is_empty() {
        Some("link")
    } else {
        None
    };
    if let Some(field) = missing {
        return Err(ReconcileError::InvalidCandidate {
            source_name: candidate.source().to_string(),
            reason: format!("missing {field}"),
        });
    }
    expiry(candidate.source(), fields.date_published, listing_ttl).map(|_| ())
}

/// `published + ttl`, or an error when that falls outside chrono's range.
fn expiry(
    source: &str,
    published: DateTime<Utc>,
    listing_ttl: Duration,
) -> Result<DateTime<Utc>, ReconcileError> {
    published
        .checked_add_signed(listing_ttl)
        .ok_or_else(|| ReconcileError::InvalidCandidate {
            source_name: source.to_string(),
            reason: format!("publish date {published} out of range"),
        })
}

fn new_listing(
    candidate: CandidatePosting,
    identity: &ExternalIdentity,
    now: DateTime<Utc>,
) -> NewJobListing {
    let source = candidate.source().to_string();
    let aggregator_source = candidate.aggregator_source().map(str::to_string);
    let tags = candidate.tags().to_vec();
    let fields = candidate.into_fields();

    NewJobListing {
        title: fields.title,
        description: fields.description,
        external_link_id: fields.link,
        link_unique: matches!(identity, ExternalIdentity::Link { .. }),
        source,
        aggregator_source,
        raw_company_name: fields.raw_company_name,
        raw_location: fields.raw_location,
        tags,
        company_id: None,
        company_location_id: None,
        date_published: fields.date_published,
        date_modified: now,
        date_expired: None,
        enabled: false,
        raw_payload: fields.raw,
    }
}
