use chrono::{DateTime, Utc};
use jobsync_core::ExternalIdentity;
use thiserror::Error;

pub mod benefits;
pub mod listings;
pub mod locations;
pub mod memory;
pub mod snapshot;

pub use benefits::{Benefit, NewBenefit};
pub use listings::{JobListing, NewJobListing};
pub use locations::{CompanyLocation, NewCompanyLocation, DEFAULT_COUNTRY};
pub use memory::MemoryStore;
pub use snapshot::SnapshotError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence operations the reconciliation engine relies on.
///
/// Every write must be visible to the next read on the same store; the
/// engine re-reads locations between candidates of one run.
pub trait JobStore {
    // -- listings ----------------------------------------------------------

    /// # Errors
    ///
    /// Returns [`StoreError`] if the lookup fails.
    fn find_listing(&self, identity: &ExternalIdentity) -> Result<Option<JobListing>, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] if the lookup fails.
    fn get_listing(&self, id: i64) -> Result<Option<JobListing>, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if a link-identified listing with the
    /// same source and link already exists.
    fn insert_listing(&mut self, listing: NewJobListing) -> Result<JobListing, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the listing does not exist.
    fn update_listing(&mut self, listing: &JobListing) -> Result<(), StoreError>;

    /// Disable enabled listings of `source` (matched against either the
    /// listing's source or its aggregator) last modified before `cutoff`.
    ///
    /// Returns the number of listings disabled.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the update fails.
    fn disable_stale_listings(
        &mut self,
        source: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, StoreError>;

    // -- locations ---------------------------------------------------------

    /// # Errors
    ///
    /// Returns [`StoreError`] if the lookup fails.
    fn get_location(&self, id: i64) -> Result<Option<CompanyLocation>, StoreError>;

    /// Locations owned by `company_id`, in ascending id order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the lookup fails.
    fn list_locations_for_company(
        &self,
        company_id: i64,
    ) -> Result<Vec<CompanyLocation>, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] if the insert fails.
    fn insert_location(
        &mut self,
        location: NewCompanyLocation,
    ) -> Result<CompanyLocation, StoreError>;

    /// Associate a technology with a location. Returns `false` when the
    /// association already existed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the location does not exist.
    fn attach_technology(
        &mut self,
        location_id: i64,
        technology_id: i64,
    ) -> Result<bool, StoreError>;

    // -- benefits ----------------------------------------------------------

    /// The benefit row for a title, whichever location it points at.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the lookup fails.
    fn find_benefit_by_title(&self, title_id: i64) -> Result<Option<Benefit>, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] if the insert fails.
    fn insert_benefit(&mut self, benefit: NewBenefit) -> Result<Benefit, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the benefit does not exist.
    fn update_benefit(&mut self, benefit: &Benefit) -> Result<(), StoreError>;
}
