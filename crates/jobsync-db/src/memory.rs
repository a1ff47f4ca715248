//! In-process [`JobStore`] backed by ordered maps.
//!
//! Also serves the taxonomy and company directory, so one value holds the
//! whole state of an ingestion run and can be written out as a snapshot.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use jobsync_core::{
    BenefitTitle, Company, CompanyDirectory, ExternalIdentity, ProviderError, TaxonomyFile,
    TaxonomyProvider, Technology,
};
use serde::{Deserialize, Serialize};

use crate::{
    Benefit, CompanyLocation, JobListing, JobStore, NewBenefit, NewCompanyLocation,
    NewJobListing, StoreError,
};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    companies: Vec<Company>,
    #[serde(default)]
    technologies: Vec<Technology>,
    #[serde(default)]
    benefit_titles: Vec<BenefitTitle>,
    #[serde(default)]
    listings: BTreeMap<i64, JobListing>,
    #[serde(default)]
    locations: BTreeMap<i64, CompanyLocation>,
    #[serde(default)]
    benefits: BTreeMap<i64, Benefit>,
    #[serde(default)]
    last_listing_id: i64,
    #[serde(default)]
    last_location_id: i64,
    #[serde(default)]
    last_benefit_id: i64,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_taxonomy(taxonomy: TaxonomyFile) -> Self {
        let mut store = Self::new();
        store.seed_taxonomy(taxonomy);
        store
    }

    /// Replace the taxonomy and company directory, keeping stored listings,
    /// locations and benefits.
    pub fn seed_taxonomy(&mut self, taxonomy: TaxonomyFile) {
        self.companies = taxonomy.companies;
        self.technologies = taxonomy.technologies;
        self.benefit_titles = taxonomy.benefit_titles;
    }

    pub fn listings(&self) -> impl Iterator<Item = &JobListing> {
        self.listings.values()
    }

    pub fn locations(&self) -> impl Iterator<Item = &CompanyLocation> {
        self.locations.values()
    }

    pub fn benefits(&self) -> impl Iterator<Item = &Benefit> {
        self.benefits.values()
    }

    /// Insert a listing row as-is, bypassing identity checks. Used to load
    /// fixtures and to restore state produced elsewhere.
    pub fn put_listing(&mut self, listing: JobListing) {
        self.last_listing_id = self.last_listing_id.max(listing.id);
        self.listings.insert(listing.id, listing);
    }

    fn next_id(counter: &mut i64) -> i64 {
        *counter += 1;
        *counter
    }
}

impl JobStore for MemoryStore {
    fn find_listing(&self, identity: &ExternalIdentity) -> Result<Option<JobListing>, StoreError> {
        Ok(self
            .listings
            .values()
            .find(|l| l.matches_identity(identity))
            .cloned())
    }

    fn get_listing(&self, id: i64) -> Result<Option<JobListing>, StoreError> {
        Ok(self.listings.get(&id).cloned())
    }

    fn insert_listing(&mut self, listing: NewJobListing) -> Result<JobListing, StoreError> {
        if listing.link_unique {
            let taken = self.listings.values().any(|l| {
                l.source == listing.source && l.external_link_id == listing.external_link_id
            });
            if taken {
                return Err(StoreError::Conflict(format!(
                    "{} listing already exists for {}",
                    listing.source, listing.external_link_id
                )));
            }
        }

        let id = Self::next_id(&mut self.last_listing_id);
        let row = JobListing::from_new(id, listing);
        self.listings.insert(id, row.clone());
        Ok(row)
    }

    fn update_listing(&mut self, listing: &JobListing) -> Result<(), StoreError> {
        let slot = self
            .listings
            .get_mut(&listing.id)
            .ok_or(StoreError::NotFound {
                entity: "listing",
                id: listing.id,
            })?;
        *slot = listing.clone();
        Ok(())
    }

    fn disable_stale_listings(
        &mut self,
        source: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        let mut disabled = 0;
        for listing in self.listings.values_mut() {
            if listing.enabled && listing.swept_by(source) && listing.date_modified < cutoff {
                listing.enabled = false;
                disabled += 1;
            }
        }
        Ok(disabled)
    }

    fn get_location(&self, id: i64) -> Result<Option<CompanyLocation>, StoreError> {
        Ok(self.locations.get(&id).cloned())
    }

    fn list_locations_for_company(
        &self,
        company_id: i64,
    ) -> Result<Vec<CompanyLocation>, StoreError> {
        Ok(self
            .locations
            .values()
            .filter(|l| l.company_id == company_id)
            .cloned()
            .collect())
    }

    fn insert_location(
        &mut self,
        location: NewCompanyLocation,
    ) -> Result<CompanyLocation, StoreError> {
        let id = Self::next_id(&mut self.last_location_id);
        let row = CompanyLocation::from_new(id, location);
        self.locations.insert(id, row.clone());
        Ok(row)
    }

    fn attach_technology(
        &mut self,
        location_id: i64,
        technology_id: i64,
    ) -> Result<bool, StoreError> {
        let location = self
            .locations
            .get_mut(&location_id)
            .ok_or(StoreError::NotFound {
                entity: "location",
                id: location_id,
            })?;
        Ok(location.technology_ids.insert(technology_id))
    }

    fn find_benefit_by_title(&self, title_id: i64) -> Result<Option<Benefit>, StoreError> {
        Ok(self
            .benefits
            .values()
            .find(|b| b.title_id == title_id)
            .cloned())
    }

    fn insert_benefit(&mut self, benefit: NewBenefit) -> Result<Benefit, StoreError> {
        if self.benefits.values().any(|b| b.title_id == benefit.title_id) {
            return Err(StoreError::Conflict(format!(
                "benefit for title {} already exists",
                benefit.title_id
            )));
        }
        if !self.locations.contains_key(&benefit.company_location_id) {
            return Err(StoreError::NotFound {
                entity: "location",
                id: benefit.company_location_id,
            });
        }

        let id = Self::next_id(&mut self.last_benefit_id);
        let row = Benefit::from_new(id, benefit);
        self.benefits.insert(id, row.clone());
        Ok(row)
    }

    fn update_benefit(&mut self, benefit: &Benefit) -> Result<(), StoreError> {
        let slot = self
            .benefits
            .get_mut(&benefit.id)
            .ok_or(StoreError::NotFound {
                entity: "benefit",
                id: benefit.id,
            })?;
        *slot = benefit.clone();
        Ok(())
    }
}

impl TaxonomyProvider for MemoryStore {
    fn list_technologies(&self) -> Result<Vec<Technology>, ProviderError> {
        Ok(self.technologies.clone())
    }

    fn list_searchable_benefit_titles(&self) -> Result<Vec<BenefitTitle>, ProviderError> {
        Ok(self
            .benefit_titles
            .iter()
            .filter(|t| t.searchable)
            .cloned()
            .collect())
    }
}

impl CompanyDirectory for MemoryStore {
    fn list_companies(&self) -> Result<Vec<Company>, ProviderError> {
        Ok(self.companies.clone())
    }
}
