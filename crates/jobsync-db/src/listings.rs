//! Job listing rows.

use chrono::{DateTime, Utc};
use jobsync_core::ExternalIdentity;
use serde::{Deserialize, Serialize};

/// Input record for inserting a listing.
///
/// Raw fields are stored verbatim; normalization only ever feeds matching.
#[derive(Debug, Clone)]
pub struct NewJobListing {
    pub title: String,
    pub description: String,
    pub external_link_id: String,
    /// Set when the source guarantees one listing per link.
    pub link_unique: bool,
    pub source: String,
    pub aggregator_source: Option<String>,
    pub raw_company_name: String,
    pub raw_location: String,
    pub tags: Vec<String>,
    pub company_id: Option<i64>,
    pub company_location_id: Option<i64>,
    pub date_published: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
    pub date_expired: Option<DateTime<Utc>>,
    pub enabled: bool,
    pub raw_payload: serde_json::Value,
}

/// A stored job listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub external_link_id: String,
    pub source: String,
    pub aggregator_source: Option<String>,
    pub raw_company_name: String,
    pub raw_location: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub company_id: Option<i64>,
    pub company_location_id: Option<i64>,
    pub date_published: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
    pub date_expired: Option<DateTime<Utc>>,
    pub enabled: bool,
    #[serde(default)]
    pub raw_payload: serde_json::Value,
}

impl JobListing {
    #[must_use]
    pub fn from_new(id: i64, new: NewJobListing) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            external_link_id: new.external_link_id,
            source: new.source,
            aggregator_source: new.aggregator_source,
            raw_company_name: new.raw_company_name,
            raw_location: new.raw_location,
            tags: new.tags,
            company_id: new.company_id,
            company_location_id: new.company_location_id,
            date_published: new.date_published,
            date_modified: new.date_modified,
            date_expired: new.date_expired,
            enabled: new.enabled,
            raw_payload: new.raw_payload,
        }
    }

    #[must_use]
    pub fn matches_identity(&self, identity: &ExternalIdentity) -> bool {
        match identity {
            ExternalIdentity::Link { source, link } => {
                self.source == *source && self.external_link_id == *link
            }
            ExternalIdentity::Composite {
                title,
                description,
                source,
            } => {
                self.title == *title
                    && self.description == *description
                    && source.as_ref().is_none_or(|s| self.source == *s)
            }
        }
    }

    /// True when the lifecycle sweep for `source` covers this listing.
    #[must_use]
    pub fn swept_by(&self, source: &str) -> bool {
        self.source == source || self.aggregator_source.as_deref() == Some(source)
    }
}
