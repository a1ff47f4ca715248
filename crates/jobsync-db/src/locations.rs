//! Company location rows.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Country recorded on every location the engine creates.
pub const DEFAULT_COUNTRY: &str = "United States";

/// Input record for inserting a company location.
#[derive(Debug, Clone)]
pub struct NewCompanyLocation {
    pub company_id: i64,
    pub raw_location: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: String,
    pub postal_code: Option<String>,
    pub enabled: bool,
}

/// A stored company location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyLocation {
    pub id: i64,
    pub company_id: i64,
    pub raw_location: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: String,
    pub postal_code: Option<String>,
    pub enabled: bool,
    #[serde(default)]
    pub technology_ids: BTreeSet<i64>,
}

impl CompanyLocation {
    #[must_use]
    pub fn from_new(id: i64, new: NewCompanyLocation) -> Self {
        Self {
            id,
            company_id: new.company_id,
            raw_location: new.raw_location,
            city: new.city,
            state: new.state,
            country: new.country,
            postal_code: new.postal_code,
            enabled: new.enabled,
            technology_ids: BTreeSet::new(),
        }
    }

    /// The stored city, if it is set and non-blank.
    #[must_use]
    pub fn known_city(&self) -> Option<&str> {
        self.city.as_deref().filter(|c| !c.trim().is_empty())
    }
}
