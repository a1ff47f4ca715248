//! Benefit rows linking a benefit title to a company location.

use jobsync_core::BenefitCategory;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct NewBenefit {
    pub title_id: i64,
    pub company_location_id: i64,
    pub category: BenefitCategory,
}

/// A stored benefit. There is at most one row per `title_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Benefit {
    pub id: i64,
    pub title_id: i64,
    pub company_location_id: i64,
    pub category: BenefitCategory,
}

impl Benefit {
    #[must_use]
    pub fn from_new(id: i64, new: NewBenefit) -> Self {
        Self {
            id,
            title_id: new.title_id,
            company_location_id: new.company_location_id,
            category: new.category,
        }
    }
}
