//! Exact-match resolution of raw company names to canonical companies.

use std::collections::HashMap;

use jobsync_core::{normalize_company_name, Company};

/// Snapshot of the company directory keyed by normalized name.
///
/// Built once per run. Matching is exact on the normalized key: a large
/// directory makes partial matching produce false positives.
#[derive(Debug, Clone, Default)]
pub struct CompanyMatcher {
    by_key: HashMap<String, Company>,
    by_id: HashMap<i64, Company>,
}

impl CompanyMatcher {
    /// When two companies normalize to the same key the first one wins.
    #[must_use]
    pub fn new(companies: impl IntoIterator<Item = Company>) -> Self {
        let mut matcher = Self::default();
        for company in companies {
            let key = normalize_company_name(&company.name);
            if key.is_empty() {
                tracing::warn!(company_id = company.id, "company name normalizes to nothing; not matchable");
            } else if let Some(existing) = matcher.by_key.get(&key) {
                tracing::debug!(
                    company_id = company.id,
                    kept = existing.id,
                    key = %key,
                    "duplicate normalized company name"
                );
            } else {
                matcher.by_key.insert(key, company.clone());
            }
            matcher.by_id.insert(company.id, company);
        }
        matcher
    }

    #[must_use]
    pub fn match_company(&self, raw_name: &str) -> Option<&Company> {
        self.by_key.get(&normalize_company_name(raw_name))
    }

    #[must_use]
    pub fn get(&self, id: i64) -> Option<&Company> {
        self.by_id.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
