//! Read-only state shared by every reconciliation step of one run.

use chrono::Duration;
use jobsync_core::{
    AppConfig, BenefitTitle, Company, CompanyDirectory, ProviderError, TaxonomyProvider,
    Technology,
};

use crate::company::CompanyMatcher;

const DEFAULT_LISTING_TTL_DAYS: i64 = 30;
const DEFAULT_STALE_AFTER_HOURS: i64 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileSettings {
    /// Added to the publish date when a listing is enabled.
    pub listing_ttl: Duration,
    /// Lifecycle window: enabled listings not modified within it get disabled.
    pub stale_after: Duration,
}

impl Default for ReconcileSettings {
    fn default() -> Self {
        Self {
            listing_ttl: Duration::days(DEFAULT_LISTING_TTL_DAYS),
            stale_after: Duration::hours(DEFAULT_STALE_AFTER_HOURS),
        }
    }
}

impl ReconcileSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            listing_ttl: config.listing_ttl(),
            stale_after: config.stale_after(),
        }
    }
}

/// A taxonomy term with its word-boundary padded search needle.
#[derive(Debug, Clone)]
pub(crate) struct Term<T> {
    pub needle: String,
    pub item: T,
}

impl<T> Term<T> {
    fn new(term: &str, item: T) -> Self {
        Self {
            needle: format!(" {} ", term.trim().to_lowercase()),
            item,
        }
    }
}

/// Taxonomy snapshot and settings for one ingestion run.
///
/// Loaded once at the start of a run; changes to the directory or taxonomy
/// made during the run are not seen until the next one.
#[derive(Debug, Clone)]
pub struct RunContext {
    companies: CompanyMatcher,
    technologies: Vec<Term<Technology>>,
    benefit_titles: Vec<Term<BenefitTitle>>,
    settings: ReconcileSettings,
}

impl RunContext {
    #[must_use]
    pub fn new(
        companies: Vec<Company>,
        technologies: Vec<Technology>,
        benefit_titles: Vec<BenefitTitle>,
        settings: ReconcileSettings,
    ) -> Self {
        let technologies = technologies
            .into_iter()
            .filter(|t| !t.name.trim().is_empty())
            .map(|t| Term::new(&t.name.clone(), t))
            .collect();
        let benefit_titles = benefit_titles
            .into_iter()
            .filter(|b| b.searchable && !b.title.trim().is_empty())
            .map(|b| Term::new(&b.title.clone(), b))
            .collect();

        Self {
            companies: CompanyMatcher::new(companies),
            technologies,
            benefit_titles,
            settings,
        }
    }

    /// Snapshot the directory and taxonomy providers.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if either provider cannot be read.
    pub fn load<D, T>(
        directory: &D,
        taxonomy: &T,
        settings: ReconcileSettings,
    ) -> Result<Self, ProviderError>
    where
        D: CompanyDirectory + ?Sized,
        T: TaxonomyProvider + ?Sized,
    {
        let companies = directory.list_companies()?;
        let technologies = taxonomy.list_technologies()?;
        let benefit_titles = taxonomy.list_searchable_benefit_titles()?;

        let ctx = Self::new(companies, technologies, benefit_titles, settings);
        tracing::info!(
            companies = ctx.companies.len(),
            technologies = ctx.technologies.len(),
            benefit_titles = ctx.benefit_titles.len(),
            "taxonomy snapshot loaded"
        );
        Ok(ctx)
    }

    #[must_use]
    pub fn companies(&self) -> &CompanyMatcher {
        &self.companies
    }

    #[must_use]
    pub fn settings(&self) -> ReconcileSettings {
        self.settings
    }

    pub(crate) fn technology_terms(&self) -> &[Term<Technology>] {
        &self.technologies
    }

    pub(crate) fn benefit_terms(&self) -> &[Term<BenefitTitle>] {
        &self.benefit_titles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobsync_core::BenefitCategory;

    #[test]
    fn default_settings_match_listing_policy() {
        let settings = ReconcileSettings::default();
        assert_eq!(settings.listing_ttl, Duration::days(30));
        assert_eq!(settings.stale_after, Duration::hours(24));
    }

    #[test]
    fn terms_are_padded_and_lowercased() {
        let ctx = RunContext::new(
            vec![],
            vec![Technology {
                id: 1,
                name: " PostgreSQL ".to_string(),
            }],
            vec![
                BenefitTitle {
                    id: 2,
                    title: "Dental".to_string(),
                    category: BenefitCategory("health".to_string()),
                    searchable: true,
                },
                BenefitTitle {
                    id: 3,
                    title: "Snacks".to_string(),
                    category: BenefitCategory("perks".to_string()),
                    searchable: false,
                },
            ],
            ReconcileSettings::default(),
        );
        assert_eq!(ctx.technology_terms()[0].needle, " postgresql ");
        assert_eq!(ctx.benefit_terms().len(), 1, "unsearchable titles dropped");
        assert_eq!(ctx.benefit_terms()[0].needle, " dental ");
    }
}
