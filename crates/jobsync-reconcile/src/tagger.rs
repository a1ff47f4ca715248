//! Technology and benefit tagging of company locations from listing text.

use jobsync_core::normalize_description;
use jobsync_db::{JobStore, NewBenefit};

use crate::context::RunContext;
use crate::error::TaggingError;

/// What a tagging pass wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagOutcome {
    /// Technologies newly attached to the location.
    pub technologies: usize,
    pub benefits_created: usize,
    /// Existing benefit rows moved to this location.
    pub benefits_reassigned: usize,
}

impl TagOutcome {
    fn merge(self, other: TagOutcome) -> TagOutcome {
        TagOutcome {
            technologies: self.technologies + other.technologies,
            benefits_created: self.benefits_created + other.benefits_created,
            benefits_reassigned: self.benefits_reassigned + other.benefits_reassigned,
        }
    }
}

/// Attach every technology whose name appears as a whole word in the
/// description. Existing associations are left in place.
///
/// # Errors
///
/// Returns [`TaggingError::Encoding`] before any write if the description
/// cannot be normalized, or [`TaggingError::Store`] if an attach fails.
pub fn tag_technologies<S: JobStore + ?Sized>(
    store: &mut S,
    ctx: &RunContext,
    location_id: i64,
    description: &str,
) -> Result<TagOutcome, TaggingError> {
    let text = normalize_description(description)?;
    let mut outcome = TagOutcome::default();

    for term in ctx.technology_terms() {
        if text.contains(&term.needle) && store.attach_technology(location_id, term.item.id)? {
            outcome.technologies += 1;
        }
    }
    Ok(outcome)
}

/// Upsert a benefit for every searchable benefit title found in the
/// description.
///
/// A title has one benefit row across all locations; a match here moves that
/// row to `location_id` and refreshes its category.
///
/// # Errors
///
/// Returns [`TaggingError::Encoding`] before any write if the description
/// cannot be normalized, or [`TaggingError::Store`] if an upsert fails.
pub fn tag_benefits<S: JobStore + ?Sized>(
    store: &mut S,
    ctx: &RunContext,
    location_id: i64,
    description: &str,
) -> Result<TagOutcome, TaggingError> {
    let text = normalize_description(description)?;
    let mut outcome = TagOutcome::default();

    for term in ctx.benefit_terms() {
        if !text.contains(&term.needle) {
            continue;
        }
        let title = &term.item;
        match store.find_benefit_by_title(title.id)? {
            Some(mut benefit) => {
                benefit.company_location_id = location_id;
                benefit.category = title.category.clone();
                store.update_benefit(&benefit)?;
                outcome.benefits_reassigned += 1;
            }
            None => {
                store.insert_benefit(NewBenefit {
                    title_id: title.id,
                    company_location_id: location_id,
                    category: title.category.clone(),
                })?;
                outcome.benefits_created += 1;
            }
        }
    }
    Ok(outcome)
}

/// Run both taggers for a location, logging failures instead of returning
/// them. A failed technology pass does not stop the benefit pass.
pub fn tag_location<S: JobStore + ?Sized>(
    store: &mut S,
    ctx: &RunContext,
    location_id: i64,
    description: &str,
) -> TagOutcome {
    let technologies = tag_technologies(store, ctx, location_id, description)
        .unwrap_or_else(|e| {
            log_tagging_error("technology", location_id, &e);
            TagOutcome::default()
        });
    let benefits = tag_benefits(store, ctx, location_id, description).unwrap_or_else(|e| {
        log_tagging_error("benefit", location_id, &e);
        TagOutcome::default()
    });
    technologies.merge(benefits)
}

fn log_tagging_error(pass: &str, location_id: i64, error: &TaggingError) {
    match error {
        TaggingError::Encoding(e) => {
            tracing::debug!(pass, location_id, error = %e, "skipped tagging");
        }
        TaggingError::Store(e) => {
            tracing::warn!(pass, location_id, error = %e, "tagging failed");
        }
    }
}

#[cfg(test)]
#[path = "tagger_test.rs"]
mod tests;
