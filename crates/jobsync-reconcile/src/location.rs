//! Resolve a raw location string to one of a company's locations, creating
//! a disabled location when none matches.

use jobsync_db::{CompanyLocation, JobStore, NewCompanyLocation, StoreError, DEFAULT_COUNTRY};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationResolution {
    Matched(CompanyLocation),
    /// A new, disabled location was persisted for the raw text.
    Created(CompanyLocation),
}

impl LocationResolution {
    #[must_use]
    pub fn location(&self) -> &CompanyLocation {
        match self {
            LocationResolution::Matched(location) | LocationResolution::Created(location) => {
                location
            }
        }
    }
}

/// Split `"City, ST"` style text into trimmed city and state.
///
/// Anything after the second segment is ignored. Returns `None` when the
/// text has no comma.
#[must_use]
pub fn split_city_state(raw: &str) -> Option<(String, String)> {
    let mut parts = raw.split(',');
    let city = parts.next()?.trim();
    let state = parts.next()?.trim();
    Some((city.to_string(), state.to_string()))
}

fn location_matches(location: &CompanyLocation, raw: &str) -> bool {
    location.raw_location == raw || location.known_city().is_some_and(|city| raw.contains(city))
}

/// Scan the company's locations in id order and return the first match.
///
/// # Errors
///
/// Returns [`StoreError`] if the locations cannot be listed.
pub fn find_existing_location<S: JobStore + ?Sized>(
    store: &S,
    company_id: i64,
    raw: &str,
) -> Result<Option<CompanyLocation>, StoreError> {
    let locations = store.list_locations_for_company(company_id)?;
    Ok(locations
        .into_iter()
        .find(|location| location_matches(location, raw)))
}

/// Match `raw` against the company's locations, or create a new disabled one.
///
/// # Errors
///
/// Returns [`StoreError`] if the scan or the insert fails.
pub fn resolve_location<S: JobStore + ?Sized>(
    store: &mut S,
    company_id: i64,
    raw: &str,
) -> Result<LocationResolution, StoreError> {
    if let Some(location) = find_existing_location(store, company_id, raw)? {
        return Ok(LocationResolution::Matched(location));
    }
    create_location(store, company_id, raw).map(LocationResolution::Created)
}

pub(crate) fn create_location<S: JobStore + ?Sized>(
    store: &mut S,
    company_id: i64,
    raw: &str,
) -> Result<CompanyLocation, StoreError> {
    let (city, state) = match split_city_state(raw) {
        Some((city, state)) => (non_blank(city), non_blank(state)),
        None => (None, None),
    };

    let location = store.insert_location(NewCompanyLocation {
        company_id,
        raw_location: raw.to_string(),
        city,
        state,
        country: DEFAULT_COUNTRY.to_string(),
        postal_code: None,
        enabled: false,
    })?;
    tracing::debug!(
        company_id,
        location_id = location.id,
        raw_location = %raw,
        "created company location"
    );
    Ok(location)
}

fn non_blank(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
