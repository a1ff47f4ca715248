//! Job reconciliation: deduplicates candidate postings, resolves them
//! against the company/location taxonomy, tags technologies and benefits,
//! and expires listings that stopped showing up.

pub mod company;
pub mod context;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod location;
pub mod refresh;
pub mod run;
pub mod tagger;

pub use company::CompanyMatcher;
pub use context::{ReconcileSettings, RunContext};
pub use engine::{CreatedState, ReconcileOutcome, Reconciler};
pub use error::{ReconcileError, TaggingError};
pub use lifecycle::expire_stale;
pub use location::{find_existing_location, resolve_location, split_city_state, LocationResolution};
pub use refresh::{is_fresh, RefreshOutcome};
pub use run::{IngestionRun, RunSummary};
pub use tagger::{tag_benefits, tag_location, tag_technologies, TagOutcome};
