pub mod app_config;
pub mod config;
pub mod normalize;
pub mod postings;
pub mod taxonomy;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use normalize::{normalize_company_name, normalize_description, NormalizeError};
pub use postings::{
    AdapterError, CandidatePosting, ExternalIdentity, JobSource, PostingFields, SourceAdapter,
};
pub use taxonomy::{
    load_taxonomy, BenefitCategory, BenefitTitle, Company, CompanyDirectory, ProviderError,
    TaxonomyFile, TaxonomyProvider, Technology,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read taxonomy file {path}: {source}")]
    TaxonomyFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse taxonomy file: {0}")]
    TaxonomyFileParse(#[source] serde_yaml::Error),

    #[error("taxonomy validation failed: {0}")]
    Validation(String),
}
