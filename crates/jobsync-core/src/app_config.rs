use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// YAML seed with companies, technologies and benefit titles.
    pub taxonomy_path: PathBuf,
    /// JSON snapshot of the listing store, read at start and written back.
    pub state_path: PathBuf,
    /// Days an enabled listing stays live after its publish date.
    pub listing_ttl_days: i64,
    /// Listings not refreshed within this window are disabled by the sweep.
    pub stale_after_hours: i64,
}

impl AppConfig {
    #[must_use]
    pub fn listing_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.listing_ttl_days)
    }

    #[must_use]
    pub fn stale_after(&self) -> chrono::Duration {
        chrono::Duration::hours(self.stale_after_hours)
    }
}
