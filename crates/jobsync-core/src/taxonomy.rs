use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ConfigError;

/// Canonical employer, owned by the company directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technology {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BenefitCategory(pub String);

impl std::fmt::Display for BenefitCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitTitle {
    pub id: i64,
    pub title: String,
    pub category: BenefitCategory,
    /// Only searchable titles are looked for in descriptions.
    #[serde(default)]
    pub searchable: bool,
}

/// Seed file shape for the taxonomy (`config/taxonomy.yaml`).
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TaxonomyFile {
    #[serde(default)]
    pub companies: Vec<Company>,
    #[serde(default)]
    pub technologies: Vec<Technology>,
    #[serde(default)]
    pub benefit_titles: Vec<BenefitTitle>,
}

/// Load and validate the taxonomy seed from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_taxonomy(path: &Path) -> Result<TaxonomyFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TaxonomyFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let taxonomy: TaxonomyFile =
        serde_yaml::from_str(&content).map_err(ConfigError::TaxonomyFileParse)?;

    validate_taxonomy(&taxonomy)?;

    Ok(taxonomy)
}

fn validate_taxonomy(taxonomy: &TaxonomyFile) -> Result<(), ConfigError> {
    check_unique(
        "company",
        taxonomy.companies.iter().map(|c| (c.id, c.name.as_str())),
        false,
    )?;
    check_unique(
        "technology",
        taxonomy.technologies.iter().map(|t| (t.id, t.name.as_str())),
        true,
    )?;
    check_unique(
        "benefit title",
        taxonomy
            .benefit_titles
            .iter()
            .map(|b| (b.id, b.title.as_str())),
        true,
    )?;
    Ok(())
}

/// Companies may share a display name (two legal entities, one brand);
/// technology and benefit terms may not, since they are matched by text.
fn check_unique<'a>(
    kind: &str,
    entries: impl Iterator<Item = (i64, &'a str)>,
    unique_names: bool,
) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();
    let mut seen_names = HashSet::new();

    for (id, name) in entries {
        if name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "{kind} {id} has an empty name"
            )));
        }
        if !seen_ids.insert(id) {
            return Err(ConfigError::Validation(format!("duplicate {kind} id: {id}")));
        }
        if unique_names && !seen_names.insert(name.trim().to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate {kind} name: '{name}'"
            )));
        }
    }

    Ok(())
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("taxonomy provider unavailable: {0}")]
    Unavailable(String),
}

/// Read access to the technology and benefit vocabularies.
pub trait TaxonomyProvider {
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the vocabulary cannot be read.
    fn list_technologies(&self) -> Result<Vec<Technology>, ProviderError>;

    /// # Errors
    ///
    /// Returns [`ProviderError`] if the vocabulary cannot be read.
    fn list_searchable_benefit_titles(&self) -> Result<Vec<BenefitTitle>, ProviderError>;
}

/// Read access to canonical companies.
pub trait CompanyDirectory {
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the directory cannot be read.
    fn list_companies(&self) -> Result<Vec<Company>, ProviderError>;
}

#[cfg(test)]
#[path = "taxonomy_test.rs"]
mod tests;
