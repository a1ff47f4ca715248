//! Candidate postings handed to the reconciliation engine by source adapters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Job boards and aggregators an ingestion run can be pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobSource {
    StackOverflow,
    Dice,
    Indeed,
    ZipRecruiter,
}

impl JobSource {
    pub const ALL: [JobSource; 4] = [
        JobSource::StackOverflow,
        JobSource::Dice,
        JobSource::Indeed,
        JobSource::ZipRecruiter,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            JobSource::StackOverflow => "stackoverflow",
            JobSource::Dice => "dice",
            JobSource::Indeed => "indeed",
            JobSource::ZipRecruiter => "ziprecruiter",
        }
    }
}

impl std::fmt::Display for JobSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for JobSource {
    type Err = AdapterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobSource::ALL
            .into_iter()
            .find(|source| source.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AdapterError::UnknownSource(s.to_string()))
    }
}

/// Fields every source supplies for a posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostingFields {
    pub raw_company_name: String,
    pub raw_location: String,
    pub title: String,
    pub description: String,
    pub link: String,
    pub date_published: DateTime<Utc>,
    /// Untouched source payload, kept on the listing for audit.
    #[serde(default)]
    pub raw: serde_json::Value,
}

/// One job ad as produced by a source adapter, keyed by source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum CandidatePosting {
    StackOverflow {
        #[serde(flatten)]
        fields: PostingFields,
        #[serde(default)]
        tags: Vec<String>,
    },
    Dice {
        #[serde(flatten)]
        fields: PostingFields,
    },
    /// Indeed links are not stable, so identity is title + description.
    /// `company_location_id` is the location the adapter searched around.
    Indeed {
        #[serde(flatten)]
        fields: PostingFields,
        #[serde(default)]
        company_location_id: Option<i64>,
    },
    /// ZipRecruiter republishes ads from other boards; `board` is the
    /// original publisher and becomes the listing's source.
    ZipRecruiter {
        #[serde(flatten)]
        fields: PostingFields,
        board: String,
    },
}

/// Key deciding whether two postings describe the same ad.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExternalIdentity {
    Link {
        source: String,
        link: String,
    },
    Composite {
        title: String,
        description: String,
        source: Option<String>,
    },
}

impl CandidatePosting {
    #[must_use]
    pub fn fields(&self) -> &PostingFields {
        match self {
            CandidatePosting::StackOverflow { fields, .. }
            | CandidatePosting::Dice { fields }
            | CandidatePosting::Indeed { fields, .. }
            | CandidatePosting::ZipRecruiter { fields, .. } => fields,
        }
    }

    /// The adapter family the posting came through.
    #[must_use]
    pub fn feed(&self) -> JobSource {
        match self {
            CandidatePosting::StackOverflow { .. } => JobSource::StackOverflow,
            CandidatePosting::Dice { .. } => JobSource::Dice,
            CandidatePosting::Indeed { .. } => JobSource::Indeed,
            CandidatePosting::ZipRecruiter { .. } => JobSource::ZipRecruiter,
        }
    }

    /// Value stored in the listing's `source` column.
    #[must_use]
    pub fn source(&self) -> &str {
        match self {
            CandidatePosting::ZipRecruiter { board, .. } => board,
            other => other.feed().as_str(),
        }
    }

    #[must_use]
    pub fn aggregator_source(&self) -> Option<&'static str> {
        match self {
            CandidatePosting::ZipRecruiter { .. } => Some(JobSource::ZipRecruiter.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        match self {
            CandidatePosting::StackOverflow { tags, .. } => tags,
            _ => &[],
        }
    }

    #[must_use]
    pub fn company_location_hint(&self) -> Option<i64> {
        match self {
            CandidatePosting::Indeed {
                company_location_id,
                ..
            } => *company_location_id,
            _ => None,
        }
    }

    #[must_use]
    pub fn identity(&self) -> ExternalIdentity {
        let fields = self.fields();
        match self {
            CandidatePosting::StackOverflow { .. } | CandidatePosting::Dice { .. } => {
                ExternalIdentity::Link {
                    source: self.source().to_string(),
                    link: fields.link.clone(),
                }
            }
            CandidatePosting::Indeed { .. } => ExternalIdentity::Composite {
                title: fields.title.clone(),
                description: fields.description.clone(),
                source: None,
            },
            CandidatePosting::ZipRecruiter { board, .. } => ExternalIdentity::Composite {
                title: fields.title.clone(),
                description: fields.description.clone(),
                source: Some(board.clone()),
            },
        }
    }

    #[must_use]
    pub fn into_fields(self) -> PostingFields {
        match self {
            CandidatePosting::StackOverflow { fields, .. }
            | CandidatePosting::Dice { fields }
            | CandidatePosting::Indeed { fields, .. }
            | CandidatePosting::ZipRecruiter { fields, .. } => fields,
        }
    }
}

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("unknown job source: {0}")]
    UnknownSource(String),

    #[error("source {source_name} unreachable: {reason}")]
    Unavailable { source_name: String, reason: String },

    #[error("malformed posting at index {index}: {reason}")]
    Malformed { index: usize, reason: String },

    #[error("posting at index {index} belongs to {found}, expected {expected}")]
    WrongSource {
        index: usize,
        expected: JobSource,
        found: JobSource,
    },
}

/// Produces candidate postings for one source.
///
/// Pagination, rate limiting and retries live behind this trait. The outer
/// `Err` means the whole source could not be read; inner `Err` items are
/// single postings that failed to decode and are skipped by the engine.
pub trait SourceAdapter {
    fn source(&self) -> JobSource;

    /// Fetch candidates, optionally narrowed by a partition key (a region,
    /// a company location, ...).
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] if the source cannot be read at all.
    fn fetch(
        &mut self,
        partition: Option<&str>,
    ) -> Result<Vec<Result<CandidatePosting, AdapterError>>, AdapterError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fields() -> PostingFields {
        PostingFields {
            raw_company_name: "Acme, Inc.".to_string(),
            raw_location: "Austin, TX".to_string(),
            title: "Backend Engineer".to_string(),
            description: "Build services in rust and python".to_string(),
            link: "https://jobs.example.com/1".to_string(),
            date_published: Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap(),
            raw: serde_json::Value::Null,
        }
    }

    #[test]
    fn link_sources_use_link_identity() {
        let posting = CandidatePosting::Dice { fields: fields() };
        assert_eq!(
            posting.identity(),
            ExternalIdentity::Link {
                source: "dice".to_string(),
                link: "https://jobs.example.com/1".to_string(),
            }
        );
    }

    #[test]
    fn indeed_identity_ignores_link_and_source() {
        let posting = CandidatePosting::Indeed {
            fields: fields(),
            company_location_id: Some(4),
        };
        assert_eq!(
            posting.identity(),
            ExternalIdentity::Composite {
                title: "Backend Engineer".to_string(),
                description: "Build services in rust and python".to_string(),
                source: None,
            }
        );
        assert_eq!(posting.company_location_hint(), Some(4));
    }

    #[test]
    fn ziprecruiter_listing_source_is_board() {
        let posting = CandidatePosting::ZipRecruiter {
            fields: fields(),
            board: "careerbuilder".to_string(),
        };
        assert_eq!(posting.source(), "careerbuilder");
        assert_eq!(posting.aggregator_source(), Some("ziprecruiter"));
        assert_eq!(posting.feed(), JobSource::ZipRecruiter);
        assert!(matches!(
            posting.identity(),
            ExternalIdentity::Composite { source: Some(ref s), .. } if s == "careerbuilder"
        ));
    }

    #[test]
    fn deserializes_tagged_payload() {
        let json = serde_json::json!({
            "source": "stackoverflow",
            "raw_company_name": "Acme",
            "raw_location": "Austin, TX",
            "title": "Rust Developer",
            "description": "Write rust",
            "link": "https://stackoverflow.com/jobs/1",
            "date_published": "2026-10-01T12:00:00Z",
            "tags": ["rust", "postgresql"]
        });
        let posting: CandidatePosting = serde_json::from_value(json).unwrap();
        assert_eq!(posting.feed(), JobSource::StackOverflow);
        assert_eq!(
            posting.tags().to_vec(),
            vec!["rust".to_string(), "postgresql".to_string()]
        );
        assert!(posting.fields().raw.is_null());
    }

    #[test]
    fn ziprecruiter_payload_requires_board() {
        let json = serde_json::json!({
            "source": "ziprecruiter",
            "raw_company_name": "Acme",
            "raw_location": "Austin, TX",
            "title": "Rust Developer",
            "description": "Write rust",
            "link": "https://ziprecruiter.com/j/1",
            "date_published": "2026-10-01T12:00:00Z"
        });
        assert!(serde_json::from_value::<CandidatePosting>(json).is_err());
    }

    #[test]
    fn job_source_parses_case_insensitively() {
        assert_eq!("Dice".parse::<JobSource>().unwrap(), JobSource::Dice);
        assert_eq!(
            "ziprecruiter".parse::<JobSource>().unwrap(),
            JobSource::ZipRecruiter
        );
        assert!(matches!(
            "monster".parse::<JobSource>(),
            Err(AdapterError::UnknownSource(ref s)) if s == "monster"
        ));
    }
}
