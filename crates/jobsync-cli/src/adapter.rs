//! Source adapter reading candidate postings from a JSON export.

use std::path::{Path, PathBuf};

use jobsync_core::{AdapterError, CandidatePosting, JobSource, SourceAdapter};
use serde_json::Value;

/// Reads a JSON array of postings for one source.
///
/// Items without a `"source"` key are taken to belong to the adapter's
/// source. For Indeed, the partition is a company location id: items
/// without a location are assigned to it and items for other locations are
/// dropped.
pub(crate) struct JsonFileAdapter {
    source: JobSource,
    path: PathBuf,
}

impl JsonFileAdapter {
    pub(crate) fn new(source: JobSource, path: &Path) -> Self {
        Self {
            source,
            path: path.to_path_buf(),
        }
    }

    fn unavailable(&self, reason: impl Into<String>) -> AdapterError {
        AdapterError::Unavailable {
            source_name: self.source.to_string(),
            reason: reason.into(),
        }
    }

    fn location_partition(&self, partition: Option<&str>) -> Result<Option<i64>, AdapterError> {
        match (self.source, partition) {
            (JobSource::Indeed, Some(raw)) => raw
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| self.unavailable(format!("partition must be a location id, got {raw:?}"))),
            (_, Some(raw)) => {
                tracing::debug!(source = %self.source, partition = raw, "partition ignored for source");
                Ok(None)
            }
            (_, None) => Ok(None),
        }
    }
}

impl SourceAdapter for JsonFileAdapter {
    fn source(&self) -> JobSource {
        self.source
    }

    fn fetch(
        &mut self,
        partition: Option<&str>,
    ) -> Result<Vec<Result<CandidatePosting, AdapterError>>, AdapterError> {
        let location = self.location_partition(partition)?;
        let text = std::fs::read_to_string(&self.path)
            .map_err(|e| self.unavailable(format!("{}: {e}", self.path.display())))?;
        let items: Vec<Value> = serde_json::from_str(&text)
            .map_err(|e| self.unavailable(format!("{} is not a JSON array: {e}", self.path.display())))?;

        let mut candidates = Vec::with_capacity(items.len());
        for (index, mut item) in items.into_iter().enumerate() {
            if let Value::Object(map) = &mut item {
                map.entry("source")
                    .or_insert_with(|| Value::String(self.source.as_str().to_string()));
                if let Some(id) = location {
                    let slot = map.entry("company_location_id").or_insert(Value::Null);
                    if slot.is_null() {
                        *slot = Value::from(id);
                    } else if slot.as_i64() != Some(id) {
                        tracing::debug!(index, partition = id, "posting outside partition dropped");
                        continue;
                    }
                }
            }

            candidates.push(
                serde_json::from_value::<CandidatePosting>(item).map_err(|e| {
                    AdapterError::Malformed {
                        index,
                        reason: e.to_string(),
                    }
                }),
            );
        }

        tracing::debug!(
            source = %self.source,
            path = %self.path.display(),
            count = candidates.len(),
            "read candidate file"
        );
        Ok(candidates)
    }
}
