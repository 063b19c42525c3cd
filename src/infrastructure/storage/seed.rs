//! Read-only dataset loading for the in-memory store
//!
//! A seed path is either:
//! - a JSON file holding an array of `{"url", "risk", "category"}` records, or
//! - a dataset directory with one URL per line in `benign.csv`, `defaced.csv`,
//!   `malware.csv`, `phishing.csv` and `spam.csv`. Each file maps to a fixed
//!   risk and category. Missing files are skipped.

use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info};

use crate::domain::{DomainError, ReputationRecord};

/// Dataset files and the (risk, category) assigned to their URLs
const DATASET_FILES: [(&str, &str, &str); 5] = [
    ("benign.csv", "Nil", "Benign"),
    ("defaced.csv", "Medium", "Defaced"),
    ("malware.csv", "High", "Malware"),
    ("phishing.csv", "Medium", "Phishing"),
    ("spam.csv", "Low", "Spam"),
];

/// Loads reputation records from a JSON file or a dataset directory
pub async fn load_seed(path: &Path) -> Result<Vec<ReputationRecord>, DomainError> {
    let metadata = tokio::fs::metadata(path).await.map_err(|e| {
        DomainError::configuration(format!("Cannot read seed path {}: {}", path.display(), e))
    })?;

    let records = if metadata.is_dir() {
        load_dataset_dir(path).await?
    } else {
        load_json_file(path).await?
    };

    info!(path = %path.display(), records = records.len(), "Loaded reputation seed");

    Ok(records)
}

async fn load_json_file(path: &Path) -> Result<Vec<ReputationRecord>, DomainError> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        DomainError::storage(format!("Failed to read seed file {}: {}", path.display(), e))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        DomainError::configuration(format!("Invalid seed file {}: {}", path.display(), e))
    })
}

async fn load_dataset_dir(dir: &Path) -> Result<Vec<ReputationRecord>, DomainError> {
    let mut records = Vec::new();

    for (file, risk, category) in DATASET_FILES {
        let path = dir.join(file);

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "Dataset file not present, skipping");
                continue;
            }
            Err(e) => {
                return Err(DomainError::storage(format!(
                    "Failed to read dataset file {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        records.extend(
            content
                .lines()
                .map(sanitize_url)
                .filter(|url| !url.is_empty())
                .map(|url| ReputationRecord::new(url, risk, category)),
        );
    }

    Ok(records)
}

// Quotes and backslashes are stripped from dataset lines
fn sanitize_url(line: &str) -> String {
    line.trim()
        .chars()
        .filter(|c| !matches!(c, '"' | '\'' | '\\'))
        .collect()
}
