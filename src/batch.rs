use std::path::PathBuf;

use reqwest::Client;
use tracing::{info, warn};

use crate::bing::client::{ImageSearch, SearchError};
use crate::cli::Config;
use crate::fetch;

/// Saved files are named `background_<n>.jpg` by 1-based attempt order.
const FILE_PREFIX: &str = "background_";
const FILE_EXT: &str = "jpg";

#[derive(Debug)]
pub struct BatchReport {
    /// One entry per download attempt, in attempt order.
    pub results: Vec<DownloadOutcome>,
}

#[derive(Debug)]
pub enum DownloadOutcome {
    Saved { path: PathBuf, bytes: u64 },
    Failed { url: String, reason: String },
}

impl BatchReport {
    pub fn saved(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r, DownloadOutcome::Saved { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.saved()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("{0}")]
    Search(#[from] SearchError),
}

/// Resolves candidates once, then downloads them sequentially. A resolve
/// failure aborts before any download attempt; a failed download is
/// recorded and the batch moves on to the next candidate.
pub async fn run(
    search: &impl ImageSearch,
    http: &Client,
    config: &Config,
) -> Result<BatchReport, BatchError> {
    let candidates = search.search(&config.query, config.limit).await?;
    info!(count = candidates.len(), "candidates resolved");

    let mut results = Vec::with_capacity(candidates.len());
    for (index, candidate) in candidates.into_iter().enumerate() {
        let file_name = format!("{FILE_PREFIX}{}.{FILE_EXT}", index + 1);
        let dest = config.output_dir.join(file_name);

        match fetch::download_to_file(http, &candidate.url, &dest).await {
            Ok(bytes) => {
                info!(url = %candidate.url, path = %dest.display(), bytes, "saved");
                results.push(DownloadOutcome::Saved { path: dest, bytes });
            }
            Err(e) => {
                warn!(url = %candidate.url, error = %e, "download failed");
                results.push(DownloadOutcome::Failed {
                    url: candidate.url,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(BatchReport { results })
}

/// One line per attempt, in order, followed by a summary line.
pub fn format_report(report: &BatchReport) -> String {
    let mut output = String::new();

    for result in &report.results {
        match result {
            DownloadOutcome::Saved { path, bytes } => {
                output.push_str(&format!("saved {} ({bytes} bytes)\n", path.display()));
            }
            DownloadOutcome::Failed { url, reason } => {
                output.push_str(&format!("failed {url}: {reason}\n"));
            }
        }
    }

    output.push_str(&format!(
        "{} saved, {} failed\n",
        report.saved(),
        report.failed()
    ));
    output
}
