use std::path::{Path, PathBuf};

use reqwest::Client;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Hard cap on one downloaded body. Nothing this size is a wallpaper.
const MAX_RESPONSE_BYTES: u64 = 20_000_000;

/// Suffix of the in-progress file written next to the final destination.
const PART_SUFFIX: &str = "part";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid URL: must be HTTP(S)")]
    InvalidScheme,

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("download failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("download failed: status {0}")]
    Status(u16),

    #[error("response too large (>{} bytes)", MAX_RESPONSE_BYTES)]
    TooLarge,

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Streams `url` to `dest`, creating the parent directory if absent.
///
/// The body is written in chunks to a `.part` file that is renamed into
/// place only after it is fully written and flushed, so a failure never
/// leaves a truncated file under the final name. Returns the byte count.
pub async fn download_to_file(
    client: &Client,
    url: &str,
    dest: &Path,
) -> Result<u64, FetchError> {
    validate_url(url)?;

    if let Some(parent) = dest.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).await?;
    }

    let response = client
        .get(url)
        .header("User-Agent", crate::USER_AGENT)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    if let Some(len) = response.content_length()
        && len > MAX_RESPONSE_BYTES
    {
        return Err(FetchError::TooLarge);
    }

    let part = part_path(dest);
    let written = match write_body(response, &part).await {
        Ok(written) => written,
        Err(e) => {
            remove_quietly(&part).await;
            return Err(e);
        }
    };

    if let Err(e) = fs::rename(&part, dest).await {
        remove_quietly(&part).await;
        return Err(e.into());
    }

    debug!(path = %dest.display(), bytes = written, "download complete");
    Ok(written)
}

async fn write_body(mut response: reqwest::Response, part: &Path) -> Result<u64, FetchError> {
    let mut file = fs::File::create(part).await?;
    let mut written: u64 = 0;

    while let Some(chunk) = response.chunk().await? {
        written += chunk.len() as u64;
        if written > MAX_RESPONSE_BYTES {
            return Err(FetchError::TooLarge);
        }
        file.write_all(&chunk).await?;
    }

    file.flush().await?;
    Ok(written)
}

async fn remove_quietly(part: &Path) {
    if let Err(e) = fs::remove_file(part).await {
        warn!(path = %part.display(), error = %e, "failed to remove partial file");
    }
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(PART_SUFFIX);
    dest.with_file_name(name)
}

fn validate_url(raw: &str) -> Result<(), FetchError> {
    let parsed = url::Url::parse(raw)?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(FetchError::InvalidScheme),
    }
}
