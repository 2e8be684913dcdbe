//! Input fetching: turn a user-supplied path or URL into raw PDF bytes.
//!
//! ## Why validate magic bytes here?
//!
//! The parser would reject non-PDF input anyway, but its error talks about
//! xref tables and object streams. Checking the `%PDF` header at fetch time
//! lets the caller hear "that file is a ZIP archive" instead of a parser
//! internals dump. Everything downstream can then assume a plausible PDF.

use crate::config::ExtractionConfig;
use crate::error::Pdf2SentError;
use std::path::PathBuf;
use tracing::{debug, info};

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Fetch the raw PDF bytes for the given input.
///
/// If the input is a URL, issue a single GET request and return the body.
/// If the input is a local file path, read the file. Either way the bytes
/// are validated to start with the PDF magic before being returned.
pub async fn fetch_bytes(
    input: &str,
    config: &ExtractionConfig,
) -> Result<Vec<u8>, Pdf2SentError> {
    let bytes = if is_url(input) {
        download_url(input, config.download_timeout_secs).await?
    } else {
        read_file(input).await?
    };
    validate_magic(&bytes)?;
    Ok(bytes)
}

/// Read a local file into memory, mapping io error kinds to input errors.
async fn read_file(path_str: &str) -> Result<Vec<u8>, Pdf2SentError> {
    let path = PathBuf::from(path_str);

    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            debug!("Read local PDF: {} ({} bytes)", path.display(), bytes.len());
            Ok(bytes)
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            Err(Pdf2SentError::PermissionDenied { path })
        }
        Err(_) => Err(Pdf2SentError::FileNotFound { path }),
    }
}

/// Download a URL and return the full response body.
///
/// A single attempt: no retries, no custom headers. A non-2xx status is a
/// failure even though the transport succeeded.
async fn download_url(url: &str, timeout_secs: u64) -> Result<Vec<u8>, Pdf2SentError> {
    info!("Downloading PDF from: {}", url);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| Pdf2SentError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            Pdf2SentError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            Pdf2SentError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    if !response.status().is_success() {
        return Err(Pdf2SentError::DownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                Pdf2SentError::DownloadTimeout {
                    url: url.to_string(),
                    secs: timeout_secs,
                }
            } else {
                Pdf2SentError::DownloadFailed {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        })?
        .to_vec();

    info!("Downloaded {} bytes", bytes.len());
    Ok(bytes)
}

/// Verify the buffer starts with the PDF magic bytes (`%PDF`).
fn validate_magic(bytes: &[u8]) -> Result<(), Pdf2SentError> {
    let mut magic = [0u8; 4];
    let n = bytes.len().min(4);
    magic[..n].copy_from_slice(&bytes[..n]);
    if &magic != b"%PDF" {
        return Err(Pdf2SentError::NotAPdf { magic });
    }
    Ok(())
}
