//! Eager (full-document) extraction entry points.
//!
//! The four pipeline stages run strictly in sequence; each consumes its
//! predecessor's output and nothing is shared between invocations. The
//! functions here add orchestration only: timing, progress events, and the
//! file/bytes/sync entry-point variants.

use crate::config::ExtractionConfig;
use crate::error::Pdf2SentError;
use crate::output::{DocumentInfo, ExtractionOutput, ExtractionStats};
use crate::pipeline::{csv, fetch, split, text};
use crate::progress::Stage;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Extract sentences from a PDF file or URL and serialise them to CSV.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `input` — local file path or HTTP/HTTPS URL to a PDF
/// * `config` — extraction configuration
///
/// # Errors
/// * [`Pdf2SentError::DownloadFailed`] / [`Pdf2SentError::DownloadTimeout`]
///   — the URL fetch failed; nothing was extracted
/// * [`Pdf2SentError::NotAPdf`] / [`Pdf2SentError::CorruptPdf`] /
///   [`Pdf2SentError::EncryptedPdf`] — the bytes are not a readable PDF
/// * [`Pdf2SentError::TokenizerUnavailable`] — the sentence rules could
///   not be compiled
pub async fn extract(
    input: impl AsRef<str>,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, Pdf2SentError> {
    let total_start = Instant::now();
    let input = input.as_ref();
    info!("Starting extraction: {}", input);

    // ── Step 1: Fetch bytes ──────────────────────────────────────────────
    let fetch_start = Instant::now();
    if let Some(ref cb) = config.progress_callback {
        cb.on_stage_start(Stage::Fetch);
    }
    let bytes = fetch::fetch_bytes(input, config).await?;
    let fetch_duration_ms = fetch_start.elapsed().as_millis() as u64;
    if let Some(ref cb) = config.progress_callback {
        cb.on_stage_complete(Stage::Fetch, bytes.len());
    }
    debug!("Fetched {} bytes in {}ms", bytes.len(), fetch_duration_ms);

    run_pipeline(bytes, config, total_start, fetch_duration_ms).await
}

/// Extract sentences from PDF bytes already in memory.
///
/// This is the entry point for callers that received the document as an
/// upload or read it themselves; the fetch stage is skipped entirely, but
/// the bytes are still validated to start with the PDF magic.
pub async fn extract_from_bytes(
    bytes: Vec<u8>,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, Pdf2SentError> {
    if !bytes.starts_with(b"%PDF") {
        let mut magic = [0u8; 4];
        let n = bytes.len().min(4);
        magic[..n].copy_from_slice(&bytes[..n]);
        return Err(Pdf2SentError::NotAPdf { magic });
    }
    run_pipeline(bytes, config, Instant::now(), 0).await
}

/// Extract sentences and write the CSV directly to a file.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub async fn extract_to_file(
    input: impl AsRef<str>,
    output_path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<ExtractionStats, Pdf2SentError> {
    let output = extract(input, config).await?;
    let path = output_path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Pdf2SentError::OutputWriteFailed {
                    path: path.to_path_buf(),
                    source: e,
                }
            })?;
        }
    }

    let tmp_path = path.with_extension("csv.tmp");
    tokio::fs::write(&tmp_path, &output.csv).await.map_err(|e| {
        Pdf2SentError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        }
    })?;

    tokio::fs::rename(&tmp_path, path).await.map_err(|e| {
        Pdf2SentError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        }
    })?;

    Ok(output.stats)
}

/// Synchronous wrapper around [`extract`].
///
/// Creates a temporary tokio runtime internally.
pub fn extract_sync(
    input: impl AsRef<str>,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, Pdf2SentError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Pdf2SentError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(extract(input, config))
}

/// Report document info (page count, version, encryption) without
/// extracting anything.
pub async fn inspect(input: impl AsRef<str>) -> Result<DocumentInfo, Pdf2SentError> {
    let config = ExtractionConfig::default();
    let bytes = fetch::fetch_bytes(input.as_ref(), &config).await?;
    text::inspect_bytes(bytes).await
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Run extract → split → serialise over fetched bytes and assemble stats.
async fn run_pipeline(
    bytes: Vec<u8>,
    config: &ExtractionConfig,
    total_start: Instant,
    fetch_duration_ms: u64,
) -> Result<ExtractionOutput, Pdf2SentError> {
    // ── Step 2: Extract text, page by page ───────────────────────────────
    let extract_start = Instant::now();
    if let Some(ref cb) = config.progress_callback {
        cb.on_stage_start(Stage::Extract);
    }
    let document = text::extract_text(bytes, config).await?;
    let extract_duration_ms = extract_start.elapsed().as_millis() as u64;
    let text_chars = document.text.chars().count();
    if let Some(ref cb) = config.progress_callback {
        cb.on_stage_complete(Stage::Extract, text_chars);
    }
    info!(
        "Extracted {} chars from {} pages in {}ms",
        text_chars, document.info.page_count, extract_duration_ms
    );

    // ── Step 3: Split into sentences ─────────────────────────────────────
    let split_start = Instant::now();
    if let Some(ref cb) = config.progress_callback {
        cb.on_stage_start(Stage::Split);
    }
    let sentences = split::split_sentences(&document.text)?;
    let split_duration_ms = split_start.elapsed().as_millis() as u64;
    if let Some(ref cb) = config.progress_callback {
        cb.on_stage_complete(Stage::Split, sentences.len());
    }
    info!(
        "Split into {} sentences in {}ms",
        sentences.len(),
        split_duration_ms
    );

    // ── Step 4: Serialise to CSV ─────────────────────────────────────────
    if let Some(ref cb) = config.progress_callback {
        cb.on_stage_start(Stage::Serialize);
    }
    let csv_bytes = csv::to_csv_bytes(&sentences, config.csv_terminator)?;
    if let Some(ref cb) = config.progress_callback {
        cb.on_stage_complete(Stage::Serialize, csv_bytes.len());
    }

    let stats = ExtractionStats {
        page_count: document.info.page_count,
        text_chars,
        sentence_count: sentences.len(),
        csv_bytes: csv_bytes.len(),
        fetch_duration_ms,
        extract_duration_ms,
        split_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Extraction complete: {} sentences from {} pages, {}ms total",
        stats.sentence_count, stats.page_count, stats.total_duration_ms
    );

    Ok(ExtractionOutput {
        sentences,
        csv: csv_bytes,
        info: document.info,
        stats,
    })
}
