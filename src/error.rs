//! Error types for the pdf2sent library.
//!
//! One enum, [`Pdf2SentError`], covers every failure the pipeline can hit.
//! Variants are grouped by the stage that produces them: a fetch failure
//! halts the run before extraction, a parse failure halts it before
//! splitting, and a tokenizer failure halts it before serialisation.
//! Nothing is retried; every error belongs to a single invocation and the
//! process stays usable for the next attempt.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdf2sent library.
#[derive(Debug, Error)]
pub enum Pdf2SentError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input string is not a valid file path or URL.
    #[error("Invalid input '{input}': not a file path or a valid HTTP/HTTPS URL")]
    InvalidInput { input: String },

    /// HTTP fetch failed: unreachable host, refused connection, or a
    /// non-2xx response status.
    #[error("Failed to download '{url}': {reason}\nCheck the URL and your internet connection.")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'\nIncrease --download-timeout.")]
    DownloadTimeout { url: String, secs: u64 },

    /// The bytes were fetched/read, but they are not a PDF.
    #[error("Input is not a valid PDF (first bytes: {magic:?}, expected '%PDF')")]
    NotAPdf { magic: [u8; 4] },

    // ── Document errors ───────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF is corrupt or unreadable: {detail}\nTry repairing with: qpdf --decrypt input.pdf output.pdf")]
    CorruptPdf { detail: String },

    /// The document is encrypted; encrypted PDFs are not handled.
    #[error("PDF is encrypted; encrypted documents are not supported.\nDecrypt it first, e.g.: qpdf --decrypt input.pdf output.pdf")]
    EncryptedPdf,

    // ── Tokenizer errors ──────────────────────────────────────────────────
    /// The sentence-boundary rule set could not be compiled.
    #[error("Sentence tokenizer unavailable: {detail}")]
    TokenizerUnavailable { detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output CSV file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_failed_display() {
        let e = Pdf2SentError::DownloadFailed {
            url: "https://example.com/doc.pdf".into(),
            reason: "HTTP 404 Not Found".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("https://example.com/doc.pdf"), "got: {msg}");
        assert!(msg.contains("404"), "got: {msg}");
    }

    #[test]
    fn download_timeout_display() {
        let e = Pdf2SentError::DownloadTimeout {
            url: "https://example.com/doc.pdf".into(),
            secs: 120,
        };
        assert!(e.to_string().contains("120s"));
    }

    #[test]
    fn not_a_pdf_display_shows_magic() {
        let e = Pdf2SentError::NotAPdf {
            magic: [0x50, 0x4b, 0x03, 0x04],
        };
        assert!(e.to_string().contains("%PDF"));
    }

    #[test]
    fn tokenizer_unavailable_display() {
        let e = Pdf2SentError::TokenizerUnavailable {
            detail: "rule compilation failed".into(),
        };
        assert!(e.to_string().contains("rule compilation failed"));
    }

    #[test]
    fn output_write_failed_has_source() {
        use std::error::Error;
        let e = Pdf2SentError::OutputWriteFailed {
            path: PathBuf::from("/tmp/sentences.csv"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        };
        assert!(e.to_string().contains("sentences.csv"));
        assert!(e.source().is_some());
    }
}
