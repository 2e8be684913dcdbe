//! Configuration types for PDF sentence extraction.
//!
//! All pipeline behaviour is controlled through [`ExtractionConfig`], built
//! via its [`ExtractionConfigBuilder`]. Keeping every knob in one struct
//! makes it trivial to share configs across callers and to diff two runs to
//! understand why their outputs differ.

use crate::error::Pdf2SentError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for a PDF-to-sentences extraction.
///
/// Built via [`ExtractionConfig::builder()`] or using
/// [`ExtractionConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2sent::{CsvTerminator, ExtractionConfig};
///
/// let config = ExtractionConfig::builder()
///     .download_timeout_secs(60)
///     .csv_terminator(CsvTerminator::Crlf)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ExtractionConfig {
    /// Download timeout for URL inputs in seconds. Default: 120.
    ///
    /// Applies to the whole GET request, connect through body. The fetch is
    /// a single attempt; on timeout the run fails with `DownloadTimeout`
    /// rather than hanging on a dead connection indefinitely.
    pub download_timeout_secs: u64,

    /// CSV row terminator. Default: [`CsvTerminator::Lf`].
    pub csv_terminator: CsvTerminator,

    /// Progress callback fired at stage boundaries and per extracted page.
    /// Default: None (no events).
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            download_timeout_secs: 120,
            csv_terminator: CsvTerminator::default(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionConfig")
            .field("download_timeout_secs", &self.download_timeout_secs)
            .field("csv_terminator", &self.csv_terminator)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn callback>"),
            )
            .finish()
    }
}

impl ExtractionConfig {
    /// Create a new builder for `ExtractionConfig`.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ExtractionConfig`].
#[derive(Debug)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    pub fn csv_terminator(mut self, t: CsvTerminator) -> Self {
        self.config.csv_terminator = t;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractionConfig, Pdf2SentError> {
        if self.config.download_timeout_secs == 0 {
            return Err(Pdf2SentError::InvalidConfig(
                "Download timeout must be ≥ 1 second".into(),
            ));
        }
        Ok(self.config)
    }
}

/// Row terminator written between CSV records.
///
/// Plain LF is the default; CRLF exists for consumers that insist on the
/// RFC 4180 convention (older spreadsheet imports, mostly).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CsvTerminator {
    /// Rows end with `\n`. (default)
    #[default]
    Lf,
    /// Rows end with `\r\n`.
    Crlf,
}
