//! # pdf2sent
//!
//! Extract the sentences of a PDF document into a single-column CSV.
//!
//! ## Why this crate?
//!
//! Plenty of tools dump a PDF's raw text; very few hand it to you in the
//! unit downstream text tooling actually wants — one sentence per record,
//! in reading order, in a format every spreadsheet and data-frame library
//! ingests without ceremony. This crate does exactly that and nothing
//! more: no OCR, no layout reconstruction, no document store.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF (file or URL)
//!  │
//!  ├─ 1. Fetch      read the file, or download via a single GET
//!  ├─ 2. Extract    parse with lopdf, concatenate page text in page order
//!  ├─ 3. Split      English sentence-boundary rules (compiled once)
//!  └─ 4. Serialise  one sentence per CSV row, standard quoting
//! ```
//!
//! Each stage is a pure, stateless function; a failure at any stage halts
//! the run before the next stage and surfaces one [`Pdf2SentError`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2sent::{extract, ExtractionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExtractionConfig::default();
//!     let output = extract("document.pdf", &config).await?;
//!     std::fs::write("sentences.csv", &output.csv)?;
//!     eprintln!(
//!         "{} sentences from {} pages",
//!         output.stats.sentence_count, output.stats.page_count
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2sent` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only
//! deps:
//! ```toml
//! pdf2sent = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{CsvTerminator, ExtractionConfig, ExtractionConfigBuilder};
pub use error::Pdf2SentError;
pub use extract::{extract, extract_from_bytes, extract_sync, extract_to_file, inspect};
pub use output::{DocumentInfo, ExtractionOutput, ExtractionStats};
pub use pipeline::split::ensure_tokenizer;
pub use progress::{ExtractionProgressCallback, NoopProgressCallback, ProgressCallback, Stage};
