//! Text extraction: parse PDF bytes and concatenate per-page text.
//!
//! ## Why spawn_blocking?
//!
//! `lopdf` parses the cross-reference table and decodes content streams on
//! the calling thread. For large documents that is tens of milliseconds of
//! CPU-bound work, so it runs on Tokio's blocking pool rather than stalling
//! an async worker thread.
//!
//! ## Page-order contract
//!
//! Pages are visited in ascending page number (`get_pages()` returns a
//! `BTreeMap`, so iteration order is the document's page order) and each
//! page's text is appended to one accumulator. No separator is inserted
//! beyond whatever the extractor itself emits for a page. A page that
//! fails to yield text contributes nothing and the run continues;
//! image-only and scanned pages land here.

use crate::config::ExtractionConfig;
use crate::error::Pdf2SentError;
use crate::output::DocumentInfo;
use crate::progress::ProgressCallback;
use lopdf::Document;
use tracing::{debug, info, warn};

/// A parsed document: its info plus the concatenated page text.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub info: DocumentInfo,
    pub text: String,
}

/// Extract the full text of a PDF, page by page in page order.
///
/// Consumes the byte buffer; nothing downstream needs the raw bytes again.
///
/// # Errors
/// * [`Pdf2SentError::CorruptPdf`] — the buffer cannot be parsed as a PDF
/// * [`Pdf2SentError::EncryptedPdf`] — the trailer carries an /Encrypt entry
pub async fn extract_text(
    bytes: Vec<u8>,
    config: &ExtractionConfig,
) -> Result<ExtractedDocument, Pdf2SentError> {
    let progress = config.progress_callback.clone();

    let result = tokio::task::spawn_blocking(move || extract_text_blocking(&bytes, progress))
        .await
        .map_err(|e| Pdf2SentError::Internal(format!("Extraction task panicked: {}", e)))?;

    result
}

/// Parse the document header only and report its basic facts.
///
/// Unlike [`extract_text`] this succeeds on encrypted documents, so a
/// caller can report "3 pages, encrypted" instead of failing outright.
pub async fn inspect_bytes(bytes: Vec<u8>) -> Result<DocumentInfo, Pdf2SentError> {
    let result = tokio::task::spawn_blocking(move || {
        let doc = load_document(&bytes)?;
        Ok(document_info(&doc))
    })
    .await
    .map_err(|e| Pdf2SentError::Internal(format!("Inspect task panicked: {}", e)))?;

    result
}

/// Blocking implementation of page-by-page extraction.
fn extract_text_blocking(
    bytes: &[u8],
    progress: Option<ProgressCallback>,
) -> Result<ExtractedDocument, Pdf2SentError> {
    let doc = load_document(bytes)?;
    let info = document_info(&doc);

    if info.is_encrypted {
        return Err(Pdf2SentError::EncryptedPdf);
    }

    info!("PDF loaded: {} pages", info.page_count);

    let mut text = String::new();
    for (i, (page_num, _object_id)) in doc.get_pages().into_iter().enumerate() {
        let page_text = match doc.extract_text(&[page_num]) {
            Ok(t) => t,
            Err(e) => {
                warn!("Page {} yielded no text: {}", page_num, e);
                String::new()
            }
        };
        debug!("Page {}: {} chars", page_num, page_text.chars().count());
        if let Some(ref cb) = progress {
            cb.on_page_extracted(i + 1, info.page_count, page_text.chars().count());
        }
        text.push_str(&page_text);
    }

    Ok(ExtractedDocument { info, text })
}

fn load_document(bytes: &[u8]) -> Result<Document, Pdf2SentError> {
    Document::load_mem(bytes).map_err(|e| Pdf2SentError::CorruptPdf {
        detail: e.to_string(),
    })
}

fn document_info(doc: &Document) -> DocumentInfo {
    DocumentInfo {
        page_count: doc.get_pages().len(),
        pdf_version: doc.version.clone(),
        // lopdf exposes no direct predicate for this; the trailer entry is
        // the authoritative signal.
        is_encrypted: doc.trailer.get(b"Encrypt").is_ok(),
    }
}
