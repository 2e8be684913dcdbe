//! Progress-callback trait for pipeline stage events.
//!
//! Inject an [`Arc<dyn ExtractionProgressCallback>`] via
//! [`crate::config::ExtractionConfigBuilder::progress_callback`] to receive
//! events as the pipeline moves through its stages.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers
//! can forward events to a terminal progress bar, a web-socket, or a status
//! line — without the library knowing anything about how the host
//! application communicates. The trait is `Send + Sync` because page
//! extraction runs on a blocking worker thread.

use std::sync::Arc;

/// The four pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Retrieving the raw PDF bytes (URL download or file read).
    Fetch,
    /// Parsing the PDF and extracting per-page text.
    Extract,
    /// Splitting the extracted text into sentences.
    Split,
    /// Serialising the sentences to CSV.
    Serialize,
}

impl Stage {
    /// Human-readable stage label, for progress UIs.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Fetch => "Fetching",
            Stage::Extract => "Extracting",
            Stage::Split => "Splitting",
            Stage::Serialize => "Serialising",
        }
    }
}

/// Called by the pipeline as it runs each stage.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. `on_page_extracted` may be called from a blocking
/// worker thread; implementations must be `Send + Sync`.
pub trait ExtractionProgressCallback: Send + Sync {
    /// Called when a stage begins.
    fn on_stage_start(&self, stage: Stage) {
        let _ = stage;
    }

    /// Called when a stage finishes.
    ///
    /// `items` is the stage's natural unit: bytes fetched, characters
    /// extracted, sentences produced, or CSV bytes written.
    fn on_stage_complete(&self, stage: Stage, items: usize) {
        let _ = (stage, items);
    }

    /// Called once per page during the extract stage.
    ///
    /// # Arguments
    /// * `page`  — 1-indexed page number
    /// * `total` — total pages in the document
    /// * `chars` — characters of text this page contributed
    fn on_page_extracted(&self, page: usize, total: usize, chars: usize) {
        let _ = (page, total, chars);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ExtractionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ExtractionConfig`].
pub type ProgressCallback = Arc<dyn ExtractionProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TrackingCallback {
        stages: AtomicUsize,
        pages: AtomicUsize,
        last_total: AtomicUsize,
    }

    impl ExtractionProgressCallback for TrackingCallback {
        fn on_stage_start(&self, _stage: Stage) {
            self.stages.fetch_add(1, Ordering::SeqCst);
        }

        fn on_page_extracted(&self, _page: usize, total: usize, _chars: usize) {
            self.pages.fetch_add(1, Ordering::SeqCst);
            self.last_total.store(total, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_stage_start(Stage::Fetch);
        cb.on_page_extracted(1, 3, 42);
        cb.on_stage_complete(Stage::Serialize, 128);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback {
            stages: AtomicUsize::new(0),
            pages: AtomicUsize::new(0),
            last_total: AtomicUsize::new(0),
        };

        tracker.on_stage_start(Stage::Fetch);
        tracker.on_stage_start(Stage::Extract);
        tracker.on_page_extracted(1, 2, 100);
        tracker.on_page_extracted(2, 2, 50);

        assert_eq!(tracker.stages.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.pages.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.last_total.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn stage_labels() {
        assert_eq!(Stage::Fetch.label(), "Fetching");
        assert_eq!(Stage::Serialize.label(), "Serialising");
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: Arc<dyn ExtractionProgressCallback> = Arc::new(NoopProgressCallback);
        cb.on_stage_start(Stage::Split);
        cb.on_stage_complete(Stage::Split, 10);
    }
}
