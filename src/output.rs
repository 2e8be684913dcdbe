//! Result types returned by the extraction entry points.

use serde::{Deserialize, Serialize};

/// The complete result of a pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionOutput {
    /// The ordered sentences, first-occurrence order from the source text.
    pub sentences: Vec<String>,

    /// The serialised CSV: one row per sentence, one column, UTF-8.
    ///
    /// Skipped in JSON output — the sentences field already carries the
    /// same content in structured form.
    #[serde(skip_serializing)]
    pub csv: Vec<u8>,

    /// Basic facts about the parsed document.
    pub info: DocumentInfo,

    /// Per-stage timings and counts.
    pub stats: ExtractionStats,
}

/// Document facts gathered while parsing, available without running the
/// full pipeline via [`crate::extract::inspect`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Number of pages in the document.
    pub page_count: usize,
    /// PDF version string from the header, e.g. "1.5".
    pub pdf_version: String,
    /// Whether the trailer carries an /Encrypt entry.
    pub is_encrypted: bool,
}

/// Counts and wall-clock timings for one pipeline run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Pages in the source document.
    pub page_count: usize,
    /// Characters of extracted text.
    pub text_chars: usize,
    /// Sentences produced by the splitter.
    pub sentence_count: usize,
    /// Bytes of serialised CSV.
    pub csv_bytes: usize,
    /// Milliseconds spent fetching the input bytes.
    pub fetch_duration_ms: u64,
    /// Milliseconds spent parsing the PDF and extracting text.
    pub extract_duration_ms: u64,
    /// Milliseconds spent splitting into sentences.
    pub split_duration_ms: u64,
    /// Total wall-clock milliseconds for the run.
    pub total_duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_json_skips_csv_bytes() {
        let out = ExtractionOutput {
            sentences: vec!["One.".into(), "Two.".into()],
            csv: b"One.\nTwo.\n".to_vec(),
            info: DocumentInfo {
                page_count: 1,
                pdf_version: "1.5".into(),
                is_encrypted: false,
            },
            stats: ExtractionStats::default(),
        };
        let json = serde_json::to_string(&out).unwrap();
        assert!(json.contains("\"sentences\""));
        assert!(json.contains("\"page_count\""));
        assert!(!json.contains("\"csv\""));
    }

    #[test]
    fn stats_round_trip() {
        let stats = ExtractionStats {
            page_count: 3,
            sentence_count: 12,
            ..Default::default()
        };
        let json = serde_json::to_string(&stats).unwrap();
        let back: ExtractionStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back.page_count, 3);
        assert_eq!(back.sentence_count, 12);
    }
}
