//! End-to-end tests for pdf2sent.
//!
//! Every fixture is generated in the test process: PDFs are built
//! in-memory with lopdf and the URL tests run against a loopback HTTP
//! listener, so the suite needs no network access, API keys, or binary
//! fixture files.

use pdf2sent::{
    extract, extract_from_bytes, extract_to_file, inspect, CsvTerminator, ExtractionConfig,
    Pdf2SentError,
};
use std::io::{Read, Write};
use std::net::TcpListener;

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Build a minimal valid PDF with one page per entry of `pages`.
fn build_pdf(pages: &[&str]) -> Vec<u8> {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![50.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// Serve exactly one HTTP response on a loopback port and return the URL.
///
/// The listener thread reads one request, writes `status_line` + `body`,
/// then exits.
fn serve_once(status_line: &'static str, body: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            // Drain the request head; the exact contents don't matter.
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);

            let head = format!(
                "{status_line}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(&body);
            let _ = stream.flush();
        }
    });

    format!("http://{}/doc.pdf", addr)
}

fn decode_csv(bytes: &[u8]) -> Vec<String> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(bytes)
        .records()
        .map(|r| r.unwrap().get(0).unwrap().to_string())
        .collect()
}

// ── Pipeline tests ───────────────────────────────────────────────────────────

#[tokio::test]
async fn hello_world_pipeline_produces_two_rows() {
    let bytes = build_pdf(&["Hello world. This is a test."]);
    let config = ExtractionConfig::default();

    let output = extract_from_bytes(bytes, &config).await.unwrap();

    assert_eq!(output.sentences, vec!["Hello world.", "This is a test."]);
    assert_eq!(
        String::from_utf8(output.csv).unwrap(),
        "Hello world.\nThis is a test.\n"
    );
    assert_eq!(output.stats.page_count, 1);
    assert_eq!(output.stats.sentence_count, 2);
}

#[tokio::test]
async fn three_pages_concatenate_in_page_order() {
    let bytes = build_pdf(&[
        "Alpha ends here.",
        "Bravo ends here.",
        "Charlie ends here.",
    ]);
    let config = ExtractionConfig::default();

    let output = extract_from_bytes(bytes, &config).await.unwrap();

    assert_eq!(
        output.sentences,
        vec!["Alpha ends here.", "Bravo ends here.", "Charlie ends here."]
    );
    assert_eq!(output.info.page_count, 3);
}

#[tokio::test]
async fn comma_sentence_is_quoted_in_csv() {
    let bytes = build_pdf(&["Wait, what? Nothing more."]);
    let config = ExtractionConfig::default();

    let output = extract_from_bytes(bytes, &config).await.unwrap();

    assert_eq!(output.sentences[0], "Wait, what?");
    let csv_text = String::from_utf8(output.csv.clone()).unwrap();
    assert!(
        csv_text.starts_with("\"Wait, what?\""),
        "got: {csv_text:?}"
    );
    // And the quoting round-trips.
    assert_eq!(decode_csv(&output.csv), output.sentences);
}

#[tokio::test]
async fn blank_document_yields_empty_csv() {
    let bytes = build_pdf(&[""]);
    let config = ExtractionConfig::default();

    let output = extract_from_bytes(bytes, &config).await.unwrap();

    assert!(output.sentences.is_empty());
    assert!(output.csv.is_empty());
    assert_eq!(output.stats.sentence_count, 0);
}

#[tokio::test]
async fn crlf_terminator_applies_to_output() {
    let bytes = build_pdf(&["One here. Two here."]);
    let config = ExtractionConfig::builder()
        .csv_terminator(CsvTerminator::Crlf)
        .build()
        .unwrap();

    let output = extract_from_bytes(bytes, &config).await.unwrap();
    assert_eq!(
        String::from_utf8(output.csv).unwrap(),
        "One here.\r\nTwo here.\r\n"
    );
}

#[tokio::test]
async fn corrupt_bytes_fail_before_splitting() {
    let mut bytes = b"%PDF-1.5\n".to_vec();
    bytes.extend_from_slice(&[0x00, 0xff, 0x13, 0x37].repeat(128));
    let config = ExtractionConfig::default();

    let err = extract_from_bytes(bytes, &config).await.unwrap_err();
    assert!(matches!(err, Pdf2SentError::CorruptPdf { .. }), "got: {err}");
}

#[tokio::test]
async fn non_pdf_bytes_are_rejected_by_magic_check() {
    let config = ExtractionConfig::default();
    let err = extract_from_bytes(b"<html>nope</html>".to_vec(), &config)
        .await
        .unwrap_err();
    assert!(matches!(err, Pdf2SentError::NotAPdf { .. }));
}

// ── File and URL entry points ────────────────────────────────────────────────

#[tokio::test]
async fn extract_to_file_writes_the_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let pdf_path = dir.path().join("input.pdf");
    std::fs::write(&pdf_path, build_pdf(&["First one. Second one."])).unwrap();
    let out_path = dir.path().join("sentences.csv");

    let config = ExtractionConfig::default();
    let stats = extract_to_file(pdf_path.to_str().unwrap(), &out_path, &config)
        .await
        .unwrap();

    assert_eq!(stats.sentence_count, 2);
    let written = std::fs::read_to_string(&out_path).unwrap();
    assert_eq!(written, "First one.\nSecond one.\n");
}

#[tokio::test]
async fn url_fetch_feeds_the_pipeline() {
    let url = serve_once("HTTP/1.1 200 OK", build_pdf(&["Served over HTTP. It worked."]));
    let config = ExtractionConfig::default();

    let output = extract(&url, &config).await.unwrap();
    assert_eq!(output.sentences, vec!["Served over HTTP.", "It worked."]);
}

#[tokio::test]
async fn http_404_fails_before_extraction() {
    let url = serve_once("HTTP/1.1 404 Not Found", Vec::new());
    let config = ExtractionConfig::default();

    let err = extract(&url, &config).await.unwrap_err();
    match err {
        Pdf2SentError::DownloadFailed { reason, .. } => {
            assert!(reason.contains("404"), "got: {reason}");
        }
        other => panic!("expected DownloadFailed, got: {other}"),
    }
}

#[tokio::test]
async fn inspect_reports_without_extracting() {
    let dir = tempfile::tempdir().unwrap();
    let pdf_path = dir.path().join("input.pdf");
    std::fs::write(&pdf_path, build_pdf(&["A.", "B."])).unwrap();

    let info = inspect(pdf_path.to_str().unwrap()).await.unwrap();
    assert_eq!(info.page_count, 2);
    assert!(!info.is_encrypted);
}
