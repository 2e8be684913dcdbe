//! CSV serialisation: one sentence per row, one column, UTF-8.
//!
//! Quoting follows the standard convention: a field containing the comma
//! delimiter, a double quote, or a line break is wrapped in double quotes
//! with embedded quotes doubled. Everything else is written verbatim, so
//! the output round-trips losslessly through any conforming CSV reader.
//! No header row is written; an empty sentence list produces an empty
//! buffer.

use crate::config::CsvTerminator;
use crate::error::Pdf2SentError;

/// Serialise sentences to a CSV byte buffer, preserving order.
pub fn to_csv_bytes(
    sentences: &[String],
    terminator: CsvTerminator,
) -> Result<Vec<u8>, Pdf2SentError> {
    let mut builder = csv::WriterBuilder::new();
    if terminator == CsvTerminator::Crlf {
        builder.terminator(csv::Terminator::CRLF);
    }
    let mut writer = builder.from_writer(Vec::new());

    for sentence in sentences {
        writer
            .write_record([sentence.as_str()])
            .map_err(|e| Pdf2SentError::Internal(format!("CSV write failed: {}", e)))?;
    }

    // The sink is a Vec<u8>; flushing it cannot actually fail, but the
    // io::Write plumbing still returns Result.
    writer
        .into_inner()
        .map_err(|e| Pdf2SentError::Internal(format!("CSV flush failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv_string(sentences: &[&str]) -> String {
        let owned: Vec<String> = sentences.iter().map(|s| s.to_string()).collect();
        String::from_utf8(to_csv_bytes(&owned, CsvTerminator::Lf).unwrap()).unwrap()
    }

    #[test]
    fn empty_input_yields_empty_buffer() {
        let bytes = to_csv_bytes(&[], CsvTerminator::Lf).unwrap();
        assert!(bytes.is_empty());
    }

    #[test]
    fn one_row_per_sentence_in_order() {
        assert_eq!(
            csv_string(&["Hello world.", "This is a test."]),
            "Hello world.\nThis is a test.\n"
        );
    }

    #[test]
    fn comma_field_is_quoted() {
        assert_eq!(csv_string(&["Wait, what?"]), "\"Wait, what?\"\n");
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        assert_eq!(
            csv_string(&["She said \"go\" twice."]),
            "\"She said \"\"go\"\" twice.\"\n"
        );
    }

    #[test]
    fn embedded_newline_is_quoted() {
        assert_eq!(csv_string(&["line one\nline two."]), "\"line one\nline two.\"\n");
    }

    #[test]
    fn crlf_terminator() {
        let owned = vec!["One.".to_string(), "Two.".to_string()];
        let bytes = to_csv_bytes(&owned, CsvTerminator::Crlf).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "One.\r\nTwo.\r\n");
    }

    #[test]
    fn round_trips_through_csv_reader() {
        let sentences: Vec<String> = vec![
            "Plain sentence.".into(),
            "Wait, what?".into(),
            "Quote \"inside\" here.".into(),
            "Spans\ntwo lines.".into(),
        ];
        let bytes = to_csv_bytes(&sentences, CsvTerminator::Lf).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(bytes.as_slice());
        let decoded: Vec<String> = reader
            .records()
            .map(|r| r.unwrap().get(0).unwrap().to_string())
            .collect();

        assert_eq!(decoded, sentences);
    }

    #[test]
    fn control_characters_pass_through() {
        let s = "tab\there.";
        assert_eq!(csv_string(&[s]), "tab\there.\n");
    }
}
