//! Sentence splitting: rule-based English sentence-boundary detection.
//!
//! ## Rule set
//!
//! A candidate boundary is a run of terminal punctuation (`.`, `!`, `?`),
//! optionally followed by closing quotes/brackets, followed by whitespace.
//! A candidate becomes a real boundary unless one of these rules vetoes it:
//!
//! - the next visible character is not an uppercase letter, a digit, or an
//!   opening quote/bracket (handles attribution after quoted speech:
//!   `"Stop!" he said.` stays one sentence);
//! - the terminator is a period and the preceding token is a known
//!   abbreviation (`Dr.`, `e.g.`, `U.S.`, …);
//! - the terminator is a period and the preceding token is a single
//!   uppercase letter (`J. K. Rowling`).
//!
//! Decimal numbers never produce candidates at all: the dot inside `3.14`
//! has no whitespace after it. Boundary decisions the rules get wrong are
//! accepted as-is; there is no post-merge pass.
//!
//! ## Process-wide rule compilation
//!
//! The rules compile once per process into a [`Tokenizer`] behind a
//! `OnceCell`. [`ensure_tokenizer`] is the explicit startup check: call it
//! once at process start to surface a compilation failure early; every
//! later call returns the cached instance.

use crate::error::Pdf2SentError;
use once_cell::sync::OnceCell;
use regex::Regex;
use std::collections::HashSet;

/// Periods after these tokens do not end a sentence.
///
/// Matched case-insensitively against the preceding token with trailing
/// periods stripped, so `e.g.` and `E.g.` both hit the `e.g` entry.
const ABBREVIATIONS: &[&str] = &[
    // titles
    "dr", "mr", "mrs", "ms", "prof", "rev", "hon", "st", "jr", "sr",
    // latin and scholarly
    "e.g", "i.e", "cf", "al", "et", "etc", "viz", "vs", "ca",
    // citations and figures
    "fig", "figs", "no", "nos", "vol", "vols", "pp", "p", "ed", "eds", "ch", "sec",
    // organisations
    "inc", "ltd", "co", "corp", "dept", "univ", "assn",
    // places and time
    "u.s", "u.k", "a.m", "p.m", "mt", "ave", "blvd",
    // months
    "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
];

static TOKENIZER: OnceCell<Tokenizer> = OnceCell::new();

/// Ensure the sentence-boundary rules are compiled and ready.
///
/// Idempotent: the first call compiles and caches the rule set for the
/// lifetime of the process; later calls return the cached instance. Fails
/// with [`Pdf2SentError::TokenizerUnavailable`] if the rules cannot be
/// compiled.
pub fn ensure_tokenizer() -> Result<&'static Tokenizer, Pdf2SentError> {
    TOKENIZER.get_or_try_init(Tokenizer::english)
}

/// Split text into sentences using the process-wide English rule set.
///
/// Returns the sentences in first-occurrence order. Each sentence is
/// trimmed of surrounding whitespace; no other character is dropped.
/// Empty or whitespace-only input yields an empty vector.
pub fn split_sentences(text: &str) -> Result<Vec<String>, Pdf2SentError> {
    Ok(ensure_tokenizer()?.split(text))
}

/// A compiled sentence-boundary rule set.
pub struct Tokenizer {
    candidate: Regex,
    abbreviations: HashSet<&'static str>,
}

impl Tokenizer {
    /// Compile the English rule set.
    fn english() -> Result<Self, Pdf2SentError> {
        let candidate = Regex::new(r#"(?P<punct>[.!?]+[)\]"'”’]*)\s+"#).map_err(|e| {
            Pdf2SentError::TokenizerUnavailable {
                detail: format!("boundary rule compilation failed: {}", e),
            }
        })?;
        Ok(Self {
            candidate,
            abbreviations: ABBREVIATIONS.iter().copied().collect(),
        })
    }

    /// Split `text` into sentences.
    pub fn split(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let mut sentences = Vec::new();
        let mut start = 0usize;

        for caps in self.candidate.captures_iter(text) {
            let (Some(punct), Some(whole)) = (caps.name("punct"), caps.get(0)) else {
                continue;
            };
            if self.is_boundary(text, punct.start(), punct.as_str(), whole.end()) {
                let sentence = text[start..punct.end()].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence.to_string());
                }
                start = whole.end();
            }
        }

        let rest = text[start..].trim();
        if !rest.is_empty() {
            sentences.push(rest.to_string());
        }

        sentences
    }

    /// Decide whether a candidate match is a real sentence boundary.
    fn is_boundary(&self, text: &str, punct_start: usize, punct: &str, after: usize) -> bool {
        // What follows must be able to start a sentence. End-of-text always
        // qualifies (the remainder push handles the tail).
        if let Some(next) = text[after..].chars().next() {
            let opens = matches!(next, '"' | '\'' | '“' | '‘' | '(' | '[' | '{');
            if !(next.is_uppercase() || next.is_ascii_digit() || opens) {
                return false;
            }
        }

        if punct.starts_with('.') {
            match previous_token(text, punct_start) {
                // A period with nothing before it opens the text; not a boundary.
                None => return false,
                Some(token) => {
                    if is_initial(token) {
                        return false;
                    }
                    let normalized = token.trim_end_matches('.').to_lowercase();
                    if self.abbreviations.contains(normalized.as_str()) {
                        return false;
                    }
                }
            }
        }

        true
    }
}

/// The run of non-whitespace characters ending at byte offset `end`.
fn previous_token(text: &str, end: usize) -> Option<&str> {
    let head = &text[..end];
    let start = head
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let token = &head[start..];
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// A single uppercase letter, as in the initials of a name.
fn is_initial(token: &str) -> bool {
    let mut chars = token.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(c), None) if c.is_alphabetic() && c.is_uppercase()
    )
}
