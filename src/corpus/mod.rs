//! Corpus ingestion and output.
//!
//! Ingestion reads line-delimited JSON records, keeps those whose locale
//! field starts with a configured prefix, and extracts one text field.
//! Records missing the locale field are logged by their identifier and
//! skipped; malformed lines likewise. Neither is fatal to the run.
//!
//! Tokenization is a plain whitespace split — case normalization happens
//! upstream, and raw tokens must not contain the join separator.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde_json::Value;
use tracing::warn;

use crate::types::{Corpus, Document, MweError, Token, SEPARATOR};

/// Field names and the locale prefix used when reading JSONL records.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Keep records whose locale starts with this prefix.
    pub locale_prefix: String,
    /// Field holding the locale tag.
    pub locale_field: String,
    /// Field holding the text to extract.
    pub text_field: String,
    /// Field used to identify skipped records in diagnostics.
    pub id_field: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            locale_prefix: "en_".into(),
            locale_field: "locale".into(),
            text_field: "text".into(),
            id_field: "unique_id".into(),
        }
    }
}

/// Read a JSONL file into raw text records, filtering by locale prefix.
pub fn read_jsonl(path: impl AsRef<Path>, config: &IngestConfig) -> Result<Vec<String>, MweError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut texts = Vec::new();
    for (line_number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: Value = match serde_json::from_str(&line) {
            Ok(value) => value,
            Err(err) => {
                warn!(line = line_number + 1, %err, "skipping malformed record");
                continue;
            }
        };
        if let Some(text) = extract_text(&record, config) {
            texts.push(text);
        }
    }
    Ok(texts)
}

/// Pull the text field out of one record, applying the locale filter.
///
/// Returns `None` for records that are filtered out or unusable; unusable
/// ones are logged with their identifier.
fn extract_text(record: &Value, config: &IngestConfig) -> Option<String> {
    let locale = match record.get(&config.locale_field).and_then(Value::as_str) {
        Some(locale) => locale,
        None => {
            let id = record
                .get(&config.id_field)
                .and_then(Value::as_str)
                .unwrap_or("<unknown>");
            warn!(unique_id = id, "record without locale, skipping");
            return None;
        }
    };
    if !locale.starts_with(&config.locale_prefix) {
        return None;
    }
    match record.get(&config.text_field).and_then(Value::as_str) {
        Some(text) => Some(text.to_string()),
        None => {
            let id = record
                .get(&config.id_field)
                .and_then(Value::as_str)
                .unwrap_or("<unknown>");
            warn!(unique_id = id, "record without text field, skipping");
            None
        }
    }
}

/// Whitespace-split one raw text into a document.
///
/// The join separator is reserved for compounds built by the engine, so a
/// raw token carrying it would later be indistinguishable from a real merge
/// (and misreported as one). Such tokens are split at the separator as well,
/// with a diagnostic.
pub fn tokenize(text: &str) -> Document {
    let mut doc = Document::new();
    for word in text.split_whitespace() {
        if word.contains(SEPARATOR) {
            warn!(token = word, "raw token contains the join separator, splitting");
            doc.extend(
                word.split(SEPARATOR)
                    .filter(|part| !part.is_empty())
                    .map(str::to_string),
            );
        } else {
            doc.push(word.to_string());
        }
    }
    doc
}

/// Tokenize a batch of texts into a corpus, preserving order.
pub fn tokenize_corpus<S: AsRef<str>>(texts: &[S]) -> Corpus {
    texts.iter().map(|t| tokenize(t.as_ref())).collect()
}

/// Read a pre-tokenized corpus: one document per line, tokens separated by
/// whitespace. Blank lines become empty documents.
///
/// Unlike [`tokenize`], tokens are taken verbatim: this reads corpora the
/// engine wrote, where separator-bearing tokens are legitimate compounds, so
/// a merged corpus round-trips intact.
pub fn read_tokenized(path: impl AsRef<Path>) -> Result<Corpus, MweError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut corpus = Corpus::new();
    for line in reader.lines() {
        corpus.push(line?.split_whitespace().map(str::to_string).collect());
    }
    Ok(corpus)
}

/// Write a phrase table, one phrase per line.
pub fn write_phrase_table(
    path: impl AsRef<Path>,
    table: &[(Token, u64)],
) -> Result<(), MweError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for (phrase, _) in table {
        writeln!(writer, "{phrase}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a corpus, one document per line, tokens space-separated.
pub fn write_corpus(path: impl AsRef<Path>, corpus: &Corpus) -> Result<(), MweError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for doc in corpus {
        writeln!(writer, "{}", doc.join(" "))?;
    }
    writer.flush()?;
    Ok(())
}
