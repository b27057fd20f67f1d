// ============================================================
// Layer 4 — Dataset Loader
// ============================================================
// Loads the labelled message CSV, downloading it first when
// only a URL is configured.
//
// Expected row shape: the first field is the label, the second
// is the message text. A leading header row is recognised by
// its first field ("label" or "v1") and skipped. Extra columns
// beyond the first two are ignored — the common spam CSV dumps
// carry trailing empty columns from spreadsheet exports.
//
// Reference: csv crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{bail, Context, Result};
use std::{fs, path::Path};

use crate::domain::message::MessageRecord;
use crate::domain::traits::DatasetSource;

/// Loads message records from a CSV file on disk.
/// Implements the DatasetSource trait from Layer 3.
pub struct CsvLoader {
    /// Path to the local CSV file
    path: String,

    /// Optional URL to fetch the CSV from when the file is missing
    url: Option<String>,
}

impl CsvLoader {
    /// Create a new CsvLoader for a local path with an optional
    /// remote fallback URL.
    pub fn new(path: impl Into<String>, url: Option<String>) -> Self {
        Self { path: path.into(), url }
    }

    /// Download the CSV to the configured path.
    /// One blocking GET, no retries — a failed download aborts
    /// the run (the user re-runs manually).
    fn download(&self, url: &str) -> Result<()> {
        tracing::info!("Downloading dataset from '{}'", url);

        let response = reqwest::blocking::get(url)
            .with_context(|| format!("Cannot reach '{url}'"))?;

        if !response.status().is_success() {
            bail!("Dataset download failed with HTTP {}", response.status());
        }

        let bytes = response.bytes()?;

        if let Some(parent) = Path::new(&self.path).parent() {
            fs::create_dir_all(parent).ok();
        }
        fs::write(&self.path, &bytes)
            .with_context(|| format!("Cannot write dataset to '{}'", self.path))?;

        tracing::info!("Saved {} bytes to '{}'", bytes.len(), self.path);
        Ok(())
    }
}

impl DatasetSource for CsvLoader {
    fn load_all(&self) -> Result<Vec<MessageRecord>> {
        if !Path::new(&self.path).exists() {
            match &self.url {
                Some(url) => self.download(url)?,
                None => bail!(
                    "Dataset file '{}' does not exist and no --data-url was given",
                    self.path
                ),
            }
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read dataset '{}'", self.path))?;

        let records = parse_csv(&content)?;
        tracing::info!("Loaded {} records from '{}'", records.len(), self.path);
        Ok(records)
    }
}

/// Parse CSV content into message records.
/// Separate from the loader so tests can feed it strings directly.
pub fn parse_csv(content: &str) -> Result<Vec<MessageRecord>> {
    // has_headers(false) because the header row is optional in the
    // wild — we detect and skip it ourselves below.
    // flexible(true) tolerates rows with trailing extra columns.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();

    for (line, row) in reader.records().enumerate() {
        let row = row.with_context(|| format!("Malformed CSV at row {}", line + 1))?;

        let label = row.get(0).unwrap_or("").trim();
        let text  = row.get(1).unwrap_or("").trim();

        // Skip a header row if present
        if line == 0 && (label.eq_ignore_ascii_case("label") || label.eq_ignore_ascii_case("v1")) {
            continue;
        }

        // Skip rows with no usable text, but keep going — one bad
        // row should not abort the whole load
        if label.is_empty() || text.is_empty() {
            tracing::warn!("Skipping row {}: empty label or text", line + 1);
            continue;
        }

        records.push(MessageRecord::new(label, text));
    }

    if records.is_empty() {
        bail!("Dataset contains no usable rows");
    }

    Ok(records)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_label_and_text() {
        let records = parse_csv("spam,win a prize now\nham,see you at lunch\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].label, "spam");
        assert_eq!(records[0].text, "win a prize now");
        assert_eq!(records[1].label, "ham");
    }

    #[test]
    fn test_skips_header_row() {
        let records = parse_csv("label,text\nspam,free entry\n").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].label, "spam");
    }

    #[test]
    fn test_skips_v1_style_header() {
        let records = parse_csv("v1,v2\nham,ok then\n").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "ok then");
    }

    #[test]
    fn test_ignores_trailing_columns() {
        let records = parse_csv("ham,hello there,,,\n").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "hello there");
    }

    #[test]
    fn test_skips_empty_rows() {
        let records = parse_csv("ham,hello\n,\nspam,claim now\n").unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_all_empty_is_an_error() {
        assert!(parse_csv(",\n,\n").is_err());
    }
}
