//! CSV/TSV reader for labelled URL datasets.
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use serde::{Deserialize, Serialize};

use crate::data_handling::LabeledUrls;
use crate::error::{ClassifierError, Result};

/// Column layout of a dataset file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetReaderConfig {
    /// Column name holding the URL text.
    pub url_column: String,
    /// Column name holding 0 (safe) / 1 (suspicious) labels.
    pub label_column: String,
}

impl Default for DatasetReaderConfig {
    fn default() -> Self {
        Self {
            url_column: "url".to_string(),
            label_column: "label".to_string(),
        }
    }
}

/// Read a dataset file. Files ending in `.tsv` are tab separated, anything
/// else is read as comma separated.
pub fn read_dataset<P: AsRef<Path>>(path: P, config: &DatasetReaderConfig) -> Result<LabeledUrls> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let is_tsv = path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("tsv"));

    let reader = csv::ReaderBuilder::new()
        .delimiter(if is_tsv { b'\t' } else { b',' })
        .has_headers(true)
        .from_path(path)
        .map_err(|e| ClassifierError::DatasetLoad {
            path: display.clone(),
            reason: e.to_string(),
        })?;

    let data = read_records(reader, config, &display)?;
    log::debug!("Read {} rows from {}", data.len(), display);
    Ok(data)
}

/// Read comma separated dataset text from any reader.
pub fn read_dataset_from_reader<R: Read>(rdr: R, config: &DatasetReaderConfig) -> Result<LabeledUrls> {
    let reader = csv::ReaderBuilder::new().has_headers(true).from_reader(rdr);
    read_records(reader, config, "<reader>")
}

fn read_records<R: Read>(
    mut reader: csv::Reader<R>,
    config: &DatasetReaderConfig,
    source: &str,
) -> Result<LabeledUrls> {
    let fail = |reason: String| ClassifierError::DatasetLoad {
        path: source.to_string(),
        reason,
    };

    let headers = reader
        .headers()
        .map_err(|e| fail(format!("failed to read header row: {}", e)))?
        .clone();
    let url_idx = find_column(&headers, &config.url_column)
        .ok_or_else(|| fail(format!("missing URL column '{}'", config.url_column)))?;
    let label_idx = find_column(&headers, &config.label_column)
        .ok_or_else(|| fail(format!("missing label column '{}'", config.label_column)))?;

    let mut urls = Vec::new();
    let mut labels = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        // Header is line 1.
        let line = row_idx + 2;
        let record = result.map_err(|e| fail(format!("line {}: {}", line, e)))?;

        let raw_label = record
            .get(label_idx)
            .ok_or_else(|| fail(format!("line {}: missing label value", line)))?;
        let label = parse_label(raw_label)
            .ok_or_else(|| fail(format!("line {}: invalid label '{}'", line, raw_label)))?;

        urls.push(record.get(url_idx).unwrap_or_default().to_string());
        labels.push(label);
    }

    LabeledUrls::new(urls, labels)
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

/// Accepts `0`/`1` written as integers or floats (`1.0`).
fn parse_label(raw: &str) -> Option<usize> {
    let value: f64 = raw.trim().parse().ok()?;
    if value == 0.0 {
        Some(0)
    } else if value == 1.0 {
        Some(1)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str) -> Result<LabeledUrls> {
        read_dataset_from_reader(text.as_bytes(), &DatasetReaderConfig::default())
    }

    #[test]
    fn reads_url_and_label_columns() {
        let data = read("id,url,label\n1,https://a.com,0\n2,http://b.com/login,1\n").unwrap();
        assert_eq!(data.urls, vec!["https://a.com", "http://b.com/login"]);
        assert_eq!(data.labels, vec![0, 1]);
    }

    #[test]
    fn quoted_urls_with_commas() {
        let data = read("url,label\n\"https://a.com/?q=1,2\",1.0\n").unwrap();
        assert_eq!(data.urls[0], "https://a.com/?q=1,2");
        assert_eq!(data.labels[0], 1);
    }

    #[test]
    fn empty_url_cell_is_kept() {
        let data = read("url,label\n,0\n").unwrap();
        assert_eq!(data.urls, vec![""]);
    }

    #[test]
    fn header_only_file_is_empty() {
        assert!(read("url,label\n").unwrap().is_empty());
    }

    #[test]
    fn bad_labels_and_columns_fail() {
        assert!(matches!(
            read("url,label\nhttps://a.com,2\n"),
            Err(ClassifierError::DatasetLoad { .. })
        ));
        assert!(read("url,label\nhttps://a.com,yes\n").is_err());
        assert!(read("link,label\nhttps://a.com,0\n").is_err());
        assert!(read("url,class\nhttps://a.com,0\n").is_err());
    }

    #[test]
    fn custom_column_names() {
        let config = DatasetReaderConfig {
            url_column: "link".to_string(),
            label_column: "is_phish".to_string(),
        };
        let data = read_dataset_from_reader("link,is_phish\nhttps://a.com,1\n".as_bytes(), &config)
            .unwrap();
        assert_eq!(data.labels, vec![1]);
    }
}
