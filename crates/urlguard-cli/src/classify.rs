//! `urlguard classify` and `urlguard extract`.
use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use urlguard_classifiers::features::{extract_with_outcome, FeatureVector};
use urlguard_classifiers::models::UrlClassifier;
use urlguard_classifiers::scan::classify_request;

/// Write one `url<TAB>result` line per URL. Per-URL failures are reported
/// inline as `Error: ...` instead of aborting the batch.
pub fn classify_urls<C, W>(model: &C, urls: &[String], out: &mut W) -> Result<()>
where
    C: UrlClassifier + ?Sized,
    W: Write,
{
    for url in urls {
        match classify_request(Some(url), model) {
            Ok(verdict) => writeln!(out, "{}\t{}", url, verdict)?,
            Err(e) => {
                log::warn!("Could not classify {:?}: {}", url, e);
                writeln!(out, "{}\tError: {}", url, e)?
            }
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct ExtractOutput<'a> {
    pub url: &'a str,
    pub features: FeatureVector,
    /// Why the URL fell back to the all-zero vector, if it did.
    pub degraded: Option<String>,
}

/// Feature vector of `url` as pretty JSON.
pub fn extract_json(url: &str) -> Result<String> {
    let (features, degraded) = extract_with_outcome(url);
    let output = ExtractOutput {
        url,
        features,
        degraded: degraded.map(|reason| reason.to_string()),
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_json_lists_features_in_schema_order() {
        let json = extract_json("https://www.example.com/").unwrap();
        let first = json.find("\"url_length\"").unwrap();
        let last = json.find("\"has_suspicious_words\"").unwrap();
        assert!(first < last);
        assert!(json.contains("\"has_https\": 1"));
        assert!(json.contains("\"degraded\": null"));
    }

    #[test]
    fn extract_json_reports_degradation() {
        let json = extract_json("http://[::1").unwrap();
        assert!(!json.contains("\"degraded\": null"));
        assert!(json.contains("\"url_length\": 0"));
    }
}
