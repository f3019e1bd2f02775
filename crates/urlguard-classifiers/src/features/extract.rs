use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;

use super::url_parts::{parse_url, DegradeReason, ParseOutcome, ParsedUrl};
use super::vector::FeatureVector;

/// Hostname substrings of known redirect-only URL shorteners.
pub const SHORTENING_SERVICES: [&str; 5] = ["bit.ly", "goo.gl", "t.co", "ow.ly", "tinyurl.com"];

/// Keywords that commonly appear in phishing URLs.
pub const SUSPICIOUS_WORDS: [&str; 11] = [
    "login", "verify", "update", "secure", "free", "account", "paypal", "bank", "sign", "insecure",
    "virus",
];

static DOTTED_QUAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}").expect("valid dotted-quad pattern")
});

/// Extract the feature vector of `url`.
///
/// Total: blank or unparseable input yields [`FeatureVector::zeros`].
pub fn extract(url: &str) -> FeatureVector {
    extract_with_outcome(url).0
}

/// Extract the feature vector of `url` and report why it fell back to the
/// all-zero sentinel, if it did.
pub fn extract_with_outcome(url: &str) -> (FeatureVector, Option<DegradeReason>) {
    match parse_url(url) {
        ParseOutcome::Parsed(parsed) => (features_of(url, &parsed), None),
        ParseOutcome::Degraded(reason) => (FeatureVector::zeros(), Some(reason)),
    }
}

/// Extract every URL in parallel, keeping input order.
pub fn extract_batch<S: AsRef<str> + Sync>(urls: &[S]) -> Vec<(FeatureVector, Option<DegradeReason>)> {
    urls.par_iter()
        .map(|url| extract_with_outcome(url.as_ref()))
        .collect()
}

fn features_of(url: &str, parsed: &ParsedUrl) -> FeatureVector {
    let hostname = parsed.hostname.as_str();
    let lowered = url.to_lowercase();

    // "localhost" and "" have fewer than two labels.
    let labels = hostname.split('.').count();

    FeatureVector {
        url_length: url.chars().count(),
        hostname_length: hostname.chars().count(),
        path_length: parsed.path.chars().count(),
        num_hyphens: url.matches('-').count(),
        num_dots: url.matches('.').count(),
        has_https: flag(parsed.scheme == "https"),
        has_ip: flag(DOTTED_QUAD.is_match(hostname)),
        has_at_symbol: flag(url.contains('@')),
        count_digits: url.chars().filter(|c| c.is_ascii_digit()).count(),
        num_subdomains: labels.saturating_sub(2),
        is_shortened: flag(SHORTENING_SERVICES.iter().any(|s| hostname.contains(s))),
        has_suspicious_words: flag(SUSPICIOUS_WORDS.iter().any(|w| lowered.contains(w))),
    }
}

fn flag(value: bool) -> usize {
    usize::from(value)
}
