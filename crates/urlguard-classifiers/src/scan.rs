//! Request-level classification: pre-filter first, forest second.
use crate::error::{ClassifierError, Result};
use crate::features::extract;
use crate::label::{Label, Verdict};
use crate::models::{classify, UrlClassifier};
use crate::prefilter::prefilter;

/// Classify one submitted URL.
///
/// An absent or empty URL is [`ClassifierError::MissingInput`]. Plaintext
/// HTTP URLs are answered by the rule without consulting `model`.
pub fn classify_request<C: UrlClassifier + ?Sized>(url: Option<&str>, model: &C) -> Result<Verdict> {
    let url = match url {
        Some(url) if !url.is_empty() => url,
        _ => return Err(ClassifierError::MissingInput),
    };

    if let Some(label) = prefilter(url) {
        log::debug!("Rule verdict {} for {:?}", label, url);
        return Ok(Verdict::rule(label));
    }

    let label: Label = classify(&extract(url), model)?;
    log::debug!("Model verdict {} for {:?}", label, url);
    Ok(Verdict::model(label))
}
