//! Hand-written rule applied before the forest.
//!
//! Plaintext HTTP is an unconditional red flag: any URL whose parsed scheme
//! is `http` is labelled Suspicious without computing features.
use crate::features::{parse_url, ParseOutcome};
use crate::label::Label;

/// Return a verdict when the rule fires, `None` to defer to the model.
pub fn prefilter(url: &str) -> Option<Label> {
    match parse_url(url) {
        ParseOutcome::Parsed(parsed) if parsed.scheme == "http" => Some(Label::Suspicious),
        _ => None,
    }
}
