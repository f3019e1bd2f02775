//! URL feature extraction.
//!
//! `extract` turns raw URL text into the fixed twelve-column
//! [`FeatureVector`] consumed by the forest. It is total and pure: blank or
//! malformed text degrades to the all-zero vector rather than failing.
pub mod extract;
pub mod url_parts;
pub mod vector;

pub use extract::{
    extract, extract_batch, extract_with_outcome, SHORTENING_SERVICES, SUSPICIOUS_WORDS,
};
pub use url_parts::{parse_url, DegradeReason, ParseOutcome, ParsedUrl};
pub use vector::{schema_tag, to_matrix, FeatureVector, FEATURE_DIM, FEATURE_NAMES};
