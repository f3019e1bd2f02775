//! The fixed feature schema shared by training and inference.
//!
//! Forest inference is positional: column `i` of every matrix handed to a
//! model must hold feature `FEATURE_NAMES[i]`. The schema tag derived from
//! this list is stored next to every persisted model and checked on load.
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Number of features per URL.
pub const FEATURE_DIM: usize = 12;

/// Column order of the feature matrix.
pub const FEATURE_NAMES: [&str; FEATURE_DIM] = [
    "url_length",
    "hostname_length",
    "path_length",
    "num_hyphens",
    "num_dots",
    "has_https",
    "has_ip",
    "has_at_symbol",
    "count_digits",
    "num_subdomains",
    "is_shortened",
    "has_suspicious_words",
];

/// Identifier of the current feature layout.
pub fn schema_tag() -> String {
    format!("urlguard-features/v1:{}", FEATURE_NAMES.join(","))
}

/// Numeric summary of one URL. Flags are stored as 0/1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureVector {
    pub url_length: usize,
    pub hostname_length: usize,
    pub path_length: usize,
    pub num_hyphens: usize,
    pub num_dots: usize,
    pub has_https: usize,
    pub has_ip: usize,
    pub has_at_symbol: usize,
    pub count_digits: usize,
    pub num_subdomains: usize,
    pub is_shortened: usize,
    pub has_suspicious_words: usize,
}

impl FeatureVector {
    /// The sentinel used for blank or unparseable input.
    pub fn zeros() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zeros()
    }

    /// Values in [`FEATURE_NAMES`] order.
    pub fn values(&self) -> [f64; FEATURE_DIM] {
        [
            self.url_length as f64,
            self.hostname_length as f64,
            self.path_length as f64,
            self.num_hyphens as f64,
            self.num_dots as f64,
            self.has_https as f64,
            self.has_ip as f64,
            self.has_at_symbol as f64,
            self.count_digits as f64,
            self.num_subdomains as f64,
            self.is_shortened as f64,
            self.has_suspicious_words as f64,
        ]
    }

    /// A single-row matrix suitable for model inference.
    pub fn to_row(&self) -> Array2<f64> {
        Array2::from_shape_vec((1, FEATURE_DIM), self.values().to_vec())
            .expect("feature vector has FEATURE_DIM values")
    }
}

/// Stack feature vectors into a `(n, FEATURE_DIM)` matrix, preserving order.
pub fn to_matrix(vectors: &[FeatureVector]) -> Array2<f64> {
    let data: Vec<f64> = vectors.iter().flat_map(|v| v.values()).collect();
    Array2::from_shape_vec((vectors.len(), FEATURE_DIM), data)
        .expect("every feature vector has FEATURE_DIM values")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_follow_schema_order() {
        let v = FeatureVector {
            url_length: 1,
            hostname_length: 2,
            path_length: 3,
            num_hyphens: 4,
            num_dots: 5,
            has_https: 1,
            has_ip: 0,
            has_at_symbol: 1,
            count_digits: 9,
            num_subdomains: 10,
            is_shortened: 0,
            has_suspicious_words: 1,
        };
        let values = v.values();
        assert_eq!(FEATURE_NAMES[0], "url_length");
        assert_eq!(values[0], 1.0);
        assert_eq!(FEATURE_NAMES[8], "count_digits");
        assert_eq!(values[8], 9.0);
        assert_eq!(FEATURE_NAMES[11], "has_suspicious_words");
        assert_eq!(values[11], 1.0);
    }

    #[test]
    fn matrix_rows_keep_input_order() {
        let a = FeatureVector {
            url_length: 7,
            ..FeatureVector::zeros()
        };
        let b = FeatureVector {
            url_length: 11,
            ..FeatureVector::zeros()
        };
        let m = to_matrix(&[a, b]);
        assert_eq!(m.shape(), &[2, FEATURE_DIM]);
        assert_eq!(m[(0, 0)], 7.0);
        assert_eq!(m[(1, 0)], 11.0);
        assert_eq!(a.to_row().row(0).to_vec(), a.values().to_vec());
    }

    #[test]
    fn schema_tag_lists_every_feature() {
        let tag = schema_tag();
        for name in FEATURE_NAMES {
            assert!(tag.contains(name));
        }
    }
}
