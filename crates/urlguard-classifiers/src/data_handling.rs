//! Labelled URL collections and the seeded train/test split.
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{ClassifierError, Result};

/// Ordered `(url, label)` rows; labels are 0 (safe) or 1 (suspicious).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabeledUrls {
    pub urls: Vec<String>,
    pub labels: Vec<usize>,
}

impl LabeledUrls {
    pub fn new(urls: Vec<String>, labels: Vec<usize>) -> Result<Self> {
        if urls.len() != labels.len() {
            return Err(ClassifierError::LabelCountMismatch {
                urls: urls.len(),
                labels: labels.len(),
            });
        }
        Ok(Self { urls, labels })
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Count of `(safe, suspicious)` rows.
    pub fn class_counts(&self) -> (usize, usize) {
        let suspicious = self.labels.iter().filter(|&&l| l == 1).count();
        (self.labels.len() - suspicious, suspicious)
    }

    pub fn log_input_data_summary(&self) {
        let (safe, suspicious) = self.class_counts();
        log::info!(
            "Dataset: {} URLs ({} safe, {} suspicious)",
            self.len(),
            safe,
            suspicious
        );
    }
}

/// Row indices of the two partitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle `0..n_rows` with `seed` and hold out `ceil(n_rows * test_fraction)`
/// rows for evaluation.
///
/// The held-out rows are the first ones of the permutation, the training
/// rows the rest. Fails when either partition would be empty.
pub fn train_test_split(n_rows: usize, test_fraction: f64, seed: u64) -> Result<Split> {
    if n_rows == 0 {
        return Err(ClassifierError::EmptyDataset);
    }
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(ClassifierError::InsufficientData {
            rows: n_rows,
            test_fraction,
        });
    }

    let n_test = (n_rows as f64 * test_fraction).ceil() as usize;
    if n_test == 0 || n_test >= n_rows {
        return Err(ClassifierError::InsufficientData {
            rows: n_rows,
            test_fraction,
        });
    }

    let mut permutation: Vec<usize> = (0..n_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    permutation.shuffle(&mut rng);

    let train = permutation.split_off(n_test);
    log::trace!(
        "Split {} rows into {} train / {} test (seed {})",
        n_rows,
        train.len(),
        permutation.len(),
        seed
    );
    Ok(Split {
        train,
        test: permutation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_sizes_follow_ceil_rule() {
        let split = train_test_split(10, 0.2, 42).unwrap();
        assert_eq!(split.test.len(), 2);
        assert_eq!(split.train.len(), 8);

        let split = train_test_split(11, 0.2, 42).unwrap();
        assert_eq!(split.test.len(), 3);
        assert_eq!(split.train.len(), 8);
    }

    #[test]
    fn split_is_a_partition() {
        let split = train_test_split(50, 0.2, 1).unwrap();
        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn split_is_reproducible() {
        assert_eq!(
            train_test_split(100, 0.2, 42).unwrap(),
            train_test_split(100, 0.2, 42).unwrap()
        );
        assert_ne!(
            train_test_split(100, 0.2, 42).unwrap(),
            train_test_split(100, 0.2, 43).unwrap()
        );
    }

    #[test]
    fn degenerate_splits_fail() {
        assert!(matches!(
            train_test_split(0, 0.2, 42),
            Err(ClassifierError::EmptyDataset)
        ));
        assert!(matches!(
            train_test_split(1, 0.2, 42),
            Err(ClassifierError::InsufficientData { .. })
        ));
        assert!(train_test_split(10, 0.0, 42).is_err());
        assert!(train_test_split(10, 1.0, 42).is_err());
    }

    #[test]
    fn labeled_urls_length_mismatch() {
        let err = LabeledUrls::new(vec!["a".into()], vec![]).unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::LabelCountMismatch { urls: 1, labels: 0 }
        ));
        assert_eq!(err.to_string(), "Dataset has 1 URLs but 0 labels");
        let data = LabeledUrls::new(vec!["a".into(), "b".into()], vec![0, 1]).unwrap();
        assert_eq!(data.class_counts(), (1, 1));
    }
}
