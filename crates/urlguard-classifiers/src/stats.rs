//! Evaluation metrics for binary predictions (class 1 = suspicious).
use serde::{Deserialize, Serialize};

/// Counts of a binary confusion matrix with class 1 as the positive class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positive: usize,
    pub true_negative: usize,
    pub false_positive: usize,
    pub false_negative: usize,
}

impl ConfusionMatrix {
    /// Tally `predicted` against `truth`.
    ///
    /// # Panics
    ///
    /// Panics when the slices differ in length.
    pub fn from_predictions(truth: &[usize], predicted: &[usize]) -> Self {
        assert_eq!(
            truth.len(),
            predicted.len(),
            "truth and predictions must have equal lengths"
        );
        let mut cm = ConfusionMatrix::default();
        for (&t, &p) in truth.iter().zip(predicted) {
            match (t == 1, p == 1) {
                (true, true) => cm.true_positive += 1,
                (false, false) => cm.true_negative += 1,
                (false, true) => cm.false_positive += 1,
                (true, false) => cm.false_negative += 1,
            }
        }
        cm
    }

    pub fn total(&self) -> usize {
        self.true_positive + self.true_negative + self.false_positive + self.false_negative
    }

    /// Share of correct predictions; 0 for an empty matrix.
    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positive + self.true_negative, self.total())
    }

    pub fn precision(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_positive)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_negative)
    }

    pub fn f1(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Summary of one training run, stored next to the persisted model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub confusion: ConfusionMatrix,
    pub n_rows: usize,
    pub n_train: usize,
    pub n_test: usize,
    /// Rows whose URL fell back to the all-zero feature vector.
    pub n_degraded: usize,
    pub seed: u64,
}

impl TrainingMetrics {
    pub fn log_summary(&self) {
        log::info!(
            "Accuracy {:.4} on {} held-out rows (precision {:.4}, recall {:.4}, F1 {:.4})",
            self.accuracy,
            self.n_test,
            self.precision,
            self.recall,
            self.f1
        );
        if self.n_degraded > 0 {
            log::warn!(
                "{} of {} URLs could not be parsed and were trained as all-zero feature vectors",
                self.n_degraded,
                self.n_rows
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confusion_counts() {
        let truth = [1, 1, 0, 0, 1];
        let pred = [1, 0, 0, 1, 1];
        let cm = ConfusionMatrix::from_predictions(&truth, &pred);
        assert_eq!(cm.true_positive, 2);
        assert_eq!(cm.false_negative, 1);
        assert_eq!(cm.true_negative, 1);
        assert_eq!(cm.false_positive, 1);
        assert_eq!(cm.total(), 5);
        assert!((cm.accuracy() - 0.6).abs() < 1e-12);
        assert!((cm.precision() - 2.0 / 3.0).abs() < 1e-12);
        assert!((cm.recall() - 2.0 / 3.0).abs() < 1e-12);
        assert!((cm.f1() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn empty_inputs_score_zero() {
        assert_eq!(ConfusionMatrix::from_predictions(&[], &[]).accuracy(), 0.0);
        let cm = ConfusionMatrix::from_predictions(&[0, 0], &[0, 0]);
        assert_eq!(cm.precision(), 0.0);
        assert_eq!(cm.f1(), 0.0);
        assert_eq!(cm.accuracy(), 1.0);
    }

    #[test]
    #[should_panic(expected = "equal lengths")]
    fn mismatched_lengths_panic() {
        let _ = ConfusionMatrix::from_predictions(&[1, 0], &[1]);
    }
}
