use ndarray::Array2;

use crate::error::Result;

/// Contract between the scan pipeline and a trained model.
///
/// Rows of `x` are URLs, columns follow [`UrlClassifier::feature_names`].
/// Implementations must be immutable after construction so one instance can
/// be shared across request handlers without locking.
pub trait UrlClassifier: Send + Sync {
    /// Feature columns, in order, the model was fitted on.
    fn feature_names(&self) -> &[String];

    /// Predict the class (0 = safe, 1 = suspicious) of every row.
    fn predict(&self, x: &Array2<f64>) -> Result<Vec<usize>>;

    /// Probability-like score for class 1 of every row.
    fn predict_proba(&self, x: &Array2<f64>) -> Result<Vec<f64>>;

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "classifier"
    }
}
