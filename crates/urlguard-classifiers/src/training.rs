//! Offline training: extract features, split, fit the forest, evaluate.
use std::time::Instant;

use ndarray::Axis;

use crate::config::{ForestConfig, SplitConfig};
use crate::data_handling::{train_test_split, LabeledUrls};
use crate::error::{ClassifierError, Result};
use crate::features::{extract_batch, to_matrix, FeatureVector, FEATURE_NAMES};
use crate::models::{RandomForest, UrlClassifier};
use crate::stats::{ConfusionMatrix, TrainingMetrics};

/// Labels and forest scores of the held-out rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeldOut {
    pub labels: Vec<usize>,
    /// Fraction of trees voting suspicious.
    pub scores: Vec<f64>,
}

/// Result of one training run.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    pub forest: RandomForest,
    pub metrics: TrainingMetrics,
    pub held_out: HeldOut,
}

/// Fit a forest on `data` and score it on a held-out partition.
///
/// URLs that cannot be parsed still contribute a row (the all-zero vector)
/// and are counted in [`TrainingMetrics::n_degraded`]. The same seed yields
/// the same split, forest and accuracy.
pub fn train(
    data: &LabeledUrls,
    forest_config: &ForestConfig,
    split_config: &SplitConfig,
) -> Result<TrainedModel> {
    if data.is_empty() {
        return Err(ClassifierError::EmptyDataset);
    }
    data.log_input_data_summary();

    let start_time = Instant::now();
    let extracted = extract_batch(&data.urls);
    let mut vectors: Vec<FeatureVector> = Vec::with_capacity(extracted.len());
    let mut n_degraded = 0;
    for (row, (vector, degraded)) in extracted.into_iter().enumerate() {
        if let Some(reason) = degraded {
            n_degraded += 1;
            log::trace!("Row {}: {} ({:?})", row, reason, data.urls[row]);
        }
        vectors.push(vector);
    }
    log::debug!(
        "Extracted {} feature vectors in {:?}",
        vectors.len(),
        start_time.elapsed()
    );

    let x = to_matrix(&vectors);
    let split = train_test_split(data.len(), split_config.test_fraction, split_config.seed)?;

    let x_train = x.select(Axis(0), &split.train);
    let y_train: Vec<usize> = split.train.iter().map(|&i| data.labels[i]).collect();
    let x_test = x.select(Axis(0), &split.test);
    let y_test: Vec<usize> = split.test.iter().map(|&i| data.labels[i]).collect();

    let start_time = Instant::now();
    let forest = RandomForest::fit(
        &x_train,
        &y_train,
        &FEATURE_NAMES,
        forest_config,
        split_config.seed,
    )?;
    log::info!(
        "Fitted {} trees on {} rows in {:?}",
        forest.n_trees(),
        y_train.len(),
        start_time.elapsed()
    );

    let predicted = forest.predict(&x_test)?;
    let scores = forest.predict_proba(&x_test)?;
    let confusion = ConfusionMatrix::from_predictions(&y_test, &predicted);

    let metrics = TrainingMetrics {
        accuracy: confusion.accuracy(),
        precision: confusion.precision(),
        recall: confusion.recall(),
        f1: confusion.f1(),
        confusion,
        n_rows: data.len(),
        n_train: split.train.len(),
        n_test: split.test.len(),
        n_degraded,
        seed: split_config.seed,
    };
    metrics.log_summary();

    Ok(TrainedModel {
        forest,
        metrics,
        held_out: HeldOut {
            labels: y_test,
            scores,
        },
    })
}
