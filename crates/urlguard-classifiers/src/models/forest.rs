use std::collections::HashMap;

use linfa::traits::{Fit, Predict};
use linfa::Dataset;
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ForestConfig;
use crate::error::{ClassifierError, Result};
use crate::models::classifier_trait::UrlClassifier;

/// Bagged ensemble of CART decision trees.
///
/// Every tree is fitted on a bootstrap resample of the training rows and
/// votes for one class. The forest predicts class 1 when more than half of
/// the trees vote for it.
///
/// Feature columns are sampled once per tree, not at every split: with the
/// default `sqrt` setting each tree sees 3 of the 12 URL features for its
/// whole depth. Scores are therefore not comparable one to one with a
/// forest that redraws candidate features per split.
///
/// Training rows that are identical on a tree's columns but carry different
/// labels take their majority label, and a leaf holding equal weight of both
/// classes predicts class 0. Fitting twice with the same seed gives the same
/// trees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    feature_names: Vec<String>,
    trees: Vec<ForestTree>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ForestTree {
    /// Columns of the full feature matrix, ascending.
    features: Vec<usize>,
    tree: DecisionTree<f64, usize>,
}

impl RandomForest {
    /// Fit a forest on `x` (rows = samples) and binary labels `y`.
    ///
    /// Per-tree seeds are drawn sequentially from `seed` before the trees are
    /// fitted in parallel, so the result depends only on the inputs.
    pub fn fit(
        x: &Array2<f64>,
        y: &[usize],
        feature_names: &[&str],
        config: &ForestConfig,
        seed: u64,
    ) -> Result<Self> {
        let (n_rows, n_features) = x.dim();
        if n_rows == 0 {
            return Err(ClassifierError::EmptyDataset);
        }
        if y.len() != n_rows {
            return Err(ClassifierError::Fit(format!(
                "{} feature rows but {} labels",
                n_rows,
                y.len()
            )));
        }
        if feature_names.len() != n_features {
            return Err(ClassifierError::SchemaMismatch {
                expected: feature_names.join(","),
                found: format!("{} columns", n_features),
            });
        }
        if config.n_trees == 0 {
            return Err(ClassifierError::Fit("n_trees must be at least 1".to_string()));
        }
        if let Some(&bad) = y.iter().find(|&&label| label > 1) {
            return Err(ClassifierError::Fit(format!(
                "labels must be 0 or 1, found {}",
                bad
            )));
        }

        let features_per_tree = config.max_features.resolve(n_features);
        log::debug!(
            "Fitting {} trees on {} rows, {} of {} features per tree",
            config.n_trees,
            n_rows,
            features_per_tree,
            n_features
        );

        let mut rng = StdRng::seed_from_u64(seed);
        let tree_seeds: Vec<u64> = (0..config.n_trees).map(|_| rng.gen()).collect();

        let trees = tree_seeds
            .par_iter()
            .enumerate()
            .map(|(i, &tree_seed)| {
                let tree = fit_tree(x, y, config, features_per_tree, tree_seed)?;
                log::trace!("Fitted tree {} on features {:?}", i, tree.features);
                Ok(tree)
            })
            .collect::<Result<Vec<ForestTree>>>()?;

        Ok(RandomForest {
            feature_names: feature_names.iter().map(|s| s.to_string()).collect(),
            trees,
        })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Number of trees voting for class 1, per row.
    pub fn votes(&self, x: &Array2<f64>) -> Result<Vec<usize>> {
        self.check_columns(x)?;
        let mut votes = vec![0usize; x.nrows()];
        for forest_tree in &self.trees {
            let sub = x.select(Axis(1), &forest_tree.features);
            let predictions: Array1<usize> = forest_tree.tree.predict(&sub);
            for (count, &class) in votes.iter_mut().zip(predictions.iter()) {
                *count += class;
            }
        }
        Ok(votes)
    }

    fn check_columns(&self, x: &Array2<f64>) -> Result<()> {
        if x.ncols() != self.feature_names.len() {
            return Err(ClassifierError::SchemaMismatch {
                expected: self.feature_names.join(","),
                found: format!("{} columns", x.ncols()),
            });
        }
        Ok(())
    }
}

impl UrlClassifier for RandomForest {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<usize>> {
        let n_trees = self.trees.len();
        // Ties go to class 0.
        Ok(self
            .votes(x)?
            .into_iter()
            .map(|v| usize::from(2 * v > n_trees))
            .collect())
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Vec<f64>> {
        let n_trees = self.trees.len().max(1) as f64;
        Ok(self
            .votes(x)?
            .into_iter()
            .map(|v| v as f64 / n_trees)
            .collect())
    }

    fn name(&self) -> &str {
        "random_forest"
    }
}

fn fit_tree(
    x: &Array2<f64>,
    y: &[usize],
    config: &ForestConfig,
    features_per_tree: usize,
    seed: u64,
) -> Result<ForestTree> {
    let (n_rows, n_features) = x.dim();
    let mut rng = StdRng::seed_from_u64(seed);

    let rows: Vec<usize> = if config.bootstrap {
        (0..n_rows).map(|_| rng.gen_range(0..n_rows)).collect()
    } else {
        (0..n_rows).collect()
    };
    let mut features = sample(&mut rng, n_features, features_per_tree).into_vec();
    features.sort_unstable();

    let records = x.select(Axis(0), &rows).select(Axis(1), &features);
    let targets = settle_conflicts(&records, rows.iter().map(|&r| y[r]));
    // linfa breaks equal-weight leaves in hash order; a slight lean towards
    // class 0 keeps the fit a function of the seed. The total lean stays
    // under half a row, so it never overturns a real majority.
    let lean = 0.5 / rows.len() as f32;
    let weights: Array1<f32> = targets
        .iter()
        .map(|&class| if class == 0 { 1.0 + lean } else { 1.0 })
        .collect();
    let dataset = Dataset::new(records, targets).with_weights(weights);

    let tree = DecisionTree::<f64, usize>::params()
        .split_quality(SplitQuality::Gini)
        .max_depth(config.max_depth)
        .min_weight_split(config.min_samples_split as f32)
        .min_weight_leaf(config.min_samples_leaf as f32)
        .fit(&dataset)
        .map_err(|e| ClassifierError::Fit(e.to_string()))?;

    Ok(ForestTree { features, tree })
}

/// Give rows that no split can separate their majority label, ties to 0.
fn settle_conflicts(records: &Array2<f64>, labels: impl Iterator<Item = usize>) -> Array1<usize> {
    let keys: Vec<Vec<u64>> = records
        .rows()
        .into_iter()
        .map(|row| row.iter().map(|v| v.to_bits()).collect())
        .collect();
    let labels: Vec<usize> = labels.collect();

    let mut counts: HashMap<&[u64], [usize; 2]> = HashMap::with_capacity(keys.len());
    for (key, &label) in keys.iter().zip(&labels) {
        counts.entry(key.as_slice()).or_default()[label] += 1;
    }
    keys.iter()
        .zip(&labels)
        .map(|(key, &label)| match counts.get(key.as_slice()) {
            Some(&[zeros, ones]) if zeros > 0 && ones > 0 => usize::from(ones > zeros),
            _ => label,
        })
        .collect()
}
