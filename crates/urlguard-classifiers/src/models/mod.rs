pub mod classifier_trait;
pub mod forest;

pub use classifier_trait::UrlClassifier;
pub use forest::RandomForest;

use crate::error::{ClassifierError, Result};
use crate::features::{FeatureVector, FEATURE_NAMES};
use crate::label::Label;

/// Fail unless `model` was fitted on the extractor's current feature layout.
pub fn check_schema<C: UrlClassifier + ?Sized>(model: &C) -> Result<()> {
    let names = model.feature_names();
    if names.len() != FEATURE_NAMES.len() || names.iter().zip(FEATURE_NAMES).any(|(a, b)| a != b) {
        return Err(ClassifierError::SchemaMismatch {
            expected: names.join(","),
            found: FEATURE_NAMES.join(","),
        });
    }
    Ok(())
}

/// Label one feature vector with `model`.
pub fn classify<C: UrlClassifier + ?Sized>(vector: &FeatureVector, model: &C) -> Result<Label> {
    check_schema(model)?;
    let classes = model.predict(&vector.to_row())?;
    let class = classes.first().copied().ok_or_else(|| {
        ClassifierError::SchemaMismatch {
            expected: "one prediction".to_string(),
            found: "none".to_string(),
        }
    })?;
    Ok(Label::from_class(class))
}
