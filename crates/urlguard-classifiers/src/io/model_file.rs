//! MessagePack model artifact.
//!
//! The artifact carries the feature schema tag the forest was trained
//! against. Loading refuses artifacts whose tag or feature names disagree
//! with the running extractor, so a stale model can never be fed columns in
//! the wrong order.
use std::fs;
use std::path::{Path, PathBuf};

use rmp_serde::{from_slice, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};
use crate::features::schema_tag;
use crate::models::{check_schema, RandomForest};
use crate::stats::TrainingMetrics;

/// Bumped whenever the artifact layout changes.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub schema_tag: String,
    /// RFC 3339 timestamp of the training run.
    pub trained_at: String,
    pub metrics: Option<TrainingMetrics>,
    pub forest: RandomForest,
}

impl ModelArtifact {
    pub fn new(forest: RandomForest, metrics: Option<TrainingMetrics>) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            schema_tag: schema_tag(),
            trained_at: chrono::Utc::now().to_rfc3339(),
            metrics,
            forest,
        }
    }
}

/// Serialize `artifact` to `path`, replacing any existing file.
///
/// The bytes go to a sibling `.tmp` file first and are renamed into place.
pub fn save_model<P: AsRef<Path>>(path: P, artifact: &ModelArtifact) -> Result<()> {
    let path = path.as_ref();
    let fail = |reason: String| ClassifierError::ModelSave {
        path: path.display().to_string(),
        reason,
    };

    let mut bytes = Vec::new();
    artifact
        .serialize(&mut Serializer::new(&mut bytes))
        .map_err(|e| fail(format!("serialization failed: {}", e)))?;

    let tmp = tmp_path(path);
    fs::write(&tmp, &bytes).map_err(|e| fail(e.to_string()))?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        fail(e.to_string())
    })?;

    log::debug!("Wrote {} byte model to {}", bytes.len(), path.display());
    Ok(())
}

/// Read and validate a model artifact.
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<ModelArtifact> {
    let path = path.as_ref();
    let fail = |reason: String| ClassifierError::ModelLoad {
        path: path.display().to_string(),
        reason,
    };

    let bytes = fs::read(path).map_err(|e| fail(e.to_string()))?;
    let artifact: ModelArtifact =
        from_slice(&bytes).map_err(|e| fail(format!("corrupt model artifact: {}", e)))?;

    if artifact.format_version != FORMAT_VERSION {
        return Err(fail(format!(
            "unsupported format version {} (expected {})",
            artifact.format_version, FORMAT_VERSION
        )));
    }
    let current = schema_tag();
    if artifact.schema_tag != current {
        return Err(ClassifierError::SchemaMismatch {
            expected: artifact.schema_tag,
            found: current,
        });
    }
    check_schema(&artifact.forest)?;

    log::debug!(
        "Loaded {}-tree model trained at {} from {}",
        artifact.forest.n_trees(),
        artifact.trained_at,
        path.display()
    );
    Ok(artifact)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
