use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::{Deserialize, Serialize};
use urlguard_classifiers::config::{ForestConfig, SplitConfig};
use urlguard_classifiers::io::DatasetReaderConfig;

/// Parameters of `urlguard train`. Every field has a default so a config
/// file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub dataset: String,
    pub url_column: String,
    pub label_column: String,
    pub output_file: String,
    pub test_fraction: f64,
    pub seed: u64,
    pub forest: ForestConfig,
    /// HTML training report, skipped when unset.
    pub report_file: Option<String>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        let reader = DatasetReaderConfig::default();
        let split = SplitConfig::default();
        TrainConfig {
            dataset: String::from("url_data.csv"),
            url_column: reader.url_column,
            label_column: reader.label_column,
            output_file: String::from("model.urlguard"),
            test_fraction: split.test_fraction,
            seed: split.seed,
            forest: ForestConfig::default(),
            report_file: None,
        }
    }
}

impl TrainConfig {
    /// Read `config_path` (defaults when `None`) and apply command line
    /// overrides from `matches`.
    pub fn from_arguments(config_path: Option<&PathBuf>, matches: &ArgMatches) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Self::load(path)?,
            None => TrainConfig::default(),
        };

        if let Some(dataset) = matches.get_one::<String>("dataset") {
            config.dataset = dataset.clone();
        }
        if let Some(output_file) = matches.get_one::<String>("output_file") {
            config.output_file = output_file.clone();
        }
        if let Some(&seed) = matches.get_one::<u64>("seed") {
            config.seed = seed;
        }
        if let Some(&n_trees) = matches.get_one::<usize>("n_trees") {
            config.forest.n_trees = n_trees;
        }
        if let Some(report) = matches.get_one::<String>("report") {
            config.report_file = Some(report.clone());
        }

        check_dataset_path(&config.dataset)?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    pub fn reader_config(&self) -> DatasetReaderConfig {
        DatasetReaderConfig {
            url_column: self.url_column.clone(),
            label_column: self.label_column.clone(),
        }
    }

    pub fn split_config(&self) -> SplitConfig {
        SplitConfig {
            test_fraction: self.test_fraction,
            seed: self.seed,
        }
    }
}

/// Datasets must be existing `.csv` or `.tsv` files.
pub fn check_dataset_path(path: &str) -> Result<()> {
    let dataset = Path::new(path);
    let ext = dataset
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());
    if !matches!(ext.as_deref(), Some("csv") | Some("tsv")) {
        anyhow::bail!("Dataset must be a .csv or .tsv file: {}", path);
    }
    if !dataset.is_file() {
        anyhow::bail!("Dataset not found: {}", path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: TrainConfig =
            serde_json::from_str(r#"{"seed": 7, "forest": {"n_trees": 12}}"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.forest.n_trees, 12);
        assert_eq!(config.dataset, "url_data.csv");
        assert_eq!(config.test_fraction, 0.2);
        assert_eq!(config.report_file, None);
    }

    #[test]
    fn dataset_path_checks() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("urls.csv");
        let txt = dir.path().join("urls.txt");
        fs::write(&csv, "url,label\n").unwrap();
        fs::write(&txt, "url,label\n").unwrap();

        assert!(check_dataset_path(csv.to_str().unwrap()).is_ok());
        assert!(check_dataset_path(txt.to_str().unwrap()).is_err());
        assert!(check_dataset_path("/nonexistent/urls.csv").is_err());
    }
}
