use anyhow::{Context, Result};
use urlguard_classifiers::io::{read_dataset, save_model, ModelArtifact};
use urlguard_classifiers::stats::TrainingMetrics;
use urlguard_classifiers::training::train;

use super::input::TrainConfig;
use super::report::write_training_report;

/// Train, persist and optionally report on a model. Returns the held-out
/// metrics of the run.
pub fn run_training(config: &TrainConfig) -> Result<TrainingMetrics> {
    log::trace!("Reading dataset {}", config.dataset);
    let data = read_dataset(&config.dataset, &config.reader_config())
        .with_context(|| format!("Failed to load training data: {}", config.dataset))?;
    log::info!("Loaded {} labelled URLs", data.len());

    let trained = train(&data, &config.forest, &config.split_config())
        .context("Training failed: the random forest could not be fitted")?;

    println!(
        "Model trained with accuracy: {:.2}",
        trained.metrics.accuracy
    );

    let artifact = ModelArtifact::new(trained.forest.clone(), Some(trained.metrics.clone()));
    save_model(&config.output_file, &artifact)
        .with_context(|| format!("Failed to write model: {}", config.output_file))?;
    println!("Model saved as {}", config.output_file);

    if let Some(report_file) = &config.report_file {
        write_training_report(config, &trained, report_file)
            .with_context(|| format!("Failed to write report: {}", report_file))?;
    }

    Ok(trained.metrics)
}
