use anyhow::Result;
use maud::html;
use urlguard_classifiers::report::plots::plot_score_histogram;
use urlguard_classifiers::report::{Report, ReportSection};
use urlguard_classifiers::training::TrainedModel;

use super::input::TrainConfig;

pub fn write_training_report(config: &TrainConfig, trained: &TrainedModel, path: &str) -> Result<()> {
    let metrics = &trained.metrics;
    let cm = &metrics.confusion;

    let mut report = Report::new(
        "urlguard",
        env!("CARGO_PKG_VERSION"),
        "urlguard Random Forest Training Report",
    );

    /* Section 1: Overview */
    {
        let mut overview = ReportSection::new("Overview");
        overview.add_content(html! {
            p {
                "Held-out evaluation of a " (trained.forest.n_trees()) "-tree forest trained on "
                (metrics.n_train) " of " (metrics.n_rows) " URLs (seed " (metrics.seed) ")."
            }
            @if metrics.n_degraded > 0 {
                p { (metrics.n_degraded) " URLs could not be parsed and were used as all-zero feature vectors." }
            }
            table {
                tr { th { "Accuracy" } th { "Precision" } th { "Recall" } th { "F1" } }
                tr {
                    td { (format!("{:.4}", metrics.accuracy)) }
                    td { (format!("{:.4}", metrics.precision)) }
                    td { (format!("{:.4}", metrics.recall)) }
                    td { (format!("{:.4}", metrics.f1)) }
                }
            }
            h3 { "Confusion matrix" }
            table {
                tr { th {} th { "Predicted safe" } th { "Predicted suspicious" } }
                tr { th { "Safe" } td { (cm.true_negative) } td { (cm.false_positive) } }
                tr { th { "Suspicious" } td { (cm.false_negative) } td { (cm.true_positive) } }
            }
        });

        match plot_score_histogram(
            &trained.held_out.scores,
            &trained.held_out.labels,
            "Held-out suspicious vote fraction by true label",
        ) {
            Ok(plot) => overview.add_plot(plot),
            Err(e) => log::warn!("Skipping score histogram: {}", e),
        }
        report.add_section(overview);
    }

    /* Section 2: Configuration */
    {
        let mut config_section = ReportSection::new("Configuration");
        config_section.add_content(html! {
            pre {
                code { (serde_json::to_string_pretty(config)?) }
            }
        });
        report.add_section(config_section);
    }

    report.save_to_file(path)?;
    Ok(())
}
