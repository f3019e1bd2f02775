use plotly::histogram::HistNorm;
use plotly::layout::{Axis, BarMode, Layout};
use plotly::{Histogram, Plot};

/// Overlaid histograms of forest scores, one trace per true class.
///
/// `labels` holds 0 for safe and 1 for suspicious rows.
pub fn plot_score_histogram(scores: &[f64], labels: &[usize], title: &str) -> Result<Plot, String> {
    if scores.len() != labels.len() {
        return Err(format!(
            "{} scores but {} labels",
            scores.len(),
            labels.len()
        ));
    }

    let mut safe = Vec::new();
    let mut suspicious = Vec::new();
    for (&score, &label) in scores.iter().zip(labels) {
        match label {
            0 => safe.push(score),
            1 => suspicious.push(score),
            other => return Err(format!("Unexpected label {}", other)),
        }
    }

    let mut plot = Plot::new();
    plot.add_trace(
        Histogram::new(safe)
            .name("Safe")
            .opacity(0.6)
            .hist_norm(HistNorm::Probability),
    );
    plot.add_trace(
        Histogram::new(suspicious)
            .name("Suspicious")
            .opacity(0.6)
            .hist_norm(HistNorm::Probability),
    );
    plot.set_layout(
        Layout::new()
            .title(title)
            .bar_mode(BarMode::Overlay)
            .x_axis(Axis::new().title("Fraction of trees voting suspicious"))
            .y_axis(Axis::new().title("Share of rows")),
    );
    Ok(plot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_has_one_trace_per_class() {
        let plot = plot_score_histogram(&[0.1, 0.9, 0.8], &[0, 1, 1], "Scores").unwrap();
        let json = plot.to_json();
        assert!(json.contains("\"Safe\""));
        assert!(json.contains("\"Suspicious\""));
    }

    #[test]
    fn rejects_mismatched_or_unknown_labels() {
        assert!(plot_score_histogram(&[0.1], &[], "x").is_err());
        assert!(plot_score_histogram(&[0.1], &[3], "x").is_err());
    }
}
