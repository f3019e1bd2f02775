use std::error::Error;
use std::fmt;

/// Failures surfaced by the classification and training pipeline.
///
/// Malformed URL text is never an error: extraction degrades to the
/// all-zero feature vector instead (see [`crate::features::ParseOutcome`]).
#[derive(Debug)]
pub enum ClassifierError {
    /// No URL was supplied to the classification entry point.
    MissingInput,
    /// The model's feature layout disagrees with the one supplied.
    SchemaMismatch { expected: String, found: String },
    /// The model artifact is missing, unreadable or corrupt.
    ModelLoad { path: String, reason: String },
    /// The model artifact could not be written.
    ModelSave { path: String, reason: String },
    /// The training dataset is missing or malformed.
    DatasetLoad { path: String, reason: String },
    /// URL and label columns of a labelled collection differ in length.
    LabelCountMismatch { urls: usize, labels: usize },
    /// The training dataset contains no rows.
    EmptyDataset,
    /// The train/test split leaves one of the partitions empty.
    InsufficientData { rows: usize, test_fraction: f64 },
    /// The tree learner rejected its input.
    Fit(String),
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClassifierError::MissingInput => write!(f, "No URL provided"),
            ClassifierError::SchemaMismatch { expected, found } => write!(
                f,
                "Feature schema mismatch: model expects [{}], got [{}]",
                expected, found
            ),
            ClassifierError::ModelLoad { path, reason } => {
                write!(f, "Failed to load model '{}': {}", path, reason)
            }
            ClassifierError::ModelSave { path, reason } => {
                write!(f, "Failed to save model '{}': {}", path, reason)
            }
            ClassifierError::DatasetLoad { path, reason } => {
                write!(f, "Failed to load dataset '{}': {}", path, reason)
            }
            ClassifierError::LabelCountMismatch { urls, labels } => {
                write!(f, "Dataset has {} URLs but {} labels", urls, labels)
            }
            ClassifierError::EmptyDataset => write!(f, "Dataset contains no rows"),
            ClassifierError::InsufficientData {
                rows,
                test_fraction,
            } => write!(
                f,
                "Cannot split {} rows with test fraction {}: both partitions need at least one row",
                rows, test_fraction
            ),
            ClassifierError::Fit(msg) => write!(f, "Failed to fit decision tree: {}", msg),
        }
    }
}

impl Error for ClassifierError {}

pub type Result<T> = std::result::Result<T, ClassifierError>;
