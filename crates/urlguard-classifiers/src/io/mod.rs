//! Reading labelled datasets and reading/writing model artifacts.
pub mod dataset_csv;
pub mod model_file;

pub use dataset_csv::{read_dataset, read_dataset_from_reader, DatasetReaderConfig};
pub use model_file::{load_model, save_model, ModelArtifact, FORMAT_VERSION};
