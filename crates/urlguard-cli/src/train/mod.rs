pub mod input;
pub mod report;
pub mod trainer;

pub use input::TrainConfig;
pub use trainer::run_training;
