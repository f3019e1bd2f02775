//! urlguard-classifiers: flag suspicious URLs with a rule and a random forest.
//!
//! The crate turns raw URL text into a fixed twelve-column feature vector
//! ([`features`]), short-circuits plaintext HTTP with a hand-written rule
//! ([`prefilter`]), and otherwise asks a bagged ensemble of decision trees
//! ([`models::RandomForest`]) for a Safe/Suspicious verdict.
//!
//! Training ([`training::train`]) and request handling
//! ([`scan::classify_request`]) are plain functions; the model artifact
//! written by [`io::save_model`] carries the feature schema so a stale
//! model is refused at load time instead of silently misreading columns.
pub mod config;
pub mod data_handling;
pub mod error;
pub mod features;
pub mod io;
pub mod label;
pub mod models;
pub mod prefilter;
pub mod report;
pub mod scan;
pub mod stats;
pub mod training;

pub use error::{ClassifierError, Result};
pub use label::{Label, Verdict};
