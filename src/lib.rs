pub mod config;
pub mod engine;
pub mod inputs;
pub mod logging;
pub mod report;
pub mod scoring;
pub mod spatial;
pub mod species;
pub mod weather;
pub mod web;

pub use config::{Config, ConfigLoader};
pub use engine::{Forecaster, Prediction, PredictionBatch, PredictionEngine, PredictionRequest};
pub use species::{ScoringError, Species};
