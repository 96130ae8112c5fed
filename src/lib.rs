//! Resume matcher library
//!
//! Explainable TF-IDF keyword matching of a resume against a job description.

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{MatcherError, Result};
pub use processing::engine::{AnalysisOutcome, MatchingEngine};
