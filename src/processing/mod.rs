//! Keyword extraction, matching and scoring

pub mod normalizer;
pub mod keywords;
pub mod matcher;
pub mod scoring;
pub mod explanation;
pub mod engine;
