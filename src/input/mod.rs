//! Input handling
//! Detects document types and extracts plain text for the matching engine

pub mod file_detector;
pub mod text_extractor;
pub mod manager;
