//! Input manager routing documents to the right extractor

use crate::error::{MatcherError, Result};
use crate::input::file_detector::{DocumentRole, FileType};
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::info;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Where a document's text comes from
#[derive(Debug, Clone)]
pub enum InputSource {
    File(PathBuf),
    Inline(String),
}

impl InputSource {
    /// Short label used in report metadata
    pub fn label(&self) -> String {
        match self {
            InputSource::File(path) => path.display().to_string(),
            InputSource::Inline(_) => "<inline text>".to_string(),
        }
    }
}

pub struct InputManager {
    cache: HashMap<PathBuf, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn load(&mut self, source: &InputSource, role: DocumentRole) -> Result<String> {
        match source {
            InputSource::File(path) => self.extract_text(path, role).await,
            InputSource::Inline(text) => Ok(text.clone()),
        }
    }

    pub async fn extract_text(&mut self, path: &Path, role: DocumentRole) -> Result<String> {
        if self.enable_cache {
            if let Some(cached) = self.cache.get(path) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        if !path.exists() {
            return Err(MatcherError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = FileType::from_path(path);
        if !file_type.accepted_for(role) {
            return Err(MatcherError::UnsupportedFormat(format!(
                "{:?} input is not supported for {:?}: {}",
                file_type,
                role,
                path.display()
            )));
        }

        let text = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(MatcherError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), text.clone());
        }

        Ok(text)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
