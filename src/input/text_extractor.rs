//! Plain-text extraction from resume and job description files

use crate::error::{MatcherError, Result};
use pulldown_cmark::{Event, Parser, Tag};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            MatcherError::PdfExtraction(format!("Failed to extract text from '{}': {}", path.display(), e))
        })?;

        if text.trim().is_empty() {
            return Err(MatcherError::PdfExtraction(format!(
                "No text layer found in '{}'",
                path.display()
            )));
        }
        Ok(text)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path).await?)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown = fs::read_to_string(path).await?;
        Ok(Self::markdown_to_text(&markdown))
    }
}

impl MarkdownExtractor {
    /// Keep text and inline code, turn block ends and line breaks into newlines
    pub fn markdown_to_text(markdown: &str) -> String {
        let mut text = String::new();

        for event in Parser::new(markdown) {
            match event {
                Event::Text(content) | Event::Code(content) => text.push_str(&content),
                Event::SoftBreak | Event::HardBreak | Event::Rule => text.push('\n'),
                Event::End(
                    Tag::Paragraph | Tag::Heading(..) | Tag::Item | Tag::CodeBlock(_) | Tag::BlockQuote,
                ) => text.push('\n'),
                _ => {}
            }
        }

        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_formatting_removed() {
        let text = MarkdownExtractor::markdown_to_text(
            "# Jane Doe\n\n**Senior** Engineer\n\n- Rust\n- `tokio`\n\n[Site](https://example.com)",
        );

        assert!(text.contains("Jane Doe"));
        assert!(text.contains("Senior Engineer"));
        assert!(text.contains("Rust"));
        assert!(text.contains("tokio"));
        assert!(text.contains("Site"));
        assert!(!text.contains("**"));
        assert!(!text.contains('#'));
        assert!(!text.contains("https://"));
    }

    #[tokio::test]
    async fn test_plain_text_extraction() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("job.txt");
        std::fs::write(&path, "Rust developer").unwrap();

        let text = PlainTextExtractor.extract(&path).await.unwrap();
        assert_eq!(text, "Rust developer");
    }
}
