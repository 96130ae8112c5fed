//! File type detection

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
    Unknown,
}

/// Which side of the analysis a document is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRole {
    Resume,
    JobDescription,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "txt" | "text" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileType::Unknown)
    }

    /// File extensions `from_extension` recognizes and `accepted_for` allows for `role`
    pub fn accepted_extensions(role: DocumentRole) -> &'static [&'static str] {
        match role {
            DocumentRole::Resume => &["pdf", "txt", "text", "md", "markdown"],
            DocumentRole::JobDescription => &["txt", "text", "md", "markdown"],
        }
    }

    /// Resumes may be PDFs; job descriptions are pasted text
    pub fn accepted_for(&self, role: DocumentRole) -> bool {
        match (self, role) {
            (FileType::Unknown, _) => false,
            (FileType::Pdf, DocumentRole::JobDescription) => false,
            _ => true,
        }
    }
}
