//! In-memory document - a named buffer with an optional file and syntax

use std::path::{Path, PathBuf};

use crate::host::View;

/// A document the plugin can inspect and retarget
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Document name (e.g., "main.py", "untitled")
    name: String,
    /// Associated file path (None for unsaved buffers)
    filename: Option<PathBuf>,
    /// Assigned syntax resource path
    syntax: Option<String>,
    /// Number of syntax assignments made
    syntax_changes: usize,
}

impl Document {
    /// Create an unsaved document with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create a document backed by a file path
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());

        Self {
            name,
            filename: Some(path),
            ..Self::default()
        }
    }

    /// Get document name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the filename (save-as)
    pub fn set_filename(&mut self, path: PathBuf) {
        self.filename = Some(path);
    }

    /// How many times the syntax has been set
    pub fn syntax_changes(&self) -> usize {
        self.syntax_changes
    }
}

impl View for Document {
    fn file_name(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    fn syntax(&self) -> Option<&str> {
        self.syntax.as_deref()
    }

    fn set_syntax_file(&mut self, syntax: &str) {
        self.syntax = Some(syntax.to_string());
        self.syntax_changes += 1;
    }
}
