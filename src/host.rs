//! Host editor interface
//!
//! The plugin never owns documents or output. The host hands it a view on
//! each lifecycle event and a sink for diagnostic lines.

use std::cell::RefCell;
use std::path::Path;

/// Prefix on every diagnostic line
pub const MESSAGE_PREFIX: &str = "SyntaxFromFile";

/// A document as seen by the plugin
pub trait View {
    /// Associated file path (None for unsaved buffers)
    fn file_name(&self) -> Option<&Path>;

    /// Currently assigned syntax resource path
    fn syntax(&self) -> Option<&str>;

    /// Assign a syntax resource path
    fn set_syntax_file(&mut self, syntax: &str);
}

/// Line-oriented diagnostic output
pub trait MessageSink {
    fn message(&self, line: &str);
}

/// Writes diagnostics to stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl MessageSink for StderrSink {
    fn message(&self, line: &str) {
        eprintln!("{}", line);
    }
}

/// Keeps diagnostics in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    lines: RefCell<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines received so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// Lines carrying the error marker
    pub fn errors(&self) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter(|line| line.contains("(ERROR)"))
            .cloned()
            .collect()
    }

    /// Drop everything recorded
    pub fn clear(&self) {
        self.lines.borrow_mut().clear();
    }
}

impl MessageSink for RecordingSink {
    fn message(&self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}

impl<S: MessageSink + ?Sized> MessageSink for &S {
    fn message(&self, line: &str) {
        (**self).message(line)
    }
}

/// Format an informational line
pub fn format_message(msg: &str) -> String {
    format!("{}: {}", MESSAGE_PREFIX, msg)
}

/// Format an error line
pub fn format_error(msg: &str) -> String {
    format_message(&format!("(ERROR) {}", msg))
}
