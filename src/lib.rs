//! SyntaxFromFile - sets a document's syntax from its file name
//!
//! The file name is matched against an ordered list of regular expressions
//! read from the user and package settings files. The first match wins.

pub mod config;
pub mod document;
pub mod error;
pub mod host;
pub mod logging;
pub mod syntax;

pub use config::Config;
pub use document::Document;
pub use error::{Result, SyntaxError};
pub use host::{MessageSink, RecordingSink, StderrSink, View};
pub use syntax::{MatchRule, RuleSet, SettingsFile, SyntaxCatalog, SyntaxManager};
