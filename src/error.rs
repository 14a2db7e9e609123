//! Error types for SyntaxFromFile

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for plugin operations
pub type Result<T> = std::result::Result<T, SyntaxError>;

/// Plugin error types
///
/// None of these are fatal. Entry errors drop one rule, file errors drop
/// one settings file, and the plugin keeps running with what is left.
#[derive(Error, Debug)]
pub enum SyntaxError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load {}: {source}", path.display())]
    MalformedSettings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to load {}: {source}", path.display())]
    UnreadableSettings {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Wrong field count in: [{0}]")]
    WrongFieldCount(String),

    #[error("Unknown syntax '{name}' in [{entry}]")]
    UnknownSyntax { name: String, entry: String },

    #[error("Bad file pattern '{pattern}' in [{entry}]")]
    BadPattern {
        pattern: String,
        entry: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}
