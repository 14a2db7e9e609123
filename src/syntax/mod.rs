//! File-name based syntax selection
//!
//! This module provides:
//! - The catalog of installed syntax definitions
//! - Match rules parsed from the settings files
//! - Settings loading and change tracking
//! - The manager the host drives from document events

mod catalog;
mod rules;
mod settings;
mod manager;

pub use catalog::SyntaxCatalog;
pub use rules::{parse_entries, strip_comments, MatchRule, RuleEntry, RuleSet};
pub use settings::{load_settings, LoadedSettings, SettingsFile};
pub use manager::SyntaxManager;
