//! Settings file loading and change tracking
//!
//! Rules come from two files, user overrides first, then the package
//! defaults. Both locations are tracked even when the file is missing so
//! that creating it later is noticed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, warn};

use super::catalog::SyntaxCatalog;
use super::rules::{parse_entries, MatchRule, RuleSet};
use crate::config::Config;
use crate::error::{Result, SyntaxError};
use crate::host::{format_error, MessageSink};

/// A watched settings file and its last seen modification time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsFile {
    path: PathBuf,
    /// None when the file did not exist
    mtime: Option<SystemTime>,
}

impl SettingsFile {
    /// Record the file's current modification time
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mtime = current_mtime(&path);
        Self { path, mtime }
    }

    /// Handle with an explicit recorded time
    pub fn with_mtime(path: impl Into<PathBuf>, mtime: Option<SystemTime>) -> Self {
        Self {
            path: path.into(),
            mtime,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mtime(&self) -> Option<SystemTime> {
        self.mtime
    }

    /// Whether the file on disk differs from what was recorded
    pub fn changed(&self) -> bool {
        current_mtime(&self.path) != self.mtime
    }
}

fn current_mtime(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|meta| meta.modified()).ok()
}

/// Rules and tracked files produced by one load
#[derive(Debug, Clone, Default)]
pub struct LoadedSettings {
    pub rules: RuleSet,
    pub files: Vec<SettingsFile>,
}

/// Load every watched settings file and flatten their rules
///
/// Problems are reported to the sink and never abort the load: a bad entry
/// is dropped, a bad file contributes nothing.
pub fn load_settings<S: MessageSink>(
    config: &Config,
    catalog: &SyntaxCatalog,
    sink: &S,
) -> LoadedSettings {
    let mut loaded = LoadedSettings::default();

    for path in config.settings_paths() {
        loaded.files.push(SettingsFile::new(&path));
        if !path.exists() {
            debug!(path = %path.display(), "settings file absent");
            continue;
        }

        match load_file(&path, catalog, sink) {
            Ok(rules) => {
                debug!(path = %path.display(), rules = rules.len(), "loaded settings file");
                loaded.rules.extend(rules);
            }
            Err(e) => report(sink, &e),
        }
    }

    loaded
}

/// Rules from one file; Err only when the file as a whole is unusable
fn load_file<S: MessageSink>(path: &Path, catalog: &SyntaxCatalog, sink: &S) -> Result<RuleSet> {
    let contents = fs::read_to_string(path).map_err(|source| unreadable(path, source))?;
    let entries = parse_entries(&contents).map_err(|source| SyntaxError::MalformedSettings {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rules = RuleSet::new();
    for entry in entries {
        match entry.and_then(|entry| MatchRule::compile(&entry, catalog)) {
            Ok(rule) => rules.push(rule),
            Err(e) => report(sink, &e),
        }
    }
    Ok(rules)
}

fn unreadable(path: &Path, source: io::Error) -> SyntaxError {
    SyntaxError::UnreadableSettings {
        path: path.to_path_buf(),
        source,
    }
}

fn report<S: MessageSink>(sink: &S, err: &SyntaxError) {
    warn!(error = %err, "rejected settings");
    sink.message(&format_error(&err.to_string()));
}
