//! Syntax assignment manager
//!
//! This module provides the SyntaxManager that the host drives from its
//! document-opened and document-saved events. It owns the catalog, the
//! active rules and the tracked settings files; nothing is global.

use std::path::Path;

use tracing::{debug, info};

use super::catalog::SyntaxCatalog;
use super::rules::RuleSet;
use super::settings::{load_settings, SettingsFile};
use crate::config::Config;
use crate::host::{format_message, MessageSink, StderrSink, View};

/// Per-activation plugin state
pub struct SyntaxManager<S: MessageSink = StderrSink> {
    config: Config,
    /// Installed syntaxes, built once at construction
    catalog: SyntaxCatalog,
    /// Active rules, first match wins
    rules: RuleSet,
    /// Watched settings files in precedence order
    settings_files: Vec<SettingsFile>,
    sink: S,
}

impl SyntaxManager<StderrSink> {
    /// Create a manager that reports to stderr
    pub fn new(config: Config) -> Self {
        Self::with_sink(config, StderrSink)
    }
}

impl<S: MessageSink> SyntaxManager<S> {
    /// Build the catalog and load the rules
    pub fn with_sink(config: Config, sink: S) -> Self {
        let catalog = SyntaxCatalog::build(&config);
        Self::with_catalog(config, catalog, sink)
    }

    /// Load the rules against an already built catalog
    pub fn with_catalog(config: Config, catalog: SyntaxCatalog, sink: S) -> Self {
        let mut manager = Self {
            config,
            catalog,
            rules: RuleSet::new(),
            settings_files: Vec::new(),
            sink,
        };
        manager.reload_settings();
        manager
    }

    /// Document opened
    pub fn on_load<V: View>(&self, view: &mut V) {
        self.check_syntax(view);
    }

    /// Document saved
    ///
    /// Saving a file named like the settings file, wherever it lives,
    /// also checks the watched settings for changes.
    pub fn on_post_save<V: View>(&mut self, view: &mut V) {
        self.check_syntax(view);

        let is_settings = view
            .file_name()
            .map_or(false, |name| self.config.is_settings_file(name));
        if is_settings {
            self.recheck_settings();
        }
    }

    /// Apply the first matching rule's syntax if it differs from the current one
    ///
    /// Returns the syntax that was applied.
    pub fn check_syntax<V: View>(&self, view: &mut V) -> Option<String> {
        let file_name = view.file_name()?;
        let syntax = self.match_syntax(file_name)?;
        if view.syntax() == Some(syntax) {
            return None;
        }

        let base_name = file_name
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!(syntax, file = %base_name, "assigning syntax");
        self.sink
            .message(&format_message(&format!("Syntax {} for {}", syntax, base_name)));

        let syntax = syntax.to_string();
        view.set_syntax_file(&syntax);
        Some(syntax)
    }

    /// Syntax of the first rule matching the full path
    pub fn match_syntax(&self, file_name: &Path) -> Option<&str> {
        self.rules.find(file_name).map(|rule| rule.syntax.as_str())
    }

    /// Reload if any watched settings file changed
    ///
    /// Stops at the first changed file; one reload covers all of them.
    pub fn recheck_settings(&mut self) -> bool {
        let changed = self
            .settings_files
            .iter()
            .find(|file| file.changed())
            .map(|file| file.path().display().to_string());

        match changed {
            Some(path) => {
                info!(path = %path, "settings changed");
                self.sink
                    .message(&format_message(&format!("{} changed. Reloading settings.", path)));
                self.reload_settings();
                true
            }
            None => false,
        }
    }

    /// Replace the rules and tracked files with a fresh load
    pub fn reload_settings(&mut self) {
        let loaded = load_settings(&self.config, &self.catalog, &self.sink);
        debug!(
            rules = loaded.rules.len(),
            files = loaded.files.len(),
            "settings loaded"
        );
        self.rules = loaded.rules;
        self.settings_files = loaded.files;
    }

    /// Walk the packages directory again, then reload the rules
    pub fn rebuild_catalog(&mut self) {
        self.catalog = SyntaxCatalog::build(&self.config);
        self.reload_settings();
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &SyntaxCatalog {
        &self.catalog
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn settings_files(&self) -> &[SettingsFile] {
        &self.settings_files
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
