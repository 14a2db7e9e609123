//! Plugin configuration
//!
//! The host supplies the installed-packages root. Everything else has a
//! default and can be overridden from a TOML file.
//!
//! Example:
//! ```text
//! # SyntaxFromFile plugin configuration
//! packages_path = "/home/me/.config/sublime-text/Packages"
//! settings_file_name = "SyntaxFromFile.sublime-settings"
//! syntax_extensions = ["tmLanguage", "sublime-syntax"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;

/// Name of the plugin package directory
pub const PACKAGE_NAME: &str = "SyntaxFromFile";

/// Name of the settings file in both watched locations
pub const PREF_FILE_NAME: &str = "SyntaxFromFile.sublime-settings";

/// Package directory holding the user's overrides
pub const USER_PACKAGE: &str = "User";

/// Configuration settings
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Installed-packages root directory
    pub packages_path: PathBuf,
    /// Directory name of this plugin's own package
    #[serde(default = "default_package_name")]
    pub package_name: String,
    /// File name of the rule settings file
    #[serde(default = "default_settings_file_name")]
    pub settings_file_name: String,
    /// Directory name of the user override package
    #[serde(default = "default_user_package")]
    pub user_package: String,
    /// Recognized syntax-definition file extensions, without the dot
    #[serde(default = "default_syntax_extensions")]
    pub syntax_extensions: Vec<String>,
}

fn default_package_name() -> String {
    PACKAGE_NAME.to_string()
}

fn default_settings_file_name() -> String {
    PREF_FILE_NAME.to_string()
}

fn default_user_package() -> String {
    USER_PACKAGE.to_string()
}

fn default_syntax_extensions() -> Vec<String> {
    vec!["tmLanguage".to_string()]
}

impl Config {
    /// Default configuration rooted at the given packages directory
    pub fn new(packages_path: impl Into<PathBuf>) -> Self {
        Self {
            packages_path: packages_path.into(),
            package_name: default_package_name(),
            settings_file_name: default_settings_file_name(),
            user_package: default_user_package(),
            syntax_extensions: default_syntax_extensions(),
        }
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse a TOML configuration document
    pub fn parse(contents: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(contents)?;
        config.normalize();
        Ok(config)
    }

    /// Strip leading dots and drop empty extensions
    fn normalize(&mut self) {
        self.syntax_extensions = self
            .syntax_extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect();
    }

    /// Watched settings files, highest precedence first
    pub fn settings_paths(&self) -> Vec<PathBuf> {
        [&self.user_package, &self.package_name]
            .iter()
            .map(|subdir| self.packages_path.join(subdir).join(&self.settings_file_name))
            .collect()
    }

    /// Whether a file name carries a recognized syntax-definition extension
    pub fn is_syntax_file(&self, path: &Path) -> bool {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => self.syntax_extensions.iter().any(|known| known == ext),
            None => false,
        }
    }

    /// Whether a document's base name is the settings file name
    pub fn is_settings_file(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| name == self.settings_file_name.as_str())
            .unwrap_or(false)
    }
}
