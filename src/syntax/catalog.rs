//! Installed syntax catalog
//!
//! Maps a short syntax name (`python`) to the host-relative resource path
//! the host expects as a syntax setting (`Packages/Python/Python.tmLanguage`).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::config::Config;

/// Short syntax name to resource path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxCatalog {
    syntaxes: BTreeMap<String, String>,
}

impl SyntaxCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk the packages directory and collect syntax definitions
    ///
    /// Entries are visited in file-name order. When two files share a short
    /// name the one visited last wins. Unreadable directories are skipped.
    pub fn build(config: &Config) -> Self {
        let root = &config.packages_path;
        let mut catalog = Self::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !entry.file_type().is_file() || !config.is_syntax_file(path) {
                continue;
            }

            let short_name = match path.file_stem() {
                Some(stem) => stem.to_string_lossy().to_lowercase(),
                None => continue,
            };
            if let Some(resource) = resource_path(root, path) {
                catalog.insert(&short_name, &resource);
            }
        }

        debug!(
            root = %root.display(),
            count = catalog.len(),
            "built syntax catalog"
        );
        catalog
    }

    /// Add or replace a syntax; the name is lower-cased
    pub fn insert(&mut self, short_name: &str, resource: &str) {
        self.syntaxes
            .insert(short_name.to_lowercase(), resource.to_string());
    }

    /// Resolve a short name (case-insensitive, surrounding whitespace ignored)
    pub fn get(&self, short_name: &str) -> Option<&str> {
        self.syntaxes
            .get(&short_name.trim().to_lowercase())
            .map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.syntaxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.syntaxes.is_empty()
    }

    /// Known short names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.syntaxes.keys().map(|s| s.as_str()).collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SyntaxCatalog {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for (name, resource) in iter {
            let (name, resource): (String, String) = (name.into(), resource.into());
            catalog.insert(&name, &resource);
        }
        catalog
    }
}

/// Path from the packages root's own directory name down to the file
///
/// `/home/me/Packages/C/C.tmLanguage` under root `/home/me/Packages`
/// becomes `Packages/C/C.tmLanguage`, using the platform separator.
fn resource_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let resource = match root.file_name() {
        Some(root_name) => PathBuf::from(root_name).join(relative),
        None => relative.to_path_buf(),
    };
    Some(resource.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "<plist/>").unwrap();
    }

    #[test]
    fn test_resource_path() {
        let root = Path::new("/home/me/Packages");
        let file = Path::new("/home/me/Packages/C/C.tmLanguage");
        assert_eq!(
            resource_path(root, file),
            PathBuf::from("Packages/C/C.tmLanguage").to_str().map(String::from)
        );
        assert_eq!(resource_path(root, Path::new("/elsewhere/C.tmLanguage")), None);
    }

    #[test]
    fn test_build_from_tree() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("Packages");
        touch(&root.join("Python/Python.tmLanguage"));
        touch(&root.join("Rails/Ruby Haml.tmLanguage"));
        touch(&root.join("Python/Python.sublime-settings"));

        let catalog = SyntaxCatalog::build(&Config::new(&root));
        assert_eq!(catalog.len(), 2);

        let python = PathBuf::from("Packages/Python/Python.tmLanguage");
        assert_eq!(catalog.get("python"), python.to_str());
        assert!(catalog.get("ruby haml").is_some());
        assert!(catalog.get("Python.sublime-settings").is_none());
    }

    #[test]
    fn test_duplicate_short_name_last_wins() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("Packages");
        touch(&root.join("A/JSON.tmLanguage"));
        touch(&root.join("B/json.tmLanguage"));

        let catalog = SyntaxCatalog::build(&Config::new(&root));
        assert_eq!(catalog.len(), 1);

        let expected = PathBuf::from("Packages/B/json.tmLanguage");
        assert_eq!(catalog.get("JSON"), expected.to_str());
    }

    #[test]
    fn test_missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = SyntaxCatalog::build(&Config::new(dir.path().join("nope")));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_lookup_normalizes_name() {
        let catalog: SyntaxCatalog = [("Python", "Packages/Python/Python.tmLanguage")]
            .into_iter()
            .collect();
        assert_eq!(catalog.get("  PYTHON "), Some("Packages/Python/Python.tmLanguage"));
        assert_eq!(catalog.names(), vec!["python"]);
    }
}
