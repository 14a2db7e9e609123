//! Match rules for file-name based syntax selection
//!
//! A settings file is a JSON array of `[pattern, syntax]` or
//! `[pattern, syntax, flags]` entries. Each entry is parsed into a
//! [`RuleEntry`] and then validated against the catalog into a
//! [`MatchRule`]. Only validated rules ever reach the [`RuleSet`].

use std::path::Path;

use regex::Regex;

use super::catalog::SyntaxCatalog;
use crate::error::{Result, SyntaxError};

/// Marker for comment lines in settings files
const COMMENT_MARKER: &str = "//";

/// Flag character that makes a pattern case-insensitive
const IGNORE_CASE_FLAG: char = 'i';

/// One raw settings entry with the right shape but not yet validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleEntry {
    pub pattern: String,
    pub syntax: String,
    pub flags: Option<String>,
}

impl RuleEntry {
    /// Whether the flags ask for case-insensitive matching
    pub fn ignore_case(&self) -> bool {
        self.flags
            .as_deref()
            .map_or(false, |flags| flags.contains(IGNORE_CASE_FLAG))
    }

    /// Fields joined the way diagnostics show them
    pub fn render(&self) -> String {
        render_fields(self.fields())
    }

    fn fields(&self) -> Vec<&str> {
        let mut fields = vec![self.pattern.as_str(), self.syntax.as_str()];
        if let Some(flags) = &self.flags {
            fields.push(flags);
        }
        fields
    }
}

impl TryFrom<Vec<String>> for RuleEntry {
    type Error = SyntaxError;

    fn try_from(fields: Vec<String>) -> Result<Self> {
        if !(2..=3).contains(&fields.len()) {
            return Err(SyntaxError::WrongFieldCount(render_fields(
                fields.iter().map(|s| s.as_str()),
            )));
        }

        let mut fields = fields.into_iter();
        match (fields.next(), fields.next(), fields.next()) {
            (Some(pattern), Some(syntax), flags) => Ok(Self {
                pattern,
                syntax,
                flags,
            }),
            _ => Err(SyntaxError::WrongFieldCount(String::new())),
        }
    }
}

fn render_fields<'a>(fields: impl IntoIterator<Item = &'a str>) -> String {
    fields.into_iter().collect::<Vec<_>>().join(", ")
}

/// Remove comment lines, keeping line structure for parser positions
pub fn strip_comments(contents: &str) -> String {
    contents
        .lines()
        .filter(|line| !line.trim().starts_with(COMMENT_MARKER))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse settings text into shaped entries
///
/// The outer `Err` means the file itself is malformed. Each inner result is
/// one entry, which may individually have the wrong field count.
pub fn parse_entries(
    contents: &str,
) -> std::result::Result<Vec<Result<RuleEntry>>, serde_json::Error> {
    let raw: Vec<Vec<String>> = serde_json::from_str(&strip_comments(contents))?;
    Ok(raw.into_iter().map(RuleEntry::try_from).collect())
}

/// A compiled pattern paired with a resolved syntax resource path
#[derive(Debug, Clone)]
pub struct MatchRule {
    /// Compiled file-name pattern
    pub pattern: Regex,
    /// Syntax resource path from the catalog
    pub syntax: String,
}

impl MatchRule {
    /// Validate an entry against the catalog and compile its pattern
    pub fn compile(entry: &RuleEntry, catalog: &SyntaxCatalog) -> Result<Self> {
        let syntax_name = entry.syntax.trim().to_lowercase();
        let syntax = catalog
            .get(&syntax_name)
            .ok_or_else(|| SyntaxError::UnknownSyntax {
                name: syntax_name.clone(),
                entry: entry.render(),
            })?
            .to_string();

        let source = if entry.ignore_case() {
            format!("(?i){}", entry.pattern)
        } else {
            entry.pattern.clone()
        };
        let pattern = Regex::new(&source).map_err(|source| SyntaxError::BadPattern {
            pattern: entry.pattern.clone(),
            entry: entry.render(),
            source,
        })?;

        Ok(Self { pattern, syntax })
    }

    /// Whether the pattern matches anywhere in the path
    pub fn is_match(&self, path: &str) -> bool {
        self.pattern.is_match(path)
    }
}

/// Ordered rules; the first match wins
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<MatchRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule with lower precedence than all existing ones
    pub fn push(&mut self, rule: MatchRule) {
        self.rules.push(rule);
    }

    /// Append another set, keeping its order
    pub fn extend(&mut self, other: RuleSet) {
        self.rules.extend(other.rules);
    }

    /// First rule whose pattern matches the full file path
    pub fn find(&self, file_name: &Path) -> Option<&MatchRule> {
        let path = file_name.to_string_lossy();
        self.rules.iter().find(|rule| rule.is_match(&path))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MatchRule> {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> SyntaxCatalog {
        [
            ("python", "Packages/Python/Python.tmLanguage"),
            ("ruby haml", "Packages/Rails/Ruby Haml.tmLanguage"),
        ]
        .into_iter()
        .collect()
    }

    fn entry(fields: &[&str]) -> Result<RuleEntry> {
        RuleEntry::try_from(fields.iter().map(|s| s.to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn test_strip_comments() {
        let contents = "// header\n[\n  // [\"a\", \"b\"],\n  [\"\\\\.py$\", \"Python\"]\n]";
        let stripped = strip_comments(contents);
        assert!(!stripped.contains("header"));
        assert!(!stripped.contains("\"a\""));
        assert!(stripped.contains("Python"));
    }

    #[test]
    fn test_parse_entries() {
        let contents = r#"
// Maps file names to syntaxes
[
    ["\\.py$", "Python"],
    ["\\.haml$", "Ruby Haml", "i"],
    ["only-one"]
]
"#;
        let entries = parse_entries(contents).unwrap();
        assert_eq!(entries.len(), 3);

        let first = entries[0].as_ref().unwrap();
        assert_eq!(first.pattern, "\\.py$");
        assert_eq!(first.flags, None);
        assert!(entries[1].as_ref().unwrap().ignore_case());
        assert!(matches!(entries[2], Err(SyntaxError::WrongFieldCount(_))));
    }

    #[test]
    fn test_parse_malformed_file() {
        assert!(parse_entries("[[\"\\\\.py$\", \"Python\"]").is_err());
        assert!(parse_entries("{\"a\": 1}").is_err());
        assert!(parse_entries("[[\"x\", 3]]").is_err());
    }

    #[test]
    fn test_wrong_field_count() {
        let err = entry(&["a", "b", "c", "d"]).unwrap_err();
        assert_eq!(err.to_string(), "Wrong field count in: [a, b, c, d]");
        assert!(entry(&["a"]).is_err());
        assert!(entry(&[]).is_err());
    }

    #[test]
    fn test_compile_resolves_syntax() {
        let rule = MatchRule::compile(&entry(&["\\.py$", " PYTHON "]).unwrap(), &catalog()).unwrap();
        assert_eq!(rule.syntax, "Packages/Python/Python.tmLanguage");
        assert!(rule.is_match("/home/me/script.py"));
        assert!(!rule.is_match("/home/me/script.txt"));
    }

    #[test]
    fn test_compile_unknown_syntax() {
        let err = MatchRule::compile(&entry(&["\\.foo$", "Nonexistent"]).unwrap(), &catalog())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown syntax 'nonexistent' in [\\.foo$, Nonexistent]"
        );
    }

    #[test]
    fn test_compile_bad_pattern() {
        let err = MatchRule::compile(&entry(&["(unclosed", "python"]).unwrap(), &catalog())
            .unwrap_err();
        assert!(matches!(err, SyntaxError::BadPattern { .. }));
    }

    #[test]
    fn test_ignore_case_flag() {
        let plain = MatchRule::compile(&entry(&["\\.PY$", "python"]).unwrap(), &catalog()).unwrap();
        assert!(!plain.is_match("script.py"));

        let folded =
            MatchRule::compile(&entry(&["\\.PY$", "python", "i"]).unwrap(), &catalog()).unwrap();
        assert!(folded.is_match("script.py"));

        let other = MatchRule::compile(&entry(&["\\.PY$", "python", "x"]).unwrap(), &catalog())
            .unwrap();
        assert!(!other.is_match("script.py"));
    }

    #[test]
    fn test_first_match_wins() {
        let catalog = catalog();
        let mut rules = RuleSet::new();
        rules.push(MatchRule::compile(&entry(&["views/.*\\.py$", "ruby haml"]).unwrap(), &catalog).unwrap());
        rules.push(MatchRule::compile(&entry(&["\\.py$", "python"]).unwrap(), &catalog).unwrap());

        let hit = rules.find(Path::new("/app/views/index.py")).unwrap();
        assert_eq!(hit.syntax, "Packages/Rails/Ruby Haml.tmLanguage");

        let hit = rules.find(Path::new("/app/lib/util.py")).unwrap();
        assert_eq!(hit.syntax, "Packages/Python/Python.tmLanguage");

        assert!(rules.find(Path::new("/app/README")).is_none());
    }
}
