//! Line-oriented `.env` parser.
//!
//! The parser is permissive: every line that can be read as `KEY=VALUE` is
//! accepted, and anything odd about it is reported as a [`LineDiagnostic`]
//! instead of aborting the scan.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::LazyLock;

/// `# type: port` or `# @type port`, case-insensitive.
#[allow(clippy::expect_used)]
static TYPE_ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^#\s*(?:@type(?::|\s)|type:)\s*([A-Za-z_][A-Za-z0-9_]*)")
        .expect("type annotation pattern is valid")
});

/// A structural problem tied to one source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDiagnostic {
    /// Line number (1-indexed).
    pub line: usize,
    /// Human-readable message.
    pub message: String,
    /// The offending line, trimmed.
    pub content: String,
}

impl LineDiagnostic {
    /// Creates a new line diagnostic.
    #[must_use]
    pub fn new(line: usize, message: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
            content: content.into(),
        }
    }
}

/// Structured contents of one `.env` file.
///
/// `variables`, `line_info` and `type_hints` share keys: every hint and
/// every line entry belongs to a stored variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedFile {
    /// Resolved values. The last assignment of a key wins.
    pub variables: BTreeMap<String, String>,
    /// Line of the last assignment of each key.
    pub line_info: BTreeMap<String, usize>,
    /// Lowercased type names from annotation comments.
    pub type_hints: BTreeMap<String, String>,
    /// Lines that could not be parsed.
    pub errors: Vec<LineDiagnostic>,
    /// Recoverable anomalies.
    pub warnings: Vec<LineDiagnostic>,
    /// Keys in order of first assignment.
    pub keys: Vec<String>,
    /// Whether the source file exists. Always true for parsed text.
    pub exists: bool,
    /// Source path, set by the file reader.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for ParsedFile {
    fn default() -> Self {
        Self {
            variables: BTreeMap::new(),
            line_info: BTreeMap::new(),
            type_hints: BTreeMap::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
            keys: Vec::new(),
            exists: true,
            path: None,
        }
    }
}

impl ParsedFile {
    /// Creates the record for a file that does not exist.
    #[must_use]
    pub fn missing(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let message = format!("File not found: {}", path.display());
        Self {
            errors: vec![LineDiagnostic::new(0, message, "")],
            exists: false,
            path: Some(path),
            ..Self::default()
        }
    }

    /// Returns the value of a variable.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Returns true if the variable is defined.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    /// Returns the line of a variable's last assignment.
    #[must_use]
    pub fn line_of(&self, key: &str) -> Option<usize> {
        self.line_info.get(key).copied()
    }

    /// Iterates over `(key, value)` pairs in first-assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keys.iter().filter_map(|k| {
            self.variables
                .get_key_value(k)
                .map(|(k, v)| (k.as_str(), v.as_str()))
        })
    }

    /// Number of distinct variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns true if no variables are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    fn insert(&mut self, key: &str, value: String, line: usize) {
        if !self.variables.contains_key(key) {
            self.keys.push(key.to_string());
        }
        self.variables.insert(key.to_string(), value);
        self.line_info.insert(key.to_string(), line);
    }
}

/// Tracks an annotation comment waiting for its variable line.
#[derive(Debug, Default)]
enum HintState {
    #[default]
    Idle,
    Pending(String),
}

impl HintState {
    fn take(&mut self) -> Option<String> {
        match std::mem::take(self) {
            Self::Idle => None,
            Self::Pending(hint) => Some(hint),
        }
    }
}

/// Parses `.env` text.
///
/// Never fails: malformed lines become entries in [`ParsedFile::errors`],
/// anomalies become entries in [`ParsedFile::warnings`].
#[must_use]
pub fn parse(content: &str) -> ParsedFile {
    let mut parsed = ParsedFile::default();
    let mut hint = HintState::Idle;

    for (index, raw) in content.split('\n').enumerate() {
        let line_num = index + 1;
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        let trimmed = line.trim();

        if trimmed.is_empty() {
            hint = HintState::Idle;
            continue;
        }

        if trimmed.starts_with('#') {
            if let Some(type_name) = type_annotation(trimmed) {
                hint = HintState::Pending(type_name);
            }
            continue;
        }

        let Some((left, right)) = line.split_once('=') else {
            parsed.errors.push(LineDiagnostic::new(
                line_num,
                "Invalid line: missing '=' sign",
                trimmed,
            ));
            continue;
        };

        let key = left.trim();
        if key.is_empty() {
            parsed.errors.push(LineDiagnostic::new(
                line_num,
                "Invalid line: empty variable name",
                trimmed,
            ));
            continue;
        }

        if !is_conventional_name(key) {
            parsed.warnings.push(LineDiagnostic::new(
                line_num,
                format!("Variable name '{key}' contains unusual characters"),
                trimmed,
            ));
        }

        if let Some(previous) = parsed.line_of(key) {
            parsed.warnings.push(LineDiagnostic::new(
                line_num,
                format!("Duplicate variable '{key}' (previous definition at line {previous})"),
                trimmed,
            ));
        }

        parsed.insert(key, resolve_value(right), line_num);
        if let Some(type_name) = hint.take() {
            parsed.type_hints.insert(key.to_string(), type_name);
        }
    }

    parsed
}

/// Extracts the lowercased type name from an annotation comment.
fn type_annotation(comment: &str) -> Option<String> {
    TYPE_ANNOTATION
        .captures(comment)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
}

/// Checks `[A-Za-z_][A-Za-z0-9_]*`.
fn is_conventional_name(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Resolves the raw right-hand side of an assignment.
///
/// Unterminated or mismatched quotes pass through as-is.
pub(crate) fn resolve_value(raw: &str) -> String {
    let mut value = raw;
    if !raw.trim().starts_with(['"', '\'']) {
        if let Some(idx) = value.find(" #") {
            value = &value[..idx];
        }
    }
    let value = value.trim();

    if let Some(inner) = strip_quotes(value, '"') {
        return unescape(inner);
    }
    if let Some(inner) = strip_quotes(value, '\'') {
        return inner.to_string();
    }
    value.to_string()
}

fn strip_quotes(value: &str, quote: char) -> Option<&str> {
    if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
        Some(&value[1..value.len() - 1])
    } else {
        None
    }
}

/// Escape substitution for double-quoted values. Order matters.
fn unescape(value: &str) -> String {
    value
        .replace("\\n", "\n")
        .replace("\\r", "\r")
        .replace("\\t", "\t")
        .replace("\\\\", "\\")
        .replace("\\\"", "\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_assignments() {
        let parsed = parse("FOO=bar\nBAZ=qux\n");
        assert_eq!(parsed.get("FOO"), Some("bar"));
        assert_eq!(parsed.get("BAZ"), Some("qux"));
        assert_eq!(parsed.line_of("BAZ"), Some(2));
        assert!(parsed.errors.is_empty());
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn unquoted_value_round_trips() {
        for v in ["hello", "a-b_c.d", "http://x.y/z?q=1", "a#b", "3000"] {
            let parsed = parse(&format!("K={v}"));
            assert_eq!(parsed.get("K"), Some(v), "value {v:?}");
        }
    }

    #[test]
    fn quoted_value_without_escapes_is_unwrapped() {
        for v in ["hello world", "a # not a comment", "", "'inner'"] {
            let parsed = parse(&format!("K=\"{v}\""));
            assert_eq!(parsed.get("K"), Some(v), "value {v:?}");
        }
    }

    #[test]
    fn splits_at_first_equals() {
        let parsed = parse("URL=postgres://u:p@h/db?sslmode=require");
        assert_eq!(parsed.get("URL"), Some("postgres://u:p@h/db?sslmode=require"));
    }

    #[test]
    fn strips_inline_comment_after_space_hash() {
        let parsed = parse("PORT=3000 # the port\nCOLOR=#fff\nEMPTY= # nothing");
        assert_eq!(parsed.get("PORT"), Some("3000"));
        assert_eq!(parsed.get("COLOR"), Some("#fff"));
        assert_eq!(parsed.get("EMPTY"), Some(""));
    }

    #[test]
    fn keeps_hash_inside_quotes() {
        let parsed = parse("A=\"x # y\"\nB='x # y'");
        assert_eq!(parsed.get("A"), Some("x # y"));
        assert_eq!(parsed.get("B"), Some("x # y"));
    }

    #[test]
    fn applies_escapes_only_in_double_quotes() {
        let parsed = parse(r#"A="line1\nline2\t\"q\" \\"
B='line1\nline2'"#);
        assert_eq!(parsed.get("A"), Some("line1\nline2\t\"q\" \\"));
        assert_eq!(parsed.get("B"), Some(r"line1\nline2"));
    }

    #[test]
    fn unterminated_quotes_pass_through() {
        let parsed = parse("A=\"open\nB='mixed\"\nC=\"");
        assert_eq!(parsed.get("A"), Some("\"open"));
        assert_eq!(parsed.get("B"), Some("'mixed\""));
        assert_eq!(parsed.get("C"), Some("\""));
        assert!(parsed.errors.is_empty());
    }

    #[test]
    fn missing_equals_is_an_error() {
        let parsed = parse("FOO=1\nNOT_AN_ASSIGNMENT\nBAR=2");
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].line, 2);
        assert_eq!(parsed.errors[0].message, "Invalid line: missing '=' sign");
        assert_eq!(parsed.errors[0].content, "NOT_AN_ASSIGNMENT");
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn empty_name_is_an_error() {
        let parsed = parse("  =value");
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].message, "Invalid line: empty variable name");
        assert!(parsed.is_empty());
    }

    #[test]
    fn unusual_name_is_a_warning_but_stored() {
        let parsed = parse("MY-VAR=1");
        assert_eq!(parsed.get("MY-VAR"), Some("1"));
        assert_eq!(parsed.warnings.len(), 1);
        assert!(parsed.warnings[0].message.contains("unusual characters"));
    }

    #[test]
    fn export_prefix_is_not_stripped() {
        let parsed = parse("export FOO=bar");
        assert_eq!(parsed.get("export FOO"), Some("bar"));
        assert!(!parsed.contains("FOO"));
        assert_eq!(parsed.warnings.len(), 1);
    }

    #[test]
    fn duplicate_key_last_wins_with_one_warning() {
        let parsed = parse("K=a\nK=b");
        assert_eq!(parsed.get("K"), Some("b"));
        assert_eq!(parsed.line_of("K"), Some(2));
        assert_eq!(parsed.keys, vec!["K".to_string()]);
        assert_eq!(parsed.warnings.len(), 1);
        assert!(parsed.warnings[0].message.contains("line 1"));
    }

    #[test]
    fn keys_keep_first_assignment_order() {
        let parsed = parse("Z=1\nA=2\nZ=3\nM=4");
        let keys: Vec<&str> = parsed.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Z", "A", "M"]);
    }

    #[test]
    fn handles_crlf_line_endings() {
        let parsed = parse("A=1\r\nB=\"two\"\r\n");
        assert_eq!(parsed.get("A"), Some("1"));
        assert_eq!(parsed.get("B"), Some("two"));
    }

    #[test]
    fn type_hint_applies_to_next_variable() {
        let parsed = parse("# type: port\nPORT=3000\nHOST=localhost");
        assert_eq!(parsed.type_hints.get("PORT").map(String::as_str), Some("port"));
        assert!(!parsed.type_hints.contains_key("HOST"));
    }

    #[test]
    fn type_hint_forms_are_case_insensitive() {
        let parsed = parse("# @type URL\nA=x\n#TYPE: Boolean\nB=y\n# @type: int\nC=1");
        assert_eq!(parsed.type_hints.get("A").map(String::as_str), Some("url"));
        assert_eq!(parsed.type_hints.get("B").map(String::as_str), Some("boolean"));
        assert_eq!(parsed.type_hints.get("C").map(String::as_str), Some("int"));
    }

    #[test]
    fn words_starting_with_type_are_not_hints() {
        let parsed = parse("# @typescript settings
A=1
# @types are below
B=2");
        assert!(parsed.type_hints.is_empty(), "{:?}", parsed.type_hints);

        let parsed = parse("# @type:port
C=3");
        assert_eq!(parsed.type_hints.get("C").map(String::as_str), Some("port"));
    }

    #[test]
    fn blank_line_clears_pending_hint() {
        let parsed = parse("# type: port\n\nPORT=3000");
        assert!(parsed.type_hints.is_empty());
    }

    #[test]
    fn plain_comment_keeps_pending_hint() {
        let parsed = parse("# type: port\n# the listen port\nPORT=3000");
        assert_eq!(parsed.type_hints.get("PORT").map(String::as_str), Some("port"));
    }

    #[test]
    fn trailing_hint_is_dropped() {
        let parsed = parse("A=1\n# type: url");
        assert!(parsed.type_hints.is_empty());
        for key in parsed.type_hints.keys() {
            assert!(parsed.contains(key));
        }
    }

    #[test]
    fn every_variable_has_line_info() {
        let parsed = parse("# type: url\nA=http://x\nB=\nbroken\nA=http://y");
        for key in parsed.variables.keys() {
            assert!(parsed.line_info.contains_key(key));
        }
        for key in parsed.type_hints.keys() {
            assert!(parsed.contains(key));
        }
    }

    #[test]
    fn missing_record_has_one_error() {
        let parsed = ParsedFile::missing("/nope/.env");
        assert!(!parsed.exists);
        assert!(parsed.is_empty());
        assert_eq!(parsed.errors.len(), 1);
        assert!(parsed.errors[0].message.starts_with("File not found"));
    }
}
