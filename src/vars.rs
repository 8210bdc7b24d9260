//! Template variable scanning.
//!
//! Text-bearing nodes may reference external inputs with `{{variable}}`
//! tokens; each distinct variable becomes a dynamic input port. Scanning
//! runs on every keystroke, so it must be pure and cheap.

use once_cell::sync::Lazy;
use regex::Regex;

/// `{{ identifier }}` with optional whitespace inside the braces.
static VARIABLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*([A-Za-z_$][A-Za-z0-9_$]*)\s*\}\}").unwrap());

/// Extracts the distinct template variable names referenced in `text`,
/// in first-occurrence order.
///
/// Deduplication is by exact (case-sensitive) match. Malformed tokens --
/// unbalanced braces, identifiers starting with a digit, empty braces --
/// simply yield no match; they are never an error.
pub fn scan(text: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for capture in VARIABLE_RE.captures_iter(text) {
        let name = &capture[1];
        if !seen.iter().any(|s: &String| s == name) {
            seen.push(name.to_string());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_no_variables() {
        assert!(scan("").is_empty());
    }

    #[test]
    fn plain_text_yields_no_variables() {
        assert!(scan("no variables here").is_empty());
    }

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        assert_eq!(scan("{{a}} {{b}} {{a}}"), vec!["a", "b"]);
    }

    #[test]
    fn whitespace_inside_braces_is_tolerated() {
        assert_eq!(scan("{{ a }}"), vec!["a"]);
        assert_eq!(scan("{{\tname\t}}"), vec!["name"]);
    }

    #[test]
    fn invalid_identifiers_are_ignored() {
        assert!(scan("{{1bad}}").is_empty());
        assert!(scan("{{}}").is_empty());
        assert!(scan("{{ has space }}").is_empty());
    }

    #[test]
    fn malformed_braces_are_ignored() {
        assert!(scan("{{unclosed").is_empty());
        assert!(scan("stray}} braces{").is_empty());
        // A valid token after a malformed one still scans.
        assert_eq!(scan("{{bad {{good}}"), vec!["good"]);
    }

    #[test]
    fn dollar_and_underscore_are_valid_identifier_characters() {
        assert_eq!(scan("{{_private}} {{$ref}} {{v2}}"), vec!["_private", "$ref", "v2"]);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(scan("{{Name}} {{name}}"), vec!["Name", "name"]);
    }

    #[test]
    fn scanning_is_idempotent() {
        let text = "Hello {{name}}, your {{item}} is ready. {{name}}";
        assert_eq!(scan(text), scan(text));
        assert_eq!(scan(text), vec!["name", "item"]);
    }
}
