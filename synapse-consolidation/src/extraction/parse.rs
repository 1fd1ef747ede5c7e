//! Defensive parsing of raw extractor output.
//!
//! The output is untrusted: it may be wrapped in markdown fences, surrounded
//! by prose, or written with single-quoted strings. Nothing is evaluated;
//! a bounded bracket matcher isolates the array and serde_json parses it.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use synapse_core::errors::ExtractionError;

/// Characters scanned while matching one array.
pub const MAX_SCAN_CHARS: usize = 64 * 1024;
/// Nesting depth at which matching gives up.
pub const MAX_DEPTH: usize = 32;
/// `[` positions tried before the output is declared malformed.
const MAX_ARRAY_CANDIDATES: usize = 8;

static FENCE_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)```[A-Za-z0-9_-]*[ \t]*\r?\n?(.*?)```").ok());

/// One fact as the extractor wrote it, before validation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawFact {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default, alias = "fact", alias = "value")]
    pub text: Option<String>,
}

/// Parse the first well-formed fact array in `raw`.
pub fn parse_facts(raw: &str) -> Result<Vec<RawFact>, ExtractionError> {
    let body = strip_fences(raw);
    let mut reason = "no JSON array found".to_string();
    for (start, _) in body.match_indices('[').take(MAX_ARRAY_CANDIDATES) {
        let Some(slice) = find_balanced(body, start) else {
            continue;
        };
        match serde_json::from_str::<Vec<RawFact>>(&to_json_quotes(slice)) {
            Ok(facts) => return Ok(facts),
            Err(e) => reason = e.to_string(),
        }
    }
    Err(ExtractionError::MalformedOutput { reason })
}

/// Contents of the first fenced block, or `raw` when there is none.
pub fn strip_fences(raw: &str) -> &str {
    FENCE_RE
        .as_ref()
        .and_then(|re| re.captures(raw))
        .and_then(|caps| caps.get(1))
        .map_or(raw, |m| m.as_str().trim())
}

/// The bracketed span starting at byte `start`, skipping brackets inside
/// quoted strings. `None` when unbalanced, too deep or too long.
pub fn find_balanced(text: &str, start: usize) -> Option<&str> {
    let tail = text.get(start..)?;
    if !tail.starts_with('[') {
        return None;
    }
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (offset, c) in tail.char_indices().take(MAX_SCAN_CHARS) {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '[' | '{' => {
                depth += 1;
                if depth > MAX_DEPTH {
                    return None;
                }
            }
            ']' | '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&tail[..offset + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Rewrite single-quoted strings as JSON double-quoted strings.
pub fn to_json_quotes(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                out.push('"');
                while let Some(inner) = chars.next() {
                    out.push(inner);
                    if inner == '\\' {
                        if let Some(next) = chars.next() {
                            out.push(next);
                        }
                    } else if inner == '"' {
                        break;
                    }
                }
            }
            '\'' => {
                out.push('"');
                while let Some(inner) = chars.next() {
                    match inner {
                        '\\' => match chars.next() {
                            Some('\'') => out.push('\''),
                            Some(next) => {
                                out.push('\\');
                                out.push(next);
                            }
                            None => {}
                        },
                        '"' => out.push_str("\\\""),
                        '\'' => {
                            out.push('"');
                            break;
                        }
                        other => out.push(other),
                    }
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fence_is_stripped() {
        assert_eq!(strip_fences("x\n```json\n[1]\n```\ny"), "[1]");
        assert_eq!(strip_fences("[1]"), "[1]");
    }

    #[test]
    fn brackets_inside_strings_are_ignored() {
        let text = r#"[{"text": "a ] b"}] ]"#;
        assert_eq!(find_balanced(text, 0), Some(r#"[{"text": "a ] b"}]"#));
    }

    #[test]
    fn unbalanced_or_too_deep_is_rejected() {
        assert_eq!(find_balanced("[[1]", 0), None);
        let deep = "[".repeat(MAX_DEPTH + 1) + &"]".repeat(MAX_DEPTH + 1);
        assert_eq!(find_balanced(&deep, 0), None);
    }

    #[test]
    fn single_quotes_become_json() {
        assert_eq!(to_json_quotes(r#"['it\'s', 'say "hi"']"#), r#"["it's", "say \"hi\""]"#);
        assert_eq!(to_json_quotes(r#"["Sarah's"]"#), r#"["Sarah's"]"#);
    }

    #[test]
    fn prose_without_array_is_malformed() {
        assert!(matches!(
            parse_facts("I could not find any facts."),
            Err(ExtractionError::MalformedOutput { .. })
        ));
    }

    #[test]
    fn later_array_is_tried_when_first_bracket_is_prose() {
        let facts = parse_facts(r#"Facts [see below]: [{"key": "user.x", "text": "y"}]"#).unwrap();
        assert_eq!(facts.len(), 1);
    }
}
