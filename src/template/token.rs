//! Placeholder token grammar: scanning, extraction and insertion.
//!
//! A token is `{{`, optional whitespace, an identifier of one or more
//! characters from `[A-Za-z0-9_.]`, optional whitespace, then `}}`. The
//! identifier (braces and padding stripped) is the variable name. This
//! syntax is shared with the message dispatcher that ultimately renders
//! stored templates, so it must not change unilaterally.

use std::ops::Range;

/// A placeholder occurrence found in template text.
///
/// `range` covers the whole `{{ ... }}` span in the source, including any
/// whitespace padding inside the braces; `name` is the bare identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSpan<'a> {
    /// Variable name with braces and surrounding whitespace stripped
    pub name: &'a str,
    /// Byte range of the full span in the scanned text
    pub range: Range<usize>,
}

/// Scan `text` for placeholder tokens, left to right.
///
/// Matching behaves like a regex scan: a `{{` that does not begin a
/// well-formed token is skipped one character at a time, so `{{{{x}}}}`
/// matches the inner `{{x}}` and yields `x`. Unterminated or empty
/// placeholders are ignored entirely.
pub fn scan(text: &str) -> Vec<TokenSpan<'_>> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i + 1 < bytes.len() {
        if bytes[i] == b'{' && bytes[i + 1] == b'{' {
            if let Some(token) = match_at(text, i) {
                i = token.range.end;
                tokens.push(token);
                continue;
            }
        }
        i += 1;
    }

    tokens
}

/// Try to match one token starting at `start`, which must sit on `{{`.
fn match_at(text: &str, start: usize) -> Option<TokenSpan<'_>> {
    let bytes = text.as_bytes();

    let mut pos = skip_whitespace(text, start + 2);

    let name_start = pos;
    while pos < bytes.len() && is_name_byte(bytes[pos]) {
        pos += 1;
    }
    if pos == name_start {
        // Empty name, e.g. "{{}}" or "{{ }}"
        return None;
    }
    let name_end = pos;

    pos = skip_whitespace(text, pos);
    if pos + 1 < bytes.len() && bytes[pos] == b'}' && bytes[pos + 1] == b'}' {
        Some(TokenSpan {
            name: &text[name_start..name_end],
            range: start..pos + 2,
        })
    } else {
        None
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'.'
}

/// Advance `pos` (a char boundary) past any whitespace.
fn skip_whitespace(text: &str, mut pos: usize) -> usize {
    while let Some(c) = text[pos..].chars().next() {
        if !c.is_whitespace() {
            break;
        }
        pos += c.len_utf8();
    }
    pos
}

/// Extract variable names from `text`, in order of first appearance.
///
/// Names are NOT deduplicated here; callers that want occurrence counts
/// can rely on repeats being preserved. Deduplication happens in the
/// validator.
pub fn extract_tokens(text: &str) -> Vec<String> {
    scan(text).into_iter().map(|t| t.name.to_string()).collect()
}

/// Whether `name` is usable as a variable name under the token grammar.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(is_name_byte)
}

/// The literal placeholder text for a variable, e.g. `{{student.email}}`.
///
/// This is what the editor puts on the clipboard when a variable is
/// copied from the catalog.
pub fn placeholder(name: &str) -> String {
    format!("{{{{{}}}}}", name)
}

/// Append the placeholder for `name` to `text`, separated by a single
/// space when `text` already has content.
pub fn insert_token(text: &str, name: &str) -> String {
    let token = placeholder(name);
    if text.is_empty() {
        token
    } else {
        format!("{} {}", text, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_basic() {
        let tokens = extract_tokens("Hi {{user.name}}, balance {{ acct.bal }}");
        assert_eq!(tokens, vec!["user.name", "acct.bal"]);
    }

    #[test]
    fn test_extract_preserves_order_and_repeats() {
        let tokens = extract_tokens("{{b}} then {{a}} then {{b}}");
        assert_eq!(tokens, vec!["b", "a", "b"]);
    }

    #[test]
    fn test_unterminated_token_ignored() {
        assert!(extract_tokens("Hi {{user.name").is_empty());
        assert!(extract_tokens("{{").is_empty());
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(extract_tokens("{{}}").is_empty());
        assert!(extract_tokens("{{ }}").is_empty());
        assert!(extract_tokens("{{\t\n}}").is_empty());
    }

    #[test]
    fn test_nested_braces_match_inner_token() {
        // The outer "{{" is not followed by identifier characters, so the
        // scan resumes one character later and finds the inner token.
        assert_eq!(extract_tokens("{{{{x}}}}"), vec!["x"]);
        assert_eq!(extract_tokens("{{{x}}"), vec!["x"]);
    }

    #[test]
    fn test_case_sensitive_names() {
        let tokens = extract_tokens("{{User.Name}} and {{user.name}}");
        assert_eq!(tokens, vec!["User.Name", "user.name"]);
    }

    #[test]
    fn test_internal_whitespace_not_allowed() {
        assert!(extract_tokens("{{ user . name }}").is_empty());
        assert!(extract_tokens("{{user name}}").is_empty());
    }

    #[test]
    fn test_whitespace_padding_variants() {
        assert_eq!(extract_tokens("{{\tuser.name\n}}"), vec!["user.name"]);
        assert_eq!(extract_tokens("{{  portal_url  }}"), vec!["portal_url"]);
    }

    #[test]
    fn test_adjacent_tokens() {
        assert_eq!(extract_tokens("{{a}}{{b}}"), vec!["a", "b"]);
    }

    #[test]
    fn test_stray_open_before_token() {
        // "{{a" is not a token (no closing braces before the next "{{"),
        // but the later well-formed one still matches.
        assert_eq!(extract_tokens("{{a{{b}}"), vec!["b"]);
    }

    #[test]
    fn test_multibyte_text_around_tokens() {
        let tokens = extract_tokens("déjà {{x}} — fin {{y}}");
        assert_eq!(tokens, vec!["x", "y"]);
    }

    #[test]
    fn test_spans_cover_padding() {
        let text = "a {{ x }} b";
        let spans = scan(text);
        assert_eq!(spans.len(), 1);
        assert_eq!(&text[spans[0].range.clone()], "{{ x }}");
        assert_eq!(spans[0].name, "x");
    }

    #[test]
    fn test_is_valid_name() {
        assert!(is_valid_name("student.first_name"));
        assert!(is_valid_name("a"));
        assert!(is_valid_name("A9._"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("user name"));
        assert!(!is_valid_name("user-name"));
        assert!(!is_valid_name("naïve"));
    }

    #[test]
    fn test_placeholder_text() {
        assert_eq!(placeholder("student.email"), "{{student.email}}");
    }

    #[test]
    fn test_insert_token_into_empty_body() {
        assert_eq!(insert_token("", "user.name"), "{{user.name}}");
    }

    #[test]
    fn test_insert_token_appends_with_space() {
        assert_eq!(insert_token("Hello", "user.name"), "Hello {{user.name}}");
    }
}
