/// Scope keyword table for Ruby block constructs
///
/// Classifies the keywords that open a block, tagged with whether the
/// block is terminated by the generic `end` keyword and whether the
/// keyword warrants an extra indent level on the following line
/// (pre-scope) or merely realigns with its opener (mid-scope).
use std::sync::LazyLock;

use regex::Regex;

/// Word-boundary tokenizer; splitting on `\w+` runs keeps `do_something`
/// from ever producing a `do` token
static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid pattern"));

/// Classification of a scope-opening keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordEntry {
    /// The keyword text
    pub text: &'static str,
    /// Whether the block it opens is terminated by `end`
    pub closable_by_end: bool,
    /// Pre-scope keywords indent the following line; mid-scope keywords
    /// (else, rescue, when, ...) realign with the opener instead
    pub is_pre_scope: bool,
}

/// Keywords opening a scope when they are a line's first token
pub const KEYWORDS: &[KeywordEntry] = &[
    KeywordEntry { text: "begin", closable_by_end: true, is_pre_scope: true },
    KeywordEntry { text: "case", closable_by_end: true, is_pre_scope: true },
    KeywordEntry { text: "class", closable_by_end: true, is_pre_scope: true },
    KeywordEntry { text: "def", closable_by_end: true, is_pre_scope: true },
    KeywordEntry { text: "else", closable_by_end: false, is_pre_scope: false },
    KeywordEntry { text: "elsif", closable_by_end: false, is_pre_scope: false },
    KeywordEntry { text: "ensure", closable_by_end: false, is_pre_scope: false },
    KeywordEntry { text: "for", closable_by_end: false, is_pre_scope: false },
    KeywordEntry { text: "if", closable_by_end: true, is_pre_scope: true },
    KeywordEntry { text: "module", closable_by_end: true, is_pre_scope: true },
    KeywordEntry { text: "rescue", closable_by_end: false, is_pre_scope: false },
    KeywordEntry { text: "unless", closable_by_end: true, is_pre_scope: true },
    KeywordEntry { text: "until", closable_by_end: true, is_pre_scope: true },
    KeywordEntry { text: "when", closable_by_end: false, is_pre_scope: false },
    KeywordEntry { text: "while", closable_by_end: true, is_pre_scope: true },
];

/// The block-modifier `do`, matched only via the trailing-token fallback
/// (`5.times do`), never as a line's first token
pub const DO_KEYWORD: KeywordEntry = KeywordEntry {
    text: "do",
    closable_by_end: true,
    is_pre_scope: true,
};

/// Split a line into word tokens
#[must_use]
pub fn tokenize(line: &str) -> Vec<&str> {
    WORD_RE.find_iter(line).map(|m| m.as_str()).collect()
}

/// Split a line into word tokens with their character columns
#[must_use]
pub fn tokenize_indexed(line: &str) -> Vec<(usize, &str)> {
    WORD_RE
        .find_iter(line)
        .map(|m| (line[..m.start()].chars().count(), m.as_str()))
        .collect()
}

/// Classify a line's first token against the keyword table
#[must_use]
pub fn classify(first_token: &str) -> Option<&'static KeywordEntry> {
    KEYWORDS.iter().find(|entry| entry.text == first_token)
}

/// Trailing-`do` fallback: a line opens a `do` block when `do` appears
/// as a later token and no earlier token is itself a scope keyword
/// (`while x do` is already counted by `while`)
#[must_use]
pub fn classify_trailing_do(tokens: &[&str]) -> bool {
    for (i, token) in tokens.iter().enumerate() {
        if *token == "do" {
            return i > 0;
        }
        if classify(token).is_some() {
            return false;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pre_scope_keywords() {
        for kw in ["begin", "case", "class", "def", "if", "module", "unless", "until", "while"] {
            let entry = classify(kw).unwrap();
            assert!(entry.is_pre_scope, "{kw} should be pre-scope");
            assert!(entry.closable_by_end, "{kw} should be closable by end");
        }
    }

    #[test]
    fn test_mid_scope_keywords() {
        for kw in ["else", "elsif", "ensure", "for", "rescue", "when"] {
            let entry = classify(kw).unwrap();
            assert!(!entry.is_pre_scope, "{kw} should be mid-scope");
            assert!(!entry.closable_by_end, "{kw} should not require its own end");
        }
    }

    #[test]
    fn test_non_keywords() {
        assert!(classify("puts").is_none());
        assert!(classify("end").is_none());
        assert!(classify("do").is_none()); // only via trailing fallback
        assert!(classify("ifx").is_none());
    }

    #[test]
    fn test_trailing_do() {
        assert!(classify_trailing_do(&tokenize("5.times do")));
        assert!(classify_trailing_do(&tokenize("arr.each do |x|")));
    }

    #[test]
    fn test_trailing_do_rejects_first_token() {
        assert!(!classify_trailing_do(&tokenize("do something")));
    }

    #[test]
    fn test_trailing_do_rejects_substring() {
        assert!(!classify_trailing_do(&tokenize("do_something")));
        assert!(!classify_trailing_do(&tokenize("x = pseudo_value")));
    }

    #[test]
    fn test_trailing_do_rejects_keyword_lines() {
        // The while already opens the scope; do must not double-count
        assert!(!classify_trailing_do(&tokenize("while x > 0 do")));
    }

    #[test]
    fn test_tokenize_word_boundaries() {
        assert_eq!(tokenize("5.times do |i|"), vec!["5", "times", "do", "i"]);
        assert_eq!(tokenize("  if x"), vec!["if", "x"]);
    }
}
