/// Backward scope resolver
///
/// Walks preceding lines to locate the opening construct that a freshly
/// typed `end` (or mid-scope keyword) belongs to. Nested same-kind
/// blocks are handled with a depth counter: every `end` seen on the way
/// up is one more opener to skip before the match.
use crate::buffer::{Position, TextBuffer};
use crate::format::inspect;
use crate::scope::keywords::{classify, classify_trailing_do, DO_KEYWORD, KeywordEntry};

/// Openers a mid-scope keyword (else, rescue, when, ...) realigns with
const MID_SCOPE_ANCHORS: &[&str] = &["if", "case", "begin", "unless", "def"];

/// Find the opening line matching an `end` typed at `start`.
///
/// Candidate lines are measured at the same visual column as the
/// `end`'s first character: deeper-indented lines are continuation
/// noise and are skipped without touching the depth counter. `end`
/// lines increment the counter, closable openers at depth zero are the
/// match, closable openers at depth > 0 pair off one counted `end`.
///
/// Returns the opener's first non-space position, or `None` when the
/// start of the buffer is reached (unbalanced source); the caller
/// leaves the text unchanged in that case.
#[must_use]
pub fn find_opening_line(buf: &impl TextBuffer, start: Position) -> Option<Position> {
    let target_col = inspect::visual_indent_column(buf, start);
    let mut depth: usize = 0;
    let mut line = start.line;

    while line > 0 {
        line -= 1;
        let pos = Position::new(line, inspect::first_nonspace_column(buf, Position::new(line, 0)));

        if inspect::line_text(buf, pos).is_empty() {
            continue;
        }
        if buf.visual_column(pos) > target_col {
            continue;
        }
        if inspect::is_special(buf, pos) {
            continue;
        }

        let tokens = inspect::code_tokens(buf, pos);
        if tokens.first() == Some(&"end") {
            depth += 1;
            continue;
        }

        if let Some(entry) = classify_opener(&tokens) {
            if entry.closable_by_end {
                if depth == 0 {
                    return Some(pos);
                }
                depth -= 1;
            }
        }
    }

    None
}

/// Find the opener a mid-scope keyword at `start` realigns with.
///
/// Deliberately simpler than [`find_opening_line`]: mid-scope keywords
/// cannot nest under themselves without an intervening opener, so no
/// depth counter is needed. Lines indented deeper than the current one
/// (raw character count, not visual columns) are skipped; the first
/// line at or above the current indent whose first token is one of the
/// anchor keywords wins.
#[must_use]
pub fn find_mid_scope_anchor(buf: &impl TextBuffer, start: Position) -> Option<Position> {
    let current_indent = inspect::indent_width(buf, start);
    let mut line = start.line;

    while line > 0 {
        line -= 1;
        let line_start = Position::new(line, 0);
        if inspect::line_text(buf, line_start).is_empty() {
            continue;
        }
        if inspect::indent_width(buf, line_start) > current_indent {
            continue;
        }

        let pos = Position::new(line, inspect::first_nonspace_column(buf, line_start));
        if inspect::is_special(buf, pos) {
            continue;
        }
        if let Some(first) = inspect::first_token(buf, pos) {
            if MID_SCOPE_ANCHORS.contains(&first) {
                return Some(pos);
            }
        }
    }

    None
}

/// Classify a line's tokens as a scope opener: first-token keyword
/// lookup, then the trailing-`do` fallback
fn classify_opener(tokens: &[&str]) -> Option<&'static KeywordEntry> {
    match tokens.first() {
        Some(first) => match classify(first) {
            Some(entry) => Some(entry),
            None if classify_trailing_do(tokens) => Some(&DO_KEYWORD),
            None => None,
        },
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::ScratchBuffer;

    fn buf(text: &str) -> ScratchBuffer {
        ScratchBuffer::from_text(text, 8, 2)
    }

    /// Position of the `end` keyword's first character on `line`
    fn end_at(buf: &ScratchBuffer, line: usize) -> Position {
        Position::new(line, inspect::first_nonspace_column(buf, Position::new(line, 0)))
    }

    #[test]
    fn test_simple_if() {
        let b = buf("if x\n  y = 1\n    end");
        let opener = find_opening_line(&b, end_at(&b, 2)).unwrap();
        assert_eq!(opener, Position::new(0, 0));
    }

    #[test]
    fn test_nested_if_indented() {
        let b = buf("if a\n  if b\n    if c\n      x\n    end\n  end\nend");
        // Deeper lines are continuation noise for each end's column
        assert_eq!(find_opening_line(&b, end_at(&b, 4)), Some(Position::new(2, 4)));
        assert_eq!(find_opening_line(&b, end_at(&b, 5)), Some(Position::new(1, 2)));
        assert_eq!(find_opening_line(&b, end_at(&b, 6)), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_depth_counting_at_same_column() {
        // Flush-left nesting: every line shares the target column, so
        // only the depth counter pairs ends with openers
        let b = buf("if a\nif b\nif c\nend\nend\nend");
        assert_eq!(find_opening_line(&b, end_at(&b, 3)), Some(Position::new(2, 0)));
        assert_eq!(find_opening_line(&b, end_at(&b, 4)), Some(Position::new(1, 0)));
        assert_eq!(find_opening_line(&b, end_at(&b, 5)), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_resolver_is_idempotent_on_aligned_source() {
        // Re-running against already-aligned text yields the same opener
        let b = buf("if a\n  if b\n    x\n  end\nend");
        assert_eq!(find_opening_line(&b, end_at(&b, 3)), Some(Position::new(1, 2)));
        assert_eq!(find_opening_line(&b, end_at(&b, 4)), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_trailing_do_is_an_opener() {
        let b = buf("5.times do\n  puts 'x'\n    end");
        assert_eq!(find_opening_line(&b, end_at(&b, 2)), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_deeper_lines_are_skipped() {
        let b = buf("def foo\n      x = long_call(\n        arg)\nend");
        assert_eq!(find_opening_line(&b, end_at(&b, 3)), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_unbalanced_source_returns_none() {
        let b = buf("x = 1\ny = 2\nend");
        assert_eq!(find_opening_line(&b, end_at(&b, 2)), None);
    }

    #[test]
    fn test_keyword_inside_string_is_skipped() {
        let b = buf("s = \"if x\"\nend");
        assert_eq!(find_opening_line(&b, end_at(&b, 1)), None);
    }

    #[test]
    fn test_keyword_inside_comment_is_skipped() {
        let b = buf("# if x\nend");
        assert_eq!(find_opening_line(&b, end_at(&b, 1)), None);
    }

    #[test]
    fn test_mid_scope_keyword_is_not_an_opener() {
        // else must not swallow the end; the if above it matches
        let b = buf("if x\n  a\nelse\n  b\nend");
        assert_eq!(find_opening_line(&b, end_at(&b, 4)), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_mid_scope_anchor_simple() {
        let b = buf("if x\n    \nelse");
        let anchor = find_mid_scope_anchor(&b, Position::new(2, 0)).unwrap();
        assert_eq!(anchor, Position::new(0, 0));
    }

    #[test]
    fn test_mid_scope_anchor_skips_deeper_lines() {
        let b = buf("case v\n  when 1\n    deep = 1\n  when 2");
        let start = Position::new(3, 2);
        assert_eq!(find_mid_scope_anchor(&b, start), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_mid_scope_anchor_none_without_opener() {
        let b = buf("x = 1\nelse");
        assert_eq!(find_mid_scope_anchor(&b, Position::new(1, 0)), None);
    }
}
