/// Line inspector - pure queries over a buffer position
///
/// Every operation here is total: out-of-range positions yield the
/// empty/false default instead of an error, so callers never have to
/// special-case buffer boundaries.
use crate::buffer::{Position, TextBuffer};
use crate::scope::tokenize_indexed;

/// Trimmed text of the position's line
#[must_use]
pub fn line_text(buf: &impl TextBuffer, pos: Position) -> &str {
    buf.line_text(pos.line).trim()
}

/// Whether the trimmed line text starts with the given prefix
#[must_use]
pub fn starts_with(buf: &impl TextBuffer, pos: Position, prefix: &str) -> bool {
    line_text(buf, pos).starts_with(prefix)
}

/// The literal whitespace prefix of the line, preserved verbatim so
/// inherited indentation keeps its tabs-vs-spaces mix
#[must_use]
pub fn leading_whitespace(buf: &impl TextBuffer, pos: Position) -> &str {
    let raw = buf.line_text(pos.line);
    &raw[..raw.len() - raw.trim_start().len()]
}

/// Count of leading whitespace characters on the line
#[must_use]
pub fn indent_width(buf: &impl TextBuffer, pos: Position) -> usize {
    leading_whitespace(buf, pos).chars().count()
}

/// Character column of the line's first non-whitespace character;
/// the line length for a blank line
#[must_use]
pub fn first_nonspace_column(buf: &impl TextBuffer, pos: Position) -> usize {
    indent_width(buf, pos)
}

/// Tab-expanded display column of the line's first non-whitespace
/// character
#[must_use]
pub fn visual_indent_column(buf: &impl TextBuffer, pos: Position) -> usize {
    let col = first_nonspace_column(buf, pos);
    buf.visual_column(Position::new(pos.line, col))
}

/// Whether the position sits inside a string or comment literal, as
/// reported by the buffer collaborator
#[must_use]
pub fn is_special(buf: &impl TextBuffer, pos: Position) -> bool {
    buf.is_in_string_or_comment(pos)
}

/// Word tokens of the line whose start positions are actual code
/// (string and comment content excluded per token)
#[must_use]
pub fn code_tokens<'a>(buf: &'a impl TextBuffer, pos: Position) -> Vec<&'a str> {
    tokenize_indexed(buf.line_text(pos.line))
        .into_iter()
        .filter(|&(col, _)| !buf.is_in_string_or_comment(Position::new(pos.line, col)))
        .map(|(_, token)| token)
        .collect()
}

/// The line's first code token, if any
#[must_use]
pub fn first_token<'a>(buf: &'a impl TextBuffer, pos: Position) -> Option<&'a str> {
    code_tokens(buf, pos).first().copied()
}

/// Detect an empty brace/bracket pair split across the just-inserted
/// newline: the previous line ends with `{` or `[` and the current line
/// begins with the matching `}` or `]`
#[must_use]
pub fn is_brace_pair_split(buf: &impl TextBuffer, pos: Position) -> bool {
    if pos.line == 0 {
        return false;
    }
    let open = buf.line_text(pos.line - 1).trim_end().chars().last();
    let close = buf.char_at(Position::new(pos.line, first_nonspace_column(buf, pos)));
    matches!((open, close), (Some('{'), Some('}')) | (Some('['), Some(']')))
}
