/// Indent decision policy
///
/// Turns a trigger (newline, or a just-completed dedent/mid-scope
/// keyword) plus the pre-edit buffer state into a concrete whitespace
/// edit. Every failure mode degrades to "no edit": the worst case is a
/// missed adjustment, never corrupted text.
use crate::buffer::{Position, TextBuffer};
use crate::config::IndentConfig;
use crate::format::inspect;
use crate::format::trigger::TriggerContext;
use crate::scope::{classify, classify_trailing_do, find_mid_scope_anchor, find_opening_line};

/// Keywords whose completion triggers mid-scope realignment, grouped by
/// their final character (the only thing the key event shows us)
const MID_SCOPE_COMPLETIONS: &[(char, &[&str])] = &[
    ('e', &["else", "rescue", "ensure"]),
    ('f', &["elsif"]),
    ('n', &["when"]),
];

/// The computed edit: a value, not a buffer mutation
///
/// `replacement` of `None` means "no change". `cursor_offset` is
/// relative to the position right after the applied replacement;
/// the host moves the cursor by it after applying the edit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditResult {
    /// Text to put in place of the context's begin..end range
    pub replacement: Option<String>,
    /// Signed cursor adjustment relative to the end of the replacement
    pub cursor_offset: Option<i32>,
}

impl EditResult {
    /// The "leave the text as typed" result
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    fn replace(text: String) -> Self {
        Self {
            replacement: Some(text),
            cursor_offset: None,
        }
    }

    /// Whether this result changes anything
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.replacement.is_none()
    }
}

/// Newline trigger: decide the leading whitespace of the fresh line.
///
/// The previous line's whitespace is inherited verbatim. A pre-scope
/// keyword (or trailing `do` modifier) on the previous line adds one
/// indent unit; an empty brace/bracket pair split around the cursor
/// expands to an indented body line with the closing brace dedented
/// below it.
#[must_use]
pub fn indent_new_line(buf: &impl TextBuffer, cfg: &IndentConfig, pos: Position) -> EditResult {
    if pos.line == 0 {
        return EditResult::none();
    }
    let prev = Position::new(pos.line - 1, 0);
    let inherited = inspect::leading_whitespace(buf, prev).to_string();

    let tokens = inspect::code_tokens(buf, prev);
    let opens_scope = tokens
        .first()
        .and_then(|first| classify(first))
        .is_some_and(|entry| entry.is_pre_scope)
        || classify_trailing_do(&tokens);

    if opens_scope {
        return EditResult::replace(format!("{inherited}{}", cfg.indent_unit()));
    }

    if inspect::is_brace_pair_split(buf, pos) {
        // Two lines: an indented body line for the cursor, and the
        // inherited indentation for the closing brace below it. The
        // offset walks the cursor back over the second line onto the
        // end of the first.
        let offset = -(i32::try_from(inherited.chars().count() + 1).unwrap_or(i32::MAX));
        return EditResult {
            replacement: Some(format!("{inherited}{}\n{inherited}", cfg.indent_unit())),
            cursor_offset: Some(offset),
        };
    }

    if inherited.is_empty() {
        return EditResult::none();
    }
    EditResult::replace(inherited)
}

/// `end` completion trigger: realign the line to its matching opener.
///
/// Fires once the final `d` has been typed. No-op unless the three
/// characters before the cursor are exactly `end` forming the line's
/// first token; no-op as well when the backward scan finds no opener
/// (unbalanced source).
#[must_use]
pub fn realign_closing_keyword(buf: &impl TextBuffer, ctx: &mut TriggerContext) -> EditResult {
    realign_to(buf, ctx, "end", find_opening_line)
}

/// Mid-scope completion trigger (else, elsif, ensure, rescue, when):
/// realign the line with the enclosing block's opener.
///
/// The key event only shows the final character, so every keyword with
/// that ending is checked against the text before the cursor; the
/// first-token equality check is the guard against identifiers that
/// merely end the same way.
#[must_use]
pub fn realign_mid_scope(
    buf: &impl TextBuffer,
    ctx: &mut TriggerContext,
    last_char: char,
) -> EditResult {
    let keywords = MID_SCOPE_COMPLETIONS
        .iter()
        .find(|&&(c, _)| c == last_char)
        .map(|&(_, kws)| kws)
        .unwrap_or_default();

    for keyword in keywords {
        let result = realign_to(buf, ctx, keyword, find_mid_scope_anchor);
        if !result.is_none() {
            return result;
        }
    }
    EditResult::none()
}

/// Shared realignment: verify `keyword` was just typed as the line's
/// first token, locate the opener with `find`, and replace the line's
/// leading whitespace with the opener's. Widens the context's begin
/// position to the start of the line so the host replaces the whole
/// prefix in one edit.
fn realign_to<B: TextBuffer>(
    buf: &B,
    ctx: &mut TriggerContext,
    keyword: &str,
    find: impl Fn(&B, Position) -> Option<Position>,
) -> EditResult {
    let cursor = ctx.begin;
    let len = keyword.chars().count();
    if cursor.column < len {
        return EditResult::none();
    }

    let start_col = cursor.column - len;
    let typed: String = buf
        .line_text(cursor.line)
        .chars()
        .skip(start_col)
        .take(len)
        .collect();
    if typed != keyword {
        return EditResult::none();
    }

    // Must be the first token on its line, and actual code
    let keyword_pos = Position::new(cursor.line, start_col);
    if inspect::first_nonspace_column(buf, keyword_pos) != start_col {
        return EditResult::none();
    }
    if inspect::is_special(buf, keyword_pos) {
        return EditResult::none();
    }

    let Some(opener) = find(buf, keyword_pos) else {
        return EditResult::none();
    };

    let opener_ws = inspect::leading_whitespace(buf, opener);
    ctx.begin = cursor.start_of_line();
    EditResult::replace(format!("{opener_ws}{keyword}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::ScratchBuffer;
    use crate::format::trigger::KeyEvent;

    fn cfg() -> IndentConfig {
        IndentConfig {
            tab_width: 8,
            indent_width: 2,
            use_tabs: false,
        }
    }

    fn ctx_at(pos: Position, key: KeyEvent) -> TriggerContext {
        TriggerContext {
            begin: pos,
            end: pos,
            key,
        }
    }

    #[test]
    fn test_newline_inherits_indentation() {
        let b = ScratchBuffer::from_text("    x = 1\n", 8, 2);
        let result = indent_new_line(&b, &cfg(), Position::new(1, 0));
        assert_eq!(result.replacement.as_deref(), Some("    "));
        assert_eq!(result.cursor_offset, None);
    }

    #[test]
    fn test_newline_inherits_tabs_verbatim() {
        let b = ScratchBuffer::from_text("\t\tx = 1\n", 8, 2);
        let result = indent_new_line(&b, &cfg(), Position::new(1, 0));
        assert_eq!(result.replacement.as_deref(), Some("\t\t"));
    }

    #[test]
    fn test_newline_after_pre_scope_keyword_indents() {
        let b = ScratchBuffer::from_text("  def foo\n", 8, 2);
        let result = indent_new_line(&b, &cfg(), Position::new(1, 0));
        assert_eq!(result.replacement.as_deref(), Some("    "));
    }

    #[test]
    fn test_newline_after_trailing_do_indents() {
        let b = ScratchBuffer::from_text("5.times do |i|\n", 8, 2);
        let result = indent_new_line(&b, &cfg(), Position::new(1, 0));
        assert_eq!(result.replacement.as_deref(), Some("  "));
    }

    #[test]
    fn test_newline_after_mid_scope_keyword_does_not_indent() {
        let b = ScratchBuffer::from_text("  else\n", 8, 2);
        let result = indent_new_line(&b, &cfg(), Position::new(1, 0));
        assert_eq!(result.replacement.as_deref(), Some("  "));
    }

    #[test]
    fn test_newline_after_keyword_in_string_does_not_indent() {
        let b = ScratchBuffer::from_text("  x = \"if y\"\n", 8, 2);
        let result = indent_new_line(&b, &cfg(), Position::new(1, 0));
        assert_eq!(result.replacement.as_deref(), Some("  "));
    }

    #[test]
    fn test_newline_at_column_zero_is_noop() {
        let b = ScratchBuffer::from_text("x = 1\n", 8, 2);
        let result = indent_new_line(&b, &cfg(), Position::new(1, 0));
        assert!(result.is_none());
    }

    #[test]
    fn test_brace_pair_split() {
        let b = ScratchBuffer::from_text("  h = {\n}", 8, 2);
        let result = indent_new_line(&b, &cfg(), Position::new(1, 0));
        assert_eq!(result.replacement.as_deref(), Some("    \n  "));
        // Back over the closing-brace line's whitespace and the newline
        assert_eq!(result.cursor_offset, Some(-3));
    }

    #[test]
    fn test_bracket_pair_split() {
        let b = ScratchBuffer::from_text("a = [\n]", 8, 2);
        let result = indent_new_line(&b, &cfg(), Position::new(1, 0));
        assert_eq!(result.replacement.as_deref(), Some("  \n"));
        assert_eq!(result.cursor_offset, Some(-1));
    }

    #[test]
    fn test_end_realigns_to_opener() {
        let b = ScratchBuffer::from_text("if x\n  y = 1\n    end", 8, 2);
        let mut ctx = ctx_at(Position::new(2, 7), KeyEvent::Char('d'));
        let result = realign_closing_keyword(&b, &mut ctx);
        assert_eq!(result.replacement.as_deref(), Some("end"));
        assert_eq!(ctx.begin, Position::new(2, 0));
    }

    #[test]
    fn test_end_with_no_opener_is_noop() {
        let b = ScratchBuffer::from_text("x = 1\n  end", 8, 2);
        let mut ctx = ctx_at(Position::new(1, 5), KeyEvent::Char('d'));
        let result = realign_closing_keyword(&b, &mut ctx);
        assert!(result.is_none());
        assert_eq!(ctx.begin, Position::new(1, 5));
    }

    #[test]
    fn test_end_not_first_token_is_noop() {
        let b = ScratchBuffer::from_text("if x\n  y = front_end", 8, 2);
        let mut ctx = ctx_at(Position::new(1, 15), KeyEvent::Char('d'));
        assert!(realign_closing_keyword(&b, &mut ctx).is_none());
    }

    #[test]
    fn test_identifier_ending_in_d_is_noop() {
        // "bed" ends like "end" ends with d, but is not "end"
        let b = ScratchBuffer::from_text("if x\n  bed", 8, 2);
        let mut ctx = ctx_at(Position::new(1, 5), KeyEvent::Char('d'));
        assert!(realign_closing_keyword(&b, &mut ctx).is_none());
    }

    #[test]
    fn test_else_realigns_to_if() {
        // Fixture from the policy contract: if at indent 0, else typed
        // on a 4-space line realigns to 0
        let b = ScratchBuffer::from_text("if x\n    else", 8, 2);
        let mut ctx = ctx_at(Position::new(1, 8), KeyEvent::Char('e'));
        let result = realign_mid_scope(&b, &mut ctx, 'e');
        assert_eq!(result.replacement.as_deref(), Some("else"));
        assert_eq!(ctx.begin, Position::new(1, 0));
    }

    #[test]
    fn test_rescue_realigns_to_def() {
        let b = ScratchBuffer::from_text("  def foo\n      rescue", 8, 2);
        let mut ctx = ctx_at(Position::new(1, 12), KeyEvent::Char('e'));
        let result = realign_mid_scope(&b, &mut ctx, 'e');
        assert_eq!(result.replacement.as_deref(), Some("  rescue"));
        assert_eq!(ctx.begin, Position::new(1, 0));
    }

    #[test]
    fn test_when_realigns_to_case() {
        let b = ScratchBuffer::from_text("case v\n    when", 8, 2);
        let mut ctx = ctx_at(Position::new(1, 8), KeyEvent::Char('n'));
        let result = realign_mid_scope(&b, &mut ctx, 'n');
        assert_eq!(result.replacement.as_deref(), Some("when"));
    }

    #[test]
    fn test_elsif_realigns_to_unless() {
        let b = ScratchBuffer::from_text("unless x\n   elsif", 8, 2);
        let mut ctx = ctx_at(Position::new(1, 8), KeyEvent::Char('f'));
        let result = realign_mid_scope(&b, &mut ctx, 'f');
        assert_eq!(result.replacement.as_deref(), Some("elsif"));
    }

    #[test]
    fn test_mid_scope_without_anchor_is_noop() {
        let b = ScratchBuffer::from_text("x = 1\n  else", 8, 2);
        let mut ctx = ctx_at(Position::new(1, 6), KeyEvent::Char('e'));
        assert!(realign_mid_scope(&b, &mut ctx, 'e').is_none());
    }

    #[test]
    fn test_identifier_ending_in_e_is_noop() {
        let b = ScratchBuffer::from_text("if x\n  value", 8, 2);
        let mut ctx = ctx_at(Position::new(1, 7), KeyEvent::Char('e'));
        assert!(realign_mid_scope(&b, &mut ctx, 'e').is_none());
    }
}
