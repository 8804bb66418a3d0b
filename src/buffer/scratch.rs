/// `ScratchBuffer` - In-memory line buffer implementing [`TextBuffer`]
///
/// Stands in for the host editor's buffer in tests and in the replay
/// harness. Lexical classification is line-local: it is computed by
/// running [`CharFilter`] over the line, so a string literal spanning
/// lines is not tracked across the break.
use crate::buffer::char_filter::CharFilter;
use crate::buffer::position::Position;
use crate::buffer::TextBuffer;

/// Growable in-memory buffer with indentation settings
#[derive(Debug, Clone)]
pub struct ScratchBuffer {
    lines: Vec<String>,
    tab_width: usize,
    indent_width: usize,
    insert_spaces: bool,
}

impl ScratchBuffer {
    /// Create an empty buffer (one empty line) with the given settings
    #[must_use]
    pub fn new(tab_width: usize, indent_width: usize, insert_spaces: bool) -> Self {
        Self {
            lines: vec![String::new()],
            tab_width,
            indent_width,
            insert_spaces,
        }
    }

    /// Create a buffer from existing text
    #[must_use]
    pub fn from_text(text: &str, tab_width: usize, indent_width: usize) -> Self {
        let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self {
            lines,
            tab_width,
            indent_width,
            insert_spaces: true,
        }
    }

    /// Full buffer contents joined with newlines
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Insert text at a position, returning the position just after it
    ///
    /// The text may contain newlines. An out-of-range position is
    /// clamped to the nearest valid one.
    pub fn insert(&mut self, pos: Position, text: &str) -> Position {
        self.replace(pos, pos, text)
    }

    /// Replace the range `[begin, end)` with text, returning the
    /// position just after the inserted text
    pub fn replace(&mut self, begin: Position, end: Position, text: &str) -> Position {
        let begin = self.clamp(begin);
        let end = self.clamp(end);

        let prefix: String = self.lines[begin.line]
            .chars()
            .take(begin.column)
            .collect();
        let suffix: String = self.lines[end.line].chars().skip(end.column).collect();

        let mut new_lines: Vec<String> = format!("{prefix}{text}").split('\n').map(str::to_string).collect();
        let last_idx = new_lines.len() - 1;
        let after_column = new_lines[last_idx].chars().count();
        new_lines[last_idx].push_str(&suffix);

        self.lines.splice(begin.line..=end.line, new_lines);
        Position::new(begin.line + last_idx, after_column)
    }

    fn clamp(&self, pos: Position) -> Position {
        let line = pos.line.min(self.lines.len() - 1);
        let column = pos.column.min(self.lines[line].chars().count());
        Position::new(line, column)
    }
}

impl TextBuffer for ScratchBuffer {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_text(&self, line: usize) -> &str {
        self.lines.get(line).map_or("", String::as_str)
    }

    fn is_in_string_or_comment(&self, pos: Position) -> bool {
        !CharFilter::is_code_at(self.line_text(pos.line), pos.column)
    }

    fn tab_width(&self) -> usize {
        self.tab_width
    }

    fn indent_width(&self) -> usize {
        self.indent_width
    }

    fn insert_spaces(&self) -> bool {
        self.insert_spaces
    }
}
