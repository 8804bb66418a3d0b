//! Text buffer boundary between the indentation core and the host editor.
//!
//! The core never mutates text. It reads the pre-edit buffer state through
//! the [`TextBuffer`] trait within a single formatting call and returns a
//! value describing the edit; the host applies the mutation afterwards.

mod char_filter;
mod position;
mod scratch;

pub use char_filter::{CharFilter, StringDelimiter};
pub use position::Position;
pub use scratch::ScratchBuffer;

/// Read-only view of the host editor's buffer and indentation settings.
///
/// All queries are total: an out-of-range line or position yields the
/// empty/false default rather than an error. Columns are character
/// offsets; [`TextBuffer::visual_column`] converts them to tab-expanded
/// display columns.
pub trait TextBuffer {
    /// Number of lines in the buffer.
    fn line_count(&self) -> usize;

    /// Raw (untrimmed) text of a line, without its trailing newline.
    /// Returns `""` for an out-of-range line.
    fn line_text(&self, line: usize) -> &str;

    /// Whether the position lies inside a string or comment lexical
    /// context. Positions past the end of a line are not special.
    fn is_in_string_or_comment(&self, pos: Position) -> bool;

    /// Current tab width of the view.
    fn tab_width(&self) -> usize;

    /// Current indent width of the view; `0` means "unset, use tab width".
    fn indent_width(&self) -> usize;

    /// Whether the view inserts spaces instead of tabs.
    fn insert_spaces(&self) -> bool;

    /// Character at the position, or `None` past the end of its line.
    fn char_at(&self, pos: Position) -> Option<char> {
        self.line_text(pos.line).chars().nth(pos.column)
    }

    /// Tab-expanded display column of a position.
    ///
    /// Tabs advance to the next multiple of the tab width; every other
    /// character counts as one column.
    fn visual_column(&self, pos: Position) -> usize {
        let tab = self.tab_width().max(1);
        let mut col = 0;
        for ch in self.line_text(pos.line).chars().take(pos.column) {
            if ch == '\t' {
                col = (col / tab + 1) * tab;
            } else {
                col += 1;
            }
        }
        col
    }
}
