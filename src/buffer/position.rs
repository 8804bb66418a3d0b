/// `Position` - immutable (line, column) reference into a buffer
///
/// Columns are character offsets within the line, not bytes and not
/// display columns. Positions are plain values: moving one produces a
/// new value rather than mutating shared state, which keeps backward
/// and forward walks from aliasing each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Zero-based line index
    pub line: usize,
    /// Zero-based character offset within the line
    pub column: usize,
}

impl Position {
    /// Create a position at the given line and column
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The same line at column zero
    #[must_use]
    pub fn start_of_line(self) -> Self {
        Self {
            line: self.line,
            column: 0,
        }
    }

    /// A copy moved left by `n` columns, saturating at column zero
    #[must_use]
    pub fn retreat(self, n: usize) -> Self {
        Self {
            line: self.line,
            column: self.column.saturating_sub(n),
        }
    }

    /// A copy moved right by `n` columns
    #[must_use]
    pub fn advance(self, n: usize) -> Self {
        Self {
            line: self.line,
            column: self.column + n,
        }
    }
}
