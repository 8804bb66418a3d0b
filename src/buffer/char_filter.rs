/// `CharFilter` - Iterator that filters out strings and comments
///
/// Wraps a line's characters and maintains state about whether we are
/// inside string literals, comments, or string interpolation. Used to
/// make sure keyword matching only ever sees actual Ruby code, not
/// string contents or comment text.
use std::iter::Peekable;
use std::str::Chars;

/// Type of string delimiter we're currently inside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringDelimiter {
    #[default]
    None,
    Single, // '...'
    Double, // "..."
}

/// Iterator adapter that filters out strings and comments
///
/// Yields (column, character) pairs for only the actual Ruby code,
/// skipping over string contents and comments. Columns are character
/// offsets within the line.
pub struct CharFilter<'a> {
    chars: Peekable<Chars<'a>>,
    column: usize,
    state: FilterState,
    filter_comments: bool,
    filter_strings: bool,
}

#[derive(Debug, Default)]
struct FilterState {
    instring: StringDelimiter,
    incomment: bool,
    escaped: bool,
    /// When inside `#{...}` interpolation: the string state to restore
    /// and the current brace nesting depth
    interp_return: Option<StringDelimiter>,
    interp_depth: usize,
}

impl<'a> CharFilter<'a> {
    /// Create a new `CharFilter` over a single line
    ///
    /// # Arguments
    /// * `content` - The line to iterate over (no trailing newline)
    /// * `filter_comments` - Whether to filter out comments (starting with #)
    /// * `filter_strings` - Whether to filter out string contents
    #[must_use]
    pub fn new(content: &'a str, filter_comments: bool, filter_strings: bool) -> Self {
        Self {
            chars: content.chars().peekable(),
            column: 0,
            state: FilterState::default(),
            filter_comments,
            filter_strings,
        }
    }

    /// Check if we're currently inside a string
    #[must_use]
    pub fn instring(&self) -> bool {
        self.state.instring != StringDelimiter::None
    }

    /// Get the filtered content as a string
    pub fn filter_all(&mut self) -> String {
        let mut result = String::with_capacity(self.chars.size_hint().0);
        for (_, c) in self.by_ref() {
            result.push(c);
        }
        result
    }

    /// Whether the character at `column` is code (not string or comment)
    ///
    /// Positions past the end of the line count as code.
    #[must_use]
    pub fn is_code_at(content: &str, column: usize) -> bool {
        if column >= content.chars().count() {
            return true;
        }
        CharFilter::new(content, true, true).any(|(col, _)| col == column)
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        let c = self.chars.next()?;
        let col = self.column;
        self.column += 1;
        Some((col, c))
    }
}

impl Iterator for CharFilter<'_> {
    type Item = (usize, char);

    fn next(&mut self) -> Option<Self::Item> {
        let (col, c) = self.bump()?;

        // Comments run to end of line; nothing un-comments
        if self.state.incomment {
            return if self.filter_comments {
                self.next()
            } else {
                Some((col, c))
            };
        }

        // Inside string interpolation: code context, track brace depth
        if let Some(restore) = self.state.interp_return {
            match c {
                '{' => self.state.interp_depth += 1,
                '}' => {
                    self.state.interp_depth -= 1;
                    if self.state.interp_depth == 0 {
                        // Back into the enclosing string
                        self.state.instring = restore;
                        self.state.interp_return = None;
                        return if self.filter_strings {
                            self.next()
                        } else {
                            Some((col, c))
                        };
                    }
                }
                _ => {}
            }
            return Some((col, c));
        }

        if self.state.instring != StringDelimiter::None {
            if self.state.escaped {
                self.state.escaped = false;
            } else if c == '\\' {
                self.state.escaped = true;
            } else if (c == '\'' && self.state.instring == StringDelimiter::Single)
                || (c == '"' && self.state.instring == StringDelimiter::Double)
            {
                self.state.instring = StringDelimiter::None;
            } else if c == '#'
                && self.state.instring == StringDelimiter::Double
                && self.chars.peek() == Some(&'{')
            {
                // Interpolation re-enters code context
                self.state.interp_return = Some(self.state.instring);
                self.state.interp_depth = 1;
                self.state.instring = StringDelimiter::None;
                self.bump(); // consume the {
                return if self.filter_strings {
                    self.next()
                } else {
                    Some((col, c))
                };
            }
            return if self.filter_strings {
                self.next()
            } else {
                Some((col, c))
            };
        }

        // Code context: check for string or comment start
        match c {
            '\'' => {
                self.state.instring = StringDelimiter::Single;
                if self.filter_strings {
                    return self.next();
                }
            }
            '"' => {
                self.state.instring = StringDelimiter::Double;
                if self.filter_strings {
                    return self.next();
                }
            }
            '#' => {
                self.state.incomment = true;
                if self.filter_comments {
                    return self.next();
                }
            }
            _ => {}
        }

        Some((col, c))
    }
}
