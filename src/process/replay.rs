/// Keystroke replay harness
///
/// Simulates typing a Ruby source into a [`ScratchBuffer`] one key at a
/// time, running every qualifying key through the engine and applying
/// the resulting edits, exactly as a host editor would. Existing
/// leading whitespace is dropped from the input lines; the indentation
/// in the output is whatever the engine produced.
use std::io::BufRead;

use crate::buffer::{Position, ScratchBuffer, TextBuffer};
use crate::config::Config;
use crate::error::Result;
use crate::format::{EditResult, KeyEvent, RubyIndenter, TriggerContext};

/// Replay a source string through the engine, returning the typed-out
/// buffer contents
#[must_use]
pub fn replay_source(source: &str, config: &Config) -> String {
    let indenter = RubyIndenter::new();
    let mut buf = ScratchBuffer::new(config.tab_width, config.indent, !config.use_tabs);
    let mut cursor = Position::new(0, 0);

    let mut lines = source.split('\n').peekable();
    while let Some(line) = lines.next() {
        for c in line.trim().chars() {
            cursor = buf.insert(cursor, &c.to_string());
            if indenter.is_trigger(KeyEvent::Char(c)) {
                let mut ctx = TriggerContext::at(cursor, KeyEvent::Char(c));
                let result = indenter.format(&buf, &mut ctx);
                cursor = apply(&mut buf, &ctx, &result, cursor);
            }
        }
        if lines.peek().is_some() {
            cursor = buf.insert(cursor, "\n");
            let mut ctx = TriggerContext::at(cursor, KeyEvent::Enter);
            let result = indenter.format(&buf, &mut ctx);
            cursor = apply(&mut buf, &ctx, &result, cursor);
        }
    }

    buf.text()
}

/// Replay from a reader (file or stdin)
pub fn replay_reader(reader: &mut impl BufRead, config: &Config) -> Result<String> {
    let mut source = String::new();
    reader.read_to_string(&mut source)?;
    Ok(replay_source(&source, config))
}

/// Apply one computed edit the way a host editor would: replace the
/// context range, then honor the cursor offset
fn apply(
    buf: &mut ScratchBuffer,
    ctx: &TriggerContext,
    result: &EditResult,
    cursor: Position,
) -> Position {
    let Some(text) = result.replacement.as_deref() else {
        return cursor;
    };
    let mut after = buf.replace(ctx.begin, ctx.end, text);
    if let Some(offset) = result.cursor_offset {
        after = retreat_chars(buf, after, offset.unsigned_abs() as usize);
    }
    after
}

/// Move a position backward by `n` characters, newlines included
fn retreat_chars(buf: &ScratchBuffer, pos: Position, mut n: usize) -> Position {
    let mut pos = pos;
    while n > 0 {
        if pos.column >= n {
            return Position::new(pos.line, pos.column - n);
        }
        if pos.line == 0 {
            return pos.start_of_line();
        }
        n -= pos.column + 1; // the newline counts as one
        pos = Position::new(pos.line - 1, buf.line_text(pos.line - 1).chars().count());
    }
    pos
}
