/// Trigger and dispatch layer - the host editor boundary
///
/// The host wires exactly two entry points to its key-event system:
/// [`RubyIndenter::is_trigger`] to ask whether a key deserves a
/// formatting pass, and [`RubyIndenter::format`] to compute the edit.
/// The indentation settings are pulled fresh from the buffer on every
/// call; nothing is cached between keystrokes.
use crate::buffer::{Position, TextBuffer};
use crate::config::IndentConfig;
use crate::format::policy::{self, EditResult};

/// A key event as the host reports it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// Return / keypad Enter
    Enter,
    /// A typed character
    Char(char),
}

/// Cursor context for one formatting call
///
/// `begin..end` is the buffer range the host will replace with the
/// computed text; the policy may widen `begin` (to the start of the
/// line) when realigning leading whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerContext {
    /// Start of the replace range (the cursor on entry)
    pub begin: Position,
    /// End of the replace range (the cursor on entry)
    pub end: Position,
    /// The key event that fired
    pub key: KeyEvent,
}

impl TriggerContext {
    /// Context for a plain insertion point
    #[must_use]
    pub fn at(cursor: Position, key: KeyEvent) -> Self {
        Self {
            begin: cursor,
            end: cursor,
            key,
        }
    }
}

/// The indentation engine's host-facing surface
///
/// Stateless: all inputs arrive per call and all outputs are values,
/// so one instance can serve any number of buffers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RubyIndenter;

impl RubyIndenter {
    /// Create an indenter
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Whether a key event should run the engine at all.
    ///
    /// Enter always qualifies. The characters are the last-character
    /// heuristics for just-completed keywords: `d` for `end`, `e` for
    /// else/rescue/ensure, `f` for elsif, `n` for when. Seeing only the
    /// final character means identifiers ending the same way also fire;
    /// the first-token checks in the policy are the guard against that.
    #[must_use]
    pub fn is_trigger(&self, key: KeyEvent) -> bool {
        matches!(key, KeyEvent::Enter | KeyEvent::Char('d' | 'e' | 'f' | 'n'))
    }

    /// Compute the edit for a qualifying key event.
    ///
    /// Reads everything it needs from the pre-mutation buffer within
    /// this single call; the host applies the returned replacement to
    /// `ctx.begin..ctx.end` afterwards. A non-trigger key, or any
    /// guard or resolver failure, yields the empty result.
    #[must_use]
    pub fn format(&self, buf: &impl TextBuffer, ctx: &mut TriggerContext) -> EditResult {
        let cfg = IndentConfig::from_buffer(buf);
        match ctx.key {
            KeyEvent::Enter => policy::indent_new_line(buf, &cfg, ctx.begin),
            KeyEvent::Char('d') => policy::realign_closing_keyword(buf, ctx),
            KeyEvent::Char(c @ ('e' | 'f' | 'n')) => policy::realign_mid_scope(buf, ctx, c),
            KeyEvent::Char(_) => EditResult::none(),
        }
    }
}
