//! rbindent - Keystroke-driven auto-indentation engine for Ruby source
//!
//! Decides, on specific edit triggers (Enter, or the final character of a
//! just-completed keyword such as `end` or `else`), how much leading
//! whitespace to insert or remove so code stays consistently indented.
//! The host editor owns the buffer; this crate only computes edits.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::struct_excessive_bools)]

pub mod buffer;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod process;
pub mod scope;

// Re-export commonly used types
pub use buffer::{Position, ScratchBuffer, TextBuffer};
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::{Config, IndentConfig};
pub use error::Result;
pub use format::{EditResult, KeyEvent, RubyIndenter, TriggerContext};
