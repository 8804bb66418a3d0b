//! Per-trigger indentation formatting
//!
//! [`inspect`] holds the pure line queries, [`policy`] turns a trigger
//! plus cursor context into a concrete whitespace edit, and [`trigger`]
//! is the dispatch surface the host editor wires its key events to.

pub mod inspect;
pub mod policy;
pub mod trigger;

pub use policy::EditResult;
pub use trigger::{KeyEvent, RubyIndenter, TriggerContext};
