//! End-to-end driving of the indentation engine

mod replay;

pub use replay::{replay_reader, replay_source};
