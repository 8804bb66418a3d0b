//! Error types and result aliases for rbindent.
//!
//! This module defines the error handling infrastructure:
//! - [`Result<T>`]: Type alias for `anyhow::Result<T>` used throughout the crate
//!
//! The indentation core itself is total and never fails; only the
//! configuration and file I/O surface returns [`Result`].

use anyhow::Result as AnyhowResult;

pub type Result<T> = AnyhowResult<T>;
