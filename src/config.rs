//! Configuration management for rbindent.
//!
//! Two layers live here:
//! - [`IndentConfig`]: the per-call snapshot of the host view's
//!   indentation settings, re-read fresh on every formatting call.
//! - [`Config`]: the replay harness configuration, loadable from
//!   `rbindent.toml` files with CLI arguments overriding file settings.
//!
//! Config files are auto-discovered by searching parent directories from
//! the file being processed up to the filesystem root, plus the user's
//! home directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::buffer::TextBuffer;

/// Config file names to search for (in order of priority, later overrides earlier)
const CONFIG_FILE_NAMES: &[&str] = &["rbindent.toml"];

/// Get the user's home directory
fn dirs_home() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    // Fallback for Windows
    if let Ok(userprofile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }
    None
}

/// Snapshot of the view's indentation settings for one formatting call
///
/// Supplied fresh per call from the live buffer; never cached by the
/// core. `indent_width` falls back to `tab_width` when the view reports
/// it as unset (zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentConfig {
    /// Visual width of a tab stop
    pub tab_width: usize,
    /// Columns added per indent level
    pub indent_width: usize,
    /// Whether indentation is written with tabs instead of spaces
    pub use_tabs: bool,
}

impl IndentConfig {
    /// Read the current settings out of the buffer collaborator
    #[must_use]
    pub fn from_buffer(buf: &impl TextBuffer) -> Self {
        let tab_width = buf.tab_width().max(1);
        let indent_width = match buf.indent_width() {
            0 => tab_width,
            w => w,
        };
        Self {
            tab_width,
            indent_width,
            use_tabs: !buf.insert_spaces(),
        }
    }

    /// One indent level as literal text
    ///
    /// Spaces: `indent_width` space characters. Tabs: enough tabs to
    /// cover `indent_width` visual columns, at least one.
    #[must_use]
    pub fn indent_unit(&self) -> String {
        if self.use_tabs {
            "\t".repeat((self.indent_width / self.tab_width).max(1))
        } else {
            " ".repeat(self.indent_width)
        }
    }
}

// Serde default functions
fn default_indent() -> usize {
    2
}
fn default_tab_width() -> usize {
    8
}

/// Main configuration struct for the replay harness
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Number of columns per indent level (default: 2)
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Visual width of a tab stop (default: 8)
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,

    /// Indent with tabs instead of spaces (default: false)
    #[serde(default)]
    pub use_tabs: bool,

    /// Enable debug output (default: false)
    #[serde(default)]
    pub debug: bool,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
struct PartialConfig {
    pub indent: Option<usize>,
    pub tab_width: Option<usize>,
    pub use_tabs: Option<bool>,
    pub debug: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            indent: 2,
            tab_width: 8,
            use_tabs: false,
            debug: false,
        }
    }
}

impl Config {
    /// Maximum reasonable indent size
    const MAX_INDENT: usize = 20;
    /// Maximum reasonable tab width
    const MAX_TAB_WIDTH: usize = 16;

    /// Validate configuration values are within reasonable bounds
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.indent == 0 {
            return Some("indent must be at least 1".to_string());
        }
        if self.indent > Self::MAX_INDENT {
            return Some(format!(
                "indent {} exceeds maximum of {}",
                self.indent,
                Self::MAX_INDENT
            ));
        }
        if self.tab_width == 0 {
            return Some("tab_width must be at least 1".to_string());
        }
        if self.tab_width > Self::MAX_TAB_WIDTH {
            return Some(format!(
                "tab_width {} exceeds maximum of {}",
                self.tab_width,
                Self::MAX_TAB_WIDTH
            ));
        }
        None
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let partial: PartialConfig = toml::from_str(&contents)?;
        let mut config = Self::default();
        config.apply_partial(&partial);
        Ok(config)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: &PartialConfig) {
        if let Some(v) = partial.indent {
            self.indent = v;
        }
        if let Some(v) = partial.tab_width {
            self.tab_width = v;
        }
        if let Some(v) = partial.use_tabs {
            self.use_tabs = v;
        }
        if let Some(v) = partial.debug {
            self.debug = v;
        }
    }

    /// Discover config files from parent directories of a given path
    ///
    /// Searches from the file's directory up to the root, then adds home
    /// directory config. Returns config file paths in order of priority
    /// (least specific first).
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        // Home directory config has the lowest priority
        if let Some(home) = dirs_home() {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path.to_path_buf())
        } else {
            std::env::current_dir().ok()
        };

        if let Some(dir) = start_dir {
            let mut ancestors: Vec<PathBuf> = dir.ancestors().map(Path::to_path_buf).collect();
            // Root first, so more specific configs override less specific ones
            ancestors.reverse();

            for ancestor in ancestors {
                for config_name in CONFIG_FILE_NAMES {
                    let config_path = ancestor.join(config_name);
                    if config_path.is_file() && !config_files.contains(&config_path) {
                        config_files.push(config_path);
                    }
                }
            }
        }

        config_files
    }

    /// Build a config by merging discovered files for `start_path`
    ///
    /// Unreadable or unparsable files produce a warning and are skipped.
    #[must_use]
    pub fn discover(start_path: &Path) -> Self {
        let mut config = Self::default();
        for path in Self::discover_config_files(start_path) {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str::<PartialConfig>(&contents) {
                    Ok(partial) => config.apply_partial(&partial),
                    Err(e) => eprintln!("Warning: failed to parse {}: {e}", path.display()),
                },
                Err(e) => eprintln!("Warning: failed to read {}: {e}", path.display()),
            }
        }
        config
    }

    /// The per-call indentation snapshot corresponding to this config
    #[must_use]
    pub fn indent_config(&self) -> IndentConfig {
        IndentConfig {
            tab_width: self.tab_width.max(1),
            indent_width: if self.indent == 0 {
                self.tab_width.max(1)
            } else {
                self.indent
            },
            use_tabs: self.use_tabs,
        }
    }
}
