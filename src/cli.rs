//! Command-line interface for rbindent.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

/// CLI arguments parsed from command line
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Files to replay through the engine (empty or "-" means stdin)
    pub inputs: Vec<PathBuf>,

    /// Number of columns per indent level
    pub indent: Option<usize>,

    /// Visual width of a tab stop
    pub tab_width: Option<usize>,

    /// Indent with tabs instead of spaces
    pub use_tabs: bool,

    /// Output to stdout instead of in-place
    pub stdout: bool,

    /// Show diff without modifying files
    pub diff: bool,

    /// Config file path (overrides auto-discovery)
    pub config: Option<PathBuf>,

    /// Silent mode (no per-file messages)
    pub silent: bool,

    /// Enable debug output
    pub debug: bool,
}

/// Build the clap command definition
#[must_use]
pub fn build_cli() -> Command {
    Command::new("rbindent")
        .about("Keystroke-driven auto-indentation engine for Ruby source")
        .arg(
            Arg::new("inputs")
                .help("Files to process (use '-' or omit for stdin)")
                .num_args(0..)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("indent")
                .short('i')
                .long("indent")
                .help("Columns per indent level")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("tab-width")
                .short('t')
                .long("tab-width")
                .help("Visual width of a tab stop")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("use-tabs")
                .long("use-tabs")
                .help("Indent with tabs instead of spaces")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stdout")
                .short('s')
                .long("stdout")
                .help("Write result to stdout instead of in-place")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("diff")
                .short('d')
                .long("diff")
                .help("Show changed lines without modifying files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Config file path (overrides auto-discovery)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("silent")
                .short('S')
                .long("silent")
                .help("Silent mode")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .short('D')
                .long("debug")
                .help("Enable debug output")
                .action(ArgAction::SetTrue),
        )
}

/// Parse CLI arguments from the process environment
#[must_use]
pub fn parse_args() -> CliArgs {
    parse_args_from(std::env::args())
}

/// Parse CLI arguments from an explicit iterator (used by tests)
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = build_cli().get_matches_from(args);

    CliArgs {
        inputs: matches
            .get_many::<PathBuf>("inputs")
            .map(|v| v.cloned().collect())
            .unwrap_or_default(),
        indent: matches.get_one::<usize>("indent").copied(),
        tab_width: matches.get_one::<usize>("tab-width").copied(),
        use_tabs: matches.get_flag("use-tabs"),
        stdout: matches.get_flag("stdout"),
        diff: matches.get_flag("diff"),
        config: matches.get_one::<PathBuf>("config").cloned(),
        silent: matches.get_flag("silent"),
        debug: matches.get_flag("debug"),
    }
}
