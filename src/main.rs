//! rbindent - Keystroke-driven auto-indentation engine for Ruby source
//!
//! The binary is a replay harness: it simulates typing the input
//! through the engine keystroke by keystroke and writes the result.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fs;
use std::io::{self, BufReader, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use rbindent::process::{replay_reader, replay_source};
use rbindent::{parse_args, CliArgs, Config, Result};

fn main() -> Result<()> {
    let args = parse_args();

    let use_stdin =
        args.inputs.is_empty() || (args.inputs.len() == 1 && args.inputs[0].as_os_str() == "-");

    if args.inputs.is_empty() && io::stdin().is_terminal() {
        let mut cmd = rbindent::build_cli();
        cmd.print_help()?;
        return Ok(());
    }

    if use_stdin {
        let config = build_config(&args, None)?;
        return process_stdin(&config);
    }

    let mut failures = 0usize;
    for input in &args.inputs {
        if let Err(e) = process_file(input, &args) {
            eprintln!("Error: {}: {e:#}", input.display());
            failures += 1;
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} file(s) failed");
    }
    Ok(())
}

/// Build the effective config for a path: discovered/explicit file
/// settings with CLI overrides applied on top
fn build_config(args: &CliArgs, path: Option<&Path>) -> Result<Config> {
    let mut config = match &args.config {
        Some(explicit) => Config::from_toml_file(explicit)
            .with_context(|| format!("loading config {}", explicit.display()))?,
        None => Config::discover(path.unwrap_or_else(|| Path::new("."))),
    };

    if let Some(indent) = args.indent {
        config.indent = indent;
    }
    if let Some(tab_width) = args.tab_width {
        config.tab_width = tab_width;
    }
    if args.use_tabs {
        config.use_tabs = true;
    }
    if args.debug {
        config.debug = true;
    }

    if let Some(problem) = config.validate() {
        anyhow::bail!("invalid configuration: {problem}");
    }
    Ok(config)
}

fn process_stdin(config: &Config) -> Result<()> {
    let mut reader = BufReader::new(io::stdin());
    let output = replay_reader(&mut reader, config)?;
    io::stdout().write_all(output.as_bytes())?;
    Ok(())
}

fn process_file(path: &PathBuf, args: &CliArgs) -> Result<()> {
    let config = build_config(args, Some(path))?;
    let source =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    if config.debug {
        eprintln!("rbindent: {} ({} bytes)", path.display(), source.len());
    }

    let output = replay_source(&source, &config);

    if args.diff {
        print_diff(path, &source, &output);
        return Ok(());
    }

    if args.stdout {
        io::stdout().write_all(output.as_bytes())?;
        return Ok(());
    }

    if output != source {
        fs::write(path, &output).with_context(|| format!("writing {}", path.display()))?;
        if !args.silent {
            println!("Reformatted {}", path.display());
        }
    } else if !args.silent {
        println!("Unchanged {}", path.display());
    }
    Ok(())
}

/// Print changed lines in a minimal -/+ form
fn print_diff(path: &Path, before: &str, after: &str) {
    let before_lines: Vec<&str> = before.split('\n').collect();
    let after_lines: Vec<&str> = after.split('\n').collect();
    let mut header_printed = false;

    let count = before_lines.len().max(after_lines.len());
    for i in 0..count {
        let old = before_lines.get(i).copied();
        let new = after_lines.get(i).copied();
        if old == new {
            continue;
        }
        if !header_printed {
            println!("--- {}", path.display());
            header_printed = true;
        }
        if let Some(old) = old {
            println!("-{}:{old}", i + 1);
        }
        if let Some(new) = new {
            println!("+{}:{new}", i + 1);
        }
    }
}
