//! Flags shared by every `polyforge` subcommand.
//!
//! Two channels are affected by these flags:
//!
//! | Flag              | stdout (results)                     | stderr (log events)              |
//! |-------------------|--------------------------------------|----------------------------------|
//! | `-v` / `-vv`      | unchanged                            | INFO / DEBUG per node and copier |
//! | `-q`              | human lines dropped, JSON still sent | errors only                      |
//! | `--no-color`      | no ANSI                              | no ANSI                          |
//! | `--output-format json` | one JSON document, nothing else | JSON lines                   |
//!
//! `-c` replaces both implicit config files (platform and `./polyforge.toml`).

use std::path::PathBuf;

use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Log more (-v per node, -vv per template, -vvv everything)",
        long_help = "Raise the log level on stderr:
    (none)  - warnings and errors
    -v      - one line per generated node and the run id
    -vv     - template resolution, copiers, files written
    -vvv    - trace"
    )]
    pub verbose: u8,

    /// Also keeps a JSON document on stdout, so `-q --output-format json`
    /// is a clean pipeline.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Only print errors and machine output"
    )]
    pub quiet: bool,

    /// `NO_COLOR` takes boolish values: `1`, `true`, `yes`, `on` or their
    /// negations.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::BoolishValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Config file to use instead of the platform and ./polyforge.toml files"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Result format on stdout; json also switches logs to JSON lines"
    )]
    pub output_format: OutputFormat,
}

/// How results are rendered on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` when piped.
    #[default]
    Auto,
    /// Colored, with status symbols.
    Human,
    /// No ANSI codes.
    Plain,
    /// Generation report, plan, validation result or support matrix as JSON.
    Json,
}
