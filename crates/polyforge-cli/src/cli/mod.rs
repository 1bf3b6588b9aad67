//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "polyforge",
    bin_name = "polyforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Multi-service scaffolding from an architecture graph",
    long_about = "Polyforge turns a graph of services (language plus REST, gRPC and \
                  WebSocket configuration) into a project tree with source \
                  scaffolding, Dockerfiles, Kubernetes manifests, devspace config \
                  and CI workflows.",
    after_help = "EXAMPLES:\n\
        \x20 polyforge generate shop.yaml -o ./out\n\
        \x20 polyforge validate shop.json\n\
        \x20 polyforge languages --format json\n\
        \x20 polyforge completions bash > /usr/share/bash-completion/completions/polyforge",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a project from a request file.
    #[command(
        visible_alias = "gen",
        about = "Generate a project from a request file",
        after_help = "EXAMPLES:\n\
            \x20 polyforge generate shop.yaml\n\
            \x20 polyforge generate shop.yaml -o ./out --force\n\
            \x20 polyforge generate shop.yaml --dry-run"
    )]
    Generate(GenerateArgs),

    /// Validate a request without writing anything.
    #[command(
        about = "Validate a request file",
        after_help = "EXAMPLES:\n\
            \x20 polyforge validate shop.yaml"
    )]
    Validate(ValidateArgs),

    /// Print the supported language/protocol/template combinations.
    #[command(
        visible_alias = "ls",
        about = "List supported languages and protocols",
        after_help = "EXAMPLES:\n\
            \x20 polyforge languages\n\
            \x20 polyforge languages --format json"
    )]
    Languages(LanguagesArgs),

    /// Initialise a Polyforge configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 polyforge init           # platform config directory\n\
            \x20 polyforge init --local   # ./polyforge.toml"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 polyforge completions bash > ~/.local/share/bash-completion/completions/polyforge\n\
            \x20 polyforge completions zsh  > ~/.zfunc/_polyforge\n\
            \x20 polyforge completions fish > ~/.config/fish/completions/polyforge.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Polyforge configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 polyforge config get output.directory\n\
            \x20 polyforge config list\n\
            \x20 polyforge config path"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `polyforge generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Request file (`.yaml`, `.yml` or `.json`).
    #[arg(value_name = "REQUEST", help = "Generation request file")]
    pub request: PathBuf,

    /// Directory the project directory is created in.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output root (default: output.directory from config)"
    )]
    pub output: Option<PathBuf>,

    /// Replace an existing project directory (destructive).
    #[arg(long = "force", help = "Remove an existing project directory first")]
    pub force: bool,

    /// Leave the partial project directory in place when generation fails.
    #[arg(long = "keep-partial", help = "Keep partial output on failure")]
    pub keep_partial: bool,

    /// Validate and print the plan without writing any files.
    #[arg(long = "dry-run", help = "Show what would be generated without writing")]
    pub dry_run: bool,
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `polyforge validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Request file (`.yaml`, `.yml` or `.json`).
    #[arg(value_name = "REQUEST", help = "Generation request file")]
    pub request: PathBuf,
}

// ── languages ─────────────────────────────────────────────────────────────────

/// Arguments for `polyforge languages`.
#[derive(Debug, Args)]
pub struct LanguagesArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `languages` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `polyforge init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write `polyforge.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `polyforge completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `polyforge config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `output.directory`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_generate_command() {
        let cli = Cli::parse_from([
            "polyforge",
            "generate",
            "shop.yaml",
            "-o",
            "out",
            "--force",
            "--keep-partial",
        ]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(args.request, PathBuf::from("shop.yaml"));
        assert_eq!(args.output, Some(PathBuf::from("out")));
        assert!(args.force && args.keep_partial && !args.dry_run);
    }

    #[test]
    fn gen_alias() {
        let cli = Cli::parse_from(["polyforge", "gen", "shop.yaml", "--dry-run"]);
        assert!(matches!(cli.command, Commands::Generate(GenerateArgs { dry_run: true, .. })));
    }

    #[test]
    fn languages_defaults_to_table() {
        let cli = Cli::parse_from(["polyforge", "languages"]);
        let Commands::Languages(args) = cli.command else {
            panic!("expected Languages command");
        };
        assert_eq!(args.format, ListFormat::Table);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["polyforge", "validate", "shop.yaml", "-vv", "--no-color"]);
        assert_eq!(cli.global.verbose, 2);
        assert!(cli.global.no_color);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["polyforge", "--quiet", "--verbose", "languages"]);
        assert!(result.is_err());
    }
}
