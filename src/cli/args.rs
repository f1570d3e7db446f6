//! CLI argument definitions.
//!
//! All Clap derive structs for `squaredeal` command-line parsing. Each
//! operation is its own typed subcommand carrying only the fields it
//! needs — there is deliberately no generic option bag.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::range;

// ============================================================================
// Root CLI
// ============================================================================

/// Delayed-disclosure deal commitment tool.
///
/// Manages an SQD/SQK event pair through its lifecycle — draft,
/// publication (the commitment point), disclosure — and drives the
/// external `bigdealx` generator to produce deal files.
#[derive(Parser, Debug)]
#[command(name = "squaredeal", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "SQUAREDEAL_COLOR")]
    pub color: ColorChoice,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands, one per event operation.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new SQD/SQK event pair.
    Create(CreateArgs),

    /// Edit the event name.
    SetName(SetNameArgs),

    /// Edit the delayed-information description.
    SetDi(SetDiArgs),

    /// Append an event phase.
    AddPhase(AddPhaseArgs),

    /// Freeze the event and commit to freshly generated session keys.
    Publish(PublishArgs),

    /// Disclose the delayed-information value.
    SetDv(SetDvArgs),

    /// Generate deal files for selected phases and sessions.
    Generate(GenerateArgs),

    /// Display the event record (never prints key material).
    Show(ShowArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

// ============================================================================
// Shared File Arguments
// ============================================================================

/// The file pair every event operation addresses.
#[derive(Args, Debug)]
pub struct FileArgs {
    /// Path to the SQD public record.
    pub sqd_file: PathBuf,

    /// Path to the SQK key store; deduced from the SQD path when omitted.
    #[arg(long)]
    pub sqk_file: Option<PathBuf>,
}

// ============================================================================
// Event Commands
// ============================================================================

/// Arguments for `create`.
#[derive(Args, Debug)]
pub struct CreateArgs {
    #[command(flatten)]
    pub file: FileArgs,

    /// Event name (description).
    #[arg(long)]
    pub event_name: Option<String>,

    /// Description of the information to be disclosed later.
    #[arg(long)]
    pub delayed_information: Option<String>,

    /// Skip `.bak` backup copies before overwriting.
    #[arg(long)]
    pub no_backup: bool,
}

/// Arguments for `set-name`.
#[derive(Args, Debug)]
pub struct SetNameArgs {
    #[command(flatten)]
    pub file: FileArgs,

    /// New event name.
    pub event_name: String,

    /// Skip `.bak` backup copies before overwriting.
    #[arg(long)]
    pub no_backup: bool,
}

/// Arguments for `set-di`.
#[derive(Args, Debug)]
pub struct SetDiArgs {
    #[command(flatten)]
    pub file: FileArgs,

    /// Description of the delayed information, fixed ahead of time.
    pub delayed_information: String,

    /// Skip `.bak` backup copies before overwriting.
    #[arg(long)]
    pub no_backup: bool,
}

/// Arguments for `add-phase`.
#[derive(Args, Debug)]
pub struct AddPhaseArgs {
    #[command(flatten)]
    pub file: FileArgs,

    /// Number of sessions in the phase.
    #[arg(value_parser = parse_session_count)]
    pub sessions: usize,

    /// Boards per session: a count, ranges like "1-10,11-20,21-30", or
    /// "3x7" which expands to "1-7,8-14,15-21".
    #[arg(value_parser = parse_board_spec)]
    pub boards: String,

    /// Output file prefix; runs of '#' are replaced by the zero-padded
    /// session number.
    pub prefix: String,

    /// Phase description.
    pub description: Option<String>,

    /// Skip `.bak` backup copies before overwriting.
    #[arg(long)]
    pub no_backup: bool,
}

/// Arguments for `publish`.
#[derive(Args, Debug)]
pub struct PublishArgs {
    #[command(flatten)]
    pub file: FileArgs,

    /// Skip `.bak` backup copies before overwriting.
    #[arg(long)]
    pub no_backup: bool,
}

/// Arguments for `set-dv`.
#[derive(Args, Debug)]
pub struct SetDvArgs {
    #[command(flatten)]
    pub file: FileArgs,

    /// The disclosed value of the delayed information.
    pub delayed_value: String,

    /// Skip `.bak` backup copies before overwriting.
    #[arg(long)]
    pub no_backup: bool,
}

// ============================================================================
// Generate Command
// ============================================================================

/// Arguments for `generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub file: FileArgs,

    /// Phase number or range; all phases when empty.
    pub phase: Option<String>,

    /// Session number or range; all sessions when empty.
    pub session: Option<String>,

    /// Generate the reserve board set.
    #[arg(long)]
    pub reserve: bool,

    /// Path to the bigdealx executable.
    #[arg(long, env = "BIGDEALX_PATH")]
    pub bigdealx_path: Option<PathBuf>,

    /// Per-invocation deadline for the generator, in seconds.
    #[arg(long, default_value_t = crate::adapter::DEFAULT_TIMEOUT_SECS)]
    pub adapter_timeout: u64,
}

// ============================================================================
// Show / Completions / Version
// ============================================================================

/// Arguments for `show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub file: FileArgs,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// Value Parsers
// ============================================================================

/// Validates and canonicalizes a board spec at argument-parse time,
/// expanding any `NxM` shorthand.
fn parse_board_spec(raw: &str) -> Result<String, String> {
    range::parse_board_range(raw).map_err(|e| e.to_string())
}

/// Parses a positive session count.
fn parse_session_count(raw: &str) -> Result<usize, String> {
    let count: usize = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if count == 0 {
        return Err("session count must be positive".to_string());
    }
    Ok(count)
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_minimal() {
        let cli = Cli::try_parse_from(["squaredeal", "create", "event.sqd"]);
        assert!(cli.is_ok(), "Failed to parse: {cli:?}");
    }

    #[test]
    fn test_create_with_fields() {
        let cli = Cli::try_parse_from([
            "squaredeal",
            "create",
            "event.sqd",
            "--event-name",
            "Open Pairs",
            "--delayed-information",
            "Hand records",
        ])
        .unwrap();
        let Commands::Create(args) = cli.command else {
            panic!("Expected CreateArgs");
        };
        assert_eq!(args.event_name.as_deref(), Some("Open Pairs"));
        assert_eq!(args.delayed_information.as_deref(), Some("Hand records"));
    }

    #[test]
    fn test_add_phase_expands_shorthand() {
        let cli = Cli::try_parse_from([
            "squaredeal",
            "add-phase",
            "event.sqd",
            "3",
            "3x7",
            "sess#",
        ])
        .unwrap();
        let Commands::AddPhase(args) = cli.command else {
            panic!("Expected AddPhaseArgs");
        };
        assert_eq!(args.sessions, 3);
        assert_eq!(args.boards, "1-7,8-14,15-21");
        assert_eq!(args.prefix, "sess#");
        assert!(args.description.is_none());
    }

    #[test]
    fn test_add_phase_rejects_bad_board_spec() {
        let cli = Cli::try_parse_from([
            "squaredeal",
            "add-phase",
            "event.sqd",
            "3",
            "boards",
            "sess#",
        ]);
        assert!(cli.is_err(), "Expected board spec rejection");
    }

    #[test]
    fn test_add_phase_rejects_zero_sessions() {
        let cli = Cli::try_parse_from([
            "squaredeal",
            "add-phase",
            "event.sqd",
            "0",
            "1-10",
            "sess#",
        ]);
        assert!(cli.is_err(), "Expected session count rejection");
    }

    #[test]
    fn test_generate_selectors_and_reserve() {
        let cli = Cli::try_parse_from([
            "squaredeal",
            "generate",
            "event.sqd",
            "2",
            "1-3",
            "--reserve",
            "--bigdealx-path",
            "/opt/bigdealx",
        ])
        .unwrap();
        let Commands::Generate(args) = cli.command else {
            panic!("Expected GenerateArgs");
        };
        assert_eq!(args.phase.as_deref(), Some("2"));
        assert_eq!(args.session.as_deref(), Some("1-3"));
        assert!(args.reserve);
        assert_eq!(args.bigdealx_path.as_deref(), Some(std::path::Path::new("/opt/bigdealx")));
        assert_eq!(args.adapter_timeout, crate::adapter::DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_sqk_override() {
        let cli = Cli::try_parse_from([
            "squaredeal",
            "show",
            "event.sqd",
            "--sqk-file",
            "elsewhere.sqk",
        ])
        .unwrap();
        let Commands::Show(args) = cli.command else {
            panic!("Expected ShowArgs");
        };
        assert!(args.file.sqk_file.is_some());
    }

    #[test]
    fn test_show_format_json() {
        let cli =
            Cli::try_parse_from(["squaredeal", "show", "event.sqd", "--format", "json"]).unwrap();
        let Commands::Show(args) = cli.command else {
            panic!("Expected ShowArgs");
        };
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_help_output() {
        let result = Cli::try_parse_from(["squaredeal", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_output() {
        let result = Cli::try_parse_from(["squaredeal", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_verbose_count() {
        let cli = Cli::try_parse_from(["squaredeal", "-vvv", "show", "event.sqd"]).unwrap();
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_quiet_flag() {
        let cli = Cli::try_parse_from(["squaredeal", "--quiet", "show", "event.sqd"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn test_color_choices_parse() {
        for variant in ["auto", "always", "never"] {
            let cli = Cli::try_parse_from(["squaredeal", "--color", variant, "show", "e.sqd"]);
            assert!(cli.is_ok(), "Failed to parse color={variant}");
        }
    }

    #[test]
    fn test_completions_shells_parse() {
        for shell in ["bash", "zsh", "fish", "powershell", "elvish"] {
            let cli = Cli::try_parse_from(["squaredeal", "completions", shell]);
            assert!(cli.is_ok(), "Failed to parse shell={shell}");
        }
    }
}
