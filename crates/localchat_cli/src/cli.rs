//! CLI argument definitions using clap derive macros.

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Chat with a locally hosted language model
#[derive(Parser)]
#[command(name = "localchat", about, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output (gateway status and raw bodies on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(flatten)]
    pub backend: BackendArgs,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal output for humans
    #[default]
    Text,
    /// Structured JSON for machine consumption
    Json,
}

/// Overrides for the gateway configuration. Unset flags fall back to
/// LOCALCHAT_* environment variables, then built-in defaults.
#[derive(Args, Debug, Default, Clone)]
pub struct BackendArgs {
    /// Generate endpoint URL (e.g. http://localhost:11434/api/generate)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Model identifier sent to the backend
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Number of previous exchanges included as context
    #[arg(long, global = true)]
    pub max_pairs: Option<usize>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start an interactive chat (type /clear to reset, /exit to quit)
    Chat,
    /// Send a single message and print the reply
    Ask {
        /// Message text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Show the effective gateway configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask_with_overrides() {
        let cli = Cli::parse_from([
            "localchat",
            "ask",
            "what",
            "is",
            "rust?",
            "--model",
            "llama3.2",
            "--timeout-ms",
            "2000",
        ]);
        match cli.command {
            Command::Ask { text } => assert_eq!(text.join(" "), "what is rust?"),
            _ => panic!("expected ask"),
        }
        assert_eq!(cli.backend.model.as_deref(), Some("llama3.2"));
        assert_eq!(cli.backend.timeout_ms, Some(2000));
        assert!(cli.backend.url.is_none());
    }

    #[test]
    fn test_parse_global_flags_before_subcommand() {
        let cli = Cli::parse_from(["localchat", "-o", "json", "--max-pairs", "3", "chat"]);
        assert!(matches!(cli.command, Command::Chat));
        assert!(matches!(cli.output, OutputFormat::Json));
        assert_eq!(cli.backend.max_pairs, Some(3));
    }

    #[test]
    fn test_ask_requires_text() {
        assert!(Cli::try_parse_from(["localchat", "ask"]).is_err());
    }
}
