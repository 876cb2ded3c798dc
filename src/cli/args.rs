//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tunnelscope - interactive VPN tunnel visualizer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Settings file to load and save (defaults to ~/.config/tunnelscope/settings.json)
    #[arg(long, global = true)]
    pub settings: Option<String>,

    /// Seed for the telemetry noise generator
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log file path
    #[arg(long, default_value = crate::constants::DEFAULT_LOG_FILE, global = true)]
    pub log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the config snippet for the saved selection
    Snippet,
    /// Import a settings record (JSON), keeping every well-typed field
    Import {
        /// Path to the settings file
        file: String,
    },
    /// Delete the saved settings
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["tunnelscope"]).unwrap();
        assert!(args.command.is_none());
        assert!(args.seed.is_none());
        assert_eq!(args.verbose, 0);
        assert_eq!(args.log_file, PathBuf::from("/tmp/tunnelscope.log"));
    }

    #[test]
    fn test_flags_and_subcommands() {
        let args = Args::try_parse_from([
            "tunnelscope",
            "--seed",
            "7",
            "-vv",
            "import",
            "saved.json",
            "--settings",
            "/tmp/x.json",
        ])
        .unwrap();
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.verbose, 2);
        assert_eq!(args.settings.as_deref(), Some("/tmp/x.json"));
        assert!(matches!(args.command, Some(Commands::Import { ref file }) if file == "saved.json"));
    }

    #[test]
    fn test_rejects_bad_seed() {
        assert!(Args::try_parse_from(["tunnelscope", "--seed", "abc"]).is_err());
    }
}
