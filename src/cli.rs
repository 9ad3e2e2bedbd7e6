//! CLI definitions for AutoTap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// AutoTap CLI.
#[derive(Parser)]
#[command(name = "autotap")]
#[command(about = "Foreground app funnel automation over a UI tree")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.autotap/config.toml, else built-in defaults)
    #[arg(short, long, env = "AUTOTAP_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the workflow until it completes, runs out of retries, or Ctrl-C
    Run {
        /// Seed for the slider gesture randomization
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Classify the current foreground screen
    Classify,

    /// Find nodes in the current tree
    Query {
        /// Selector such as `TextView[text='立即提交'][clickable='true']`
        selector: String,

        /// Treat the expression as a class path (`//Button`, `LinearLayout/TextView`)
        #[arg(long)]
        xpath: bool,
    },

    /// Print the current foreground tree
    Dump {
        /// Print JSON instead of the indented outline
        #[arg(long)]
        json: bool,
    },

    /// Validate the configuration and print the effective values
    CheckConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_with_seed() {
        let cli = Cli::try_parse_from(["autotap", "-c", "my.toml", "run", "--seed", "42"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("my.toml")));
        assert!(matches!(cli.command, Commands::Run { seed: Some(42) }));
    }

    #[test]
    fn test_parse_query() {
        let cli = Cli::try_parse_from(["autotap", "query", "LinearLayout/TextView", "--xpath"]).unwrap();
        match cli.command {
            Commands::Query { selector, xpath } => {
                assert_eq!(selector, "LinearLayout/TextView");
                assert!(xpath);
            }
            _ => panic!("expected query"),
        }
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["autotap", "dump", "--json", "--config", "a.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("a.toml")));
        assert!(matches!(cli.command, Commands::Dump { json: true }));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["autotap"]).is_err());
    }
}
