pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::SourceType;

#[derive(Parser)]
#[command(name = "hookline")]
#[command(about = "A terminal dashboard for scraped content and marketing hooks", long_about = None)]
pub struct Cli {
    /// Path to a config file (default: ~/.config/hookline/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the TUI (default)
    Tui,
    /// List content items, newest first
    List {
        /// Only show saved items
        #[arg(long)]
        saved: bool,

        /// Case-insensitive match on title or excerpt
        #[arg(short, long)]
        search: Option<String>,

        /// Only show one source
        #[arg(long, value_enum)]
        source: Option<SourceArg>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show dashboard totals
    Stats,
    /// Run a scrape and print the resulting feed
    Scrape {
        /// Import items from a JSON file instead of the built-in batch
        #[arg(long)]
        from: Option<PathBuf>,
    },
    /// Generate hooks for one or more items
    Hooks {
        /// Item ids
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    Reddit,
    Newsletter,
}

impl From<SourceArg> for SourceType {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Reddit => SourceType::Reddit,
            SourceArg::Newsletter => SourceType::Newsletter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["hookline"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_list_flags() {
        let cli = Cli::try_parse_from([
            "hookline", "list", "--saved", "--search", "ai", "--source", "newsletter", "--json",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::List {
                saved,
                search,
                source,
                json,
            }) => {
                assert!(saved);
                assert_eq!(search.as_deref(), Some("ai"));
                assert_eq!(source, Some(SourceArg::Newsletter));
                assert!(json);
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["hookline", "stats", "--config", "/tmp/h.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/h.toml")));
    }

    #[test]
    fn test_hooks_requires_an_id() {
        assert!(Cli::try_parse_from(["hookline", "hooks"]).is_err());
        let cli = Cli::try_parse_from(["hookline", "hooks", "1", "2"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Hooks { ids }) if ids == ["1", "2"]));
    }
}
