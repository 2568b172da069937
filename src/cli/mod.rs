//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Coupe using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Coupe - Local cocktail image catalog
#[derive(Parser, Debug)]
#[command(name = "coupe")]
#[command(version, about, long_about = None)]
#[command(author = "Coupe Contributors")]
pub struct Cli {
    /// Path to configuration file (defaults apply when it does not exist)
    #[arg(short, long, default_value = "coupe.toml", env = "COUPE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "COUPE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a record
    Add(commands::add::AddArgs),

    /// List every record
    List(commands::list::ListArgs),

    /// Show one record
    Show(commands::show::ShowArgs),

    /// Find records by name or ingredient
    Search(commands::search::SearchArgs),

    /// Change fields of a record
    Update(commands::update::UpdateArgs),

    /// Delete one or more records
    Delete(commands::delete::DeleteArgs),

    /// Remove every record
    Clear(commands::clear::ClearArgs),

    /// Write records to an export document
    Export(commands::export::ExportArgs),

    /// Add the records of an export document
    Import(commands::import::ImportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Commands {
    /// Execute the selected command, returning the process exit code
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        match self {
            Commands::Add(args) => args.execute(config_path).await,
            Commands::List(args) => args.execute(config_path).await,
            Commands::Show(args) => args.execute(config_path).await,
            Commands::Search(args) => args.execute(config_path).await,
            Commands::Update(args) => args.execute(config_path).await,
            Commands::Delete(args) => args.execute(config_path).await,
            Commands::Clear(args) => args.execute(config_path).await,
            Commands::Export(args) => args.execute(config_path).await,
            Commands::Import(args) => args.execute(config_path).await,
            Commands::ValidateConfig(args) => args.execute(config_path).await,
            Commands::Init(args) => args.execute().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RecordId;

    #[test]
    fn test_cli_parse_list() {
        let cli = Cli::parse_from(["coupe", "list"]);
        assert_eq!(cli.config, "coupe.toml");
        assert!(matches!(cli.command, Commands::List(ref args) if !args.json));
    }

    #[test]
    fn test_cli_parse_with_config_and_log_level() {
        let cli = Cli::parse_from(["coupe", "-c", "custom.toml", "--log-level", "debug", "list"]);
        assert_eq!(cli.config, "custom.toml");
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_add_requires_one_image() {
        let ok = Cli::try_parse_from([
            "coupe",
            "add",
            "--name",
            "Mojito",
            "--ingredients",
            "rum, mint",
            "--image-url",
            "https://example.com/m.jpg",
        ]);
        assert!(ok.is_ok());

        let missing = Cli::try_parse_from([
            "coupe",
            "add",
            "--name",
            "Mojito",
            "--ingredients",
            "rum, mint",
        ]);
        assert!(missing.is_err());

        let both = Cli::try_parse_from([
            "coupe",
            "add",
            "--name",
            "Mojito",
            "--ingredients",
            "rum, mint",
            "--image-url",
            "https://example.com/m.jpg",
            "--image-file",
            "m.jpg",
        ]);
        assert!(both.is_err());
    }

    #[test]
    fn test_cli_parse_delete_ids() {
        let cli = Cli::parse_from(["coupe", "delete", "3", "1", "--yes"]);
        match cli.command {
            Commands::Delete(args) => {
                assert_eq!(args.ids, vec![RecordId::new(3), RecordId::new(1)]);
                assert!(args.yes);
            }
            other => panic!("unexpected command {other:?}"),
        }

        assert!(Cli::try_parse_from(["coupe", "delete"]).is_err());
        assert!(Cli::try_parse_from(["coupe", "delete", "abc"]).is_err());
    }

    #[test]
    fn test_cli_parse_export_and_import() {
        let cli = Cli::parse_from(["coupe", "export", "--ids", "1,2", "-o", "out.json"]);
        assert!(matches!(cli.command, Commands::Export(ref args) if args.ids.as_deref() == Some("1,2")));

        let cli = Cli::parse_from(["coupe", "import", "in.json"]);
        assert!(matches!(cli.command, Commands::Import(_)));
    }

    #[test]
    fn test_cli_parse_validate_config_and_init() {
        let cli = Cli::parse_from(["coupe", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));

        let cli = Cli::parse_from(["coupe", "init", "--force"]);
        assert!(matches!(cli.command, Commands::Init(ref args) if args.force));
    }
}
