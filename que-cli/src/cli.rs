use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "que")]
#[command(about = "Run JSON questionnaires in the terminal, one question at a time")]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to the per-user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Answer a questionnaire
    Run(RunArgs),
    /// Validate a questionnaire file without running it
    Check {
        /// Questionnaire file (JSON array of question objects)
        file: PathBuf,
    },
    /// Show whether the questionnaire was completed
    Status(PreferencesArgs),
    /// Clear the completion flag
    Reset(PreferencesArgs),
    /// Configuration management
    Config(ConfigCommands),
}

#[derive(Args)]
pub struct ConfigCommands {
    #[command(subcommand)]
    pub command: ConfigSubcommands,
}

#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Show the current configuration
    Show,
    /// Write the current configuration to the config file
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Args)]
pub struct RunArgs {
    /// Questionnaire file (JSON array of question objects)
    pub file: PathBuf,

    /// Write answers to this file instead of the configured directory
    #[arg(short, long)]
    pub answers: Option<PathBuf>,

    #[command(flatten)]
    pub preferences: PreferencesArgs,

    /// Run even if the questionnaire was already completed
    #[arg(short, long)]
    pub force: bool,

    /// Disable colors
    #[arg(long)]
    pub plain: bool,
}

#[derive(Args)]
pub struct PreferencesArgs {
    /// Preferences file holding the completion flag
    #[arg(short, long)]
    pub preferences: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_run_with_flags() {
        let cli = Cli::parse_from([
            "que",
            "run",
            "survey.json",
            "--answers",
            "out.json",
            "--force",
            "--plain",
            "-p",
            "prefs.toml",
        ]);

        let Commands::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.file, PathBuf::from("survey.json"));
        assert_eq!(args.answers, Some(PathBuf::from("out.json")));
        assert_eq!(args.preferences.preferences, Some(PathBuf::from("prefs.toml")));
        assert!(args.force);
        assert!(args.plain);
    }

    #[test]
    fn parse_config_init() {
        let cli = Cli::parse_from(["que", "--config", "que.toml", "config", "init", "--force"]);
        assert_eq!(cli.config, Some(PathBuf::from("que.toml")));
        let Commands::Config(config) = cli.command else {
            panic!("expected config command");
        };
        assert!(matches!(config.command, ConfigSubcommands::Init { force: true }));
    }

    #[test]
    fn parse_status_defaults() {
        let cli = Cli::parse_from(["que", "status"]);
        assert!(cli.config.is_none());
        assert!(matches!(
            cli.command,
            Commands::Status(PreferencesArgs { preferences: None })
        ));
    }
}
