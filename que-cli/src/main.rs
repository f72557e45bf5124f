use anyhow::Result;
use clap::Parser;
use log::debug;

mod cli;
mod commands;

use cli::{Cli, Commands, ConfigSubcommands};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref())?;
    debug!("Using config: {:?}", config);

    match cli.command {
        Commands::Run(args) => commands::run_command(&config, args),
        Commands::Check { file } => commands::check_command(&config, &file),
        Commands::Status(args) => commands::status_command(&config, args),
        Commands::Reset(args) => commands::reset_command(&config, args),
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::Show => commands::config_show_command(&config),
            ConfigSubcommands::Init { force } => {
                commands::config_init_command(&config, cli.config.as_deref(), force)
            }
        },
    }
}
