use anyhow::Result;

use super::commands::Commands;
use super::config::cmd_config;
use super::demo::cmd_demo;
use super::env::CliArgs;
use super::extract::cmd_extract;
use super::runtime::LoadedConfig;

pub async fn dispatch(cli: &CliArgs, loaded: LoadedConfig) -> Result<()> {
    match cli.command.clone() {
        Commands::Extract(args) => cmd_extract(args, &loaded.config, cli.output).await,
        Commands::Demo(args) => cmd_demo(args, loaded.config, cli.output).await,
        Commands::Config(args) => cmd_config(args, &loaded).await,
    }
}
