use anyhow::Result;
use clap::{Args, Subcommand};

use super::runtime::LoadedConfig;

#[derive(Args, Clone, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Clone, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,
}

pub async fn cmd_config(args: ConfigArgs, loaded: &LoadedConfig) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            let origin = if loaded.from_file {
                loaded.path.display().to_string()
            } else {
                format!("defaults, {} not found", loaded.path.display())
            };
            println!("# Effective configuration ({origin})");
            print!("{}", loaded.config.to_yaml()?);
        }
    }
    Ok(())
}
