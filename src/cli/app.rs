use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use super::dispatch::dispatch;
use super::env::CliArgs;
use super::runtime::{init_logging, load_config};

pub async fn run() -> Result<()> {
    let cli = CliArgs::parse();
    init_logging(&cli.log_level, cli.debug)?;

    info!(
        revision = env!("SCRIBEBRIDGE_REVISION"),
        built = env!("SCRIBEBRIDGE_BUILD_DATE"),
        "Starting ScribeBridge v{}",
        env!("CARGO_PKG_VERSION")
    );
    let loaded = load_config(cli.config.as_ref()).await?;

    match dispatch(&cli, loaded).await {
        Ok(()) => Ok(()),
        Err(err) => {
            error!("Command failed: {err:#}");
            Err(err)
        }
    }
}
