use clap::Subcommand;

use super::config::ConfigArgs;
use super::demo::DemoArgs;
use super::extract::ExtractArgs;

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Extract canonical fields from a transcript
    Extract(ExtractArgs),

    /// Run a dictation page and a form page in memory, end to end
    Demo(DemoArgs),

    /// Inspect configuration
    Config(ConfigArgs),
}
