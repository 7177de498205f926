use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use tokio::io::AsyncReadExt;

use field_extractor::{Dialect, FieldExtractor};

use super::output::{emit_structured, OutputFormat};
use crate::config::BridgeConfig;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DialectArg {
    Line,
    Prose,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Line => Dialect::Line,
            DialectArg::Prose => Dialect::Prose,
        }
    }
}

#[derive(Args, Clone, Debug)]
pub struct ExtractArgs {
    /// Transcript file; reads stdin when omitted
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Boundary dialect; defaults to the configured dictation dialect
    #[arg(long, value_enum)]
    pub dialect: Option<DialectArg>,
}

pub async fn cmd_extract(args: ExtractArgs, config: &BridgeConfig, format: OutputFormat) -> Result<()> {
    let text = match &args.input {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("Failed to read stdin")?;
            buf
        }
    };

    let dialect = args
        .dialect
        .map(Dialect::from)
        .unwrap_or(config.extractor.dictation);
    let fields = FieldExtractor::new(dialect).extract(&text);

    if emit_structured(format, &fields)? {
        return Ok(());
    }
    if fields.is_empty() {
        println!("No recognizable fields.");
        return Ok(());
    }
    for (key, value) in fields.iter() {
        println!("{:<24} {}", key.as_str(), value);
    }
    Ok(())
}
