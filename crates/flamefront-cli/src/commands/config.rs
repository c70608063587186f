use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use flamefront_core::pipeline::SessionConfig;

#[derive(Clone, Copy, ValueEnum)]
pub enum ConfigFormat {
    Json,
    Toml,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (defaults to the file extension, else JSON)
    #[arg(long, value_enum)]
    pub format: Option<ConfigFormat>,
}

/// Print or save a default SessionConfig.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let config = SessionConfig::default();

    let format = args.format.unwrap_or_else(|| {
        match args
            .output
            .as_ref()
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
        {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    });
    let text = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(&config)? + "\n",
        ConfigFormat::Toml => toml::to_string_pretty(&config)?,
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &text)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Default config saved to {}", path.display());
    } else {
        print!("{}", text);
    }

    Ok(())
}
