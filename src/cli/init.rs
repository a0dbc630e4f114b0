//! Init command implementation.
//!
//! Writes a `poster.yaml` holding every parameter at its default value, ready
//! to edit.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::error::{PosterError, Result};
use crate::output::{display_path, Printer};
use crate::types::{PosterParams, CONFIG_FILENAME};

const HEADER: &str = "# Poster parameters. Remove any line to use its default.\n";

/// Write a default poster.yaml
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write into (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing poster.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let config_path = args.path.join(CONFIG_FILENAME);

    if config_path.exists() && !args.force {
        return Err(PosterError::Config {
            message: format!("{} already exists", CONFIG_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    let yaml = format!("{}{}", HEADER, PosterParams::default().to_yaml()?);

    fs::write(&config_path, yaml).map_err(|e| PosterError::Io {
        path: config_path.clone(),
        message: format!("Failed to write config: {}", e),
    })?;

    printer.status("Created", &printer.cyan(&display_path(&config_path)));

    Ok(())
}
