pub mod init;
pub mod palette;
pub mod render;

use clap::{Parser, Subcommand};

/// poster - seed-driven generative art posters
#[derive(Parser, Debug)]
#[command(name = "poster")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a poster to PNG
    Render(render::RenderArgs),

    /// Print a generated palette
    Palette(palette::PaletteArgs),

    /// Write a default poster.yaml
    Init(init::InitArgs),
}
