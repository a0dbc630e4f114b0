use clap::Parser;
use miette::Result;
use poster::cli::{Cli, Commands};
use poster::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Render(args) => poster::cli::render::run(args, &printer)?,
        Commands::Palette(args) => poster::cli::palette::run(args, &printer)?,
        Commands::Init(args) => poster::cli::init::run(args, &printer)?,
    }

    Ok(())
}
