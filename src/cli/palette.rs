use clap::Args;

use crate::error::Result;
use crate::output::{plural, Printer};
use crate::random::RandomStream;
use crate::types::{generate_palette, Colour, PaletteStyle};

/// Print a generated colour palette
#[derive(Args, Debug)]
pub struct PaletteArgs {
    /// Colour theme
    #[arg(long, default_value = "vivid")]
    pub style: PaletteStyle,

    /// Number of colours
    #[arg(long, default_value = "8")]
    pub count: usize,

    /// Random seed
    #[arg(long, default_value = "1")]
    pub seed: u64,
}

pub fn run(args: PaletteArgs, printer: &Printer) -> Result<()> {
    let colours = palette_lines(&args)?;

    printer.status(
        "Generated",
        &format!("{} ({}, seed {})", plural(colours.len(), "colour", "colours"), args.style, args.seed),
    );

    // Palette lines go to stdout so they can be piped.
    for line in colours {
        println!("{}", line);
    }

    Ok(())
}

/// `$colour-N: #RRGGBB` lines for the requested palette.
pub fn palette_lines(args: &PaletteArgs) -> Result<Vec<String>> {
    let mut rng = RandomStream::seeded(args.seed);
    let colours: Vec<Colour> = generate_palette(args.style, args.count, &mut rng)?;
    Ok(colours
        .iter()
        .enumerate()
        .map(|(i, colour)| format!("$colour-{}: {}", i + 1, colour))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_lines_format() {
        let args = PaletteArgs {
            style: PaletteStyle::Ocean,
            count: 3,
            seed: 1,
        };
        let lines = palette_lines(&args).unwrap();
        assert_eq!(lines.len(), 3);
        for (i, line) in lines.iter().enumerate() {
            let prefix = format!("$colour-{}: #", i + 1);
            assert!(line.starts_with(&prefix));
            assert_eq!(line.len(), prefix.len() + 6);
        }
    }

    #[test]
    fn test_palette_matches_render_seed() {
        // The palette command and a render with the same seed agree.
        let args = PaletteArgs {
            style: PaletteStyle::Vivid,
            count: 8,
            seed: 1,
        };
        let lines = palette_lines(&args).unwrap();
        let canvas = crate::compose::generate_poster(&crate::types::PosterParams {
            resolution: 16,
            ..Default::default()
        })
        .unwrap();
        let expected: Vec<String> = canvas
            .palette
            .iter()
            .enumerate()
            .map(|(i, c)| format!("$colour-{}: {}", i + 1, c))
            .collect();
        assert_eq!(lines, expected);
    }

    #[test]
    fn test_zero_count_is_error() {
        let args = PaletteArgs {
            style: PaletteStyle::Vivid,
            count: 0,
            seed: 1,
        };
        assert!(palette_lines(&args).is_err());
    }
}
