//! CLI argument definitions using Clap v4

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use psfont::{Color, LineOverflow};

/// psfont - console bitmap fonts from the command line
#[derive(Parser, Debug)]
#[command(name = "psfont")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a font's header, glyph geometry and Unicode table
    #[command(alias = "i")]
    Info(InfoArgs),

    /// Render text to an image file
    #[command(alias = "r")]
    Render(Box<RenderArgs>),

    /// Print the background color that keeps text in COLOR readable
    Contrast(ContrastArgs),
}

/// Arguments for the info command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// PSF1 or PSF2 font file
    #[arg(env = "PSFONT_FONT")]
    pub font: PathBuf,

    /// Also draw this glyph as text art
    #[arg(short, long)]
    pub glyph: Option<u32>,

    /// List every codepoint the Unicode table maps
    #[arg(long)]
    pub mappings: bool,
}

/// Arguments for the render command
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Text to render (reads --text-file or stdin if omitted)
    pub text: Option<String>,

    /// PSF1 or PSF2 font file
    #[arg(short = 'f', long = "font", env = "PSFONT_FONT")]
    pub font: PathBuf,

    /// Read input text from file
    #[arg(short = 'T', long = "text-file", conflicts_with = "text")]
    pub text_file: Option<PathBuf>,

    /// Left edge of the text
    #[arg(short = 'x', long, default_value_t = 0, allow_negative_numbers = true)]
    pub x: i32,

    /// Top edge of the text
    #[arg(short = 'y', long, default_value_t = 0, allow_negative_numbers = true)]
    pub y: i32,

    /// Glyph scale; whole numbers use block scaling, fractions are filtered
    #[arg(short = 's', long, default_value_t = 1.0)]
    pub scale: f32,

    /// Pixels between glyph cells and between lines
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub spacing: i32,

    /// Text color (RRGGBB)
    #[arg(short = 'c', long, default_value = "FFFFFF")]
    pub foreground: Color,

    /// Canvas color (RRGGBB)
    #[arg(short = 'b', long, default_value = "000000")]
    pub background: Color,

    /// Draw the text in a box whose color contrasts the text
    #[arg(long)]
    pub boxed: bool,

    /// Pixels between the text and the box edge
    #[arg(long, default_value_t = 4, requires = "boxed")]
    pub padding: i32,

    /// Most lines a box may hold
    #[arg(long, requires = "boxed")]
    pub max_lines: Option<usize>,

    /// What to do with lines past --max-lines
    #[arg(long, value_enum, default_value_t = Overflow::Truncate)]
    pub overflow: Overflow,

    /// Reject malformed UTF-8 continuation bytes instead of trusting lead bytes
    #[arg(long)]
    pub validate_utf8: bool,

    /// Canvas width (fits the text if omitted)
    #[arg(short = 'W', long)]
    pub width: Option<u32>,

    /// Canvas height (fits the text if omitted)
    #[arg(short = 'H', long)]
    pub height: Option<u32>,

    /// Empty border around fitted text
    #[arg(short = 'm', long, default_value_t = 8)]
    pub margin: u32,

    /// Output file path (stdout if omitted)
    #[arg(short = 'o', long = "output-file")]
    pub output_file: Option<PathBuf>,

    /// Output format (from the output extension, else png)
    #[arg(short = 'O', long = "format", value_enum)]
    pub format: Option<OutputFormat>,
}

/// Arguments for the contrast command
#[derive(Parser, Debug)]
pub struct ContrastArgs {
    /// Text color (RRGGBB)
    pub color: Color,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// 8-bit RGB PNG
    Png,
    /// Binary PPM (P6)
    Ppm,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Ppm => "ppm",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Overflow {
    /// Keep the first lines, drop the rest
    Truncate,
    /// Fail
    Error,
}

impl From<Overflow> for LineOverflow {
    fn from(overflow: Overflow) -> Self {
        match overflow {
            Overflow::Truncate => LineOverflow::Truncate,
            Overflow::Error => LineOverflow::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_render_defaults() {
        let cli = Cli::try_parse_from(["psfont", "render", "-f", "x.psf", "hi"]).unwrap();
        let Commands::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.text.as_deref(), Some("hi"));
        assert_eq!(args.scale, 1.0);
        assert_eq!(args.foreground, Color::WHITE);
        assert_eq!(args.overflow, Overflow::Truncate);
        assert!(args.format.is_none());
    }

    #[test]
    fn test_colors_parse_through_fromstr() {
        let cli = Cli::try_parse_from(["psfont", "contrast", "#1E90FF"]).unwrap();
        let Commands::Contrast(args) = cli.command else {
            panic!("expected contrast");
        };
        assert_eq!(args.color, Color::rgb(0x1E, 0x90, 0xFF));
        assert!(Cli::try_parse_from(["psfont", "contrast", "blue"]).is_err());
    }

    #[test]
    fn test_padding_requires_boxed() {
        assert!(Cli::try_parse_from(["psfont", "render", "-f", "x.psf", "--padding", "2", "a"]).is_err());
    }
}
