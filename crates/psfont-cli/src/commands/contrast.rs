//! Contrast command implementation

use anyhow::Result;
use psfont::color::{contrasting_text_color, luminance};
use psfont::inverted_background_for;

use crate::cli::ContrastArgs;

pub fn run(args: &ContrastArgs) -> Result<()> {
    let background = inverted_background_for(args.color);
    println!("text:       {} (luminance {:.3})", args.color, luminance(args.color));
    println!("background: {} (luminance {:.3})", background, luminance(background));
    println!("best text on that background: {}", contrasting_text_color(background));
    Ok(())
}
