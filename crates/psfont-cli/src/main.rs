// this_file: crates/psfont-cli/src/main.rs

//! psfont CLI: inspect console fonts and render text with them.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Commands::Info(args) => commands::info::run(&args),
        Commands::Render(args) => commands::render::run(&args),
        Commands::Contrast(args) => commands::contrast::run(&args),
    }
}

/// `RUST_LOG` sets the baseline; each `-v` raises the floor
fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::from_default_env();
    if verbose > 0 || std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(level);
    }
    builder.init();
}
