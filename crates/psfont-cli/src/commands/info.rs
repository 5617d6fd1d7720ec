//! Info command implementation
//!
//! Prints what the decoder saw in a font file.

use anyhow::{Context, Result};
use psfont::fontdb::{PsfFont, PsfHeader, UnicodeMapping};

use crate::cli::InfoArgs;

pub fn run(args: &InfoArgs) -> Result<()> {
    let font = psfont::load_font(&args.font)
        .with_context(|| format!("Failed to load font {}", args.font.display()))?;

    println!("psfont v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("File:    {}", args.font.display());
    print_header(&font);

    if let Some(index) = args.glyph {
        println!();
        print_glyph(&font, index)?;
    }
    if args.mappings {
        println!();
        print_mappings(&font);
    }

    psfont::unload_font(font);
    Ok(())
}

fn print_header(font: &PsfFont) {
    println!("Format:  {}", font.version());
    match font.header() {
        PsfHeader::V1(header) => {
            println!("Mode:    {:#04x}", header.mode);
        },
        PsfHeader::V2(header) => {
            println!("Version: {}", header.version);
            println!("Header:  {} bytes", header.header_size);
            println!("Flags:   {:#x}", header.flags);
        },
    }
    println!("Glyphs:  {}", font.glyph_count());
    println!("Size:    {}x{}", font.width(), font.height());
    println!("Stride:  {} bytes", font.stride());

    match font.unicode_table() {
        Some(table) => println!(
            "Unicode: {} codepoints, {} sequences",
            table.single_count(),
            table.sequence_count()
        ),
        None => println!("Unicode: no table (resolving through code page 866)"),
    }
}

fn print_glyph(font: &PsfFont, index: u32) -> Result<()> {
    let glyph = font.glyph(index).with_context(|| {
        format!("Glyph {index} is past the end of a {}-glyph font", font.glyph_count())
    })?;
    println!("Glyph {index}:");
    for y in 0..glyph.height() {
        let row: String = (0..glyph.width())
            .map(|x| if glyph.is_set(x, y) { '#' } else { '.' })
            .collect();
        println!("  {row}");
    }
    Ok(())
}

fn print_mappings(font: &PsfFont) {
    let Some(table) = font.unicode_table() else {
        println!("No Unicode table");
        return;
    };
    for glyph in 0..table.len() {
        let mappings = table.mappings(glyph);
        if mappings.is_empty() {
            continue;
        }
        let listed: Vec<String> = mappings
            .iter()
            .map(|mapping| match mapping {
                UnicodeMapping::Single(cp) => format!("U+{cp:04X}"),
                UnicodeMapping::Sequence(cps) => cps
                    .iter()
                    .map(|cp| format!("U+{cp:04X}"))
                    .collect::<Vec<_>>()
                    .join("+"),
            })
            .collect();
        println!("{glyph:>5}: {}", listed.join(" "));
    }
}
