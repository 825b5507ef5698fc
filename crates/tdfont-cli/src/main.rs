use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tdfont::{FontCache, RenderOptions};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::console::{describe, write_banner};
mod console;

#[derive(Parser)]
#[command(name = "tdfont", about = "Render banners with TheDraw fonts")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Render text with a font
    Render {
        #[arg(short, long)]
        font: PathBuf,
        #[arg(short, long)]
        text: String,
        /// Font inside the file (0-based)
        #[arg(long, default_value = "0")]
        font_id: usize,
        /// Columns between glyphs
        #[arg(long, default_value = "2")]
        spacing: usize,
        /// Columns for a space character
        #[arg(long, default_value = "5")]
        space_width: usize,
        /// Transcode CP437 glyph bytes to UTF-8
        #[arg(long)]
        utf8: bool,
    },
    /// Inspect font metadata
    Inspect {
        #[arg(short, long)]
        font: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let cache: FontCache = FontCache::new();
    match cli.command {
        Cmd::Render {
            font,
            text,
            font_id,
            spacing,
            space_width,
            utf8,
        } => {
            let file = cache
                .load_path(&font)
                .with_context(|| format!("loading {}", font.display()))?;
            let options = RenderOptions {
                letter_spacing: spacing,
                space_width,
                transcode: utf8,
            };
            debug!(?options, font_id, "rendering");
            let out = tdfont::render(&file, font_id, &text, &options)
                .with_context(|| format!("rendering with font {font_id}"))?;
            write_banner(&out)?;
        }
        Cmd::Inspect { font } => {
            let file = cache
                .load_path(&font)
                .with_context(|| format!("loading {}", font.display()))?;
            print!("{}", describe(&file));
        }
    }
    Ok(())
}
