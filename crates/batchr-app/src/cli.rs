use std::path::PathBuf;

use clap::Parser;

/// batchr: headless benchmark for the batched quad renderer.
#[derive(Parser, Debug)]
#[command(name = "batchr", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Sprites submitted per frame.
    #[arg(short = 'n', long, default_value_t = 50_000)]
    pub quads: u32,

    /// Distinct procedural textures cycled across the sprites.
    #[arg(short = 't', long, default_value_t = 24)]
    pub textures: u32,

    /// Frames to render.
    #[arg(short = 'f', long, default_value_t = 3)]
    pub frames: u32,

    /// Write the last frame to this PNG file.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Record backend calls instead of touching the GPU.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the effective config as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
