use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use verdant_globe::{config::SceneConfig, init_tracing, run, RunOptions};

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless driver for the vegetation globe slide")]
struct Args {
    /// JSON scene configuration; presentation defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of frames to play before clicking the globe
    #[arg(long, default_value_t = 120)]
    frames: u32,

    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Total number of slides in the deck
    #[arg(long, default_value_t = 6)]
    slides: usize,

    /// One-based number of the slide hosting the globe
    #[arg(long, default_value_t = 3)]
    globe_slide: usize,

    /// Skip texture downloads and use the fallback materials
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };
    info!(?args, "starting");

    run(RunOptions {
        config,
        viewport: (args.width.max(1), args.height.max(1)),
        frames: args.frames,
        slides: args.slides,
        globe_slide: args.globe_slide.saturating_sub(1),
        offline: args.offline,
    })
    .await
}
