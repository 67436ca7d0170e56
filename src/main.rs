use anyhow::Result;
use clap::Parser;
use log::{error, info};
use softengine::app;
use softengine::io::config::Config;

/// Headless software rasterizer driven by a TOML scene description.
#[derive(Parser, Debug)]
#[command(name = "softengine")]
#[command(about = "CPU scanline rasterizer that renders TOML-described scenes to images")]
struct Cli {
    /// Scene configuration file (TOML). Defaults to a single spinning cube.
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Number of frames to render, overriding the config.
    #[arg(short, long)]
    frames: Option<usize>,

    /// Output image path, overriding the config.
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading config: {}", path);
            Config::load(path)?
        }
        None => {
            info!("No config given, using defaults");
            Config::default()
        }
    };

    if let Some(frames) = cli.frames {
        config.render.frames = frames;
    }
    if let Some(output) = cli.output {
        config.render.output = output;
    }

    app::run(&config).inspect_err(|e| error!("Render failed: {:#}", e))
}
