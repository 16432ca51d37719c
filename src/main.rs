use clap::Parser;
use spheres3d::app::{run_headless, run_terminal};
use spheres3d::config::Config;
use spheres3d::demo::Demo;
use spheres3d::globe::ControllerKind;
use spheres3d::places::load_places_or_empty;
use std::path::PathBuf;

/// Painter's-algorithm pseudo-3D demos in the terminal
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Scene to show
    #[arg(short, long, value_enum, default_value_t = Demo::Spheres)]
    demo: Demo,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON file of places for the globe demo
    #[arg(long)]
    places: Option<PathBuf>,

    /// Drag controller for the globe demo
    #[arg(long, value_enum)]
    controller: Option<ControllerKind>,

    /// Run without a terminal and print a summary
    #[arg(long)]
    headless: bool,

    /// Frames to step in headless mode
    #[arg(long, default_value_t = 90)]
    frames: u64,

    /// Surface width in pixels for headless mode
    #[arg(long, default_value_t = 160.0)]
    width: f64,

    /// Surface height in pixels for headless mode
    #[arg(long, default_value_t = 90.0)]
    height: f64,
}

/// Main function
fn main() -> spheres3d::Result<()> {
    let env = env_logger::Env::default().default_filter_or("warn");
    env_logger::Builder::from_env(env).init();
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(controller) = cli.controller {
        config.globe.controller = controller;
    }
    if cli.places.is_some() {
        config.globe.places = cli.places;
    }

    let places = match cli.demo {
        Demo::Globe => load_places_or_empty(config.globe.places.as_deref()),
        _ => Vec::new(),
    };

    if cli.headless {
        let report = run_headless(
            cli.demo,
            &config,
            &places,
            cli.frames,
            cli.width,
            cli.height,
        )?;
        println!("{:?}: {report}", cli.demo);
        return Ok(());
    }

    run_terminal(cli.demo, &config, &places)
}
