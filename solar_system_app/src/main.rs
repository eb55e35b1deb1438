//! Solar system demo
//!
//! Runs the Sun and its planets through the orrery engine on the headless
//! device and logs where everything ends up.
//!
//! ```text
//! solar_system [CONFIG] [--frames N] [--realtime]
//! ```

mod app_config;
mod loader;
mod scene_setup;

use std::path::PathBuf;
use std::time::Duration;

use orrery_engine::assets::AssetError;
use orrery_engine::celestial::{PlanetScript, StarScript};
use orrery_engine::config::{Config, ConfigError};
use orrery_engine::foundation::logging;
use orrery_engine::prelude::{Clock, HeadlessDevice, RenderError, SceneError};
use clap::Parser;
use thiserror::Error;

use app_config::AppConfig;
use loader::FileAssetLoader;
use scene_setup::SolarSystem;

const DEFAULT_CONFIG: &str = "solar_system_app/config/solar_system.toml";

/// Everything that can stop the demo
#[derive(Error, Debug)]
pub enum AppError {
    /// Config file missing or invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Scene setup or a frame failed
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// A shader could not be built
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// A mesh could not be loaded
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

}

/// Command line overrides on top of the config file
#[derive(Debug, Parser)]
#[command(name = "solar_system", about = "Run the Sun and its planets on the headless device")]
struct Args {
    /// Config file (TOML or RON)
    config: Option<PathBuf>,

    /// Frames to simulate; 0 runs until interrupted
    #[arg(long, value_name = "N")]
    frames: Option<u64>,

    /// Pace frames with the wall clock
    #[arg(long)]
    realtime: bool,
}

fn load_config(args: &Args) -> Result<AppConfig, AppError> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None if std::path::Path::new(DEFAULT_CONFIG).exists() => {
            AppConfig::load_from_file(DEFAULT_CONFIG)?
        }
        None => AppConfig::default(),
    };
    if let Some(frames) = args.frames {
        config.run.frames = frames;
    }
    config.run.realtime |= args.realtime;
    config.validate()?;
    Ok(config)
}

fn report(system: &SolarSystem, frame: u64, clock: &Clock) {
    let scene = &system.scene;
    if let Some(sun) = scene
        .object(system.star)
        .and_then(|object| object.script::<StarScript>())
    {
        log::info!(
            "frame {} (t={:.1}s): {} spin {:.1} deg",
            frame,
            clock.last_timestamp_ms() / 1000.0,
            sun.body().name,
            sun.body().rotation.y.to_degrees()
        );
    }
    for &id in &system.planets {
        let Some(object) = scene.object(id) else {
            continue;
        };
        let Some(planet) = object.script::<PlanetScript>() else {
            continue;
        };
        let position = object.transform().position;
        log::info!(
            "  {}: angle {:.2} deg, scene ({:.2}, {:.2}, {:.2}), {:.1} K",
            planet.body().name,
            planet.planet().angle.to_degrees(),
            position.x,
            position.y,
            position.z,
            planet.body().surface_temperature
        );
    }
}

fn run() -> Result<(), AppError> {
    let args = Args::parse();
    let config = load_config(&args)?;
    logging::init_with_level(&config.orrery.logging.level);
    log::info!("Starting solar system demo");

    let mut device = HeadlessDevice::new();
    let loader = FileAssetLoader::new(&config.assets.root);
    let mut system = scene_setup::build(&config, &loader, &mut device)?;

    let interval = config.orrery.clock.ideal_frame_interval_ms;
    let mut clock = Clock::with_frame_interval(interval);
    system.scene.start(&clock, &mut device)?;

    let run = &config.run;
    let mut frame: u64 = 0;
    while run.frames == 0 || frame < run.frames {
        frame += 1;
        if run.realtime {
            std::thread::sleep(Duration::from_secs_f64(interval / 1000.0));
            clock.tick_now();
        } else {
            clock.tick(frame as f64 * interval);
        }

        let stats = system.scene.update(&clock, &mut device)?;
        log::trace!(
            "frame {}: {} objects, {} draws, {} skipped",
            stats.frame,
            stats.objects_updated,
            stats.draws_issued,
            stats.draws_skipped
        );
        if frame % run.report_every == 0 {
            report(&system, frame, &clock);
        }
    }

    log::info!("Finished after {} frames", frame);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        // Config failures happen before the configured logger exists.
        logging::init();
        log::error!("{e}");
        eprintln!("solar_system: {e}");
        std::process::exit(1);
    }
}
