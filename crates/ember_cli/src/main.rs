//! Ember - offline path tracer.
//!
//! Usage: `ember [settings.json]`. Without a settings file the Cornell box is
//! rendered with default settings.

mod scenes;
mod settings;

use anyhow::Context;
use ember_renderer::render_parallel;
use settings::Settings;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting Ember");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(Path::new(&path))?,
        None => Settings::default(),
    };

    let scene = scenes::build(&settings);

    let mut config = settings.render.clone();
    config.use_sky_gradient |= scene.use_sky_gradient;

    let image = render_parallel(
        &scene.camera,
        &scene.world,
        Some(&scene.lights),
        &config,
        settings.bucket_size,
    )
    .context("Render failed")?;

    image
        .save(&settings.output)
        .with_context(|| format!("Failed to write {}", settings.output.display()))?;

    Ok(())
}
