use anyhow::{Context, Result};
use clap::Parser;
use prism_core::{EnvironmentMap, Scene};
use prism_renderer::{render, RenderConfig};

mod cli;

use cli::Args;

/// Build the scene from a description file or the built-in composition,
/// then apply the floor flags.
fn load_scene(args: &Args) -> Result<Scene> {
    let scene = match &args.scene {
        Some(path) => Scene::load(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => Scene::default_scene(),
    };

    let floor = if args.no_floor {
        None
    } else if args.infinite_floor {
        scene.floor.map(|floor| floor.unbounded())
    } else {
        scene.floor
    };

    Ok(scene.with_floor(floor))
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting Prism");

    // Decode the environment map up front so bad input fails before rendering
    let envmap = args
        .envmap
        .as_ref()
        .map(|path| {
            EnvironmentMap::load(path)
                .with_context(|| format!("Failed to load environment map {}", path.display()))
        })
        .transpose()?;
    if envmap.is_none() {
        log::info!("No environment map given, using flat background");
    }

    let scene = load_scene(&args)?;

    let config = RenderConfig::default()
        .with_resolution(args.width, args.height)
        .with_fov(args.fov.to_radians())
        .with_max_depth(args.max_depth);

    let image = render(&scene, envmap.as_ref(), &config).context("Render failed")?;

    image::save_buffer(
        &args.output,
        image.as_bytes(),
        image.width(),
        image.height(),
        image::ColorType::Rgba8,
    )
    .with_context(|| format!("Failed to write {}", args.output.display()))?;

    log::info!("Saved to {}", args.output.display());

    Ok(())
}
