//! motorcade - 3D car showcase
//!
//! Main application entry point.

use std::path::PathBuf;

use anyhow::Result;
use bevy::prelude::*;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use motorcade_core::ShowroomConfig;
use motorcade_scene::create_app;

#[derive(Parser, Debug)]
#[command(name = "motorcade", version, about = "3D car showcase with an orbit camera")]
struct Args {
    /// Showroom configuration file (RON); compiled-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Window title
    #[arg(long, default_value = "Motorcade")]
    title: String,

    /// Window width in logical pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 720.0)]
    height: f32,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "motorcade=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            tracing::info!("Loading showroom config from {}", path.display());
            ShowroomConfig::load(path)?
        }
        None => ShowroomConfig::default(),
    };
    tracing::info!("Starting motorcade with {} cars", config.cars.len());

    let window = Window {
        title: args.title,
        resolution: (args.width, args.height).into(),
        ..default()
    };

    create_app(config, window).run();

    tracing::info!("motorcade shutting down");
    Ok(())
}
