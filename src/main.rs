//! Bumper: steer into the ring of obstacles, every first touch scores a point.
//!
//! Example:
//!   cargo run -- --config assets/config/game.ron --overlay assets/config/game.local.ron --seed 7

use std::path::PathBuf;

use anyhow::Result;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use clap::Parser;

use bumper::game::ConfigDiagnostics;
use bumper::{BumperConfig, GamePlugin};

#[derive(Parser, Debug)]
#[command(author, version, about = "3D bumper minigame", long_about = None)]
struct Args {
    /// Base RON config.
    #[arg(long, default_value = "assets/config/game.ron")]
    config: PathBuf,
    /// Extra RON files merged over the base, in order.
    #[arg(long)]
    overlay: Vec<PathBuf>,
    /// Seed for a reproducible obstacle layout.
    #[arg(long)]
    seed: Option<u64>,
    /// Override the number of obstacles.
    #[arg(long)]
    obstacles: Option<u32>,
    /// Exit after this many seconds (0 = run indefinitely).
    #[arg(long)]
    auto_close: Option<f32>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let paths = std::iter::once(args.config.clone()).chain(args.overlay.iter().cloned());
    let (mut cfg, used, errors) = BumperConfig::load_layered(paths);
    if let Some(seed) = args.seed {
        cfg.field.seed = Some(seed);
    }
    if let Some(n) = args.obstacles {
        cfg.field.obstacle_count = n;
    }
    if let Some(secs) = args.auto_close {
        cfg.window.auto_close = secs;
    }

    let mut diagnostics: Vec<String> = errors.iter().map(ToString::to_string).collect();
    if used.is_empty() {
        diagnostics.push("no config file loaded; using built-in defaults".into());
    }
    diagnostics.extend(cfg.validate());

    App::new()
        .insert_resource(cfg.clone())
        .insert_resource(ConfigDiagnostics(diagnostics))
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: cfg.window.title.clone(),
                        resolution: (cfg.window.width, cfg.window.height).into(),
                        resizable: true,
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    level: Level::INFO,
                    filter: "wgpu=error,naga=warn,bumper=debug".into(),
                    ..default()
                }),
        )
        .add_plugins(GamePlugin)
        .run();
    Ok(())
}
