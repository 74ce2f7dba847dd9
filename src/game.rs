use bevy::prelude::*;

use crate::auto_close::AutoClosePlugin;
use crate::camera::CameraPlugin;
use crate::config::BumperConfig;
use crate::follower::FollowerPlugin;
use crate::obstacle_field::{ObstacleFieldPlugin, ObstacleRng, ObstacleStyle};
use crate::obstacle_reaction::{ObstacleReaction, ObstacleReactionPlugin};
use crate::physics::PhysicsPlugin;
use crate::player::PlayerPlugin;
use crate::scene::ScenePlugin;
use crate::score::ScoreBoard;
use crate::score_display::ScoreDisplayPlugin;
use crate::system_order;

/// Gameplay logic only. Runs headless under `MinimalPlugins`.
pub struct BumperCorePlugin;

impl Plugin for BumperCorePlugin {
    fn build(&self, app: &mut App) {
        system_order::configure_sets(app);
        app.add_plugins((
            ObstacleFieldPlugin,
            ObstacleReactionPlugin,
            ScoreDisplayPlugin,
            PlayerPlugin,
            FollowerPlugin,
        ));
    }
}

/// Warnings gathered while loading configuration, replayed once logging is up.
#[derive(Resource, Debug, Default, Clone)]
pub struct ConfigDiagnostics(pub Vec<String>);

/// Full game: core logic plus scene, physics, camera and session helpers.
/// Reads `BumperConfig` if it was inserted before this plugin.
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        let cfg = app
            .world()
            .get_resource::<BumperConfig>()
            .cloned()
            .unwrap_or_default();
        if !app.world().contains_resource::<BumperConfig>() {
            app.insert_resource(cfg.clone());
        }
        app.insert_resource(ObstacleStyle::from(&cfg.colors));
        if let Some(seed) = cfg.field.seed {
            app.insert_resource(ObstacleRng::seeded(seed));
        }
        app.init_resource::<ConfigDiagnostics>()
            .add_plugins((
                BumperCorePlugin,
                PhysicsPlugin::from_config(&cfg),
                ScenePlugin,
                CameraPlugin,
                AutoClosePlugin,
            ))
            .add_systems(Startup, report_config_diagnostics)
            .add_systems(Update, debug_entity_counts);
    }
}

fn report_config_diagnostics(diagnostics: Res<ConfigDiagnostics>) {
    for warning in &diagnostics.0 {
        warn!("config: {warning}");
    }
}

fn debug_entity_counts(
    time: Res<Time>,
    mut timer: Local<f32>,
    q_obstacles: Query<&ObstacleReaction>,
    q_boards: Query<&ScoreBoard>,
) {
    *timer += time.delta_secs();
    if *timer > 5.0 {
        *timer = 0.0;
        let scored = q_obstacles.iter().filter(|r| r.is_scored()).count();
        for board in &q_boards {
            debug!(
                obstacles = q_obstacles.iter().count(),
                scored,
                score = board.score(),
                max = board.max_score(),
                "board status"
            );
        }
    }
}
