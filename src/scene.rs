//! Scene wiring: spawns the board, the obstacle field, the HUD, the player and the
//! follower, and links them to each other by entity.

use bevy::prelude::*;

use crate::config::BumperConfig;
use crate::follower::Follower;
use crate::obstacle_field::{Annulus, ObstacleField, ObstaclePrototype};
use crate::physics::player_body;
use crate::player::{Player, PlayerController};
use crate::score::ScoreBoard;
use crate::score_display::ScoreDisplay;

/// Entities created by [`setup_scene`], kept for diagnostics and tests.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SceneEntities {
    pub board: Entity,
    pub field: Entity,
    pub display: Entity,
    pub player: Entity,
    pub follower: Option<Entity>,
}

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_scene);
    }
}

pub fn setup_scene(
    mut commands: Commands,
    cfg: Option<Res<BumperConfig>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let cfg = cfg.as_deref().cloned().unwrap_or_default();
    let f = &cfg.field;

    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let origin = f.origin();
    let annulus = Annulus::new(f.inner_radius, f.outer_radius);
    let ground_size = (annulus.outer() * 2.5).max(20.0);
    commands.spawn((
        Name::new("Ground"),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(ground_size, ground_size))),
        MeshMaterial3d(materials.add(Color::srgb(0.25, 0.3, 0.25))),
        Transform::from_xyz(origin.x, 0.0, origin.z),
    ));

    let board = commands.spawn((Name::new("ScoreBoard"), ScoreBoard::default())).id();

    let size = f.obstacle_size.max(0.01);
    let prototype = ObstaclePrototype {
        mesh: meshes.add(Cuboid::from_length(size)),
        half_extents: Vec3::splat(size * 0.5),
    };
    let field = commands
        .spawn((
            Name::new("ObstacleField"),
            ObstacleField::new(Some(board), Some(prototype))
                .with_count(f.obstacle_count)
                .with_annulus(annulus)
                .with_origin(origin),
        ))
        .id();

    let display = commands
        .spawn((
            Name::new("ScoreLabel"),
            Text::new(""),
            TextFont {
                font_size: 32.0,
                ..default()
            },
            TextColor(Color::WHITE),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(12.0),
                left: Val::Px(12.0),
                ..default()
            },
            ScoreDisplay::new(Some(board)),
        ))
        .id();

    let p = &cfg.player;
    let player = commands
        .spawn((
            Name::new("Player"),
            Player,
            PlayerController {
                speed: p.speed,
                rotation_speed: p.rotation_speed,
            },
            Mesh3d(meshes.add(Sphere::new(p.radius))),
            MeshMaterial3d(materials.add(Color::srgb(0.95, 0.8, 0.2))),
            Transform::from_translation(Vec3::from_array(p.spawn)),
            player_body(p.radius),
        ))
        .id();

    let fc = &cfg.follower;
    let follower = fc.enabled.then(|| {
        commands
            .spawn((
                Name::new("Follower"),
                Follower::new(Some(player), fc.speed, fc.separation),
                Mesh3d(meshes.add(Sphere::new(0.35))),
                MeshMaterial3d(materials.add(Color::srgb(0.9, 0.9, 0.9))),
                Transform::from_translation(Vec3::from_array(fc.spawn)),
            ))
            .id()
    });

    info!(
        ?board,
        ?field,
        ?player,
        obstacles = f.obstacle_count,
        follower = follower.is_some(),
        "scene wired"
    );
    commands.insert_resource(SceneEntities {
        board,
        field,
        display,
        player,
        follower,
    });
}
