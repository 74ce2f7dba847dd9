use bevy::prelude::*;

use crate::player::Player;

/// Offset of the chase camera in the player's local frame.
const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 4.0, 8.0);

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, attach_player_camera);
    }
}

#[derive(Component)]
pub struct PlayerCamera;

fn attach_player_camera(mut commands: Commands, players: Query<Entity, Added<Player>>) {
    for player in &players {
        commands.entity(player).with_children(|parent| {
            parent.spawn((
                Camera3d::default(),
                PlayerCamera,
                Transform::from_translation(CAMERA_OFFSET).looking_at(Vec3::ZERO, Vec3::Y),
            ));
        });
    }
}

