use bevy::prelude::*;

use crate::error::BumperError;
use crate::system_order::BumperSet;

/// Seeks `target` in world space and stops once within `separation`.
#[derive(Component, Debug, Clone, Copy)]
pub struct Follower {
    pub target: Option<Entity>,
    pub speed: f32,
    pub separation: f32,
    reported_missing: bool,
}

impl Follower {
    pub fn new(target: Option<Entity>, speed: f32, separation: f32) -> Self {
        Self {
            target,
            speed,
            separation,
            reported_missing: false,
        }
    }
}

/// Next position of a follower at `from` chasing `to`.
pub fn seek(from: Vec3, to: Vec3, speed: f32, separation: f32, dt: f32) -> Vec3 {
    let direction = to - from;
    if direction.length() < separation {
        return from;
    }
    from + direction.normalize_or_zero() * dt * speed
}

pub fn follow_targets(
    time: Res<Time>,
    mut followers: Query<(Entity, &mut Follower, &mut Transform)>,
    targets: Query<&GlobalTransform>,
) {
    let dt = time.delta_secs();
    for (entity, mut follower, mut transform) in &mut followers {
        let target_pos = follower
            .target
            .filter(|t| *t != entity)
            .and_then(|t| targets.get(t).ok())
            .map(GlobalTransform::translation);
        let Some(target_pos) = target_pos else {
            if !follower.reported_missing {
                error!(follower = ?entity, "{}", BumperError::missing("Follower", "target"));
                follower.reported_missing = true;
            }
            continue;
        };
        follower.reported_missing = false;
        transform.translation = seek(
            transform.translation,
            target_pos,
            follower.speed,
            follower.separation,
            dt,
        );
    }
}

pub struct FollowerPlugin;

impl Plugin for FollowerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, follow_targets.in_set(BumperSet::Movement));
    }
}
