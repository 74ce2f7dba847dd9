use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::config::BumperConfig;

/// Rapier backend. Obstacles are fixed bodies; the player is kinematic, so contacts
/// between the two are only reported if the player opts into `KINEMATIC_STATIC`.
pub struct PhysicsPlugin {
    pub debug_render: bool,
}

impl PhysicsPlugin {
    pub fn from_config(cfg: &BumperConfig) -> Self {
        Self {
            debug_render: cfg.rapier_debug,
        }
    }
}

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default());
        if self.debug_render {
            app.add_plugins(RapierDebugRenderPlugin::default());
        }
    }
}

/// Components giving the player a collider that reports contacts against fixed bodies.
pub fn player_body(radius: f32) -> impl Bundle {
    (
        RigidBody::KinematicPositionBased,
        Collider::ball(radius),
        ActiveEvents::COLLISION_EVENTS,
        ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_STATIC,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_body_sees_fixed_obstacles() {
        let mut world = World::new();
        let e = world.spawn(player_body(0.5)).id();
        let types = world.get::<ActiveCollisionTypes>(e).unwrap();
        assert!(types.contains(ActiveCollisionTypes::KINEMATIC_STATIC));
        assert!(world.get::<ActiveEvents>(e).unwrap().contains(ActiveEvents::COLLISION_EVENTS));
    }
}
