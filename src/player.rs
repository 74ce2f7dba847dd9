use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;

use crate::system_order::BumperSet;

/// The "player" tag other systems match contacts against.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Player;

#[derive(Component, Debug, Clone, Copy)]
pub struct PlayerController {
    pub speed: f32,
    /// Degrees per second at full look deflection.
    pub rotation_speed: f32,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self {
            speed: 5.0,
            rotation_speed: 90.0,
        }
    }
}

/// Latest input sample. `movement.y > 0` is forward, `look.x > 0` turns right.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct PlayerInput {
    pub movement: Vec2,
    pub look: Vec2,
}

/// Look deflection per pixel of mouse motion.
const MOUSE_LOOK_SCALE: f32 = 0.1;

pub fn sample_player_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mouse: Option<Res<AccumulatedMouseMotion>>,
    mut input: ResMut<PlayerInput>,
) {
    let mut movement = Vec2::ZERO;
    let mut look = Vec2::ZERO;
    if let Some(keys) = keys {
        if keys.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
            movement.y += 1.0;
        }
        if keys.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
            movement.y -= 1.0;
        }
        if keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
            movement.x += 1.0;
        }
        if keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
            movement.x -= 1.0;
        }
        if keys.pressed(KeyCode::KeyE) {
            look.x += 1.0;
        }
        if keys.pressed(KeyCode::KeyQ) {
            look.x -= 1.0;
        }
    }
    if let Some(mouse) = mouse {
        look += mouse.delta * MOUSE_LOOK_SCALE;
    }
    input.movement = movement.normalize_or_zero();
    input.look = look;
}

/// Translate in the body's local frame, then yaw about local +Y.
pub fn step_player(transform: &mut Transform, controller: &PlayerController, input: &PlayerInput, dt: f32) {
    if input.movement != Vec2::ZERO {
        let local = Vec3::new(input.movement.x, 0.0, -input.movement.y);
        let world = transform.rotation * local;
        transform.translation += world * dt * controller.speed;
    }
    if input.look.x != 0.0 {
        let yaw = (-input.look.x * dt * controller.rotation_speed).to_radians();
        transform.rotate_local_y(yaw);
    }
}

pub fn drive_players(
    time: Res<Time>,
    input: Res<PlayerInput>,
    mut q: Query<(&mut Transform, &PlayerController), With<Player>>,
) {
    let dt = time.delta_secs();
    for (mut transform, controller) in &mut q {
        step_player(&mut transform, controller, &input, dt);
    }
}

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInput>()
            .add_systems(Update, sample_player_input.in_set(BumperSet::Input))
            .add_systems(Update, drive_players.in_set(BumperSet::Movement));
    }
}
