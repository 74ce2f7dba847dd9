//! Ring-shaped obstacle placement.
//!
//! An [`ObstacleField`] spawner entity generates its obstacles the first frame it
//! exists, links each one to the field's score board and publishes the obstacle
//! count as the board's max score.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::ObstacleColorConfig;
use crate::error::BumperError;
use crate::obstacle_reaction::{Obstacle, ObstacleReaction};
use crate::score::{ScoreBoard, ScoreCommandsExt};
use crate::system_order::BumperSet;

/// Radii of the annulus obstacles are dropped into. Always `0 <= inner <= outer`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Annulus {
    inner: f32,
    outer: f32,
}

impl Annulus {
    /// Negative and non-finite radii become 0; reversed bounds are swapped.
    pub fn new(inner: f32, outer: f32) -> Self {
        let sane = |r: f32| if r.is_finite() { r.max(0.0) } else { 0.0 };
        let (a, b) = (sane(inner), sane(outer));
        if a <= b {
            Self { inner: a, outer: b }
        } else {
            Self { inner: b, outer: a }
        }
    }

    pub fn inner(&self) -> f32 {
        self.inner
    }

    pub fn outer(&self) -> f32 {
        self.outer
    }

    /// `origin + Ry(angle) * forward * distance`, angle uniform in [0°, 360°),
    /// distance uniform in [inner, outer].
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, origin: Vec3) -> Vec3 {
        let distance = rng.gen_range(self.inner..=self.outer);
        let angle = rng.gen_range(0.0..360.0_f32).to_radians();
        origin + Quat::from_rotation_y(angle) * Vec3::NEG_Z * distance
    }
}

/// Shape shared by every obstacle of a field. Materials are created per obstacle.
#[derive(Debug, Clone)]
pub struct ObstaclePrototype {
    pub mesh: Handle<Mesh>,
    pub half_extents: Vec3,
}

#[derive(Component, Debug, Clone)]
pub struct ObstacleField {
    pub board: Option<Entity>,
    pub prototype: Option<ObstaclePrototype>,
    pub obstacle_count: u32,
    pub annulus: Annulus,
    pub origin: Vec3,
    /// Entities spawned by this field, in generation order.
    pub obstacles: Vec<Entity>,
}

impl ObstacleField {
    pub fn new(board: Option<Entity>, prototype: Option<ObstaclePrototype>) -> Self {
        Self {
            board,
            prototype,
            obstacle_count: 25,
            annulus: Annulus::new(5.0, 50.0),
            origin: Vec3::ZERO,
            obstacles: Vec::new(),
        }
    }

    pub fn with_count(mut self, obstacle_count: u32) -> Self {
        self.obstacle_count = obstacle_count;
        self
    }

    pub fn with_annulus(mut self, annulus: Annulus) -> Self {
        self.annulus = annulus;
        self
    }

    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    /// Resolve the references generation needs, or report the first one missing.
    fn resolve(
        &self,
        boards: &Query<(), With<ScoreBoard>>,
    ) -> Result<(ObstaclePrototype, Entity), BumperError> {
        let prototype = self
            .prototype
            .clone()
            .ok_or(BumperError::missing("ObstacleField", "obstacle prototype"))?;
        let board = self
            .board
            .filter(|b| boards.contains(*b))
            .ok_or(BumperError::missing("ObstacleField", "score board"))?;
        Ok((prototype, board))
    }
}

/// Source of layout randomness. Seeded for reproducible layouts.
#[derive(Resource, Deref, DerefMut)]
pub struct ObstacleRng(pub StdRng);

impl ObstacleRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for ObstacleRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

/// Colours used for fresh and scored obstacles.
#[derive(Resource, Debug, Clone)]
pub struct ObstacleStyle {
    pub hue: (f32, f32),
    pub value: (f32, f32),
    pub scored: Color,
}

impl Default for ObstacleStyle {
    fn default() -> Self {
        Self::from(&ObstacleColorConfig::default())
    }
}

impl From<&ObstacleColorConfig> for ObstacleStyle {
    /// Non-finite bounds fall back to the defaults; reversed bounds are swapped.
    fn from(c: &ObstacleColorConfig) -> Self {
        let d = ObstacleColorConfig::default();
        let or = |v: f32, fallback: f32| if v.is_finite() { v } else { fallback };
        let ordered = |a: f32, b: f32| if a <= b { (a, b) } else { (b, a) };
        Self {
            hue: ordered(or(c.hue_min, d.hue_min), or(c.hue_max, d.hue_max)),
            value: ordered(
                or(c.value_min, d.value_min).clamp(0.0, 1.0),
                or(c.value_max, d.value_max).clamp(0.0, 1.0),
            ),
            scored: Color::srgb(c.scored[0], c.scored[1], c.scored[2]),
        }
    }
}

impl ObstacleStyle {
    /// Blue/violet range, full saturation.
    pub fn random_color<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
        let hue = rng.gen_range(self.hue.0..=self.hue.1);
        let value = rng.gen_range(self.value.0..=self.value.1);
        Color::hsv(hue, 1.0, value)
    }
}

pub fn generate_obstacle_fields(
    mut commands: Commands,
    mut fields: Query<(Entity, &mut ObstacleField), Added<ObstacleField>>,
    boards: Query<(), With<ScoreBoard>>,
    mut rng: ResMut<ObstacleRng>,
    style: Res<ObstacleStyle>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (field_entity, mut field) in &mut fields {
        let (prototype, board) = match field.resolve(&boards) {
            Ok(resolved) => resolved,
            Err(e) => {
                error!(field = ?field_entity, "{e}; skipping obstacle generation");
                continue;
            }
        };

        commands.set_max_score(board, field.obstacle_count);

        let he = prototype.half_extents;
        let mut spawned = Vec::with_capacity(field.obstacle_count as usize);
        for i in 0..field.obstacle_count {
            let position = field.annulus.sample(&mut rng.0, field.origin);
            let material = materials.add(style.random_color(&mut rng.0));
            let id = commands
                .spawn((
                    Name::new(format!("Obstacle {i}")),
                    Obstacle,
                    ObstacleReaction::new(Some(board)),
                    Mesh3d(prototype.mesh.clone()),
                    MeshMaterial3d(material),
                    Transform::from_translation(position),
                    RigidBody::Fixed,
                    Collider::cuboid(he.x, he.y, he.z),
                    ActiveEvents::COLLISION_EVENTS,
                ))
                .id();
            spawned.push(id);
        }
        info!(
            field = ?field_entity,
            count = spawned.len(),
            inner = field.annulus.inner(),
            outer = field.annulus.outer(),
            "obstacle field generated"
        );
        field.obstacles = spawned;
    }
}

pub struct ObstacleFieldPlugin;

impl Plugin for ObstacleFieldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ObstacleRng>()
            .init_resource::<ObstacleStyle>()
            .add_systems(Update, generate_obstacle_fields.in_set(BumperSet::Wiring));
    }
}
