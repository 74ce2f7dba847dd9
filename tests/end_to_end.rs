use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;
use bevy_rapier3d::rapier::geometry::CollisionEventFlags;

use bumper::obstacle_field::{ObstacleField, ObstacleRng};
use bumper::obstacle_reaction::ObstacleReaction;
use bumper::scene::{SceneEntities, ScenePlugin};
use bumper::{BumperConfig, BumperCorePlugin, ScoreBoard};

fn headless(cfg: BumperConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .init_resource::<Assets<Mesh>>()
        .init_resource::<Assets<StandardMaterial>>()
        .insert_resource(ObstacleRng::seeded(42))
        .insert_resource(cfg)
        .add_plugins((BumperCorePlugin, ScenePlugin));
    // Startup wiring, then field generation and the first HUD render.
    app.update();
    app.update();
    app
}

fn scene(app: &App) -> SceneEntities {
    *app.world().resource::<SceneEntities>()
}

fn label(app: &App) -> String {
    let display = scene(app).display;
    app.world().get::<Text>(display).expect("score label").0.clone()
}

fn obstacles(app: &App) -> Vec<Entity> {
    let field = scene(app).field;
    app.world().get::<ObstacleField>(field).expect("field").obstacles.clone()
}

fn touch(app: &mut App, player: Entity, obstacle: Entity) {
    app.world_mut().send_event(CollisionEvent::Started(
        player,
        obstacle,
        CollisionEventFlags::empty(),
    ));
    app.update();
}

#[test]
fn fresh_scene_shows_zero_of_obstacle_count() {
    let app = headless(BumperConfig::default());
    let obstacles = obstacles(&app);
    assert_eq!(obstacles.len(), 25);
    assert_eq!(label(&app), "0 / 25");

    let board = app.world().get::<ScoreBoard>(scene(&app).board).unwrap();
    assert_eq!(board.max_score(), 25);
    for o in obstacles {
        let pos = app.world().get::<Transform>(o).unwrap().translation;
        let d = Vec2::new(pos.x, pos.z).length();
        assert!((5.0 - 1e-3..=50.0 + 1e-3).contains(&d), "distance {d} outside ring");
        assert!((pos.y - 0.5).abs() < 1e-5);
    }
}

#[test]
fn three_first_contacts_score_three() {
    let mut app = headless(BumperConfig::default());
    let player = scene(&app).player;
    let obstacles = obstacles(&app);
    for &o in &obstacles[..3] {
        touch(&mut app, player, o);
    }
    assert_eq!(label(&app), "3 / 25");

    // Bumping an already scored obstacle again changes nothing.
    touch(&mut app, obstacles[1], player);
    assert_eq!(label(&app), "3 / 25");
    let scored = obstacles
        .iter()
        .filter(|&&o| app.world().get::<ObstacleReaction>(o).unwrap().is_scored())
        .count();
    assert_eq!(scored, 3);
}

#[test]
fn empty_field_shows_zero_of_zero() {
    let mut cfg = BumperConfig::default();
    cfg.field.obstacle_count = 0;
    let app = headless(cfg);
    assert!(obstacles(&app).is_empty());
    assert_eq!(label(&app), "0 / 0");
}

#[test]
fn follower_is_optional() {
    let mut cfg = BumperConfig::default();
    cfg.follower.enabled = false;
    let app = headless(cfg);
    assert!(scene(&app).follower.is_none());

    let app = headless(BumperConfig::default());
    assert!(scene(&app).follower.is_some());
}

#[test]
fn infinite_radius_config_still_generates() {
    let mut cfg = BumperConfig::default();
    cfg.field.outer_radius = f32::INFINITY;
    cfg.colors.hue_max = f32::NAN;
    assert!(!cfg.validate().is_empty());

    let app = headless(cfg);
    let obstacles = obstacles(&app);
    assert_eq!(obstacles.len(), 25);
    assert_eq!(label(&app), "0 / 25");
    for o in obstacles {
        let pos = app.world().get::<Transform>(o).unwrap().translation;
        assert!(pos.is_finite());
        assert!(Vec2::new(pos.x, pos.z).length() <= 5.0 + 1e-3);
    }
}
