pub mod auto_close;
pub mod camera;
pub mod config;
pub mod error;
pub mod follower;
pub mod game;
pub mod obstacle_field;
pub mod obstacle_reaction;
pub mod physics;
pub mod player;
pub mod scene;
pub mod score;
pub mod score_display;
pub mod system_order;

// Curated re-exports
pub use config::BumperConfig;
pub use error::BumperError;
pub use game::{BumperCorePlugin, GamePlugin};
pub use score::{ScoreBoard, ScoreCommandsExt};
