use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;

use crate::error::BumperError;
use crate::obstacle_field::ObstacleStyle;
use crate::player::Player;
use crate::score::ScoreCommandsExt;
use crate::system_order::BumperSet;

#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Obstacle;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ReactionState {
    #[default]
    Unscored,
    /// Terminal.
    Scored,
}

/// Per-obstacle scoring state plus the (non-owning) link to the board it scores on.
#[derive(Component, Debug, Clone, Copy)]
pub struct ObstacleReaction {
    board: Option<Entity>,
    state: ReactionState,
}

impl ObstacleReaction {
    pub fn new(board: Option<Entity>) -> Self {
        Self {
            board,
            state: ReactionState::Unscored,
        }
    }

    pub fn board(&self) -> Option<Entity> {
        self.board
    }

    pub fn state(&self) -> ReactionState {
        self.state
    }

    pub fn is_scored(&self) -> bool {
        self.state == ReactionState::Scored
    }

    /// Returns `true` only for the contact that moves `Unscored -> Scored`.
    pub fn register_player_contact(&mut self) -> bool {
        match self.state {
            ReactionState::Unscored => {
                self.state = ReactionState::Scored;
                true
            }
            ReactionState::Scored => false,
        }
    }
}

/// Report obstacles that were spawned without a board link.
pub fn report_unlinked_obstacles(q: Query<(Entity, &ObstacleReaction), Added<ObstacleReaction>>) {
    for (entity, reaction) in &q {
        if reaction.board.is_none() {
            error!(
                obstacle = ?entity,
                "{}; contacts will not score",
                BumperError::missing("ObstacleReaction", "score board")
            );
        }
    }
}

/// Pick the (player, obstacle) pair out of a contact, in either order.
fn player_obstacle_pair(
    a: Entity,
    b: Entity,
    players: &Query<(), With<Player>>,
    obstacles: &Query<(), With<ObstacleReaction>>,
) -> Option<(Entity, Entity)> {
    if players.contains(a) && obstacles.contains(b) {
        Some((a, b))
    } else if players.contains(b) && obstacles.contains(a) {
        Some((b, a))
    } else {
        None
    }
}

pub fn react_to_player_contacts(
    mut commands: Commands,
    mut collisions: EventReader<CollisionEvent>,
    players: Query<(), With<Player>>,
    is_obstacle: Query<(), With<ObstacleReaction>>,
    mut obstacles: Query<(
        &mut ObstacleReaction,
        Option<&MeshMaterial3d<StandardMaterial>>,
        Option<&Name>,
    )>,
    mut materials: Option<ResMut<Assets<StandardMaterial>>>,
    style: Res<ObstacleStyle>,
) {
    for ev in collisions.read() {
        let CollisionEvent::Started(e1, e2, _flags) = ev else {
            continue;
        };
        let Some((player, obstacle)) = player_obstacle_pair(*e1, *e2, &players, &is_obstacle)
        else {
            continue;
        };
        let Ok((mut reaction, material, name)) = obstacles.get_mut(obstacle) else {
            continue;
        };
        if !reaction.register_player_contact() {
            continue;
        }

        info!(
            ?player,
            ?obstacle,
            "There is a collision between Player and {}",
            name.map(Name::as_str).unwrap_or("an unnamed obstacle")
        );

        if let (Some(handle), Some(materials)) = (material, materials.as_mut()) {
            if let Some(mat) = materials.get_mut(&handle.0) {
                mat.base_color = style.scored;
            }
        }

        if let Some(board) = reaction.board {
            commands.increment_score(board);
        }
    }
}

pub struct ObstacleReactionPlugin;

impl Plugin for ObstacleReactionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CollisionEvent>()
            .init_resource::<ObstacleStyle>()
            .add_systems(
                Update,
                (report_unlinked_obstacles, react_to_player_contacts)
                    .chain()
                    .in_set(BumperSet::Scoring),
            );
    }
}
