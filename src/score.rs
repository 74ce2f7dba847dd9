//! Score board: current/max counters plus ordered subscriber lists.
//!
//! A board lives on its own entity; consumers hold that `Entity` as an explicit
//! link instead of reaching for a global resource. Mutations are queued as
//! commands and applied with exclusive world access: the counter is updated
//! first, then every subscriber receives an entity-targeted trigger in the
//! order it subscribed. Observers reading the board inside the callback always
//! see the post-mutation value.

use bevy::prelude::*;

use crate::error::BumperError;

/// Which notification list a subscriber joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreChannel {
    Score,
    MaxScore,
}

#[derive(Component, Debug, Default, Clone)]
pub struct ScoreBoard {
    score: u32,
    max_score: u32,
    score_subscribers: Vec<Entity>,
    max_score_subscribers: Vec<Entity>,
}

impl ScoreBoard {
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    /// Register `subscriber` for `channel`. Re-subscribing keeps the original position.
    pub fn subscribe(&mut self, channel: ScoreChannel, subscriber: Entity) {
        let list = self.list_mut(channel);
        if !list.contains(&subscriber) {
            list.push(subscriber);
        }
    }

    pub fn unsubscribe(&mut self, channel: ScoreChannel, subscriber: Entity) {
        self.list_mut(channel).retain(|&e| e != subscriber);
    }

    pub fn subscribers(&self, channel: ScoreChannel) -> &[Entity] {
        match channel {
            ScoreChannel::Score => &self.score_subscribers,
            ScoreChannel::MaxScore => &self.max_score_subscribers,
        }
    }

    fn list_mut(&mut self, channel: ScoreChannel) -> &mut Vec<Entity> {
        match channel {
            ScoreChannel::Score => &mut self.score_subscribers,
            ScoreChannel::MaxScore => &mut self.max_score_subscribers,
        }
    }

    /// Display form used by the HUD.
    pub fn label(&self) -> String {
        format!("{} / {}", self.score, self.max_score)
    }
}

/// Delivered to each score subscriber after `score` changed.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreChanged {
    pub board: Entity,
    pub score: u32,
}

/// Delivered to each max-score subscriber after `max_score` changed.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxScoreChanged {
    pub board: Entity,
    pub max_score: u32,
}

/// Add one point to `board` and notify its score subscribers.
/// Returns the new score, or `None` if `board` carries no [`ScoreBoard`].
pub fn increment_score(world: &mut World, board: Entity) -> Option<u32> {
    let Some(mut sb) = world.get_mut::<ScoreBoard>(board) else {
        error!(?board, "{}", BumperError::missing("ScoreBoard", "score board on target entity"));
        return None;
    };
    sb.score = sb.score.saturating_add(1);
    let score = sb.score;
    let subscribers = sb.score_subscribers.clone();
    debug!(?board, score, subscribers = subscribers.len(), "score incremented");
    for subscriber in subscribers {
        if world.entities().contains(subscriber) {
            world.trigger_targets(ScoreChanged { board, score }, subscriber);
        }
    }
    Some(score)
}

/// Set the max score of `board` and notify its max-score subscribers.
pub fn set_max_score(world: &mut World, board: Entity, max_score: u32) -> Option<u32> {
    let Some(mut sb) = world.get_mut::<ScoreBoard>(board) else {
        error!(?board, "{}", BumperError::missing("ScoreBoard", "score board on target entity"));
        return None;
    };
    sb.max_score = max_score;
    let subscribers = sb.max_score_subscribers.clone();
    debug!(?board, max_score, subscribers = subscribers.len(), "max score set");
    for subscriber in subscribers {
        if world.entities().contains(subscriber) {
            world.trigger_targets(MaxScoreChanged { board, max_score }, subscriber);
        }
    }
    Some(max_score)
}

/// Queue score mutations from ordinary systems.
pub trait ScoreCommandsExt {
    fn increment_score(&mut self, board: Entity);
    fn set_max_score(&mut self, board: Entity, max_score: u32);
}

impl ScoreCommandsExt for Commands<'_, '_> {
    fn increment_score(&mut self, board: Entity) {
        self.queue(move |world: &mut World| {
            increment_score(world, board);
        });
    }

    fn set_max_score(&mut self, board: Entity, max_score: u32) {
        self.queue(move |world: &mut World| {
            set_max_score(world, board, max_score);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Resource, Default)]
    struct Seen(Vec<(Entity, &'static str, u32, u32)>);

    fn record_score(
        trigger: Trigger<ScoreChanged>,
        boards: Query<&ScoreBoard>,
        mut seen: ResMut<Seen>,
    ) {
        let ev = trigger.event();
        let current = boards.get(ev.board).map(|b| b.score()).unwrap_or(u32::MAX);
        seen.0.push((trigger.target(), "score", ev.score, current));
    }

    fn record_max(
        trigger: Trigger<MaxScoreChanged>,
        boards: Query<&ScoreBoard>,
        mut seen: ResMut<Seen>,
    ) {
        let ev = trigger.event();
        let current = boards.get(ev.board).map(|b| b.max_score()).unwrap_or(u32::MAX);
        seen.0.push((trigger.target(), "max", ev.max_score, current));
    }

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<Seen>()
            .add_observer(record_score)
            .add_observer(record_max);
        app
    }

    #[test]
    fn subscribe_ignores_duplicates_and_unsubscribe_removes() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        let mut board = ScoreBoard::default();
        board.subscribe(ScoreChannel::Score, a);
        board.subscribe(ScoreChannel::Score, b);
        board.subscribe(ScoreChannel::Score, a);
        assert_eq!(board.subscribers(ScoreChannel::Score), &[a, b]);
        assert!(board.subscribers(ScoreChannel::MaxScore).is_empty());
        board.unsubscribe(ScoreChannel::Score, a);
        assert_eq!(board.subscribers(ScoreChannel::Score), &[b]);
    }

    #[test]
    fn notification_sees_post_mutation_value() {
        let mut app = app();
        let sub = app.world_mut().spawn_empty().id();
        let mut sb = ScoreBoard::default();
        sb.subscribe(ScoreChannel::Score, sub);
        sb.subscribe(ScoreChannel::MaxScore, sub);
        let board = app.world_mut().spawn(sb).id();

        set_max_score(app.world_mut(), board, 25);
        increment_score(app.world_mut(), board);
        increment_score(app.world_mut(), board);

        let seen = &app.world().resource::<Seen>().0;
        assert_eq!(
            seen,
            &vec![
                (sub, "max", 25, 25),
                (sub, "score", 1, 1),
                (sub, "score", 2, 2),
            ]
        );
    }

    #[test]
    fn subscribers_notified_in_registration_order() {
        let mut app = app();
        let first = app.world_mut().spawn_empty().id();
        let second = app.world_mut().spawn_empty().id();
        let third = app.world_mut().spawn_empty().id();
        let mut sb = ScoreBoard::default();
        // registration order deliberately differs from spawn order
        sb.subscribe(ScoreChannel::Score, third);
        sb.subscribe(ScoreChannel::Score, first);
        sb.subscribe(ScoreChannel::Score, second);
        let board = app.world_mut().spawn(sb).id();

        increment_score(app.world_mut(), board);

        let order: Vec<Entity> = app.world().resource::<Seen>().0.iter().map(|s| s.0).collect();
        assert_eq!(order, vec![third, first, second]);
    }

    #[test]
    fn commands_apply_on_update() {
        let mut app = app();
        let board = app.world_mut().spawn(ScoreBoard::default()).id();
        app.add_systems(Update, move |mut commands: Commands| {
            commands.set_max_score(board, 3);
            commands.increment_score(board);
        });
        app.update();
        let sb = app.world().get::<ScoreBoard>(board).unwrap();
        assert_eq!((sb.score(), sb.max_score()), (1, 3));
        assert_eq!(sb.label(), "1 / 3");
    }

    #[test]
    fn missing_board_is_noop() {
        let mut app = app();
        let not_a_board = app.world_mut().spawn_empty().id();
        assert_eq!(increment_score(app.world_mut(), not_a_board), None);
        assert_eq!(set_max_score(app.world_mut(), not_a_board, 4), None);
        assert!(app.world().resource::<Seen>().0.is_empty());
    }

    #[test]
    fn despawned_subscriber_is_skipped() {
        let mut app = app();
        let gone = app.world_mut().spawn_empty().id();
        let alive = app.world_mut().spawn_empty().id();
        let mut sb = ScoreBoard::default();
        sb.subscribe(ScoreChannel::Score, gone);
        sb.subscribe(ScoreChannel::Score, alive);
        let board = app.world_mut().spawn(sb).id();
        app.world_mut().despawn(gone);

        assert_eq!(increment_score(app.world_mut(), board), Some(1));
        let seen = &app.world().resource::<Seen>().0;
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, alive);
    }
}
