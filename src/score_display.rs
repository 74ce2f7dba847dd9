use bevy::prelude::*;

use crate::error::BumperError;
use crate::score::{MaxScoreChanged, ScoreBoard, ScoreChanged, ScoreChannel};
use crate::system_order::BumperSet;

/// HUD text bound to a score board. Rendered as `"{score} / {max}"`.
#[derive(Component, Debug, Clone, Copy)]
pub struct ScoreDisplay {
    pub board: Option<Entity>,
}

impl ScoreDisplay {
    pub fn new(board: Option<Entity>) -> Self {
        Self { board }
    }
}

/// First frame of a display: render the current values and subscribe to both channels.
pub fn init_score_displays(
    mut displays: Query<(Entity, &ScoreDisplay, &mut Text), Added<ScoreDisplay>>,
    mut boards: Query<&mut ScoreBoard>,
) {
    for (entity, display, mut text) in &mut displays {
        let linked = match display.board {
            Some(b) => boards.get_mut(b).ok(),
            None => None,
        };
        let Some(mut board) = linked else {
            error!(display = ?entity, "{}", BumperError::missing("ScoreDisplay", "score board"));
            continue;
        };
        text.0 = board.label();
        board.subscribe(ScoreChannel::Score, entity);
        board.subscribe(ScoreChannel::MaxScore, entity);
    }
}

/// Re-render from the board's current values; the trigger payload is ignored.
fn refresh(
    target: Entity,
    boards: &Query<&ScoreBoard>,
    displays: &mut Query<(&ScoreDisplay, &mut Text)>,
) {
    let Ok((display, mut text)) = displays.get_mut(target) else {
        return;
    };
    let Some(board) = display.board.and_then(|b| boards.get(b).ok()) else {
        return;
    };
    text.0 = board.label();
}

fn on_score_changed(
    trigger: Trigger<ScoreChanged>,
    boards: Query<&ScoreBoard>,
    mut displays: Query<(&ScoreDisplay, &mut Text)>,
) {
    refresh(trigger.target(), &boards, &mut displays);
}

fn on_max_score_changed(
    trigger: Trigger<MaxScoreChanged>,
    boards: Query<&ScoreBoard>,
    mut displays: Query<(&ScoreDisplay, &mut Text)>,
) {
    refresh(trigger.target(), &boards, &mut displays);
}

pub struct ScoreDisplayPlugin;

impl Plugin for ScoreDisplayPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(on_score_changed)
            .add_observer(on_max_score_changed)
            .add_systems(Update, init_score_displays.in_set(BumperSet::Wiring));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::{increment_score, set_max_score};

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_plugins(ScoreDisplayPlugin);
        app
    }

    fn text(app: &App, e: Entity) -> String {
        app.world().get::<Text>(e).unwrap().0.clone()
    }

    #[test]
    fn renders_initial_values_and_follows_changes() {
        let mut app = app();
        let board = app.world_mut().spawn(ScoreBoard::default()).id();
        let label = app
            .world_mut()
            .spawn((ScoreDisplay::new(Some(board)), Text::new("")))
            .id();
        app.update();
        assert_eq!(text(&app, label), "0 / 0");

        set_max_score(app.world_mut(), board, 25);
        assert_eq!(text(&app, label), "0 / 25");
        increment_score(app.world_mut(), board);
        assert_eq!(text(&app, label), "1 / 25");

        let sb = app.world().get::<ScoreBoard>(board).unwrap();
        assert_eq!(sb.subscribers(ScoreChannel::Score), &[label]);
        assert_eq!(sb.subscribers(ScoreChannel::MaxScore), &[label]);
    }

    #[test]
    fn initial_render_reads_existing_values() {
        let mut app = app();
        let board = app.world_mut().spawn(ScoreBoard::default()).id();
        set_max_score(app.world_mut(), board, 4);
        increment_score(app.world_mut(), board);
        let label = app
            .world_mut()
            .spawn((ScoreDisplay::new(Some(board)), Text::new("")))
            .id();
        app.update();
        assert_eq!(text(&app, label), "1 / 4");
    }

    #[test]
    fn displays_only_follow_their_own_board() {
        let mut app = app();
        let a = app.world_mut().spawn(ScoreBoard::default()).id();
        let b = app.world_mut().spawn(ScoreBoard::default()).id();
        let la = app.world_mut().spawn((ScoreDisplay::new(Some(a)), Text::new(""))).id();
        let lb = app.world_mut().spawn((ScoreDisplay::new(Some(b)), Text::new(""))).id();
        app.update();
        set_max_score(app.world_mut(), a, 2);
        increment_score(app.world_mut(), a);
        assert_eq!(text(&app, la), "1 / 2");
        assert_eq!(text(&app, lb), "0 / 0");
    }

    #[test]
    fn label_ignores_notification_payload() {
        let mut app = app();
        let board = app.world_mut().spawn(ScoreBoard::default()).id();
        let label = app.world_mut().spawn((ScoreDisplay::new(Some(board)), Text::new(""))).id();
        app.update();
        set_max_score(app.world_mut(), board, 9);
        increment_score(app.world_mut(), board);
        increment_score(app.world_mut(), board);

        // Stale values in the event must not leak into the label.
        app.world_mut().trigger_targets(ScoreChanged { board, score: 0 }, label);
        assert_eq!(text(&app, label), "2 / 9");
        app.world_mut()
            .trigger_targets(MaxScoreChanged { board, max_score: 1 }, label);
        assert_eq!(text(&app, label), "2 / 9");
    }

    #[test]
    fn missing_board_leaves_text_untouched() {
        let mut app = app();
        let label = app
            .world_mut()
            .spawn((ScoreDisplay::new(None), Text::new("--")))
            .id();
        app.update();
        assert_eq!(text(&app, label), "--");
    }
}
