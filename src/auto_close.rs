//! Ends the session after `window.autoClose` seconds. Zero or negative keeps the window open.

use bevy::prelude::*;

use crate::config::BumperConfig;

/// Remaining session time; only present when a limit is configured.
#[derive(Resource, Deref, DerefMut)]
struct SessionLimit(Timer);

pub struct AutoClosePlugin;

impl Plugin for AutoClosePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, arm_session_limit).add_systems(
            Update,
            end_session_when_expired.run_if(resource_exists::<SessionLimit>),
        );
    }
}

fn arm_session_limit(mut commands: Commands, cfg: Option<Res<BumperConfig>>) {
    let Some(secs) = cfg.map(|c| c.window.auto_close).filter(|s| *s > 0.0) else {
        return;
    };
    info!(seconds = secs, "session limit armed");
    commands.insert_resource(SessionLimit(Timer::from_seconds(secs, TimerMode::Once)));
}

fn end_session_when_expired(
    time: Res<Time>,
    mut limit: ResMut<SessionLimit>,
    mut exit: EventWriter<AppExit>,
) {
    if limit.tick(time.delta()).just_finished() {
        info!("session limit reached, exiting");
        exit.write(AppExit::Success);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    fn app(auto_close: f32) -> App {
        let mut cfg = BumperConfig::default();
        cfg.window.auto_close = auto_close;
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
            .insert_resource(cfg)
            .add_plugins(AutoClosePlugin);
        app
    }

    #[test]
    fn exits_after_configured_delay() {
        let mut app = app(0.25);
        let mut exit = None;
        let mut frames = 0;
        while exit.is_none() && frames < 10 {
            app.update();
            frames += 1;
            exit = app.should_exit();
        }
        assert_eq!(exit, Some(AppExit::Success));
        assert!(frames >= 3, "exited too early, after {frames} frames");
    }

    #[test]
    fn zero_disables() {
        let mut app = app(0.0);
        for _ in 0..10 {
            app.update();
        }
        assert_eq!(app.should_exit(), None);
    }
}
