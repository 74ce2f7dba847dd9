//! Central system ordering labels to make the per-frame sequence explicit.
//! 1. Input (sample devices into `PlayerInput`)
//! 2. Movement (player + follower transforms)
//! 3. Wiring (first-frame setup of fields and displays)
//! 4. Scoring (contact events from the previous physics step)
//! Physics itself runs in `PostUpdate` (handled by the Rapier plugin).
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum BumperSet {
    Input,
    Movement,
    Wiring,
    Scoring,
}

pub fn configure_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            BumperSet::Input,
            BumperSet::Movement,
            BumperSet::Wiring,
            BumperSet::Scoring,
        )
            .chain(),
    );
}
