//! Combo Brawler - Entry Point
//!
//! Controls:
//! - WASD: Move (camera relative)
//! - Mouse: Orbit camera
//! - Shift: Sprint
//! - C: Draw/sheathe weapon
//! - Left/Right mouse (hold): Primary/secondary combo, changed by Shift, W or S
//! - E, F, Q, R: Abilities (Shift/W/S + key for variants)
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Combo Brawler".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        // Our game plugin
        .add_plugins(combo_brawler::ComboBrawlerPlugin)

        .run();
}
