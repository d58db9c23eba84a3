//! Combo Brawler - a third-person melee combo sandbox in Bevy.
//!
//! The heart of the game is the ability resolver: held and pressed inputs are
//! turned into combo steps with per-slot cooldowns, driving a
//! parameter-based character animator.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, RON data loading, smoothing helpers
//! - **Combat**: Ability table, input bindings, the resolver and its cooldowns
//! - **Animation**: Character animator parameters and clip playback
//! - **Player**: Camera-relative locomotion and the player entity
//! - **Camera**: Orbiting third-person follow camera
//! - **World**: Training arena
//! - **UI**: Ability bar and pause menu

pub mod animation;
pub mod camera;
pub mod combat;
pub mod core;
pub mod player;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct ComboBrawlerPlugin;

impl Plugin for ComboBrawlerPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Combo input, cooldowns and animation
            .add_plugins(combat::CombatPlugin)
            .add_plugins(animation::AnimationPlugin)

            // Player and camera
            .add_plugins(player::PlayerPlugin)
            .add_plugins(camera::CameraPlugin)

            // World systems
            .add_plugins(world::WorldPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
