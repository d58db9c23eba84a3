//! Player-related components.

use bevy::prelude::*;
use serde::Deserialize;

use crate::combat::AttackState;
use crate::core::load_or_default;

/// Where the locomotion tuning lives on disk.
pub const PLAYER_CONFIG_PATH: &str = "assets/data/player/controller.ron";

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Movement state shared with the combo system and the camera rig.
#[derive(Component, Debug, Clone, Default)]
pub struct Locomotion {
    /// Set by the combo system; halves movement speed while true
    pub attacking: bool,
    pub is_grounded: bool,
    pub vertical_velocity: f32,
    /// Ground speed chosen this frame (units per second)
    pub current_speed: f32,
    /// Horizontal velocity applied this frame
    pub velocity: Vec3,
}

impl AttackState for Locomotion {
    fn set_attacking(&mut self, attacking: bool) {
        self.attacking = attacking;
    }
}

/// Locomotion tuning, loaded from assets/data/player/controller.ron.
#[derive(Resource, Clone, Debug, Deserialize)]
pub struct PlayerConfig {
    /// Forward and strafe speed in units per second
    pub walk_speed: f32,
    pub walk_backwards_speed: f32,
    pub sprint_speed: f32,
    /// Vertical acceleration (negative is down)
    pub gravity: f32,
    /// Speed multiplier while an ability is playing
    pub attack_speed_modifier: f32,
    /// Downward velocity held while grounded so the controller stays snapped
    pub ground_stick_velocity: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            walk_backwards_speed: 3.0,
            sprint_speed: 10.0,
            gravity: -10.0,
            attack_speed_modifier: 0.5,
            ground_stick_velocity: -2.0,
        }
    }
}

/// Read the locomotion config at startup.
pub fn load_player_config(mut commands: Commands) {
    commands.insert_resource(load_or_default::<PlayerConfig>(PLAYER_CONFIG_PATH));
}
