//! Animation library loaded from RON.
//!
//! Maps animator states to clip indices inside the character's glTF file and
//! gives every one-shot action its playback length.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;

use crate::core::load_or_default;

/// Where the animation library lives on disk.
pub const ANIMATION_LIBRARY_PATH: &str = "assets/data/player/animations.ron";

/// Looping locomotion clip indices.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct LocomotionClips {
    pub idle: usize,
    pub walk: usize,
    pub run: usize,
    pub walk_back: usize,
    pub strafe_left: usize,
    pub strafe_right: usize,
}

/// A one-shot clip started by an animator trigger.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ActionClip {
    pub clip: usize,
    /// Seconds the action counts as playing
    pub duration: f32,
}

/// Clip table for the player character.
#[derive(Resource, Deserialize, Clone, Debug)]
pub struct AnimationLibrary {
    /// glTF file holding the clips (empty = capsule stand-in, no playback)
    #[serde(default)]
    pub model_path: String,
    #[serde(default = "default_model_scale")]
    pub model_scale: f32,
    pub locomotion: LocomotionClips,
    /// Above this `Speed` the run clip replaces the walk clip
    pub run_threshold: f32,
    pub actions: HashMap<String, ActionClip>,
}

fn default_model_scale() -> f32 {
    1.0
}

impl AnimationLibrary {
    pub fn action(&self, trigger: &str) -> Option<&ActionClip> {
        self.actions.get(trigger)
    }
}

impl Default for AnimationLibrary {
    fn default() -> Self {
        let actions = [
            ("drawWeapon", 0.6),
            ("unequipWeapon", 0.6),
            ("Attack1", 0.7),
            ("Attack2", 0.7),
            ("Attack3", 1.0),
            ("GuardBreak", 0.9),
            ("HeavySwing1", 1.0),
            ("HeavySwing2", 1.3),
            ("Kick", 0.6),
            ("Whirlwind", 1.5),
            ("RisingSlash", 0.9),
            ("ShoulderCharge", 1.1),
            ("GroundSlam", 1.4),
            ("LeapingStrike", 1.6),
            ("DashStrike", 0.8),
            ("SpinHeavy", 1.2),
            ("Lunge1", 0.8),
            ("Lunge2", 0.8),
            ("Overhead", 1.1),
            ("FlyingKick", 1.2),
            ("BackSlash", 0.8),
            ("Parry", 0.7),
            ("RollStrike", 1.1),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (name, duration))| (name.to_string(), ActionClip { clip: 6 + i, duration }))
        .collect();

        Self {
            model_path: String::new(),
            model_scale: 1.0,
            locomotion: LocomotionClips {
                idle: 0,
                walk: 1,
                run: 2,
                walk_back: 3,
                strafe_left: 4,
                strafe_right: 5,
            },
            run_threshold: 7.5,
            actions,
        }
    }
}

/// Read the animation library at startup.
pub fn load_animation_library(mut commands: Commands) {
    let library: AnimationLibrary = load_or_default(ANIMATION_LIBRARY_PATH);
    info!("Animation library has {} actions", library.actions.len());
    commands.insert_resource(library);
}
