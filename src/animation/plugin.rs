//! Animation plugin - character animator and clip playback.

use bevy::prelude::*;

use super::animator::update_character_animators;
use super::library::load_animation_library;
use super::playback::{play_character_animations, setup_character_animations};
use crate::combat::ComboSet;
use crate::core::GameState;

/// Animation plugin - runs animators after combo input has been resolved.
pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_animation_library).add_systems(
            Update,
            (
                update_character_animators,
                setup_character_animations,
                play_character_animations,
            )
                .chain()
                .in_set(ComboSet::Animate)
                .run_if(in_state(GameState::InGame)),
        );
    }
}
