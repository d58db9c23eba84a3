//! Parameter-driven character animator.
//!
//! Gameplay code talks to the animator through triggers, bools and floats.
//! Once per frame [`CharacterAnimator::update`] consumes pending triggers,
//! counts down the current one-shot action and picks a locomotion clip from
//! the `Speed` and `Direction` floats. Clip playback is a separate system that
//! mirrors [`CharacterAnimator::clip`] onto Bevy's `AnimationPlayer`.

use bevy::prelude::*;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use super::library::AnimationLibrary;
use crate::combat::AnimationDriver;

/// Float parameter holding the character's current ground speed.
pub const SPEED_PARAM: &str = "Speed";
/// Float parameter: 0 forward, ±5 strafing, -15 walking backwards.
pub const DIRECTION_PARAM: &str = "Direction";

/// Looping movement clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LocomotionClip {
    #[default]
    Idle,
    Walk,
    Run,
    WalkBack,
    StrafeLeft,
    StrafeRight,
}

impl LocomotionClip {
    /// Blend selection from the locomotion floats.
    pub fn from_params(speed: f32, direction: f32, run_threshold: f32) -> Self {
        if speed < 0.1 {
            LocomotionClip::Idle
        } else if direction <= -10.0 {
            LocomotionClip::WalkBack
        } else if direction > 0.0 {
            LocomotionClip::StrafeRight
        } else if direction < 0.0 {
            LocomotionClip::StrafeLeft
        } else if speed > run_threshold {
            LocomotionClip::Run
        } else {
            LocomotionClip::Walk
        }
    }
}

/// What the character is visibly playing.
#[derive(Debug, Clone, PartialEq)]
pub enum AnimatorClip {
    Locomotion(LocomotionClip),
    Action(String),
}

#[derive(Debug, Clone)]
struct PlayingAction {
    name: String,
    timer: Timer,
}

/// Animator state for one character.
#[derive(Component, Debug, Clone, Default)]
pub struct CharacterAnimator {
    pending: VecDeque<String>,
    bools: HashMap<String, bool>,
    floats: HashMap<String, f32>,
    action: Option<PlayingAction>,
    locomotion: LocomotionClip,
}

impl CharacterAnimator {
    /// Advance one frame.
    pub fn update(&mut self, delta: Duration, library: &AnimationLibrary) {
        if let Some(action) = self.action.as_mut() {
            if action.timer.tick(delta).finished() {
                self.action = None;
            }
        }

        while let Some(trigger) = self.pending.pop_front() {
            match library.action(&trigger) {
                Some(clip) => {
                    self.action = Some(PlayingAction {
                        name: trigger,
                        timer: Timer::from_seconds(clip.duration, TimerMode::Once),
                    });
                }
                None => warn!("Animator trigger '{}' has no clip, ignoring", trigger),
            }
        }

        self.locomotion = LocomotionClip::from_params(
            self.float(SPEED_PARAM),
            self.float(DIRECTION_PARAM),
            library.run_threshold,
        );
    }

    /// Currently visible clip: the one-shot action if any, else locomotion.
    pub fn clip(&self) -> AnimatorClip {
        match &self.action {
            Some(action) => AnimatorClip::Action(action.name.clone()),
            None => AnimatorClip::Locomotion(self.locomotion),
        }
    }

    pub fn current_action(&self) -> Option<&str> {
        self.action.as_ref().map(|action| action.name.as_str())
    }

    pub fn has_pending(&self, name: &str) -> bool {
        self.pending.iter().any(|trigger| trigger == name)
    }

    pub fn float(&self, name: &str) -> f32 {
        self.floats.get(name).copied().unwrap_or(0.0)
    }

}

impl AnimationDriver for CharacterAnimator {
    fn trigger(&mut self, name: &str) {
        if !self.has_pending(name) {
            self.pending.push_back(name.to_string());
        }
    }

    /// Withdraws the trigger and cuts the action short if it already started.
    fn reset_trigger(&mut self, name: &str) {
        self.pending.retain(|trigger| trigger != name);
        if self.current_action() == Some(name) {
            self.action = None;
        }
    }

    fn is_playing(&self, name: &str) -> bool {
        self.current_action() == Some(name)
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.floats.insert(name.to_string(), value);
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.bools.insert(name.to_string(), value);
    }
}

/// Advance every character animator by the frame delta.
pub fn update_character_animators(
    time: Res<Time>,
    library: Res<AnimationLibrary>,
    mut query: Query<&mut CharacterAnimator>,
) {
    for mut animator in query.iter_mut() {
        animator.update(time.delta(), &library);
    }
}
