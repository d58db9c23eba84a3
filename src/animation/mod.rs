//! Animation module - the parameter-driven animator gameplay code talks to.

mod animator;
mod library;
mod playback;
mod plugin;

pub use animator::*;
pub use library::*;
pub use playback::{AnimationLink, CharacterAnimations, NeedsAnimationSetup, PlayedClip};
pub use plugin::AnimationPlugin;
