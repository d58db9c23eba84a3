//! Core game module - states, data loading, and smoothing helpers.
//!
//! This module provides the foundation that all other game systems build upon.

mod config;
mod plugin;
mod states;
mod tween;

pub use config::*;
pub use plugin::CorePlugin;
pub use states::*;
pub use tween::*;
