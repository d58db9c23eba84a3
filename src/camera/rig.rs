//! Orbiting follow camera.
//!
//! Mouse motion orbits the camera around the player (yaw unbounded, pitch
//! clamped). Each frame the camera eases toward its orbit position, looks at
//! the player, and pulls in slightly while the player is moving.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use serde::Deserialize;

use crate::core::{approach, load_or_default, smooth_damp};
use crate::player::{Locomotion, Player};

/// Where the camera tuning lives on disk.
pub const CAMERA_CONFIG_PATH: &str = "assets/data/player/camera.ron";

/// Degrees of rotation per pixel of mouse motion, per unit of sensitivity.
const DEGREES_PER_PIXEL: f32 = 0.1;
/// Player speed above which the camera uses its moving distance.
const MOVING_SPEED_THRESHOLD: f32 = 0.1;

/// Camera tuning, loaded from assets/data/player/camera.ron.
#[derive(Resource, Clone, Debug, Deserialize)]
pub struct CameraConfig {
    pub mouse_sensitivity: f32,
    /// Seconds the follow spring takes to settle
    pub smooth_time: f32,
    /// Pitch limits in degrees (positive looks down on the player)
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub idle_distance: f32,
    pub moving_distance: f32,
    /// Starting camera position relative to the player
    pub initial_offset: (f32, f32, f32),
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 2.0,
            smooth_time: 0.1,
            min_pitch: -20.0,
            max_pitch: 45.0,
            idle_distance: 5.0,
            moving_distance: 4.0,
            initial_offset: (0.0, 2.0, 5.0),
        }
    }
}

impl CameraConfig {
    pub fn offset(&self) -> Vec3 {
        Vec3::new(self.initial_offset.0, self.initial_offset.1, self.initial_offset.2)
    }
}

/// Orbit state for the third-person camera.
#[derive(Component, Debug, Clone)]
pub struct ThirdPersonCamera {
    /// Degrees around the vertical axis
    pub yaw: f32,
    /// Degrees above (positive) or below the player
    pub pitch: f32,
    pub distance: f32,
    /// Unrotated offset from the player
    pub offset: Vec3,
    /// Follow spring velocity
    pub velocity: Vec3,
}

impl ThirdPersonCamera {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: config.idle_distance,
            offset: config.offset(),
            velocity: Vec3::ZERO,
        }
    }

    /// Apply accumulated mouse motion, clamping pitch.
    pub fn orbit(&mut self, delta: Vec2, config: &CameraConfig) {
        let scale = config.mouse_sensitivity * DEGREES_PER_PIXEL;
        self.yaw -= delta.x * scale;
        self.pitch = (self.pitch + delta.y * scale).clamp(config.min_pitch, config.max_pitch);
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw.to_radians(), -self.pitch.to_radians(), 0.0)
    }

    /// Where the camera wants to be for a player at `target`.
    pub fn desired_position(&self, target: Vec3) -> Vec3 {
        target + self.rotation() * self.offset
    }

    /// Ease the follow distance toward the idle or moving distance.
    pub fn ease_distance(&mut self, player_speed: f32, dt: f32, config: &CameraConfig) {
        let target = if player_speed > MOVING_SPEED_THRESHOLD {
            config.moving_distance
        } else {
            config.idle_distance
        };
        self.distance = approach(self.distance, target, dt);
        self.offset = self.offset.normalize_or_zero() * self.distance;
    }
}

/// Spawn the camera behind the player.
pub fn spawn_camera(commands: &mut Commands, config: &CameraConfig, player_position: Vec3) -> Entity {
    let rig = ThirdPersonCamera::new(config);
    let position = rig.desired_position(player_position);

    commands
        .spawn((
            Camera3d::default(),
            Transform::from_translation(position).looking_at(player_position, Vec3::Y),
            rig,
        ))
        .id()
}

/// Read the camera config at startup.
pub fn load_camera_config(mut commands: Commands) {
    commands.insert_resource(load_or_default::<CameraConfig>(CAMERA_CONFIG_PATH));
}

/// Accumulate mouse motion into yaw and pitch.
pub fn orbit_camera(
    mut mouse_motion: EventReader<MouseMotion>,
    config: Res<CameraConfig>,
    mut camera_query: Query<&mut ThirdPersonCamera>,
) {
    let delta: Vec2 = mouse_motion.read().map(|event| event.delta).sum();
    if delta == Vec2::ZERO {
        return;
    }

    for mut rig in camera_query.iter_mut() {
        rig.orbit(delta, &config);
    }
}

/// Move the camera toward its orbit position and aim it at the player.
pub fn follow_player(
    time: Res<Time>,
    config: Res<CameraConfig>,
    player_query: Query<(&Transform, &Locomotion), With<Player>>,
    mut camera_query: Query<(&mut Transform, &mut ThirdPersonCamera), Without<Player>>,
) {
    let Ok((player_transform, locomotion)) = player_query.get_single() else {
        return;
    };
    let Ok((mut transform, mut rig)) = camera_query.get_single_mut() else {
        return;
    };

    let dt = time.delta_secs();
    let target = player_transform.translation;
    let desired = rig.desired_position(target);
    let smooth_time = config.smooth_time;

    transform.translation = smooth_damp(transform.translation, desired, &mut rig.velocity, smooth_time, dt);
    transform.look_at(target, Vec3::Y);

    rig.ease_distance(locomotion.current_speed, dt, &config);
}

/// Grab and hide cursor when entering gameplay.
pub fn grab_cursor(mut window_query: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
    }
}

/// Release cursor when leaving gameplay.
pub fn release_cursor(mut window_query: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_is_clamped() {
        let config = CameraConfig::default();
        let mut rig = ThirdPersonCamera::new(&config);

        rig.orbit(Vec2::new(0.0, 10_000.0), &config);
        assert_eq!(rig.pitch, 45.0);

        rig.orbit(Vec2::new(0.0, -10_000.0), &config);
        assert_eq!(rig.pitch, -20.0);
    }

    #[test]
    fn yaw_is_unbounded() {
        let config = CameraConfig::default();
        let mut rig = ThirdPersonCamera::new(&config);

        rig.orbit(Vec2::new(-5_000.0, 0.0), &config);
        assert!((rig.yaw - 1_000.0).abs() < 1e-3);
    }

    #[test]
    fn level_camera_sits_at_offset() {
        let config = CameraConfig::default();
        let rig = ThirdPersonCamera::new(&config);

        let position = rig.desired_position(Vec3::new(1.0, 0.0, 1.0));
        assert!((position - Vec3::new(1.0, 2.0, 6.0)).length() < 1e-5);
    }

    #[test]
    fn positive_pitch_raises_camera() {
        let config = CameraConfig::default();
        let mut rig = ThirdPersonCamera::new(&config);
        let level = rig.desired_position(Vec3::ZERO);

        rig.pitch = 30.0;
        let raised = rig.desired_position(Vec3::ZERO);

        assert!(raised.y > level.y);
        assert!((raised.length() - level.length()).abs() < 1e-4);
    }

    #[test]
    fn mouse_right_swings_camera_left() {
        let config = CameraConfig::default();
        let mut rig = ThirdPersonCamera::new(&config);

        rig.orbit(Vec2::new(100.0, 0.0), &config);
        assert!(rig.desired_position(Vec3::ZERO).x < 0.0);
    }

    #[test]
    fn distance_pulls_in_while_moving() {
        let config = CameraConfig::default();
        let mut rig = ThirdPersonCamera::new(&config);

        for _ in 0..600 {
            rig.ease_distance(5.0, 1.0 / 60.0, &config);
        }
        assert!((rig.distance - config.moving_distance).abs() < 0.01);
        assert!((rig.offset.length() - rig.distance).abs() < 1e-4);

        for _ in 0..600 {
            rig.ease_distance(0.0, 1.0 / 60.0, &config);
        }
        assert!((rig.distance - config.idle_distance).abs() < 0.01);
    }

    #[test]
    fn shipped_config_parses() {
        let source = include_str!("../../assets/data/player/camera.ron");
        let config: CameraConfig = crate::core::parse_ron(CAMERA_CONFIG_PATH, source).unwrap();
        assert!(config.min_pitch < config.max_pitch);
        assert_eq!(config.offset(), Vec3::new(0.0, 2.0, 5.0));
    }
}
