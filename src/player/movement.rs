//! Third-person player movement.
//!
//! Movement is camera-relative: W walks away from the camera, A/D strafe
//! across it. The character turns instantly to face where it is going, except
//! when walking backwards, where it keeps facing away from the camera.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::animation::{CharacterAnimator, DIRECTION_PARAM, SPEED_PARAM};
use crate::camera::ThirdPersonCamera;
use crate::combat::AnimationDriver;

/// `Direction` animator value while walking backwards.
const BACKWARD_DIRECTION: f32 = -15.0;
/// `Direction` animator magnitude while strafing.
const STRAFE_DIRECTION: f32 = 5.0;

/// WASD as a normalized 2D vector (y forward, x right).
pub fn read_move_input(keyboard: &ButtonInput<KeyCode>) -> Vec2 {
    let mut input = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        input.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        input.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        input.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        input.x -= 1.0;
    }
    input.normalize_or_zero()
}

/// Ground speed for this frame.
pub fn movement_speed(input: Vec2, sprinting: bool, grounded: bool, attacking: bool, config: &PlayerConfig) -> f32 {
    let speed = if input == Vec2::ZERO {
        0.0
    } else if sprinting && grounded {
        config.sprint_speed
    } else if input.y < 0.0 {
        config.walk_backwards_speed
    } else {
        config.walk_speed
    };

    if attacking {
        speed * config.attack_speed_modifier
    } else {
        speed
    }
}

/// Value for the animator's `Direction` blend parameter.
pub fn direction_param(input: Vec2) -> f32 {
    if input.y < 0.0 {
        BACKWARD_DIRECTION
    } else if input.x > 0.0 {
        STRAFE_DIRECTION
    } else if input.x < 0.0 {
        -STRAFE_DIRECTION
    } else {
        0.0
    }
}

/// Camera-relative move direction flattened onto the ground plane.
pub fn move_direction(camera_forward: Vec3, camera_right: Vec3, input: Vec2) -> Vec3 {
    let direction = camera_forward * input.y + camera_right * input.x;
    Vec3::new(direction.x, 0.0, direction.z).normalize_or_zero()
}

/// Rotation the character should snap to, if it is moving.
pub fn facing(direction: Vec3, input: Vec2) -> Option<Quat> {
    if direction == Vec3::ZERO {
        return None;
    }

    let look = if input.y < 0.0 { -direction } else { direction };
    Some(Transform::IDENTITY.looking_to(look, Vec3::Y).rotation)
}

/// Integrate vertical velocity for one frame.
pub fn vertical_velocity(current: f32, grounded: bool, config: &PlayerConfig, dt: f32) -> f32 {
    if grounded {
        if current < 0.0 {
            config.ground_stick_velocity
        } else {
            current
        }
    } else {
        current + config.gravity * dt
    }
}

/// Move the player with WASD relative to the camera; Shift sprints.
pub fn player_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<PlayerConfig>,
    camera_query: Query<&Transform, (With<ThirdPersonCamera>, Without<Player>)>,
    mut player_query: Query<
        (
            &mut Transform,
            &mut Locomotion,
            &mut CharacterAnimator,
            &mut KinematicCharacterController,
            Option<&KinematicCharacterControllerOutput>,
        ),
        With<Player>,
    >,
) {
    let Ok((mut transform, mut locomotion, mut animator, mut controller, output)) = player_query.get_single_mut()
    else {
        return;
    };
    let Ok(camera_transform) = camera_query.get_single() else {
        return;
    };

    let dt = time.delta_secs();
    locomotion.is_grounded = output.map_or(true, |o| o.grounded);

    let input = read_move_input(&keyboard);
    let sprinting = keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
    let direction = move_direction(*camera_transform.forward(), *camera_transform.right(), input);

    let speed = movement_speed(input, sprinting, locomotion.is_grounded, locomotion.attacking, &config);
    locomotion.current_speed = speed;
    locomotion.velocity = direction * speed;

    animator.set_float(SPEED_PARAM, speed);
    animator.set_float(DIRECTION_PARAM, direction_param(input));

    if let Some(rotation) = facing(direction, input) {
        transform.rotation = rotation;
    }

    locomotion.vertical_velocity =
        vertical_velocity(locomotion.vertical_velocity, locomotion.is_grounded, &config, dt);

    let horizontal = locomotion.velocity * dt;
    let vertical = Vec3::Y * locomotion.vertical_velocity * dt;
    controller.translation = Some(horizontal + vertical);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_selection() {
        let config = PlayerConfig::default();

        assert_eq!(movement_speed(Vec2::ZERO, true, true, false, &config), 0.0);
        assert_eq!(movement_speed(Vec2::Y, false, true, false, &config), 5.0);
        assert_eq!(movement_speed(Vec2::Y, true, true, false, &config), 10.0);
        // No sprinting in the air
        assert_eq!(movement_speed(Vec2::Y, true, false, false, &config), 5.0);
        assert_eq!(movement_speed(Vec2::NEG_Y, false, true, false, &config), 3.0);
        // Sprint wins over walking backwards when grounded
        assert_eq!(movement_speed(Vec2::NEG_Y, true, true, false, &config), 10.0);
    }

    #[test]
    fn attacking_halves_speed() {
        let config = PlayerConfig::default();

        assert_eq!(movement_speed(Vec2::Y, false, true, true, &config), 2.5);
        assert_eq!(movement_speed(Vec2::Y, true, true, true, &config), 5.0);
        assert_eq!(movement_speed(Vec2::ZERO, false, true, true, &config), 0.0);
    }

    #[test]
    fn direction_parameter() {
        assert_eq!(direction_param(Vec2::Y), 0.0);
        assert_eq!(direction_param(Vec2::X), 5.0);
        assert_eq!(direction_param(Vec2::NEG_X), -5.0);
        assert_eq!(direction_param(Vec2::new(0.7, -0.7)), -15.0);
        assert_eq!(direction_param(Vec2::ZERO), 0.0);
    }

    #[test]
    fn move_direction_ignores_camera_pitch() {
        let forward = Vec3::new(0.0, -0.6, -0.8);
        let direction = move_direction(forward, Vec3::X, Vec2::Y);

        assert!((direction - Vec3::NEG_Z).length() < 1e-5);
        assert_eq!(move_direction(forward, Vec3::X, Vec2::ZERO), Vec3::ZERO);
    }

    #[test]
    fn faces_away_from_motion_when_backing_up() {
        let forward = facing(Vec3::NEG_Z, Vec2::Y).unwrap();
        assert!((forward * Vec3::NEG_Z - Vec3::NEG_Z).length() < 1e-5);

        // Walking backwards toward +Z keeps the character looking down -Z
        let backward = facing(Vec3::Z, Vec2::NEG_Y).unwrap();
        assert!((backward * Vec3::NEG_Z - Vec3::NEG_Z).length() < 1e-5);

        assert!(facing(Vec3::ZERO, Vec2::ZERO).is_none());
    }

    #[test]
    fn gravity_and_ground_stick() {
        let config = PlayerConfig::default();

        assert_eq!(vertical_velocity(-5.0, true, &config, 0.1), -2.0);
        assert_eq!(vertical_velocity(3.0, true, &config, 0.1), 3.0);
        assert!((vertical_velocity(0.0, false, &config, 0.1) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn diagonal_input_is_normalized() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyW);
        keyboard.press(KeyCode::KeyD);

        let input = read_move_input(&keyboard);
        assert!((input.length() - 1.0).abs() < 1e-5);
        assert!(input.x > 0.0 && input.y > 0.0);
    }
}
