//! Player entity construction.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::animation::{AnimationLibrary, CharacterAnimator, NeedsAnimationSetup};
use crate::combat::AbilityResolver;

/// Spawn the player body with its combo, animator and controller components.
///
/// Uses the library's glTF model when one is configured, otherwise a capsule
/// stand-in so the arena is playable without art.
pub fn spawn_player(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    asset_server: &AssetServer,
    library: &AnimationLibrary,
    position: Vec3,
) -> Entity {
    let player = commands
        .spawn((
            Player,
            Locomotion::default(),
            AbilityResolver::new(),
            CharacterAnimator::default(),
            // Transform
            Transform::from_translation(position),
            Visibility::default(),
            // Rapier physics components
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(0.5, 0.3),
            KinematicCharacterController {
                offset: CharacterLength::Absolute(0.01),
                autostep: Some(CharacterAutostep {
                    max_height: CharacterLength::Absolute(0.4),
                    min_width: CharacterLength::Absolute(0.3),
                    include_dynamic_bodies: false,
                }),
                max_slope_climb_angle: 45_f32.to_radians(),
                min_slope_slide_angle: 30_f32.to_radians(),
                snap_to_ground: Some(CharacterLength::Absolute(0.5)),
                ..default()
            },
        ))
        .id();

    if library.model_path.is_empty() {
        commands.entity(player).with_children(|parent| {
            parent.spawn((
                Mesh3d(meshes.add(Capsule3d::new(0.3, 1.0))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgb(0.55, 0.5, 0.45),
                    perceptual_roughness: 0.8,
                    ..default()
                })),
                Transform::default(),
            ));
        });
    } else {
        let scene = asset_server.load(GltfAssetLabel::Scene(0).from_asset(library.model_path.clone()));
        commands
            .entity(player)
            .insert(NeedsAnimationSetup)
            .with_children(|parent| {
                // Model origin sits at the feet, capsule centre is 0.8 above
                parent.spawn((
                    SceneRoot(scene),
                    Transform::from_xyz(0.0, -0.8, 0.0).with_scale(Vec3::splat(library.model_scale)),
                ));
            });
    }

    player
}
