//! Training arena - a floor, a ring of pillars and lighting.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// Marker for arena geometry.
#[derive(Component)]
pub struct ArenaGeometry;

const FLOOR_SIZE: f32 = 60.0;
const FLOOR_DEPTH: f32 = 1.0;
const PILLAR_COUNT: usize = 8;
const PILLAR_RING_RADIUS: f32 = 14.0;
const PILLAR_SIZE: Vec3 = Vec3::new(1.2, 4.0, 1.2);

/// Where the player starts, just above the floor.
pub const PLAYER_START: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Positions of the pillar ring, evenly spaced around the origin.
pub fn pillar_positions() -> Vec<Vec3> {
    (0..PILLAR_COUNT)
        .map(|i| {
            let angle = i as f32 / PILLAR_COUNT as f32 * std::f32::consts::TAU;
            Vec3::new(
                angle.cos() * PILLAR_RING_RADIUS,
                PILLAR_SIZE.y / 2.0,
                angle.sin() * PILLAR_RING_RADIUS,
            )
        })
        .collect()
}

/// Build the arena geometry and lighting.
pub fn build_arena(commands: &mut Commands, meshes: &mut Assets<Mesh>, materials: &mut Assets<StandardMaterial>) {
    // Floor as a box extending downward from y=0
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(FLOOR_SIZE, FLOOR_DEPTH, FLOOR_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.3, 0.32, 0.3),
            perceptual_roughness: 0.95,
            ..default()
        })),
        Transform::from_xyz(0.0, -FLOOR_DEPTH / 2.0, 0.0),
        Collider::cuboid(FLOOR_SIZE / 2.0, FLOOR_DEPTH / 2.0, FLOOR_SIZE / 2.0),
        ArenaGeometry,
    ));

    let pillar_mesh = meshes.add(Cuboid::new(PILLAR_SIZE.x, PILLAR_SIZE.y, PILLAR_SIZE.z));
    let pillar_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.45, 0.42, 0.38),
        perceptual_roughness: 0.9,
        ..default()
    });
    for position in pillar_positions() {
        commands.spawn((
            Mesh3d(pillar_mesh.clone()),
            MeshMaterial3d(pillar_material.clone()),
            Transform::from_translation(position),
            Collider::cuboid(PILLAR_SIZE.x / 2.0, PILLAR_SIZE.y / 2.0, PILLAR_SIZE.z / 2.0),
            ArenaGeometry,
        ));
    }

    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.8, 0.85, 0.9),
        brightness: 300.0,
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_3,
            std::f32::consts::FRAC_PI_6,
            0.0,
        )),
        ArenaGeometry,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pillars_ring_the_start_point() {
        let positions = pillar_positions();

        assert_eq!(positions.len(), PILLAR_COUNT);
        for position in positions {
            let flat = Vec2::new(position.x, position.z);
            assert!((flat.length() - PILLAR_RING_RADIUS).abs() < 1e-4);
            assert!(position.y > 0.0);
        }
    }

    #[test]
    fn pillars_stay_on_the_floor() {
        let half = FLOOR_SIZE / 2.0;
        assert!(pillar_positions().iter().all(|p| p.x.abs() < half && p.z.abs() < half));
    }
}
