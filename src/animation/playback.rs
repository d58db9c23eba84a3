//! Mirrors animator state onto the character model's `AnimationPlayer`.

use bevy::animation::{graph::AnimationNodeIndex, AnimationClip, AnimationPlayer, RepeatAnimation};
use bevy::prelude::*;
use std::collections::HashMap;

use super::animator::{AnimatorClip, CharacterAnimator, LocomotionClip};
use super::library::AnimationLibrary;

/// Graph handle and node lookup for a character model.
#[derive(Component)]
pub struct CharacterAnimations {
    pub graph: Handle<AnimationGraph>,
    pub locomotion: HashMap<LocomotionClip, AnimationNodeIndex>,
    pub actions: HashMap<String, AnimationNodeIndex>,
}

impl CharacterAnimations {
    fn node_for(&self, clip: &AnimatorClip) -> Option<(AnimationNodeIndex, bool)> {
        match clip {
            AnimatorClip::Locomotion(loco) => self.locomotion.get(loco).map(|&node| (node, true)),
            AnimatorClip::Action(name) => self.actions.get(name).map(|&node| (node, false)),
        }
    }
}

/// Links a character entity to the `AnimationPlayer` inside its scene.
#[derive(Component)]
pub struct AnimationLink(pub Entity);

/// Marker for characters whose scene has not been searched for a player yet.
#[derive(Component)]
pub struct NeedsAnimationSetup;

/// Last clip pushed to the `AnimationPlayer`.
#[derive(Component, Default)]
pub struct PlayedClip(pub Option<AnimatorClip>);

/// Find the scene's `AnimationPlayer` and build the character's graph.
pub fn setup_character_animations(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    library: Res<AnimationLibrary>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
    character_query: Query<(Entity, &Children), With<NeedsAnimationSetup>>,
    children_query: Query<&Children>,
    player_query: Query<Entity, With<AnimationPlayer>>,
) {
    for (character, children) in character_query.iter() {
        // Scene not spawned yet; try again next frame
        let Some(player_entity) = find_animation_player(children, &children_query, &player_query) else {
            continue;
        };

        let (graph, animations) = build_animation_graph(&asset_server, &library);
        let graph_handle = graphs.add(graph);

        commands
            .entity(player_entity)
            .insert(AnimationGraphHandle(graph_handle.clone()));

        commands
            .entity(character)
            .remove::<NeedsAnimationSetup>()
            .insert((
                AnimationLink(player_entity),
                CharacterAnimations {
                    graph: graph_handle,
                    ..animations
                },
                PlayedClip::default(),
            ));

        info!("Animation setup complete for {}", library.model_path);
    }
}

/// Recursively search for the `AnimationPlayer` entity in a hierarchy.
fn find_animation_player(
    children: &Children,
    children_query: &Query<&Children>,
    player_query: &Query<Entity, With<AnimationPlayer>>,
) -> Option<Entity> {
    for &child in children.iter() {
        if player_query.get(child).is_ok() {
            return Some(child);
        }

        if let Ok(grandchildren) = children_query.get(child) {
            if let Some(found) = find_animation_player(grandchildren, children_query, player_query) {
                return Some(found);
            }
        }
    }
    None
}

/// Build the animation graph from the library's clip indices.
fn build_animation_graph(asset_server: &AssetServer, library: &AnimationLibrary) -> (AnimationGraph, CharacterAnimations) {
    let mut graph = AnimationGraph::new();
    let root = graph.root;
    let mut add = |index: usize| {
        let clip: Handle<AnimationClip> =
            asset_server.load(GltfAssetLabel::Animation(index).from_asset(library.model_path.clone()));
        graph.add_clip(clip, 1.0, root)
    };

    let clips = &library.locomotion;
    let locomotion = [
        (LocomotionClip::Idle, clips.idle),
        (LocomotionClip::Walk, clips.walk),
        (LocomotionClip::Run, clips.run),
        (LocomotionClip::WalkBack, clips.walk_back),
        (LocomotionClip::StrafeLeft, clips.strafe_left),
        (LocomotionClip::StrafeRight, clips.strafe_right),
    ]
    .into_iter()
    .map(|(state, index)| (state, add(index)))
    .collect();

    let actions = library
        .actions
        .iter()
        .map(|(name, action)| (name.clone(), add(action.clip)))
        .collect();

    (
        graph,
        CharacterAnimations {
            graph: Handle::default(),
            locomotion,
            actions,
        },
    )
}

/// Start the clip the animator wants whenever it changes.
pub fn play_character_animations(
    mut query: Query<(&CharacterAnimator, &AnimationLink, &CharacterAnimations, &mut PlayedClip)>,
    mut players: Query<&mut AnimationPlayer>,
) {
    for (animator, link, animations, mut played) in query.iter_mut() {
        let clip = animator.clip();
        if played.0.as_ref() == Some(&clip) {
            continue;
        }

        let Ok(mut player) = players.get_mut(link.0) else {
            continue;
        };

        let Some((node, looping)) = animations.node_for(&clip) else {
            played.0 = Some(clip);
            continue;
        };

        player.stop_all();
        let playing = player.start(node);
        if looping {
            playing.set_repeat(RepeatAnimation::Forever);
        } else {
            playing.set_repeat(RepeatAnimation::Never);
        }

        played.0 = Some(clip);
    }
}
