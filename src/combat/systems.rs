//! Combo systems - feed input edges and held buttons into the resolver.

use bevy::prelude::*;

use super::bindings::{ComboBindings, Hold};
use super::data::AbilityTable;
use super::resolver::{AbilityResolver, Activation};
use crate::animation::CharacterAnimator;
use crate::core::GameState;
use crate::player::{Locomotion, Player};

/// System set ordering for the combo pipeline.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComboSet {
    /// Deferred cooldown clears
    Timers,
    /// Weapon toggle, hold start/stop, momentary presses
    Edges,
    /// Once-per-tick resolution of held buttons
    Resolve,
    /// Animators consume the triggers issued above
    Animate,
}

/// Sent whenever an ability step actually fires.
#[derive(Event, Debug, Clone)]
pub struct AbilityActivated {
    pub entity: Entity,
    pub slot: usize,
    pub step: usize,
    pub trigger: String,
}

impl AbilityActivated {
    fn new(entity: Entity, activation: Activation) -> Self {
        Self {
            entity,
            slot: activation.slot,
            step: activation.step,
            trigger: activation.trigger,
        }
    }
}

/// Configure combo systems.
pub fn setup_combo_systems(app: &mut App) {
    app.add_event::<AbilityActivated>()
        .configure_sets(
            Update,
            (ComboSet::Timers, ComboSet::Edges, ComboSet::Resolve, ComboSet::Animate)
                .chain()
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(Update, fire_cooldown_timers.in_set(ComboSet::Timers))
        .add_systems(Update, handle_combo_edges.in_set(ComboSet::Edges))
        .add_systems(Update, resolve_held_abilities.in_set(ComboSet::Resolve))
        .add_systems(OnExit(GameState::InGame), release_held_abilities);
}

/// Clear cooldowns whose deferred reset is due.
pub fn fire_cooldown_timers(time: Res<Time>, mut query: Query<&mut AbilityResolver>) {
    let now = time.elapsed_secs_f64();
    for mut resolver in query.iter_mut() {
        resolver.fire_due_cooldowns(now);
    }
}

/// Handle discrete input edges: weapon toggle, hold start/stop, chord presses.
pub fn handle_combo_edges(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    time: Res<Time>,
    bindings: Res<ComboBindings>,
    table: Res<AbilityTable>,
    mut query: Query<(Entity, &mut AbilityResolver, &mut CharacterAnimator, &mut Locomotion), With<Player>>,
    mut activated: EventWriter<AbilityActivated>,
) {
    let Ok((entity, mut resolver, mut animator, mut locomotion)) = query.get_single_mut() else {
        return;
    };
    let now = time.elapsed_secs_f64();

    if keyboard.just_pressed(bindings.weapon_toggle) {
        let equipped = resolver.toggle_weapon(&mut *animator, &mut *locomotion);
        debug!("Weapon {}", if equipped { "drawn" } else { "sheathed" });
    }

    for (button, hold) in [(bindings.primary, Hold::Primary), (bindings.secondary, Hold::Secondary)] {
        if mouse.just_pressed(button) {
            resolver.start_hold(hold, &mut *animator);
        }
        if mouse.just_released(button) {
            resolver.stop_hold(hold, &mut *animator, &mut *locomotion);
        }
    }

    let modifiers = bindings.sample_modifiers(&keyboard);
    for &key in keyboard.get_just_pressed() {
        if let Some(activation) =
            resolver.press(&bindings, &table, key, modifiers, &mut *animator, &mut *locomotion, now)
        {
            debug!("Fired {} (slot {}, step {})", activation.trigger, activation.slot, activation.step);
            activated.send(AbilityActivated::new(entity, activation));
        }
    }
}

/// Drop holds when gameplay stops; releases during a pause are never seen.
pub fn release_held_abilities(
    mut query: Query<(&mut AbilityResolver, &mut CharacterAnimator, &mut Locomotion), With<Player>>,
) {
    for (mut resolver, mut animator, mut locomotion) in query.iter_mut() {
        resolver.release_holds(&mut *animator, &mut *locomotion);
    }
}

/// Resolve held attack buttons against the modifier keys for this tick.
pub fn resolve_held_abilities(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    bindings: Res<ComboBindings>,
    table: Res<AbilityTable>,
    mut query: Query<(Entity, &mut AbilityResolver, &mut CharacterAnimator, &mut Locomotion), With<Player>>,
    mut activated: EventWriter<AbilityActivated>,
) {
    let Ok((entity, mut resolver, mut animator, mut locomotion)) = query.get_single_mut() else {
        return;
    };

    let modifiers = bindings.sample_modifiers(&keyboard);
    let fired = resolver.tick(
        &bindings,
        &table,
        modifiers,
        &mut *animator,
        &mut *locomotion,
        time.elapsed_secs_f64(),
    );

    for activation in fired {
        debug!("Fired {} (slot {}, step {})", activation.trigger, activation.slot, activation.step);
        activated.send(AbilityActivated::new(entity, activation));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{update_character_animators, AnimationLibrary};
    use crate::combat::AnimationDriver;
    use bevy::state::app::StatesPlugin;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<ComboBindings>()
            .insert_resource(AbilityTable::default())
            .insert_resource(AnimationLibrary::default())
            .add_event::<AbilityActivated>()
            .add_systems(
                Update,
                (
                    fire_cooldown_timers,
                    handle_combo_edges,
                    resolve_held_abilities,
                    update_character_animators,
                )
                    .chain(),
            );

        app.world_mut().spawn((
            Player,
            AbilityResolver::default(),
            CharacterAnimator::default(),
            Locomotion::default(),
        ));
        app
    }

    fn step(app: &mut App) {
        app.update();
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().clear();
        app.world_mut().resource_mut::<ButtonInput<MouseButton>>().clear();
    }

    fn player_state(app: &mut App) -> (AbilityResolver, CharacterAnimator, bool) {
        let world = app.world_mut();
        let mut query = world.query_filtered::<(&AbilityResolver, &CharacterAnimator, &Locomotion), With<Player>>();
        let (resolver, animator, locomotion) = query.single(world);
        (resolver.clone(), animator.clone(), locomotion.attacking)
    }

    fn fired_triggers(app: &App) -> Vec<String> {
        app.world()
            .resource::<Events<AbilityActivated>>()
            .iter_current_update_events()
            .map(|event| event.trigger.clone())
            .collect()
    }

    #[test]
    fn draw_then_hold_then_release() {
        let mut app = test_app();

        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::KeyC);
        step(&mut app);
        let (resolver, animator, _) = player_state(&mut app);
        assert!(resolver.weapon_equipped());
        assert!(animator.is_playing("drawWeapon"));

        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().release(KeyCode::KeyC);
        app.world_mut().resource_mut::<ButtonInput<MouseButton>>().press(MouseButton::Left);
        step(&mut app);
        assert_eq!(fired_triggers(&app), vec!["Attack1".to_string()]);
        let (resolver, animator, attacking) = player_state(&mut app);
        assert!(resolver.held().primary);
        assert!(attacking);
        assert!(animator.is_playing("Attack1"));

        app.world_mut().resource_mut::<ButtonInput<MouseButton>>().release(MouseButton::Left);
        step(&mut app);
        let (resolver, animator, attacking) = player_state(&mut app);
        assert!(!resolver.held().primary);
        assert!(!attacking);
        assert_eq!(resolver.active_step(), None);
        assert_eq!(animator.current_action(), None);
    }

    #[test]
    fn sheathed_hold_does_nothing() {
        let mut app = test_app();

        app.world_mut().resource_mut::<ButtonInput<MouseButton>>().press(MouseButton::Right);
        step(&mut app);

        assert!(fired_triggers(&app).is_empty());
        let (resolver, animator, attacking) = player_state(&mut app);
        assert!(!resolver.held().secondary);
        assert!(!attacking);
        assert_eq!(animator.current_action(), None);
    }

    #[test]
    fn chord_press_fires_bound_slot() {
        let mut app = test_app();

        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::KeyC);
        step(&mut app);
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().release(KeyCode::KeyC);

        {
            let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keyboard.press(KeyCode::ShiftLeft);
            keyboard.press(KeyCode::KeyQ);
        }
        step(&mut app);

        assert_eq!(fired_triggers(&app), vec!["ShoulderCharge".to_string()]);
    }

    fn stateful_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_state::<GameState>()
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<ComboBindings>()
            .insert_resource(AbilityTable::default())
            .insert_resource(AnimationLibrary::default())
            .add_systems(Update, update_character_animators.in_set(ComboSet::Animate));
        setup_combo_systems(&mut app);

        app.world_mut().spawn((
            Player,
            AbilityResolver::default(),
            CharacterAnimator::default(),
            Locomotion::default(),
        ));
        app
    }

    fn set_state(app: &mut App, state: GameState) {
        app.world_mut().resource_mut::<NextState<GameState>>().set(state);
        step(app);
    }

    #[test]
    fn release_during_pause_ends_hold() {
        let mut app = stateful_app();
        set_state(&mut app, GameState::InGame);

        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::KeyC);
        step(&mut app);
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().release(KeyCode::KeyC);
        app.world_mut().resource_mut::<ButtonInput<MouseButton>>().press(MouseButton::Left);
        step(&mut app);
        assert_eq!(fired_triggers(&app), vec!["Attack1".to_string()]);

        set_state(&mut app, GameState::Paused);
        let (resolver, _, attacking) = player_state(&mut app);
        assert!(!resolver.held().primary);
        assert!(!attacking);

        // Released while paused: the edge is gone by the time play resumes
        app.world_mut().resource_mut::<ButtonInput<MouseButton>>().release(MouseButton::Left);
        step(&mut app);
        set_state(&mut app, GameState::InGame);

        for _ in 0..3 {
            std::thread::sleep(std::time::Duration::from_millis(200));
            step(&mut app);
            assert!(fired_triggers(&app).is_empty());
        }
        let (resolver, _, attacking) = player_state(&mut app);
        assert!(!resolver.held().primary);
        assert!(!attacking);
    }
}
