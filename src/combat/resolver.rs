//! Ability resolver - turns combat input into ability activations.
//!
//! The resolver owns all combo state for one character: weapon drawn or
//! sheathed, which attack buttons are held, per-slot cooldown deadlines and
//! the step currently driving the animator. It talks to the outside world only
//! through [`AnimationDriver`] and [`AttackState`], and takes the current time
//! as an argument, so it runs the same in a Bevy system and in a unit test.

use bevy::prelude::*;

use super::bindings::{ComboBindings, Hold, HeldIntents, Modifiers};
use super::data::{AbilityDefinition, AbilityTable};
use super::timers::CooldownTimers;

/// Animator trigger fired when the weapon is drawn.
pub const DRAW_WEAPON_TRIGGER: &str = "drawWeapon";
/// Animator trigger fired when the weapon is put away.
pub const UNEQUIP_WEAPON_TRIGGER: &str = "unequipWeapon";
/// Animator bool mirroring the primary hold.
pub const PRIMARY_HELD_PARAM: &str = "IsLMBHeld";
/// Animator bool mirroring the secondary hold.
pub const SECONDARY_HELD_PARAM: &str = "IsRMBHeld";

/// Parameter-driven animation state machine the resolver controls.
pub trait AnimationDriver {
    /// Queue a one-shot trigger.
    fn trigger(&mut self, name: &str);
    /// Withdraw a queued trigger that has not been consumed yet.
    fn reset_trigger(&mut self, name: &str);
    /// Whether the action started by `name` is currently playing.
    fn is_playing(&self, name: &str) -> bool;
    fn set_float(&mut self, name: &str, value: f32);
    fn set_bool(&mut self, name: &str, value: bool);
}

/// Locomotion side of combat: slows movement while attacking.
pub trait AttackState {
    fn set_attacking(&mut self, attacking: bool);
}

/// How an activation request plays out against the animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPlan {
    /// Start the combo from its first step, interrupting whatever was active.
    Fresh,
    /// The previous step is mid-animation; chain into this step.
    Advance(usize),
    /// The final step is still playing; leave it alone.
    Hold,
}

/// Decide which step an ability should fire.
///
/// Walks forward while the current step is playing. The index only ever
/// increases and stops at the last step, so a malformed table cannot loop.
pub fn plan_activation<A: AnimationDriver + ?Sized>(ability: &AbilityDefinition, animator: &A) -> StepPlan {
    let count = ability.steps.len();
    let mut step = 0;

    while step < count && animator.is_playing(&ability.steps[step]) {
        if step + 1 == count {
            return StepPlan::Hold;
        }
        step += 1;
    }

    if step == 0 {
        StepPlan::Fresh
    } else {
        StepPlan::Advance(step)
    }
}

/// A successful activation.
#[derive(Debug, Clone, PartialEq)]
pub struct Activation {
    pub slot: usize,
    pub step: usize,
    pub trigger: String,
    /// True when this chained from a playing step instead of starting fresh
    pub advanced: bool,
}

/// Combo state for one character.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct AbilityResolver {
    weapon_equipped: bool,
    held: HeldIntents,
    /// Per-slot time at which the slot becomes available again (0 = ready)
    cooldown_until: Vec<f64>,
    active_step: Option<String>,
    attacking: bool,
    timers: CooldownTimers,
}

impl AbilityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn weapon_equipped(&self) -> bool {
        self.weapon_equipped
    }

    pub fn held(&self) -> HeldIntents {
        self.held
    }

    pub fn active_step(&self) -> Option<&str> {
        self.active_step.as_deref()
    }

    pub fn is_attacking(&self) -> bool {
        self.attacking
    }

    pub fn cooldown_deadline(&self, slot: usize) -> f64 {
        self.cooldown_until.get(slot).copied().unwrap_or(0.0)
    }

    pub fn is_ready(&self, slot: usize, now: f64) -> bool {
        now >= self.cooldown_deadline(slot)
    }

    /// Seconds until `slot` can fire again.
    pub fn cooldown_remaining(&self, slot: usize, now: f64) -> f32 {
        (self.cooldown_deadline(slot) - now).max(0.0) as f32
    }

    /// Number of cooldown clears still waiting to fire.
    pub fn pending_cooldowns(&self) -> usize {
        self.timers.len()
    }

    /// Run the deferred cooldown clears that are due.
    ///
    /// A clear only resets a slot whose deadline has passed, so a timer left
    /// over from an earlier activation never shortens a newer cooldown.
    pub fn fire_due_cooldowns(&mut self, now: f64) {
        for slot in self.timers.fire_due(now) {
            if let Some(deadline) = self.cooldown_until.get_mut(slot) {
                if *deadline <= now {
                    *deadline = 0.0;
                }
            }
        }
    }

    /// Draw or sheathe the weapon. Returns whether it is now drawn.
    pub fn toggle_weapon(&mut self, animator: &mut impl AnimationDriver, locomotion: &mut impl AttackState) -> bool {
        self.weapon_equipped = !self.weapon_equipped;

        if self.weapon_equipped {
            animator.trigger(DRAW_WEAPON_TRIGGER);
        } else {
            // The sheathe animation replaces whatever step was playing
            animator.trigger(UNEQUIP_WEAPON_TRIGGER);
            self.set_attacking(locomotion, false);
            self.clear_held(animator);
        }

        self.weapon_equipped
    }

    /// A hold button went down.
    pub fn start_hold(&mut self, hold: Hold, animator: &mut impl AnimationDriver) {
        if !self.weapon_equipped {
            return;
        }
        self.set_held(hold, true, animator);
    }

    /// A hold button was released; cancels the in-flight step.
    pub fn stop_hold(
        &mut self,
        hold: Hold,
        animator: &mut impl AnimationDriver,
        locomotion: &mut impl AttackState,
    ) {
        self.set_held(hold, false, animator);
        self.interrupt(animator, locomotion);
    }

    /// Drop every active hold, e.g. when input stops being read.
    ///
    /// Button releases are not seen while gameplay is suspended, so a hold
    /// left active would keep firing after resume.
    pub fn release_holds(&mut self, animator: &mut impl AnimationDriver, locomotion: &mut impl AttackState) {
        for hold in [Hold::Primary, Hold::Secondary] {
            let active = match hold {
                Hold::Primary => self.held.primary,
                Hold::Secondary => self.held.secondary,
            };
            if active {
                self.stop_hold(hold, animator, locomotion);
            }
        }
    }

    /// Cancel the active step and drop out of the attacking state.
    pub fn interrupt(&mut self, animator: &mut impl AnimationDriver, locomotion: &mut impl AttackState) {
        if let Some(step) = self.active_step.take() {
            animator.reset_trigger(&step);
        }
        self.set_attacking(locomotion, false);
    }

    /// Try to fire the ability bound to `slot`.
    ///
    /// Silently does nothing when the weapon is sheathed, the slot is cooling
    /// down, or the ability's final step is still playing.
    pub fn activate(
        &mut self,
        table: &AbilityTable,
        slot: usize,
        animator: &mut impl AnimationDriver,
        locomotion: &mut impl AttackState,
        now: f64,
    ) -> Option<Activation> {
        if !self.weapon_equipped || !self.is_ready(slot, now) {
            return None;
        }

        let ability = table.get(slot)?;
        if ability.steps.is_empty() {
            return None;
        }

        let step = match plan_activation(ability, &*animator) {
            StepPlan::Hold => return None,
            StepPlan::Advance(step) => step,
            StepPlan::Fresh => {
                self.interrupt(animator, locomotion);
                0
            }
        };

        let trigger = ability.steps[step].clone();
        let cooldown = ability.cooldowns.get(step).copied().unwrap_or(0.0);

        self.set_attacking(locomotion, true);
        animator.trigger(&trigger);
        self.set_deadline(slot, now + f64::from(cooldown));
        self.active_step = Some(trigger.clone());
        self.timers.schedule(now, cooldown, slot);

        Some(Activation {
            slot,
            step,
            trigger,
            advanced: step > 0,
        })
    }

    /// Momentary key press: fire the chord bound to `key`, if any.
    #[allow(clippy::too_many_arguments)]
    pub fn press(
        &mut self,
        bindings: &ComboBindings,
        table: &AbilityTable,
        key: KeyCode,
        modifiers: Modifiers,
        animator: &mut impl AnimationDriver,
        locomotion: &mut impl AttackState,
        now: f64,
    ) -> Option<Activation> {
        let slot = bindings.chord_slot(key, modifiers)?;
        self.activate(table, slot, animator, locomotion, now)
    }

    /// Per-tick pass: fire due cooldown clears, then resolve held buttons.
    #[allow(clippy::too_many_arguments)]
    pub fn tick(
        &mut self,
        bindings: &ComboBindings,
        table: &AbilityTable,
        modifiers: Modifiers,
        animator: &mut impl AnimationDriver,
        locomotion: &mut impl AttackState,
        now: f64,
    ) -> Vec<Activation> {
        self.fire_due_cooldowns(now);

        if !self.weapon_equipped {
            self.clear_held(animator);
            self.set_attacking(locomotion, false);
            return Vec::new();
        }

        bindings
            .resolve_holds(self.held, modifiers)
            .into_iter()
            .filter_map(|slot| self.activate(table, slot, animator, locomotion, now))
            .collect()
    }

    fn set_attacking(&mut self, locomotion: &mut impl AttackState, attacking: bool) {
        self.attacking = attacking;
        locomotion.set_attacking(attacking);
    }

    fn set_held(&mut self, hold: Hold, value: bool, animator: &mut impl AnimationDriver) {
        match hold {
            Hold::Primary => {
                self.held.primary = value;
                animator.set_bool(PRIMARY_HELD_PARAM, value);
            }
            Hold::Secondary => {
                self.held.secondary = value;
                animator.set_bool(SECONDARY_HELD_PARAM, value);
            }
        }
    }

    fn clear_held(&mut self, animator: &mut impl AnimationDriver) {
        self.set_held(Hold::Primary, false, animator);
        self.set_held(Hold::Secondary, false, animator);
    }

    fn set_deadline(&mut self, slot: usize, deadline: f64) {
        if self.cooldown_until.len() <= slot {
            self.cooldown_until.resize(slot + 1, 0.0);
        }
        self.cooldown_until[slot] = deadline;
    }
}
