//! Input binding table for the combo system.
//!
//! Built once at startup and inserted as an immutable resource. Systems read
//! it by reference; nothing mutates it after the app is built.

use bevy::prelude::*;

/// A modifier key that changes which ability a held button resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Shift,
    Forward,
    Backward,
}

impl Modifier {
    /// Resolution order, highest priority first.
    pub const PRIORITY: [Modifier; 3] = [Modifier::Shift, Modifier::Forward, Modifier::Backward];
}

/// Modifier keys sampled once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub forward: bool,
    pub backward: bool,
}

impl Modifiers {
    pub fn is_held(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Shift => self.shift,
            Modifier::Forward => self.forward,
            Modifier::Backward => self.backward,
        }
    }
}

/// Level-triggered attack intents (true while the button is down).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldIntents {
    pub primary: bool,
    pub secondary: bool,
}

/// Which hold button an edge belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hold {
    Primary,
    Secondary,
}

/// Slots for the primary and secondary hold under one modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldSlots {
    pub primary: usize,
    pub secondary: usize,
}

/// A momentary binding: key, optional modifier, and the slot it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chord {
    pub key: KeyCode,
    pub modifier: Option<Modifier>,
    pub slot: usize,
}

impl Chord {
    pub const fn plain(key: KeyCode, slot: usize) -> Self {
        Self { key, modifier: None, slot }
    }

    pub const fn with(modifier: Modifier, key: KeyCode, slot: usize) -> Self {
        Self {
            key,
            modifier: Some(modifier),
            slot,
        }
    }
}

/// Complete combat input configuration.
#[derive(Resource, Debug, Clone)]
pub struct ComboBindings {
    pub weapon_toggle: KeyCode,
    pub primary: MouseButton,
    pub secondary: MouseButton,
    pub shift_keys: [KeyCode; 2],
    pub forward_key: KeyCode,
    pub backward_key: KeyCode,
    pub shift_holds: HoldSlots,
    pub forward_holds: HoldSlots,
    pub backward_holds: HoldSlots,
    pub neutral_holds: HoldSlots,
    pub chords: Vec<Chord>,
}

impl Default for ComboBindings {
    fn default() -> Self {
        Self {
            weapon_toggle: KeyCode::KeyC,
            primary: MouseButton::Left,
            secondary: MouseButton::Right,
            shift_keys: [KeyCode::ShiftLeft, KeyCode::ShiftRight],
            forward_key: KeyCode::KeyW,
            backward_key: KeyCode::KeyS,
            shift_holds: HoldSlots { primary: 9, secondary: 10 },
            forward_holds: HoldSlots { primary: 11, secondary: 12 },
            backward_holds: HoldSlots { primary: 14, secondary: 15 },
            neutral_holds: HoldSlots { primary: 0, secondary: 2 },
            chords: vec![
                Chord::plain(KeyCode::KeyE, 2),
                Chord::plain(KeyCode::KeyF, 3),
                Chord::plain(KeyCode::KeyQ, 4),
                Chord::plain(KeyCode::KeyR, 5),
                Chord::with(Modifier::Shift, KeyCode::KeyQ, 6),
                Chord::with(Modifier::Shift, KeyCode::KeyE, 7),
                Chord::with(Modifier::Shift, KeyCode::KeyF, 8),
                Chord::with(Modifier::Forward, KeyCode::KeyF, 13),
                Chord::with(Modifier::Backward, KeyCode::KeyF, 16),
            ],
        }
    }
}

impl ComboBindings {
    /// Read the modifier keys for this tick.
    pub fn sample_modifiers(&self, keyboard: &ButtonInput<KeyCode>) -> Modifiers {
        Modifiers {
            shift: keyboard.any_pressed(self.shift_keys),
            forward: keyboard.pressed(self.forward_key),
            backward: keyboard.pressed(self.backward_key),
        }
    }

    fn holds_for(&self, modifier: Modifier) -> HoldSlots {
        match modifier {
            Modifier::Shift => self.shift_holds,
            Modifier::Forward => self.forward_holds,
            Modifier::Backward => self.backward_holds,
        }
    }

    /// Slots the held buttons resolve to this tick.
    ///
    /// Modifier branches are exclusive and checked in priority order; a
    /// modifier with nothing held falls through to the next one. Without a
    /// matching modifier both neutral holds may fire together.
    pub fn resolve_holds(&self, held: HeldIntents, modifiers: Modifiers) -> Vec<usize> {
        for modifier in Modifier::PRIORITY {
            if !modifiers.is_held(modifier) {
                continue;
            }
            let slots = self.holds_for(modifier);
            if held.primary {
                return vec![slots.primary];
            }
            if held.secondary {
                return vec![slots.secondary];
            }
        }

        let mut slots = Vec::with_capacity(2);
        if held.primary {
            slots.push(self.neutral_holds.primary);
        }
        if held.secondary {
            slots.push(self.neutral_holds.secondary);
        }
        slots
    }

    /// Slot for a momentary key press, preferring the most specific chord.
    pub fn chord_slot(&self, key: KeyCode, modifiers: Modifiers) -> Option<usize> {
        let matching = || self.chords.iter().filter(move |chord| chord.key == key);

        Modifier::PRIORITY
            .into_iter()
            .filter(|m| modifiers.is_held(*m))
            .find_map(|m| matching().find(|chord| chord.modifier == Some(m)))
            .or_else(|| matching().find(|chord| chord.modifier.is_none()))
            .map(|chord| chord.slot)
    }

    /// Every slot any binding can activate.
    pub fn referenced_slots(&self) -> impl Iterator<Item = usize> + '_ {
        [self.shift_holds, self.forward_holds, self.backward_holds, self.neutral_holds]
            .into_iter()
            .flat_map(|slots| [slots.primary, slots.secondary])
            .chain(self.chords.iter().map(|chord| chord.slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(primary: bool, secondary: bool) -> HeldIntents {
        HeldIntents { primary, secondary }
    }

    #[test]
    fn shift_primary_wins_over_neutral_primary() {
        let bindings = ComboBindings::default();
        let modifiers = Modifiers { shift: true, ..default() };

        assert_eq!(bindings.resolve_holds(held(true, false), modifiers), vec![9]);
        assert_eq!(bindings.resolve_holds(held(true, true), modifiers), vec![9]);
        assert_eq!(bindings.resolve_holds(held(false, true), modifiers), vec![10]);
    }

    #[test]
    fn shift_outranks_movement_modifiers() {
        let bindings = ComboBindings::default();
        let modifiers = Modifiers {
            shift: true,
            forward: true,
            backward: true,
        };

        assert_eq!(bindings.resolve_holds(held(true, false), modifiers), vec![9]);
    }

    #[test]
    fn forward_and_backward_branches() {
        let bindings = ComboBindings::default();
        let forward = Modifiers { forward: true, ..default() };
        let backward = Modifiers { backward: true, ..default() };
        let both = Modifiers {
            forward: true,
            backward: true,
            ..default()
        };

        assert_eq!(bindings.resolve_holds(held(true, false), forward), vec![11]);
        assert_eq!(bindings.resolve_holds(held(false, true), forward), vec![12]);
        assert_eq!(bindings.resolve_holds(held(true, false), backward), vec![14]);
        assert_eq!(bindings.resolve_holds(held(false, true), backward), vec![15]);
        assert_eq!(bindings.resolve_holds(held(false, true), both), vec![12]);
    }

    #[test]
    fn neutral_holds_fire_together() {
        let bindings = ComboBindings::default();
        let none = Modifiers::default();

        assert_eq!(bindings.resolve_holds(held(true, true), none), vec![0, 2]);
        assert_eq!(bindings.resolve_holds(held(false, true), none), vec![2]);
        assert!(bindings.resolve_holds(held(false, false), none).is_empty());
    }

    #[test]
    fn modifier_without_holds_resolves_nothing() {
        let bindings = ComboBindings::default();
        let shift = Modifiers { shift: true, ..default() };

        assert!(bindings.resolve_holds(HeldIntents::default(), shift).is_empty());
    }

    #[test]
    fn chords_prefer_modifier_variant() {
        let bindings = ComboBindings::default();
        let none = Modifiers::default();
        let shift = Modifiers { shift: true, ..default() };
        let forward = Modifiers { forward: true, ..default() };
        let backward = Modifiers { backward: true, ..default() };

        assert_eq!(bindings.chord_slot(KeyCode::KeyE, none), Some(2));
        assert_eq!(bindings.chord_slot(KeyCode::KeyE, shift), Some(7));
        assert_eq!(bindings.chord_slot(KeyCode::KeyF, forward), Some(13));
        assert_eq!(bindings.chord_slot(KeyCode::KeyF, backward), Some(16));
        // No Shift+R chord, so the plain binding fires
        assert_eq!(bindings.chord_slot(KeyCode::KeyR, shift), Some(5));
        assert_eq!(bindings.chord_slot(KeyCode::KeyZ, none), None);
    }

    #[test]
    fn samples_modifier_keys() {
        let bindings = ComboBindings::default();
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::ShiftRight);
        keyboard.press(KeyCode::KeyS);

        let modifiers = bindings.sample_modifiers(&keyboard);
        assert!(modifiers.shift);
        assert!(!modifiers.forward);
        assert!(modifiers.backward);
    }
}
