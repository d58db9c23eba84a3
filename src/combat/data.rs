//! Ability definitions and their RON data file.

use bevy::prelude::*;
use serde::Deserialize;

use super::bindings::ComboBindings;
use super::error::AbilityTableError;
use crate::core::{load_ron, DataLoadError};

/// Where the ability table lives on disk.
pub const ABILITY_TABLE_PATH: &str = "assets/data/combat/abilities.ron";

/// One ability: an ordered combo of animation triggers with a cooldown per step.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct AbilityDefinition {
    pub name: String,
    /// Animation trigger fired for each combo step
    pub steps: Vec<String>,
    /// Seconds the slot stays locked after each step fires
    pub cooldowns: Vec<f32>,
    /// Icon image path for the ability bar (display only)
    #[serde(default)]
    pub icon: Option<String>,
}

impl AbilityDefinition {
    pub fn new(name: &str, steps: &[(&str, f32)], icon: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            steps: steps.iter().map(|(trigger, _)| trigger.to_string()).collect(),
            cooldowns: steps.iter().map(|(_, cooldown)| *cooldown).collect(),
            icon: icon.map(str::to_string),
        }
    }

    fn validate(&self, slot: usize) -> Result<(), AbilityTableError> {
        if self.steps.is_empty() {
            return Err(AbilityTableError::NoSteps {
                slot,
                name: self.name.clone(),
            });
        }

        if self.steps.len() != self.cooldowns.len() {
            return Err(AbilityTableError::LengthMismatch {
                slot,
                name: self.name.clone(),
                steps: self.steps.len(),
                cooldowns: self.cooldowns.len(),
            });
        }

        if let Some((step, &value)) = self
            .cooldowns
            .iter()
            .enumerate()
            .find(|(_, c)| !c.is_finite() || **c < 0.0)
        {
            return Err(AbilityTableError::InvalidCooldown { slot, step, value });
        }

        Ok(())
    }
}

/// Every ability the player can use, indexed by binding slot.
#[derive(Resource, Deserialize, Clone, Debug)]
pub struct AbilityTable {
    pub abilities: Vec<AbilityDefinition>,
    /// Whether this moveset is a melee weapon's
    #[serde(default = "default_melee")]
    pub is_melee: bool,
}

fn default_melee() -> bool {
    true
}

impl AbilityTable {
    pub fn get(&self, slot: usize) -> Option<&AbilityDefinition> {
        self.abilities.get(slot)
    }

    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }

    /// Check the per-ability invariants and that every bound slot exists.
    pub fn validate(&self, bindings: &ComboBindings) -> Result<(), AbilityTableError> {
        if self.abilities.is_empty() {
            return Err(AbilityTableError::Empty);
        }

        for (slot, ability) in self.abilities.iter().enumerate() {
            ability.validate(slot)?;
        }

        let len = self.abilities.len();
        if let Some(slot) = bindings.referenced_slots().find(|&slot| slot >= len) {
            return Err(AbilityTableError::MissingSlot { slot, len });
        }

        Ok(())
    }

    /// Load from RON and validate, falling back to the built-in moveset.
    pub fn load(path: &str, bindings: &ComboBindings) -> Self {
        let table = match load_ron::<AbilityTable>(path) {
            Ok(table) => table,
            Err(e @ DataLoadError::FileNotFound(_)) => {
                warn!("{}. Using built-in abilities.", e);
                return Self::default();
            }
            Err(e) => {
                error!("{}. Using built-in abilities.", e);
                return Self::default();
            }
        };

        match table.validate(bindings) {
            Ok(()) => {
                info!("Loaded {} abilities from {}", table.len(), path);
                table
            }
            Err(e) => {
                error!("Rejected {}: {}. Using built-in abilities.", path, e);
                Self::default()
            }
        }
    }
}

impl Default for AbilityTable {
    /// Built-in sword moveset covering slots 0..=16.
    fn default() -> Self {
        let abilities = vec![
            AbilityDefinition::new(
                "Light Combo",
                &[("Attack1", 0.5), ("Attack2", 0.5), ("Attack3", 0.9)],
                Some("icons/light_combo.png"),
            ),
            AbilityDefinition::new("Guard Break", &[("GuardBreak", 1.0)], Some("icons/guard_break.png")),
            AbilityDefinition::new(
                "Heavy Swing",
                &[("HeavySwing1", 0.8), ("HeavySwing2", 1.2)],
                Some("icons/heavy_swing.png"),
            ),
            AbilityDefinition::new("Kick", &[("Kick", 1.5)], Some("icons/kick.png")),
            AbilityDefinition::new("Whirlwind", &[("Whirlwind", 4.0)], Some("icons/whirlwind.png")),
            AbilityDefinition::new("Rising Slash", &[("RisingSlash", 3.0)], Some("icons/rising_slash.png")),
            AbilityDefinition::new("Shoulder Charge", &[("ShoulderCharge", 5.0)], Some("icons/shoulder_charge.png")),
            AbilityDefinition::new("Ground Slam", &[("GroundSlam", 6.0)], Some("icons/ground_slam.png")),
            AbilityDefinition::new("Leaping Strike", &[("LeapingStrike", 8.0)], Some("icons/leaping_strike.png")),
            AbilityDefinition::new("Dash Strike", &[("DashStrike", 1.0)], Some("icons/dash_strike.png")),
            AbilityDefinition::new("Spinning Heavy", &[("SpinHeavy", 1.5)], Some("icons/spin_heavy.png")),
            AbilityDefinition::new("Lunge", &[("Lunge1", 0.8), ("Lunge2", 0.8)], Some("icons/lunge.png")),
            AbilityDefinition::new("Overhead Cleave", &[("Overhead", 1.2)], Some("icons/overhead.png")),
            AbilityDefinition::new("Flying Kick", &[("FlyingKick", 5.0)], Some("icons/flying_kick.png")),
            AbilityDefinition::new("Back Slash", &[("BackSlash", 0.9)], Some("icons/back_slash.png")),
            AbilityDefinition::new("Retreating Parry", &[("Parry", 1.5)], None),
            AbilityDefinition::new("Roll Strike", &[("RollStrike", 4.0)], Some("icons/roll_strike.png")),
        ];

        Self {
            abilities,
            is_melee: true,
        }
    }
}

/// Read the ability table at startup.
pub fn load_ability_table(mut commands: Commands, bindings: Res<ComboBindings>) {
    commands.insert_resource(AbilityTable::load(ABILITY_TABLE_PATH, &bindings));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parse_ron;

    #[test]
    fn default_table_is_valid_for_default_bindings() {
        let table = AbilityTable::default();
        assert_eq!(table.len(), 17);
        assert_eq!(table.validate(&ComboBindings::default()), Ok(()));
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let mut table = AbilityTable::default();
        table.abilities[3].cooldowns.push(1.0);

        let err = table.validate(&ComboBindings::default()).unwrap_err();
        assert!(matches!(err, AbilityTableError::LengthMismatch { slot: 3, steps: 1, cooldowns: 2, .. }));
    }

    #[test]
    fn rejects_negative_cooldown() {
        let mut table = AbilityTable::default();
        table.abilities[0].cooldowns[1] = -0.5;

        let err = table.validate(&ComboBindings::default()).unwrap_err();
        assert_eq!(err, AbilityTableError::InvalidCooldown { slot: 0, step: 1, value: -0.5 });
    }

    #[test]
    fn rejects_empty_ability() {
        let mut table = AbilityTable::default();
        table.abilities[5].steps.clear();
        table.abilities[5].cooldowns.clear();

        let err = table.validate(&ComboBindings::default()).unwrap_err();
        assert!(matches!(err, AbilityTableError::NoSteps { slot: 5, .. }));
    }

    #[test]
    fn rejects_table_shorter_than_bindings() {
        let mut table = AbilityTable::default();
        table.abilities.truncate(10);

        let err = table.validate(&ComboBindings::default()).unwrap_err();
        assert!(matches!(err, AbilityTableError::MissingSlot { len: 10, .. }));
    }

    #[test]
    fn parses_ron_table() {
        let source = r#"(
            abilities: [
                (name: "Jab", steps: ["Jab1", "Jab2"], cooldowns: [0.2, 0.3], icon: Some("icons/jab.png")),
                (name: "Kick", steps: ["Kick"], cooldowns: [1.0]),
            ],
        )"#;

        let table: AbilityTable = parse_ron("inline", source).unwrap();
        assert!(table.is_melee);
        assert_eq!(table.len(), 2);
        assert_eq!(table.abilities[0].steps, vec!["Jab1", "Jab2"]);
        assert_eq!(table.abilities[1].icon, None);
    }

    #[test]
    fn shipped_data_file_is_valid() {
        let source = include_str!("../../assets/data/combat/abilities.ron");
        let table: AbilityTable = parse_ron(ABILITY_TABLE_PATH, source).unwrap();
        assert_eq!(table.validate(&ComboBindings::default()), Ok(()));
    }
}
