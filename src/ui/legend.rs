//! Combo key legend shown on the pause overlay.

use bevy::prelude::*;

use crate::combat::{AbilityTable, ComboBindings, HoldSlots, Modifier};

/// One row of the legend: the input and what it does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub input: String,
    pub action: String,
}

fn key_name(key: KeyCode) -> String {
    match key {
        KeyCode::ShiftLeft | KeyCode::ShiftRight => "Shift".to_string(),
        _ => {
            let name = format!("{:?}", key);
            name.strip_prefix("Key").unwrap_or(&name).to_string()
        }
    }
}

fn mouse_name(button: MouseButton) -> String {
    match button {
        MouseButton::Left => "LMB".to_string(),
        MouseButton::Right => "RMB".to_string(),
        MouseButton::Middle => "MMB".to_string(),
        other => format!("{:?}", other),
    }
}

fn modifier_name(modifier: Modifier, bindings: &ComboBindings) -> String {
    match modifier {
        Modifier::Shift => "Shift".to_string(),
        Modifier::Forward => key_name(bindings.forward_key),
        Modifier::Backward => key_name(bindings.backward_key),
    }
}

/// Every binding with the ability it fires, holds first.
///
/// Slots missing from the table are left out.
pub fn legend_entries(bindings: &ComboBindings, table: &AbilityTable) -> Vec<LegendEntry> {
    let mut entries = vec![LegendEntry {
        input: key_name(bindings.weapon_toggle),
        action: "Draw / sheathe weapon".to_string(),
    }];

    let mut push = |input: String, slot: usize| {
        if let Some(ability) = table.get(slot) {
            entries.push(LegendEntry {
                input,
                action: ability.name.clone(),
            });
        }
    };

    let primary = mouse_name(bindings.primary);
    let secondary = mouse_name(bindings.secondary);
    let holds: [(Option<Modifier>, HoldSlots); 4] = [
        (None, bindings.neutral_holds),
        (Some(Modifier::Shift), bindings.shift_holds),
        (Some(Modifier::Forward), bindings.forward_holds),
        (Some(Modifier::Backward), bindings.backward_holds),
    ];
    for (modifier, slots) in holds {
        let prefix = modifier
            .map(|m| format!("{}+", modifier_name(m, bindings)))
            .unwrap_or_default();
        push(format!("{}{}", prefix, primary), slots.primary);
        push(format!("{}{}", prefix, secondary), slots.secondary);
    }

    for chord in &bindings.chords {
        let prefix = chord
            .modifier
            .map(|m| format!("{}+", modifier_name(m, bindings)))
            .unwrap_or_default();
        push(format!("{}{}", prefix, key_name(chord.key)), chord.slot);
    }

    entries
}
