//! Combat plugin - ability table, bindings and the combo pipeline.

use bevy::prelude::*;

use super::bindings::ComboBindings;
use super::data::load_ability_table;
use super::systems;

/// Combat plugin - handles weapon draw, held and momentary attacks, cooldowns.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app
            // Bindings are fixed for the session; the table is validated against them
            .init_resource::<ComboBindings>()
            .add_systems(Startup, load_ability_table);

        systems::setup_combo_systems(app);
    }
}
