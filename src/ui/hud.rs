//! In-game HUD - ability bar with icons, cooldown fills and weapon state.

use bevy::prelude::*;

use crate::combat::{AbilityResolver, AbilityTable};
use crate::core::GameState;
use crate::player::Player;

const ICON_SIZE: f32 = 40.0;
const SLOT_BACKGROUND: Color = Color::srgb(0.1, 0.1, 0.12);
const COOLDOWN_SHADE: Color = Color::srgba(0.0, 0.0, 0.0, 0.65);

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// UI image that shows the icon of the ability in `slot`.
#[derive(Component, Debug, Clone, Copy)]
pub struct AbilityIcon {
    pub slot: usize,
}

/// Shade over an ability icon, sized by the remaining cooldown.
#[derive(Component, Debug, Clone, Copy)]
pub struct CooldownFill {
    pub slot: usize,
}

/// Text showing whether the weapon is drawn.
#[derive(Component)]
pub struct WeaponLabel;

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnExit(GameState::InGame), cleanup_hud)
        .add_systems(
            Update,
            (bind_ability_icons, update_cooldown_fills, update_weapon_label).run_if(in_state(GameState::InGame)),
        );
}

/// Icon asset for `slot`, if the ability exists and has one.
pub fn icon_path(table: &AbilityTable, slot: usize) -> Option<&str> {
    table.get(slot)?.icon.as_deref().filter(|path| !path.is_empty())
}

/// Fraction of the icon to shade, 1.0 right after use and 0.0 when ready.
pub fn cooldown_fraction(remaining: f32, longest: f32) -> f32 {
    if remaining <= 0.0 || longest <= 0.0 {
        return 0.0;
    }
    (remaining / longest).min(1.0)
}

fn weapon_text(equipped: bool, is_melee: bool) -> String {
    let weapon = if is_melee { "Melee weapon" } else { "Ranged weapon" };
    let state = if equipped { "drawn" } else { "sheathed" };
    format!("{} {} [C]", weapon, state)
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands, table: Res<AbilityTable>) {
    // HUD root container (bottom-center)
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::End,
                align_items: AlignItems::Center,
                padding: UiRect::all(Val::Px(20.0)),
                position_type: PositionType::Absolute,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(weapon_text(false, table.is_melee)),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
                Node {
                    margin: UiRect::bottom(Val::Px(8.0)),
                    ..default()
                },
                WeaponLabel,
            ));

            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    column_gap: Val::Px(4.0),
                    ..default()
                })
                .with_children(|bar| {
                    for slot in 0..table.len() {
                        spawn_ability_slot(bar, slot);
                    }
                });
        });
}

/// Helper to spawn one icon with its cooldown shade.
fn spawn_ability_slot(parent: &mut ChildBuilder, slot: usize) {
    parent
        .spawn((
            Node {
                width: Val::Px(ICON_SIZE),
                height: Val::Px(ICON_SIZE),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::End,
                ..default()
            },
            BackgroundColor(SLOT_BACKGROUND),
            AbilityIcon { slot },
        ))
        .with_children(|icon| {
            // Shade drains downwards as the cooldown runs out
            icon.spawn((
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(0.0),
                    ..default()
                },
                BackgroundColor(COOLDOWN_SHADE),
                CooldownFill { slot },
            ));
        });
}

/// Give each newly spawned icon node its ability's image.
///
/// Runs once per node; abilities without an icon stay blank.
pub fn bind_ability_icons(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    table: Res<AbilityTable>,
    icon_query: Query<(Entity, &AbilityIcon), Added<AbilityIcon>>,
) {
    for (entity, icon) in icon_query.iter() {
        let Some(path) = icon_path(&table, icon.slot) else {
            debug!("No icon for ability slot {}", icon.slot);
            continue;
        };

        let image: Handle<Image> = asset_server.load(path.to_string());
        commands.entity(entity).insert(ImageNode::new(image));
    }
}

/// Resize cooldown shades from the player's resolver.
fn update_cooldown_fills(
    time: Res<Time>,
    table: Res<AbilityTable>,
    player_query: Query<&AbilityResolver, With<Player>>,
    mut fill_query: Query<(&mut Node, &CooldownFill)>,
) {
    let Ok(resolver) = player_query.get_single() else {
        return;
    };
    let now = time.elapsed_secs_f64();

    for (mut node, fill) in fill_query.iter_mut() {
        let longest = table
            .get(fill.slot)
            .map(|ability| ability.cooldowns.iter().copied().fold(0.0, f32::max))
            .unwrap_or(0.0);
        let fraction = cooldown_fraction(resolver.cooldown_remaining(fill.slot, now), longest);
        node.height = Val::Percent(fraction * 100.0);
    }
}

/// Update the weapon label when the weapon is drawn or sheathed.
fn update_weapon_label(
    table: Res<AbilityTable>,
    player_query: Query<&AbilityResolver, (With<Player>, Changed<AbilityResolver>)>,
    mut label_query: Query<&mut Text, With<WeaponLabel>>,
) {
    let Ok(resolver) = player_query.get_single() else {
        return;
    };
    let Ok(mut label) = label_query.get_single_mut() else {
        return;
    };

    let text = weapon_text(resolver.weapon_equipped(), table.is_melee);
    if label.0 != text {
        label.0 = text;
    }
}

/// Clean up HUD entities.
fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::AbilityDefinition;

    fn table() -> AbilityTable {
        AbilityTable {
            abilities: vec![
                AbilityDefinition::new("Slash", &[("Attack1", 0.5), ("Attack2", 0.9)], Some("icons/slash.png")),
                AbilityDefinition::new("Parry", &[("Parry", 1.0)], None),
                AbilityDefinition::new("Blank", &[("Blank", 1.0)], Some("")),
            ],
            is_melee: true,
        }
    }

    #[test]
    fn icon_lookup() {
        let table = table();

        assert_eq!(icon_path(&table, 0), Some("icons/slash.png"));
        assert_eq!(icon_path(&table, 1), None);
        assert_eq!(icon_path(&table, 2), None);
        assert_eq!(icon_path(&table, 99), None);
    }

    #[test]
    fn cooldown_fraction_bounds() {
        assert_eq!(cooldown_fraction(0.0, 0.9), 0.0);
        assert_eq!(cooldown_fraction(0.45, 0.9), 0.5);
        assert_eq!(cooldown_fraction(2.0, 0.9), 1.0);
        assert_eq!(cooldown_fraction(1.0, 0.0), 0.0);
    }

    #[test]
    fn binder_sets_image_once_and_skips_missing_icons() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Image>()
            .insert_resource(table())
            .add_systems(Update, bind_ability_icons);

        let with_icon = app.world_mut().spawn(AbilityIcon { slot: 0 }).id();
        let without_icon = app.world_mut().spawn(AbilityIcon { slot: 1 }).id();
        let out_of_range = app.world_mut().spawn(AbilityIcon { slot: 42 }).id();

        app.update();

        let bound = app.world().get::<ImageNode>(with_icon).map(|node| node.image.clone());
        assert!(bound.is_some());
        assert!(app.world().get::<ImageNode>(without_icon).is_none());
        assert!(app.world().get::<ImageNode>(out_of_range).is_none());

        // A second frame leaves the existing binding alone
        app.update();
        let rebound = app.world().get::<ImageNode>(with_icon).map(|node| node.image.clone());
        assert_eq!(bound, rebound);
    }

    #[test]
    fn weapon_label_text() {
        assert_eq!(weapon_text(true, true), "Melee weapon drawn [C]");
        assert_eq!(weapon_text(false, true), "Melee weapon sheathed [C]");
        assert_eq!(weapon_text(true, false), "Ranged weapon drawn [C]");
    }
}
