//! Passive item компоненты

use bevy::prelude::*;

use crate::templates::{PassiveItemType, TemplateId};

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PassiveItem {
    pub passive_item_type: PassiveItemType,
    pub variant_id: u32,
    pub template: TemplateId,
}

/// Rolled бонусы (применяет player stats collaborator)
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct PassiveEffect {
    pub max_health_bonus: i32,
    pub move_speed_bonus: f32,
    pub damage_bonus: f32,
    pub reload_speed_bonus: f32,
}
