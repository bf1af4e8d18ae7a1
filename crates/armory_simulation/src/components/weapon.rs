//! Weapon компоненты собранного оружия
//!
//! `BaseWeaponStats` - rolled при assembly, дальше не меняется.
//! `EffectiveWeaponStats` - base + Σ attachment modifiers, пересчитывается
//! каждый тик (`equipment::aggregator`). Shooting читает только effective.

use bevy::prelude::*;

use crate::templates::{AttachmentType, GunType, TemplateId};

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Gun {
    pub gun_type: GunType,
    pub variant_id: u32,
    pub template: TemplateId,
}

/// Магазин
///
/// Инвариант: 0 ≤ current_ammo ≤ capacity
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Ammo {
    pub capacity: i32,
    pub current_ammo: i32,
    pub reload_time: f32,
    pub is_reloading: bool,
}

impl Ammo {
    /// Полный магазин
    pub fn full(capacity: i32, reload_time: f32) -> Self {
        Self {
            capacity,
            current_ammo: capacity,
            reload_time,
            is_reloading: false,
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Durability {
    pub current: i32,
    pub max: i32,
}

impl Durability {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct BaseWeaponStats {
    pub damage: f32,
    pub accuracy: f32,
    pub attack_rate: f32,
    pub recoil_amount: f32,
    pub spread_amount: f32,
    pub bullets_per_shot: i32,
    pub piercing: i32,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct EffectiveWeaponStats {
    pub damage: f32,
    pub accuracy: f32,
    pub attack_rate: f32,
    pub recoil_amount: f32,
    pub spread_amount: f32,
    pub bullets_per_shot: i32,
    pub piercing: i32,
}

impl From<&BaseWeaponStats> for EffectiveWeaponStats {
    fn from(base: &BaseWeaponStats) -> Self {
        Self {
            damage: base.damage,
            accuracy: base.accuracy,
            attack_rate: base.attack_rate,
            recoil_amount: base.recoil_amount,
            spread_amount: base.spread_amount,
            bullets_per_shot: base.bullets_per_shot,
            piercing: base.piercing,
        }
    }
}

/// Anchor points оружия (weapon-local space)
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct AnchorPoints {
    pub muzzle: Transform,
    pub scope: Transform,
}

impl AnchorPoints {
    /// Куда садится attachment данного типа
    ///
    /// Grip/Stock у template'ов без своих anchor'ов - в origin оружия.
    pub fn anchor_for(&self, attachment_type: AttachmentType) -> Transform {
        match attachment_type {
            AttachmentType::Scope => self.scope,
            AttachmentType::Barrel => self.muzzle,
            AttachmentType::Grip | AttachmentType::Stock => Transform::IDENTITY,
        }
    }
}
