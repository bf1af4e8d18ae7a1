//! Template records - immutable stat-range blueprints
//!
//! # Архитектура
//!
//! **TemplateRecord** - статический blueprint одного catalog entry:
//! - Создаётся один раз import шагом (RON catalog или hardcoded default)
//! - Хранится в `TemplateStore` как `Arc<TemplateRecord>`
//! - Template entity держит `Template` (клон `Arc`, не копия данных)
//!
//! **Rolled stats** - конкретные значения, которые assembler получает
//! через weighted roller из `*StatRange` (см. `loot::roller`).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;

use super::key::CompositeKey;

// ============================================================================
// Category + kinds
// ============================================================================

/// Категория каталога (у каждой свой registry и свой tag в CompositeKey)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Reflect)]
pub enum Category {
    Attachment,
    Gun,
    PassiveItem,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Attachment => "Attachment",
            Category::Gun => "Gun",
            Category::PassiveItem => "PassiveItem",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Тип внутри категории (GunType, AttachmentType, PassiveItemType)
///
/// Index = порядок объявления в `ALL`, он же участвует в CompositeKey.
pub trait TemplateKind: Copy + Eq + Debug + Send + Sync + 'static {
    const CATEGORY: Category;
    const ALL: &'static [Self];

    fn index(self) -> u32;

    fn name(self) -> &'static str;

    fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
pub enum GunType {
    Pistol,
    Rifle,
    Shotgun,
    Smg,
    Sniper,
}

impl TemplateKind for GunType {
    const CATEGORY: Category = Category::Gun;
    const ALL: &'static [Self] = &[
        GunType::Pistol,
        GunType::Rifle,
        GunType::Shotgun,
        GunType::Smg,
        GunType::Sniper,
    ];

    fn index(self) -> u32 {
        self as u32
    }

    fn name(self) -> &'static str {
        match self {
            GunType::Pistol => "Pistol",
            GunType::Rifle => "Rifle",
            GunType::Shotgun => "Shotgun",
            GunType::Smg => "Smg",
            GunType::Sniper => "Sniper",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
pub enum AttachmentType {
    Scope,
    Barrel,
    Grip,
    Stock,
}

impl TemplateKind for AttachmentType {
    const CATEGORY: Category = Category::Attachment;
    const ALL: &'static [Self] = &[
        AttachmentType::Scope,
        AttachmentType::Barrel,
        AttachmentType::Grip,
        AttachmentType::Stock,
    ];

    fn index(self) -> u32 {
        self as u32
    }

    fn name(self) -> &'static str {
        match self {
            AttachmentType::Scope => "Scope",
            AttachmentType::Barrel => "Barrel",
            AttachmentType::Grip => "Grip",
            AttachmentType::Stock => "Stock",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
pub enum PassiveItemType {
    HeartContainer,
    SwiftBoots,
    PowerCell,
    LuckyCharm,
}

impl TemplateKind for PassiveItemType {
    const CATEGORY: Category = Category::PassiveItem;
    const ALL: &'static [Self] = &[
        PassiveItemType::HeartContainer,
        PassiveItemType::SwiftBoots,
        PassiveItemType::PowerCell,
        PassiveItemType::LuckyCharm,
    ];

    fn index(self) -> u32 {
        self as u32
    }

    fn name(self) -> &'static str {
        match self {
            PassiveItemType::HeartContainer => "HeartContainer",
            PassiveItemType::SwiftBoots => "SwiftBoots",
            PassiveItemType::PowerCell => "PowerCell",
            PassiveItemType::LuckyCharm => "LuckyCharm",
        }
    }
}

// ============================================================================
// Ranges
// ============================================================================

/// Closed continuous range [min, max]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatRange {
    pub min: f32,
    pub max: f32,
}

impl StatRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min.min(self.max) && value <= self.max.max(self.min)
    }
}

/// Closed integral range [min, max]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IntRange {
    pub min: i32,
    pub max: i32,
}

impl IntRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: i32) -> bool {
        value >= self.min.min(self.max) && value <= self.max.max(self.min)
    }
}

/// Stat ranges оружия (designer-authored)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GunStatRange {
    pub damage: StatRange,
    pub accuracy: StatRange,
    pub attack_rate: StatRange,
    pub recoil_amount: StatRange,
    pub spread_amount: StatRange,
    pub reload_time: StatRange,
    pub ammo_capacity: IntRange,
    pub durability: IntRange,
    pub bullets_per_shot: IntRange,
    #[serde(default)]
    pub piercing: IntRange,
}

/// Дельты attachment'а (складываются с base stats оружия)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachmentStatRange {
    pub damage: StatRange,
    pub accuracy: StatRange,
    pub attack_rate: StatRange,
    pub recoil_amount: StatRange,
    pub spread_amount: StatRange,
    pub bullets_per_shot: IntRange,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PassiveStatRange {
    pub max_health_bonus: IntRange,
    pub move_speed_bonus: StatRange,
    pub damage_bonus: StatRange,
    pub reload_speed_bonus: StatRange,
}

// ============================================================================
// Anchor points
// ============================================================================

/// Named local-space transform на оружии ("MuzzlePoint", "ScopePoint")
///
/// `rotation` - угол вокруг Z (радианы), игра top-down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorPoint {
    pub position: [f32; 3],
    pub rotation: f32,
    pub scale: [f32; 3],
    pub offset: [f32; 3],
}

impl Default for AnchorPoint {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: 0.0,
            scale: [1.0; 3],
            offset: [0.0; 3],
        }
    }
}

impl AnchorPoint {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: [x, y, 0.0],
            ..Default::default()
        }
    }

    /// Local transform attachment'а относительно оружия
    pub fn to_transform(&self) -> Transform {
        let translation = Vec3::from_array(self.position) + Vec3::from_array(self.offset);
        Transform::from_translation(translation)
            .with_rotation(Quat::from_rotation_z(self.rotation))
            .with_scale(Vec3::from_array(self.scale))
    }
}

// ============================================================================
// Templates
// ============================================================================

fn enabled_by_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GunTemplate {
    pub name: String,
    pub gun_type: GunType,
    pub variant_id: u32,
    pub loot_weight: f32,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    pub stats: GunStatRange,
    #[serde(default)]
    pub muzzle_point: AnchorPoint,
    #[serde(default)]
    pub scope_point: AnchorPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentTemplate {
    pub name: String,
    pub attachment_type: AttachmentType,
    pub variant_id: u32,
    pub loot_weight: f32,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub stats: AttachmentStatRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassiveItemTemplate {
    pub name: String,
    pub passive_item_type: PassiveItemType,
    pub variant_id: u32,
    pub loot_weight: f32,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub stackable: bool,
    #[serde(default)]
    pub stats: PassiveStatRange,
}

/// Один catalog entry любой категории
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateRecord {
    Gun(GunTemplate),
    Attachment(AttachmentTemplate),
    PassiveItem(PassiveItemTemplate),
}

impl TemplateRecord {
    pub fn category(&self) -> Category {
        match self {
            TemplateRecord::Gun(_) => Category::Gun,
            TemplateRecord::Attachment(_) => Category::Attachment,
            TemplateRecord::PassiveItem(_) => Category::PassiveItem,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TemplateRecord::Gun(t) => &t.name,
            TemplateRecord::Attachment(t) => &t.name,
            TemplateRecord::PassiveItem(t) => &t.name,
        }
    }

    pub fn type_index(&self) -> u32 {
        match self {
            TemplateRecord::Gun(t) => t.gun_type.index(),
            TemplateRecord::Attachment(t) => t.attachment_type.index(),
            TemplateRecord::PassiveItem(t) => t.passive_item_type.index(),
        }
    }

    pub fn variant_id(&self) -> u32 {
        match self {
            TemplateRecord::Gun(t) => t.variant_id,
            TemplateRecord::Attachment(t) => t.variant_id,
            TemplateRecord::PassiveItem(t) => t.variant_id,
        }
    }

    pub fn loot_weight(&self) -> f32 {
        match self {
            TemplateRecord::Gun(t) => t.loot_weight,
            TemplateRecord::Attachment(t) => t.loot_weight,
            TemplateRecord::PassiveItem(t) => t.loot_weight,
        }
    }

    pub fn enabled(&self) -> bool {
        match self {
            TemplateRecord::Gun(t) => t.enabled,
            TemplateRecord::Attachment(t) => t.enabled,
            TemplateRecord::PassiveItem(t) => t.enabled,
        }
    }

    /// None если variant/type не помещаются в key (см. `CompositeKey::new`)
    pub fn composite_key(&self) -> Option<CompositeKey> {
        CompositeKey::new(self.category(), self.type_index(), self.variant_id())
    }

    pub fn as_gun(&self) -> Option<&GunTemplate> {
        match self {
            TemplateRecord::Gun(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_attachment(&self) -> Option<&AttachmentTemplate> {
        match self {
            TemplateRecord::Attachment(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_passive_item(&self) -> Option<&PassiveItemTemplate> {
        match self {
            TemplateRecord::PassiveItem(t) => Some(t),
            _ => None,
        }
    }
}

// ============================================================================
// Template entity
// ============================================================================

/// Runtime template id = template entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct TemplateId(pub Entity);

/// Компонент template entity (shared record, не копия)
#[derive(Component, Debug, Clone)]
pub struct Template(pub Arc<TemplateRecord>);

impl Template {
    pub fn record(&self) -> &TemplateRecord {
        &self.0
    }
}
