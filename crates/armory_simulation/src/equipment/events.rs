//! Equipment events (intents + outcomes)
//!
//! # Architecture
//!
//! **Spawn (registry-driven):**
//! - `SpawnLootRequest` → loot selector выбирает template → один из spawn request'ов ниже
//! - `SpawnGunRequest` → gun + default attachments (Scope/Barrel)
//! - `SpawnAttachmentRequest` → loose attachment на земле
//! - `SpawnPassiveItemRequest` → passive item на земле
//!
//! **Attachments:**
//! - `RemoveAttachmentRequest` → detach, attachment падает на землю
//! - `AttachAttachmentRequest` → fit на оружие (заменяет тот же тип)
//!
//! **Lifecycle:**
//! - `EquipItemRequest` / `DropItemRequest`
//!
//! **Outcomes:** `ItemAssembled`, `SpawnFailed`
//!
//! Request "уничтожается" тем, что reader его прочитал: каждый обрабатывается
//! ровно один раз.

use bevy::prelude::*;

use super::error::SpawnError;
use crate::components::ItemType;
use crate::templates::{AttachmentType, GunType, PassiveItemType};

// ============================================================================
// Spawn requests
// ============================================================================

#[derive(Event, Clone, Debug)]
pub struct SpawnGunRequest {
    pub gun_type: GunType,
    pub variant_id: u32,
    pub position: Vec3,
    pub scale: f32,
}

#[derive(Event, Clone, Debug)]
pub struct SpawnAttachmentRequest {
    pub attachment_type: AttachmentType,
    pub variant_id: u32,
    pub position: Vec3,
}

#[derive(Event, Clone, Debug)]
pub struct SpawnPassiveItemRequest {
    pub passive_item_type: PassiveItemType,
    pub variant_id: u32,
    pub position: Vec3,
    pub scale: f32,
}

/// Loot drop в точке (категория решается selector'ом)
#[derive(Event, Clone, Debug)]
pub struct SpawnLootRequest {
    pub position: Vec3,
    pub scale: f32,
}

// ============================================================================
// Attachment requests
// ============================================================================

/// Снять attachment с оружия
///
/// # Flow
/// 1. Убрать `AttachedTo` (WeaponAttachments обновится hooks'ами)
/// 2. Item → on ground, visible, в позиции оружия
/// 3. Owner оружия → `InventoryDirty`
///
/// Несуществующий attachment / не тот parent → no-op.
#[derive(Event, Clone, Debug)]
pub struct RemoveAttachmentRequest {
    pub gun_entity: Entity,
    pub attachment_entity: Entity,
}

/// Поставить attachment на оружие
///
/// Attachment того же типа, уже стоящий на оружии, снимается.
#[derive(Event, Clone, Debug)]
pub struct AttachAttachmentRequest {
    pub gun_entity: Entity,
    pub attachment_entity: Entity,
}

// ============================================================================
// Lifecycle requests
// ============================================================================

/// Положить предмет в inventory slot актора
#[derive(Event, Clone, Debug)]
pub struct EquipItemRequest {
    pub actor: Entity,
    pub item: Entity,
    pub slot: i32,
}

/// Выбросить предмет на землю
#[derive(Event, Clone, Debug)]
pub struct DropItemRequest {
    pub item: Entity,
    pub position: Vec3,
}

// ============================================================================
// Outcomes
// ============================================================================

/// Предмет собран (entity валиден после ближайшего sync point)
#[derive(Event, Clone, Debug)]
pub struct ItemAssembled {
    pub entity: Entity,
    pub item_type: ItemType,
}

#[derive(Event, Clone, Debug)]
pub struct SpawnFailed {
    pub error: SpawnError,
}
