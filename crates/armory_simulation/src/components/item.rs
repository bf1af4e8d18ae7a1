//! Item компоненты: runtime state предмета + ownership
//!
//! # State machine
//! `Instantiated(on_ground) ⇄ Equipped ⇄ Dropped`
//!
//! Attachment на оружии - отдельное состояние (`is_equipped`, не on_ground,
//! slot = -1), см. `components::attachment`.

use bevy::prelude::*;
use std::ops::Deref;

use crate::templates::{AttachmentType, GunType, PassiveItemType};

/// Слот не назначен (предмет не в инвентаре)
pub const NO_SLOT: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ItemType {
    Gun(GunType),
    Attachment(AttachmentType),
    PassiveItem(PassiveItemType),
}

/// Runtime item state
///
/// Инвариант: `on_ground` ⇒ `!is_equipped && slot == NO_SLOT`
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Item {
    pub slot: i32,
    pub item_type: ItemType,
    pub is_equipped: bool,
    pub quantity: u32,
    pub is_stackable: bool,
    pub on_ground: bool,
}

impl Item {
    /// Свежий предмет на земле (после assembly)
    pub fn on_ground(item_type: ItemType, is_stackable: bool) -> Self {
        Self {
            slot: NO_SLOT,
            item_type,
            is_equipped: false,
            quantity: 1,
            is_stackable,
            on_ground: true,
        }
    }

    /// Attachment, сидящий на оружии
    pub fn attached(item_type: ItemType) -> Self {
        let mut item = Self::on_ground(item_type, false);
        item.mark_attached();
        item
    }

    pub fn drop_to_ground(&mut self) {
        self.slot = NO_SLOT;
        self.is_equipped = false;
        self.on_ground = true;
    }

    pub fn mark_attached(&mut self) {
        self.slot = NO_SLOT;
        self.is_equipped = true;
        self.on_ground = false;
    }

    pub fn equip_into(&mut self, slot: i32) {
        self.slot = slot;
        self.is_equipped = true;
        self.on_ground = false;
    }

    pub fn is_dropped(&self) -> bool {
        self.on_ground && !self.is_equipped && self.slot == NO_SLOT
    }
}

// ============================================================================
// Ownership (actor ↔ item)
// ============================================================================

/// Item → actor, который его держит
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
#[relationship(relationship_target = OwnedItems)]
pub struct OwnedBy(pub Entity);

/// Actor → все его предметы (поддерживается relationship hooks)
#[derive(Component, Default, Debug)]
#[relationship_target(relationship = OwnedBy)]
pub struct OwnedItems(Vec<Entity>);

impl OwnedItems {
    pub fn entities(&self) -> &[Entity] {
        &self.0
    }
}

impl Deref for OwnedItems {
    type Target = [Entity];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Marker: inventory UI актора надо перерисовать
///
/// Ставят equipment системы, снимает UI collaborator.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct InventoryDirty;

/// Видимость визуала для rendering collaborator
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct VisualState {
    pub hidden: bool,
}

impl VisualState {
    pub fn visible() -> Self {
        Self { hidden: false }
    }

    pub fn hidden() -> Self {
        Self { hidden: true }
    }
}
