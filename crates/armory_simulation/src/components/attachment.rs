//! Attachment компоненты: модификаторы оружия и связь parent/child
//!
//! # Attachment relation
//! - `AttachedTo(gun)` на attachment - weak back-reference (просто id)
//! - `WeaponAttachments` на оружии - owned ordered list, ведётся hooks'ами
//! - Remove `AttachedTo` → attachment пропадает из списка в том же apply
//! - Despawn оружия → despawn его attachments (linked_spawn)

use bevy::prelude::*;
use std::ops::Deref;

use crate::templates::{AttachmentType, TemplateId};

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct WeaponAttachment {
    pub attachment_type: AttachmentType,
    pub variant_id: u32,
    pub template: TemplateId,
}

/// Rolled дельты (прибавляются к base stats оружия)
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct AttachmentModifier {
    pub damage: f32,
    pub accuracy: f32,
    pub attack_rate: f32,
    pub recoil_amount: f32,
    pub spread_amount: f32,
    pub bullets_per_shot: i32,
}

/// Attachment → оружие
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
#[relationship(relationship_target = WeaponAttachments)]
pub struct AttachedTo(pub Entity);

/// Оружие → attachments (в порядке присоединения)
#[derive(Component, Default, Debug)]
#[relationship_target(relationship = AttachedTo, linked_spawn)]
pub struct WeaponAttachments(Vec<Entity>);

impl WeaponAttachments {
    pub fn entities(&self) -> &[Entity] {
        &self.0
    }
}

impl Deref for WeaponAttachments {
    type Target = [Entity];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
