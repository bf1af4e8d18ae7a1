//! Attachment Detacher + Fitter
//!
//! # Systems
//! - `process_remove_attachment_requests` - attachment с оружия на землю
//! - `process_attach_attachment_requests` - attachment на оружие (replace по типу)
//!
//! Вся мутация через Commands: `AttachedTo` remove/insert и новый Item state
//! применяются одним apply, relationship hooks держат `WeaponAttachments`
//! в синхроне с обеих сторон.

use bevy::prelude::*;
use std::collections::HashMap;

use super::events::*;
use crate::components::*;
use crate::templates::AttachmentType;
use crate::log;

/// Оружие, видимое fitter'у/detacher'у
type GunView = (
    &'static Transform,
    &'static AnchorPoints,
    Option<&'static WeaponAttachments>,
    Option<&'static OwnedBy>,
);

/// Attachment, видимый fitter'у/detacher'у
type AttachmentView = (
    &'static WeaponAttachment,
    &'static Item,
    Option<&'static AttachedTo>,
    Option<&'static OwnedBy>,
);

/// Attachment → земля в позиции оружия (visible, не equipped)
fn detach(commands: &mut Commands, attachment: Entity, item: &Item, gun_transform: &Transform) {
    let mut dropped = *item;
    dropped.drop_to_ground();

    commands.entity(attachment).remove::<AttachedTo>().insert((
        dropped,
        Transform::from_translation(gun_transform.translation),
        VisualState::visible(),
    ));
}

/// Owner'у оружия надо перерисовать inventory
fn flag_owner(commands: &mut Commands, owner: Option<&OwnedBy>) {
    if let Some(owner) = owner {
        commands.entity(owner.0).try_insert(InventoryDirty);
    }
}

// ============================================================================
// Detach
// ============================================================================

pub fn process_remove_attachment_requests(
    mut commands: Commands,
    mut requests: EventReader<RemoveAttachmentRequest>,
    guns: Query<GunView, With<Gun>>,
    attachments: Query<AttachmentView>,
) {
    for request in requests.read() {
        // Stale reference → silent no-op
        let Ok((_, item, Some(attached_to), _)) = attachments.get(request.attachment_entity) else {
            continue;
        };
        if attached_to.0 != request.gun_entity {
            continue;
        }
        let Ok((gun_transform, _, _, gun_owner)) = guns.get(request.gun_entity) else {
            continue;
        };

        detach(&mut commands, request.attachment_entity, item, gun_transform);
        flag_owner(&mut commands, gun_owner);

        log(&format!(
            "🔩 Detached {:?} from gun {:?}",
            request.attachment_entity, request.gun_entity
        ));
    }
}

// ============================================================================
// Fit
// ============================================================================

pub fn process_attach_attachment_requests(
    mut commands: Commands,
    mut requests: EventReader<AttachAttachmentRequest>,
    guns: Query<GunView, With<Gun>>,
    attachments: Query<AttachmentView>,
) {
    // Fits этого прохода (WeaponAttachments увидит их только после apply)
    let mut fitted: HashMap<(Entity, AttachmentType), Entity> = HashMap::new();
    // Где attachment окажется после apply: Some(gun) или None (на земле)
    let mut placement: HashMap<Entity, Option<Entity>> = HashMap::new();

    for request in requests.read() {
        let gun = request.gun_entity;
        let Ok((gun_transform, anchors, current, gun_owner)) = guns.get(gun) else {
            continue;
        };
        let Ok((weapon_attachment, item, attached_to, attachment_owner)) =
            attachments.get(request.attachment_entity)
        else {
            continue;
        };

        let attachment_type = weapon_attachment.attachment_type;
        let parent = placement
            .get(&request.attachment_entity)
            .copied()
            .unwrap_or(attached_to.map(|parent| parent.0));
        if parent == Some(gun) {
            continue;
        }

        let still_on_gun = |entity: Entity, placement: &HashMap<Entity, Option<Entity>>| {
            placement.get(&entity).is_none_or(|&at| at == Some(gun))
        };

        // Replace: тот же тип уже стоит на оружии
        let existing = current.map(|list| list.entities()).unwrap_or_default();
        for &other in existing {
            if other == request.attachment_entity || !still_on_gun(other, &placement) {
                continue;
            }
            let Ok((other_attachment, other_item, _, _)) = attachments.get(other) else {
                continue;
            };
            if other_attachment.attachment_type == attachment_type {
                detach(&mut commands, other, other_item, gun_transform);
                placement.insert(other, None);
            }
        }

        if let Some(previous) = fitted.insert((gun, attachment_type), request.attachment_entity) {
            if placement.get(&previous) == Some(&Some(gun)) {
                if let Ok((_, previous_item, _, _)) = attachments.get(previous) {
                    detach(&mut commands, previous, previous_item, gun_transform);
                    placement.insert(previous, None);
                }
            }
        }

        if let Some(previous_gun) = parent {
            if let Ok((_, _, _, previous_owner)) = guns.get(previous_gun) {
                flag_owner(&mut commands, previous_owner);
            }
        }
        placement.insert(request.attachment_entity, Some(gun));

        let mut fitted_item = *item;
        fitted_item.mark_attached();

        let mut entity = commands.entity(request.attachment_entity);
        entity.insert((
            AttachedTo(gun),
            fitted_item,
            anchors.anchor_for(attachment_type),
            VisualState::hidden(),
        ));
        if attachment_owner.is_some() {
            entity.remove::<OwnedBy>();
        }
        flag_owner(&mut commands, attachment_owner);
        flag_owner(&mut commands, gun_owner);

        log(&format!(
            "🔩 Fitted {:?} ({:?}) to gun {:?}",
            request.attachment_entity, attachment_type, gun
        ));
    }
}
