//! Item lifecycle: on ground ⇄ equipped (inventory slot актора)
//!
//! Attachment, сидящий на оружии, через эти requests не двигается:
//! для него есть Remove/AttachAttachmentRequest.

use bevy::prelude::*;
use std::collections::HashMap;

use super::events::*;
use crate::components::*;
use crate::{log, log_warning};

type ItemView = (
    &'static Item,
    Option<&'static OwnedBy>,
    Option<&'static AttachedTo>,
    Option<&'static Transform>,
);

/// Process equip intents
///
/// Slot должен быть >= 0 и свободен у актора (с учётом equips этого же прохода).
pub fn process_equip_item_requests(
    mut commands: Commands,
    mut requests: EventReader<EquipItemRequest>,
    items: Query<ItemView>,
    actors: Query<Option<&OwnedItems>>,
) {
    // Equips этого прохода: item → (actor, slot)
    let mut placed: HashMap<Entity, (Entity, i32)> = HashMap::new();

    for request in requests.read() {
        let Ok((item, owner, attached_to, _)) = items.get(request.item) else {
            continue;
        };
        let Ok(inventory) = actors.get(request.actor) else {
            continue;
        };
        if attached_to.is_some() {
            log_warning(&format!(
                "⚠️ {:?} is attached to a gun, detach it before equip",
                request.item
            ));
            continue;
        }
        if request.slot < 0 {
            log_warning(&format!(
                "⚠️ Invalid slot {} for {:?}",
                request.slot, request.item
            ));
            continue;
        }

        let target = (request.actor, request.slot);
        let claimed_this_pass = placed
            .iter()
            .any(|(&other, &at)| other != request.item && at == target);
        let held_before = inventory
            .map(|owned| owned.entities())
            .unwrap_or_default()
            .iter()
            .filter(|&&other| other != request.item && !placed.contains_key(&other))
            .any(|&other| {
                items
                    .get(other)
                    .is_ok_and(|(held, ..)| held.is_equipped && held.slot == request.slot)
            });
        if claimed_this_pass || held_before {
            log_warning(&format!(
                "⚠️ Slot {} of {:?} is occupied, {:?} not equipped",
                request.slot, request.actor, request.item
            ));
            continue;
        }
        placed.insert(request.item, target);

        let mut equipped = *item;
        equipped.equip_into(request.slot);

        commands
            .entity(request.item)
            .insert((equipped, OwnedBy(request.actor), VisualState::hidden()));

        commands.entity(request.actor).try_insert(InventoryDirty);
        if let Some(previous) = owner.filter(|o| o.0 != request.actor) {
            commands.entity(previous.0).try_insert(InventoryDirty);
        }

        log(&format!(
            "🎒 {:?} equipped by {:?} into slot {}",
            request.item, request.actor, request.slot
        ));
    }
}

/// Process drop intents
pub fn process_drop_item_requests(
    mut commands: Commands,
    mut requests: EventReader<DropItemRequest>,
    items: Query<ItemView>,
) {
    for request in requests.read() {
        let Ok((item, owner, attached_to, transform)) = items.get(request.item) else {
            continue;
        };
        if attached_to.is_some() {
            log_warning(&format!(
                "⚠️ {:?} is attached to a gun, use RemoveAttachmentRequest",
                request.item
            ));
            continue;
        }

        let mut dropped = *item;
        dropped.drop_to_ground();

        // Scale сохраняем (passive items / guns спавнятся со scale из request)
        let transform = transform
            .copied()
            .unwrap_or_default()
            .with_translation(request.position);

        let mut entity = commands.entity(request.item);
        entity.insert((dropped, transform, VisualState::visible()));
        if let Some(owner) = owner {
            entity.remove::<OwnedBy>();
            commands.entity(owner.0).try_insert(InventoryDirty);
        }

        log(&format!("📤 {:?} dropped at {:?}", request.item, request.position));
    }
}
