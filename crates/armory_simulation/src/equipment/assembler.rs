//! Equipment Assembler - spawn request → готовый item entity
//!
//! # Protocol (одна deferred транзакция на request)
//! 1. Resolve template в registry (miss → `SpawnError`, ничего не спавним)
//! 2. Roll stats
//! 3. Spawn item (gun: ammo = capacity, не reloading)
//! 4. Gun: default Scope + Barrel на anchor'ах, скрытые
//! 5. Item на земле (`on_ground`, не equipped, slot -1)
//!
//! Все lookup'ы и roll'ы делаются ДО первого `commands.spawn`: failure
//! не оставляет частично собранных entities. Commands применяются на
//! sync point после `EquipmentSet::Assembly`.

use bevy::prelude::*;
use rand::Rng;

use super::catalog::TemplateLookup;
use super::error::SpawnError;
use super::events::*;
use crate::components::*;
use crate::config::EquipmentConfig;
use crate::loot::{RollStats, RolledGunStats};
use crate::templates::AttachmentType;
use crate::{log, log_warning, DeterministicRng};

/// Default sub-slots оружия (в порядке roll'а)
pub const DEFAULT_GUN_ATTACHMENTS: [AttachmentType; 2] = [AttachmentType::Scope, AttachmentType::Barrel];

/// Resolved + rolled default attachment (ещё не заспавнен)
struct PendingAttachment {
    attachment: WeaponAttachment,
    modifier: AttachmentModifier,
    name: String,
}

// ============================================================================
// Assembly (pure по отношению к World: только Commands)
// ============================================================================

pub fn assemble_gun<R: Rng + ?Sized>(
    commands: &mut Commands,
    lookup: &TemplateLookup,
    config: &EquipmentConfig,
    rng: &mut R,
    request: &SpawnGunRequest,
) -> Result<Entity, SpawnError> {
    // 1. Resolve
    let (template_id, template) = lookup.gun(request.gun_type, request.variant_id)?;

    // 2. Roll
    let rolled = template.stats.roll(rng);

    let defaults: Vec<PendingAttachment> = DEFAULT_GUN_ATTACHMENTS
        .iter()
        .filter_map(|&attachment_type| {
            let variant_id = config.default_attachment_variant;
            let (id, attachment) = lookup.attachment(attachment_type, variant_id).ok()?;
            Some(PendingAttachment {
                attachment: WeaponAttachment {
                    attachment_type,
                    variant_id,
                    template: id,
                },
                modifier: attachment.stats.roll(rng),
                name: attachment.name.clone(),
            })
        })
        .collect();

    let base = base_stats(&rolled);
    let anchors = AnchorPoints {
        muzzle: template.muzzle_point.to_transform(),
        scope: template.scope_point.to_transform(),
    };

    // 3 + 5. Item на земле
    let gun = commands
        .spawn((
            Gun {
                gun_type: request.gun_type,
                variant_id: request.variant_id,
                template: template_id,
            },
            Item::on_ground(ItemType::Gun(request.gun_type), false),
            Ammo::full(rolled.ammo_capacity, rolled.reload_time),
            Durability::new(rolled.durability),
            base,
            EffectiveWeaponStats::from(&base),
            anchors,
            Transform::from_translation(request.position).with_scale(Vec3::splat(request.scale)),
            VisualState::visible(),
            Name::new(template.name.clone()),
        ))
        .id();

    // 4. Default attachments
    let visual = if config.hide_default_attachments {
        VisualState::hidden()
    } else {
        VisualState::visible()
    };

    for pending in defaults {
        let attachment_type = pending.attachment.attachment_type;
        commands.spawn((
            pending.attachment,
            pending.modifier,
            Item::attached(ItemType::Attachment(attachment_type)),
            AttachedTo(gun),
            anchors.anchor_for(attachment_type),
            visual,
            Name::new(pending.name),
        ));
    }

    Ok(gun)
}

pub fn assemble_attachment<R: Rng + ?Sized>(
    commands: &mut Commands,
    lookup: &TemplateLookup,
    rng: &mut R,
    request: &SpawnAttachmentRequest,
) -> Result<Entity, SpawnError> {
    let (template_id, template) = lookup.attachment(request.attachment_type, request.variant_id)?;
    let modifier = template.stats.roll(rng);

    let entity = commands
        .spawn((
            WeaponAttachment {
                attachment_type: request.attachment_type,
                variant_id: request.variant_id,
                template: template_id,
            },
            modifier,
            Item::on_ground(ItemType::Attachment(request.attachment_type), false),
            Transform::from_translation(request.position),
            VisualState::visible(),
            Name::new(template.name.clone()),
        ))
        .id();

    Ok(entity)
}

pub fn assemble_passive_item<R: Rng + ?Sized>(
    commands: &mut Commands,
    lookup: &TemplateLookup,
    rng: &mut R,
    request: &SpawnPassiveItemRequest,
) -> Result<Entity, SpawnError> {
    let (template_id, template) = lookup.passive_item(request.passive_item_type, request.variant_id)?;
    let effect = template.stats.roll(rng);

    let entity = commands
        .spawn((
            PassiveItem {
                passive_item_type: request.passive_item_type,
                variant_id: request.variant_id,
                template: template_id,
            },
            effect,
            Item::on_ground(ItemType::PassiveItem(request.passive_item_type), template.stackable),
            Transform::from_translation(request.position).with_scale(Vec3::splat(request.scale)),
            VisualState::visible(),
            Name::new(template.name.clone()),
        ))
        .id();

    Ok(entity)
}

fn base_stats(rolled: &RolledGunStats) -> BaseWeaponStats {
    BaseWeaponStats {
        damage: rolled.damage,
        accuracy: rolled.accuracy,
        attack_rate: rolled.attack_rate,
        recoil_amount: rolled.recoil_amount,
        spread_amount: rolled.spread_amount,
        bullets_per_shot: rolled.bullets_per_shot,
        piercing: rolled.piercing,
    }
}

/// Результат assembly → outcome event + лог
fn report(
    result: Result<Entity, SpawnError>,
    item_type: ItemType,
    assembled: &mut EventWriter<ItemAssembled>,
    failed: &mut EventWriter<SpawnFailed>,
) {
    match result {
        Ok(entity) => {
            log(&format!("🔧 Assembled {:?} → {:?}", item_type, entity));
            assembled.write(ItemAssembled { entity, item_type });
        }
        Err(error) => {
            log_warning(&format!("⚠️ Spawn request discarded: {}", error));
            failed.write(SpawnFailed { error });
        }
    }
}

// ============================================================================
// Systems
// ============================================================================

pub fn process_spawn_gun_requests(
    mut commands: Commands,
    mut requests: EventReader<SpawnGunRequest>,
    lookup: TemplateLookup,
    config: Res<EquipmentConfig>,
    mut rng: ResMut<DeterministicRng>,
    mut assembled: EventWriter<ItemAssembled>,
    mut failed: EventWriter<SpawnFailed>,
) {
    for request in requests.read() {
        let result = assemble_gun(&mut commands, &lookup, &config, &mut rng.rng, request);
        report(result, ItemType::Gun(request.gun_type), &mut assembled, &mut failed);
    }
}

pub fn process_spawn_attachment_requests(
    mut commands: Commands,
    mut requests: EventReader<SpawnAttachmentRequest>,
    lookup: TemplateLookup,
    mut rng: ResMut<DeterministicRng>,
    mut assembled: EventWriter<ItemAssembled>,
    mut failed: EventWriter<SpawnFailed>,
) {
    for request in requests.read() {
        let result = assemble_attachment(&mut commands, &lookup, &mut rng.rng, request);
        report(
            result,
            ItemType::Attachment(request.attachment_type),
            &mut assembled,
            &mut failed,
        );
    }
}

pub fn process_spawn_passive_item_requests(
    mut commands: Commands,
    mut requests: EventReader<SpawnPassiveItemRequest>,
    lookup: TemplateLookup,
    mut rng: ResMut<DeterministicRng>,
    mut assembled: EventWriter<ItemAssembled>,
    mut failed: EventWriter<SpawnFailed>,
) {
    for request in requests.read() {
        let result = assemble_passive_item(&mut commands, &lookup, &mut rng.rng, request);
        report(
            result,
            ItemType::PassiveItem(request.passive_item_type),
            &mut assembled,
            &mut failed,
        );
    }
}
