//! Loot drop system: SpawnLootRequest → category-specific spawn request

use bevy::prelude::*;

use super::selector::{select_loot, LootDrop, LootPool};
use crate::equipment::events::{
    SpawnAttachmentRequest, SpawnGunRequest, SpawnLootRequest, SpawnPassiveItemRequest,
};
use crate::templates::{AttachmentRegistry, GunRegistry, PassiveItemRegistry};
use crate::{log, log_warning, DeterministicRng};

/// Process loot drops (selector по всем трём registries)
///
/// Запросы пишутся в тот же тик - assembler идёт следующим set'ом.
pub fn process_loot_requests(
    mut requests: EventReader<SpawnLootRequest>,
    guns: Res<GunRegistry>,
    attachments: Res<AttachmentRegistry>,
    passive_items: Res<PassiveItemRegistry>,
    mut rng: ResMut<DeterministicRng>,
    mut gun_requests: EventWriter<SpawnGunRequest>,
    mut attachment_requests: EventWriter<SpawnAttachmentRequest>,
    mut passive_requests: EventWriter<SpawnPassiveItemRequest>,
) {
    for request in requests.read() {
        let pools: [&dyn LootPool; 3] = [&*guns, &*attachments, &*passive_items];

        let Some(winner) = select_loot(&mut rng.rng, &pools) else {
            log(&format!("🎲 No loot at {:?} (empty pool)", request.position));
            continue;
        };

        let Some(drop) = LootDrop::from_key(winner.key) else {
            log_warning(&format!("⚠️ Loot key {} does not decode", winner.key));
            continue;
        };

        match drop {
            LootDrop::Gun(gun_type, variant_id) => {
                gun_requests.write(SpawnGunRequest {
                    gun_type,
                    variant_id,
                    position: request.position,
                    scale: request.scale,
                });
            }
            LootDrop::Attachment(attachment_type, variant_id) => {
                attachment_requests.write(SpawnAttachmentRequest {
                    attachment_type,
                    variant_id,
                    position: request.position,
                });
            }
            LootDrop::PassiveItem(passive_item_type, variant_id) => {
                passive_requests.write(SpawnPassiveItemRequest {
                    passive_item_type,
                    variant_id,
                    position: request.position,
                    scale: request.scale,
                });
            }
        }

        log(&format!("🎲 Loot roll → {:?}", drop));
    }
}
