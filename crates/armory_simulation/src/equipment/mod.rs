//! Equipment module - procedural equipment lifecycle
//!
//! # Architecture
//!
//! **Events → Systems flow:**
//! - Gameplay emits request events (spawn / loot / attach / equip / drop)
//! - Systems пишут структурные изменения в Commands
//! - Commands применяются на sync point между `EquipmentSet`'ами
//!
//! **Phase order (Update):**
//! `Registration → Loot → Assembly → Attachment → Lifecycle → Aggregation`
//!
//! Loot пишет spawn requests, assembler читает их в том же тике; aggregator
//! видит attachments, которые fitter/detacher поменяли в этом тике.

use bevy::prelude::*;

pub mod aggregator;
pub mod assembler;
pub mod catalog;
pub mod detacher;
pub mod error;
pub mod events;
pub mod lifecycle;

// Re-exports
pub use aggregator::*;
pub use assembler::*;
pub use catalog::*;
pub use detacher::*;
pub use error::*;
pub use events::*;
pub use lifecycle::*;

use crate::config::EquipmentConfig;
use crate::loot::process_loot_requests;
use crate::DeterministicRng;
use crate::templates::{
    advance_registration_phase, init_template_store, register_discovered_templates,
    spawn_template_entities, AttachmentRegistry, AttachmentType, GunRegistry, GunType,
    PassiveItemRegistry, PassiveItemType, RegistrationPhase,
};

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquipmentSet {
    Registration,
    Loot,
    Assembly,
    Attachment,
    Lifecycle,
    Aggregation,
}

/// Equipment plugin (templates, loot, assembly, attachments, aggregation)
pub struct EquipmentPlugin;

impl Plugin for EquipmentPlugin {
    fn build(&self, app: &mut App) {
        app
            // Resources (config / store могут быть вставлены до plugin'а)
            .init_resource::<EquipmentConfig>()
            .init_resource::<DeterministicRng>()
            .init_resource::<GunRegistry>()
            .init_resource::<AttachmentRegistry>()
            .init_resource::<PassiveItemRegistry>()
            .init_resource::<RegistrationPhase>()
            // Events
            .add_event::<SpawnGunRequest>()
            .add_event::<SpawnAttachmentRequest>()
            .add_event::<SpawnPassiveItemRequest>()
            .add_event::<SpawnLootRequest>()
            .add_event::<RemoveAttachmentRequest>()
            .add_event::<AttachAttachmentRequest>()
            .add_event::<EquipItemRequest>()
            .add_event::<DropItemRequest>()
            .add_event::<ItemAssembled>()
            .add_event::<SpawnFailed>()
            .configure_sets(
                Update,
                (
                    EquipmentSet::Registration,
                    EquipmentSet::Loot,
                    EquipmentSet::Assembly,
                    EquipmentSet::Attachment,
                    EquipmentSet::Lifecycle,
                    EquipmentSet::Aggregation,
                )
                    .chain(),
            )
            .add_systems(Startup, (init_template_store, spawn_template_entities).chain())
            .add_systems(
                Update,
                (
                    register_discovered_templates::<GunType>,
                    register_discovered_templates::<AttachmentType>,
                    register_discovered_templates::<PassiveItemType>,
                    advance_registration_phase,
                )
                    .chain()
                    .in_set(EquipmentSet::Registration),
            )
            .add_systems(Update, process_loot_requests.in_set(EquipmentSet::Loot))
            // RNG общий → порядок категорий фиксирован
            .add_systems(
                Update,
                (
                    process_spawn_gun_requests,
                    process_spawn_attachment_requests,
                    process_spawn_passive_item_requests,
                )
                    .chain()
                    .in_set(EquipmentSet::Assembly),
            )
            .add_systems(
                Update,
                (process_remove_attachment_requests, process_attach_attachment_requests)
                    .chain()
                    .in_set(EquipmentSet::Attachment),
            )
            .add_systems(
                Update,
                (process_equip_item_requests, process_drop_item_requests)
                    .chain()
                    .in_set(EquipmentSet::Lifecycle),
            )
            .add_systems(Update, aggregate_weapon_stats.in_set(EquipmentSet::Aggregation));
    }
}
