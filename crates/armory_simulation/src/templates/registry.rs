//! Template Registry - CompositeKey → TemplateId, один на категорию
//!
//! # Lifecycle
//! 1. Startup: `spawn_template_entities` создаёт template entities
//! 2. Первые тики: `register_discovered_templates::<K>` регистрирует их (Added<Template>)
//! 3. После `registration_window_ticks` - `freeze()`, дальше read-only
//!
//! Повторная регистрация того же key - silent no-op (first writer wins).

use bevy::prelude::*;
use std::collections::HashMap;
use std::marker::PhantomData;

use super::key::CompositeKey;
use super::record::*;
use crate::config::EquipmentConfig;
use crate::{log_info, log_warning};

pub type GunRegistry = TemplateRegistry<GunType>;
pub type AttachmentRegistry = TemplateRegistry<AttachmentType>;
pub type PassiveItemRegistry = TemplateRegistry<PassiveItemType>;

/// Что registry запомнил про template (loot weight нужен selector'у)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegistryEntry {
    pub template: TemplateId,
    pub loot_weight: f32,
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    Registered,
    /// Key уже есть - первая регистрация остаётся
    Duplicate,
    /// Init фаза закончилась
    Frozen,
    /// Record другой категории или key не помещается в u32 layout
    InvalidKey,
}

#[derive(Resource, Debug)]
pub struct TemplateRegistry<K: TemplateKind> {
    entries: HashMap<CompositeKey, RegistryEntry>,
    /// Sorted snapshot, строится один раз при freeze
    frozen: Option<Vec<(CompositeKey, RegistryEntry)>>,
    _kind: PhantomData<K>,
}

impl<K: TemplateKind> Default for TemplateRegistry<K> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            frozen: None,
            _kind: PhantomData,
        }
    }
}

impl<K: TemplateKind> TemplateRegistry<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, record: &TemplateRecord, template: TemplateId) -> RegisterOutcome {
        if record.category() != K::CATEGORY {
            return RegisterOutcome::InvalidKey;
        }
        let Some(key) = record.composite_key() else {
            return RegisterOutcome::InvalidKey;
        };
        if self.is_frozen() {
            return RegisterOutcome::Frozen;
        }
        if self.entries.contains_key(&key) {
            return RegisterOutcome::Duplicate;
        }

        self.entries.insert(
            key,
            RegistryEntry {
                template,
                loot_weight: record.loot_weight(),
                enabled: record.enabled(),
            },
        );
        RegisterOutcome::Registered
    }

    pub fn get_descriptor(&self, kind: K, variant_id: u32) -> Option<TemplateId> {
        self.get_entry(kind, variant_id).map(|entry| entry.template)
    }

    pub fn get_entry(&self, kind: K, variant_id: u32) -> Option<&RegistryEntry> {
        let key = CompositeKey::of(kind, variant_id)?;
        self.entries.get(&key)
    }

    /// Snapshot (key, template) в порядке возрастания key
    pub fn all_descriptors(&self) -> Vec<(CompositeKey, TemplateId)> {
        self.sorted_entries()
            .into_iter()
            .map(|(key, entry)| (key, entry.template))
            .collect()
    }

    pub fn sorted_entries(&self) -> Vec<(CompositeKey, RegistryEntry)> {
        if let Some(snapshot) = &self.frozen {
            return snapshot.clone();
        }

        let mut entries: Vec<_> = self.entries.iter().map(|(k, e)| (*k, *e)).collect();
        entries.sort_by_key(|(key, _)| *key);
        entries
    }

    pub fn freeze(&mut self) {
        if self.frozen.is_none() {
            self.frozen = Some(self.sorted_entries());
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Registration phase
// ============================================================================

/// Счётчик init фазы (тики с момента старта мира)
#[derive(Resource, Debug, Default)]
pub struct RegistrationPhase {
    pub ticks: u32,
    pub frozen: bool,
}

/// System: регистрация только что обнаруженных template entities
pub fn register_discovered_templates<K: TemplateKind>(
    mut registry: ResMut<TemplateRegistry<K>>,
    discovered: Query<(Entity, &Template), Added<Template>>,
) {
    for (entity, template) in discovered.iter() {
        let record = template.record();
        if record.category() != K::CATEGORY {
            continue;
        }

        match registry.register(record, TemplateId(entity)) {
            RegisterOutcome::Registered | RegisterOutcome::Duplicate => {}
            RegisterOutcome::Frozen => log_warning(&format!(
                "⚠️ {} registry frozen, template '{}' ignored",
                K::CATEGORY.as_str(),
                record.name()
            )),
            RegisterOutcome::InvalidKey => log_warning(&format!(
                "⚠️ Template '{}' has no valid key ({} type {} variant {})",
                record.name(),
                K::CATEGORY.as_str(),
                record.type_index(),
                record.variant_id()
            )),
        }
    }
}

/// System: закрывает init фазу после `registration_window_ticks`
pub fn advance_registration_phase(
    mut phase: ResMut<RegistrationPhase>,
    config: Res<EquipmentConfig>,
    mut guns: ResMut<GunRegistry>,
    mut attachments: ResMut<AttachmentRegistry>,
    mut passive_items: ResMut<PassiveItemRegistry>,
) {
    if phase.frozen {
        return;
    }

    phase.ticks += 1;
    if phase.ticks < config.registration_window_ticks {
        return;
    }

    guns.freeze();
    attachments.freeze();
    passive_items.freeze();
    phase.frozen = true;

    log_info(&format!(
        "🔒 Registries frozen after {} ticks ({} guns, {} attachments, {} passive items)",
        phase.ticks,
        guns.len(),
        attachments.len(),
        passive_items.len()
    ));
}
