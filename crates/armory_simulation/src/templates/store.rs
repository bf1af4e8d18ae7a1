//! Template Store - владелец всех TemplateRecord на время жизни мира
//!
//! # Источники
//! - RON catalog (`EquipmentConfig::catalog_path`)
//! - Hardcoded `CatalogFile::default_catalog()` (fallback)
//!
//! Startup система `spawn_template_entities` создаёт по одной template entity
//! на record. Registries потом "обнаруживают" их через `Added<Template>`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use super::record::*;
use crate::config::EquipmentConfig;
use crate::{log, log_warning};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

// ============================================================================
// CatalogFile (RON shape)
// ============================================================================

/// Формат RON catalog'а (то, что отдаёт import шаг)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFile {
    pub guns: Vec<GunTemplate>,
    pub attachments: Vec<AttachmentTemplate>,
    pub passive_items: Vec<PassiveItemTemplate>,
}

impl CatalogFile {
    pub fn from_ron_str(source: &str) -> Result<Self, CatalogError> {
        Ok(ron::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let source = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron_str(&source)
    }

    /// Hardcoded catalog (пока designers не отдали свой RON)
    pub fn default_catalog() -> Self {
        Self {
            guns: vec![
                gun(
                    "Service Pistol",
                    GunType::Pistol,
                    30.0,
                    GunStatRange {
                        damage: StatRange::new(8.0, 14.0),
                        accuracy: StatRange::new(0.7, 0.9),
                        attack_rate: StatRange::new(2.0, 3.5),
                        recoil_amount: StatRange::new(0.5, 1.5),
                        spread_amount: StatRange::new(2.0, 6.0),
                        reload_time: StatRange::new(0.9, 1.4),
                        ammo_capacity: IntRange::new(8, 15),
                        durability: IntRange::new(80, 150),
                        bullets_per_shot: IntRange::new(1, 1),
                        piercing: IntRange::new(0, 1),
                    },
                    AnchorPoint::at(0.35, 0.05),
                    AnchorPoint::at(0.1, 0.12),
                ),
                gun(
                    "Assault Rifle",
                    GunType::Rifle,
                    20.0,
                    GunStatRange {
                        damage: StatRange::new(12.0, 20.0),
                        accuracy: StatRange::new(0.75, 0.95),
                        attack_rate: StatRange::new(5.0, 9.0),
                        recoil_amount: StatRange::new(1.0, 2.5),
                        spread_amount: StatRange::new(1.0, 4.0),
                        reload_time: StatRange::new(1.6, 2.4),
                        ammo_capacity: IntRange::new(20, 40),
                        durability: IntRange::new(120, 220),
                        bullets_per_shot: IntRange::new(1, 1),
                        piercing: IntRange::new(0, 2),
                    },
                    AnchorPoint::at(0.6, 0.05),
                    AnchorPoint::at(0.2, 0.14),
                ),
                gun(
                    "Pump Shotgun",
                    GunType::Shotgun,
                    15.0,
                    GunStatRange {
                        damage: StatRange::new(5.0, 9.0),
                        accuracy: StatRange::new(0.5, 0.7),
                        attack_rate: StatRange::new(0.8, 1.4),
                        recoil_amount: StatRange::new(3.0, 5.0),
                        spread_amount: StatRange::new(12.0, 20.0),
                        reload_time: StatRange::new(2.0, 3.0),
                        ammo_capacity: IntRange::new(4, 8),
                        durability: IntRange::new(100, 180),
                        bullets_per_shot: IntRange::new(5, 9),
                        piercing: IntRange::new(0, 0),
                    },
                    AnchorPoint::at(0.55, 0.04),
                    AnchorPoint::at(0.18, 0.12),
                ),
                gun(
                    "Compact SMG",
                    GunType::Smg,
                    15.0,
                    GunStatRange {
                        damage: StatRange::new(5.0, 9.0),
                        accuracy: StatRange::new(0.55, 0.75),
                        attack_rate: StatRange::new(10.0, 15.0),
                        recoil_amount: StatRange::new(0.6, 1.4),
                        spread_amount: StatRange::new(5.0, 10.0),
                        reload_time: StatRange::new(1.2, 1.8),
                        ammo_capacity: IntRange::new(25, 45),
                        durability: IntRange::new(90, 160),
                        bullets_per_shot: IntRange::new(1, 1),
                        piercing: IntRange::new(0, 1),
                    },
                    AnchorPoint::at(0.42, 0.04),
                    AnchorPoint::at(0.12, 0.11),
                ),
                gun(
                    "Marksman Rifle",
                    GunType::Sniper,
                    5.0,
                    GunStatRange {
                        damage: StatRange::new(45.0, 80.0),
                        accuracy: StatRange::new(0.92, 0.99),
                        attack_rate: StatRange::new(0.5, 0.9),
                        recoil_amount: StatRange::new(4.0, 7.0),
                        spread_amount: StatRange::new(0.0, 1.0),
                        reload_time: StatRange::new(2.5, 3.5),
                        ammo_capacity: IntRange::new(3, 6),
                        durability: IntRange::new(60, 120),
                        bullets_per_shot: IntRange::new(1, 1),
                        piercing: IntRange::new(1, 4),
                    },
                    AnchorPoint::at(0.8, 0.05),
                    AnchorPoint::at(0.25, 0.15),
                ),
            ],
            attachments: vec![
                attachment(
                    "Red Dot",
                    AttachmentType::Scope,
                    0,
                    10.0,
                    AttachmentStatRange {
                        accuracy: StatRange::new(0.05, 0.15),
                        spread_amount: StatRange::new(-1.5, -0.5),
                        ..Default::default()
                    },
                ),
                attachment(
                    "Long Scope",
                    AttachmentType::Scope,
                    1,
                    4.0,
                    AttachmentStatRange {
                        accuracy: StatRange::new(0.1, 0.25),
                        spread_amount: StatRange::new(-2.5, -1.0),
                        attack_rate: StatRange::new(-0.5, -0.1),
                        ..Default::default()
                    },
                ),
                attachment(
                    "Heavy Barrel",
                    AttachmentType::Barrel,
                    0,
                    10.0,
                    AttachmentStatRange {
                        damage: StatRange::new(1.0, 4.0),
                        recoil_amount: StatRange::new(-0.6, -0.2),
                        ..Default::default()
                    },
                ),
                attachment(
                    "Split Choke",
                    AttachmentType::Barrel,
                    1,
                    3.0,
                    AttachmentStatRange {
                        spread_amount: StatRange::new(1.0, 3.0),
                        bullets_per_shot: IntRange::new(1, 2),
                        ..Default::default()
                    },
                ),
                attachment(
                    "Vertical Grip",
                    AttachmentType::Grip,
                    0,
                    8.0,
                    AttachmentStatRange {
                        recoil_amount: StatRange::new(-1.0, -0.3),
                        accuracy: StatRange::new(0.02, 0.06),
                        ..Default::default()
                    },
                ),
                attachment(
                    "Padded Stock",
                    AttachmentType::Stock,
                    0,
                    6.0,
                    AttachmentStatRange {
                        recoil_amount: StatRange::new(-1.5, -0.5),
                        attack_rate: StatRange::new(-0.3, 0.0),
                        ..Default::default()
                    },
                ),
            ],
            passive_items: vec![
                passive(
                    "Heart Container",
                    PassiveItemType::HeartContainer,
                    6.0,
                    true,
                    PassiveStatRange {
                        max_health_bonus: IntRange::new(10, 25),
                        ..Default::default()
                    },
                ),
                passive(
                    "Swift Boots",
                    PassiveItemType::SwiftBoots,
                    5.0,
                    false,
                    PassiveStatRange {
                        move_speed_bonus: StatRange::new(0.05, 0.2),
                        ..Default::default()
                    },
                ),
                passive(
                    "Power Cell",
                    PassiveItemType::PowerCell,
                    4.0,
                    false,
                    PassiveStatRange {
                        damage_bonus: StatRange::new(0.05, 0.15),
                        reload_speed_bonus: StatRange::new(0.0, 0.1),
                        ..Default::default()
                    },
                ),
                // Квестовый предмет: спавнится явно, в loot pool не попадает
                PassiveItemTemplate {
                    enabled: false,
                    ..passive(
                        "Lucky Charm",
                        PassiveItemType::LuckyCharm,
                        0.0,
                        false,
                        PassiveStatRange {
                            damage_bonus: StatRange::new(0.01, 0.03),
                            ..Default::default()
                        },
                    )
                },
            ],
        }
    }
}

fn gun(
    name: &str,
    gun_type: GunType,
    loot_weight: f32,
    stats: GunStatRange,
    muzzle_point: AnchorPoint,
    scope_point: AnchorPoint,
) -> GunTemplate {
    GunTemplate {
        name: name.to_string(),
        gun_type,
        variant_id: 0,
        loot_weight,
        enabled: true,
        stats,
        muzzle_point,
        scope_point,
    }
}

fn attachment(
    name: &str,
    attachment_type: AttachmentType,
    variant_id: u32,
    loot_weight: f32,
    stats: AttachmentStatRange,
) -> AttachmentTemplate {
    AttachmentTemplate {
        name: name.to_string(),
        attachment_type,
        variant_id,
        loot_weight,
        enabled: true,
        stats,
    }
}

fn passive(
    name: &str,
    passive_item_type: PassiveItemType,
    loot_weight: f32,
    stackable: bool,
    stats: PassiveStatRange,
) -> PassiveItemTemplate {
    PassiveItemTemplate {
        name: name.to_string(),
        passive_item_type,
        variant_id: 0,
        loot_weight,
        enabled: true,
        stackable,
        stats,
    }
}

// ============================================================================
// TemplateStore (Resource)
// ============================================================================

/// Immutable records, shared by reference (Arc) с template entities
#[derive(Resource, Debug, Clone)]
pub struct TemplateStore {
    records: Vec<Arc<TemplateRecord>>,
}

impl TemplateStore {
    pub fn from_catalog(catalog: CatalogFile) -> Self {
        let records = catalog
            .guns
            .into_iter()
            .map(TemplateRecord::Gun)
            .chain(catalog.attachments.into_iter().map(TemplateRecord::Attachment))
            .chain(catalog.passive_items.into_iter().map(TemplateRecord::PassiveItem))
            .map(Arc::new)
            .collect();

        Self { records }
    }

    /// RON catalog, fallback на default при любой ошибке (с warning)
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match CatalogFile::load(path) {
            Ok(catalog) => {
                log(&format!("📦 Template catalog loaded from {}", path.display()));
                Self::from_catalog(catalog)
            }
            Err(err) => {
                log_warning(&format!("⚠️ {}. Using default catalog.", err));
                Self::default()
            }
        }
    }

    pub fn records(&self) -> &[Arc<TemplateRecord>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::from_catalog(CatalogFile::default_catalog())
    }
}

/// Startup system: TemplateStore из config (если его не вставили заранее)
pub fn init_template_store(
    mut commands: Commands,
    config: Res<EquipmentConfig>,
    existing: Option<Res<TemplateStore>>,
) {
    if existing.is_some() {
        return;
    }
    commands.insert_resource(TemplateStore::load_or_default(config.catalog_path.as_deref()));
}

/// Startup system: одна template entity на record
pub fn spawn_template_entities(mut commands: Commands, store: Res<TemplateStore>) {
    for record in store.records() {
        commands.spawn((
            Template(Arc::clone(record)),
            Name::new(format!("Template: {}", record.name())),
        ));
    }

    log(&format!("📦 Spawned {} template entities", store.len()));
}
