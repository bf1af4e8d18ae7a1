//! Equipment layer configuration (resource)
//!
//! Читается из RON (опционально), иначе defaults.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Настройки equipment layer
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipmentConfig {
    /// RON catalog; None → hardcoded default catalog
    pub catalog_path: Option<PathBuf>,
    /// Сколько тиков registries принимают регистрации (потом freeze)
    pub registration_window_ticks: u32,
    /// Variant для default sub-slots оружия (Scope + Barrel)
    pub default_attachment_variant: u32,
    /// Default attachments невидимы до equip/inspect
    pub hide_default_attachments: bool,
}

impl Default for EquipmentConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            registration_window_ticks: 3,
            default_attachment_variant: 0,
            hide_default_attachments: true,
        }
    }
}

impl EquipmentConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(source)
    }

    pub fn with_catalog(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }
}
