//! Template lookup для assembler'а: registry → template entity → record

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::error::SpawnError;
use crate::templates::{
    AttachmentRegistry, AttachmentTemplate, AttachmentType, CompositeKey, GunRegistry, GunTemplate,
    GunType, PassiveItemRegistry, PassiveItemTemplate, PassiveItemType, Template, TemplateId,
    TemplateKind, TemplateRecord, TemplateRegistry,
};

#[derive(SystemParam)]
pub struct TemplateLookup<'w, 's> {
    guns: Res<'w, GunRegistry>,
    attachments: Res<'w, AttachmentRegistry>,
    passive_items: Res<'w, PassiveItemRegistry>,
    templates: Query<'w, 's, &'static Template>,
}

impl TemplateLookup<'_, '_> {
    pub fn gun(&self, gun_type: GunType, variant_id: u32) -> Result<(TemplateId, &GunTemplate), SpawnError> {
        let (id, record) = self.resolve(&self.guns, gun_type, variant_id)?;
        let template = record
            .as_gun()
            .ok_or_else(|| SpawnError::not_found(gun_type, variant_id))?;
        Ok((id, template))
    }

    pub fn attachment(
        &self,
        attachment_type: AttachmentType,
        variant_id: u32,
    ) -> Result<(TemplateId, &AttachmentTemplate), SpawnError> {
        let (id, record) = self.resolve(&self.attachments, attachment_type, variant_id)?;
        let template = record
            .as_attachment()
            .ok_or_else(|| SpawnError::not_found(attachment_type, variant_id))?;
        Ok((id, template))
    }

    pub fn passive_item(
        &self,
        passive_item_type: PassiveItemType,
        variant_id: u32,
    ) -> Result<(TemplateId, &PassiveItemTemplate), SpawnError> {
        let (id, record) = self.resolve(&self.passive_items, passive_item_type, variant_id)?;
        let template = record
            .as_passive_item()
            .ok_or_else(|| SpawnError::not_found(passive_item_type, variant_id))?;
        Ok((id, template))
    }

    /// Registry hit + живой template entity, иначе TemplateNotFound
    fn resolve<K: TemplateKind>(
        &self,
        registry: &TemplateRegistry<K>,
        kind: K,
        variant_id: u32,
    ) -> Result<(TemplateId, &TemplateRecord), SpawnError> {
        if CompositeKey::of(kind, variant_id).is_none() {
            return Err(SpawnError::invalid_key(kind, variant_id));
        }

        let id = registry
            .get_descriptor(kind, variant_id)
            .ok_or_else(|| SpawnError::not_found(kind, variant_id))?;

        let template = self
            .templates
            .get(id.0)
            .map_err(|_| SpawnError::not_found(kind, variant_id))?;

        Ok((id, template.record()))
    }
}
