//! Общие helpers для integration тестов (headless app + equipment plugin)

#![allow(dead_code)]

use armory_simulation::{
    create_headless_app, EquipmentConfig, EquipmentPlugin, EquipmentSet, Gun, ItemAssembled, SpawnError, SpawnFailed,
    WeaponAttachment, WeaponAttachments,
};
use armory_simulation::templates::AttachmentType;
use bevy::prelude::*;

/// Всё, что assembler сообщил за прогон (EventReader → каждый event один раз)
#[derive(Resource, Default, Debug)]
pub struct Outcomes {
    pub assembled: Vec<ItemAssembled>,
    pub failed: Vec<SpawnError>,
}

fn record_outcomes(
    mut outcomes: ResMut<Outcomes>,
    mut assembled: EventReader<ItemAssembled>,
    mut failed: EventReader<SpawnFailed>,
) {
    outcomes.assembled.extend(assembled.read().cloned());
    outcomes.failed.extend(failed.read().map(|e| e.error.clone()));
}

pub fn equipment_app(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.add_plugins(EquipmentPlugin)
        .init_resource::<Outcomes>()
        .add_systems(Update, record_outcomes.after(EquipmentSet::Assembly));
    app
}

/// То же, но со своим config (вставляется до plugin, init_resource его не перезапишет)
pub fn equipment_app_with_config(seed: u64, config: EquipmentConfig) -> App {
    let mut app = create_headless_app(seed);
    app.insert_resource(config)
        .add_plugins(EquipmentPlugin)
        .init_resource::<Outcomes>()
        .add_systems(Update, record_outcomes.after(EquipmentSet::Assembly));
    app
}

pub fn outcomes(app: &App) -> &Outcomes {
    app.world().resource::<Outcomes>()
}

pub fn guns(app: &mut App) -> Vec<Entity> {
    let mut query = app.world_mut().query_filtered::<Entity, With<Gun>>();
    let mut guns: Vec<Entity> = query.iter(app.world()).collect();
    guns.sort();
    guns
}

pub fn attachments_of(app: &App, gun: Entity) -> Vec<Entity> {
    app.world()
        .get::<WeaponAttachments>(gun)
        .map(|list| list.entities().to_vec())
        .unwrap_or_default()
}

pub fn attachment_of(app: &App, gun: Entity, attachment_type: AttachmentType) -> Option<Entity> {
    attachments_of(app, gun).into_iter().find(|&entity| {
        app.world()
            .get::<WeaponAttachment>(entity)
            .is_some_and(|a| a.attachment_type == attachment_type)
    })
}

pub fn entity_count(app: &App) -> u32 {
    app.world().entities().len()
}
