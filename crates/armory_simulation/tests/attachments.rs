//! Integration тесты attachments + item lifecycle
//!
//! Detach / fit / equip / drop поверх собранного оружия

mod common;

use armory_simulation::equipment::{
    aggregate, AttachAttachmentRequest, DropItemRequest, EquipItemRequest, RemoveAttachmentRequest,
    SpawnAttachmentRequest,
};
use armory_simulation::templates::{AttachmentType, GunType};
use armory_simulation::*;
use bevy::prelude::*;
use common::*;

/// App с одним собранным Rifle в (5, 5, 0)
fn app_with_rifle() -> (App, Entity) {
    let mut app = equipment_app(42);
    app.world_mut().send_event(SpawnGunRequest {
        gun_type: GunType::Rifle,
        variant_id: 0,
        position: Vec3::new(5.0, 5.0, 0.0),
        scale: 1.0,
    });
    app.update();

    let gun = guns(&mut app)[0];
    (app, gun)
}

fn spawn_loose_attachment(app: &mut App, attachment_type: AttachmentType, variant_id: u32) -> Entity {
    app.world_mut().send_event(SpawnAttachmentRequest {
        attachment_type,
        variant_id,
        position: Vec3::new(-2.0, 0.0, 0.0),
    });
    app.update();

    outcomes(app)
        .assembled
        .last()
        .expect("attachment assembled")
        .entity
}

/// Второй Rifle в (-5, 0, 0)
fn spawn_second_rifle(app: &mut App, first: Entity) -> Entity {
    app.world_mut().send_event(SpawnGunRequest {
        gun_type: GunType::Rifle,
        variant_id: 0,
        position: Vec3::new(-5.0, 0.0, 0.0),
        scale: 1.0,
    });
    app.update();

    guns(app)
        .into_iter()
        .find(|&gun| gun != first)
        .expect("second rifle")
}

fn fit(app: &mut App, gun: Entity, attachment: Entity) {
    app.world_mut().send_event(AttachAttachmentRequest {
        gun_entity: gun,
        attachment_entity: attachment,
    });
}

fn equip(app: &mut App, actor: Entity, item: Entity, slot: i32) {
    app.world_mut().send_event(EquipItemRequest { actor, item, slot });
}

#[test]
fn test_detach_round_trip() {
    let (mut app, gun) = app_with_rifle();
    let scope = attachment_of(&app, gun, AttachmentType::Scope).expect("scope");
    let barrel = attachment_of(&app, gun, AttachmentType::Barrel).expect("barrel");

    app.world_mut().send_event(RemoveAttachmentRequest {
        gun_entity: gun,
        attachment_entity: scope,
    });
    app.update();

    let world = app.world();
    assert!(world.get::<AttachedTo>(scope).is_none());
    assert_eq!(attachments_of(&app, gun), vec![barrel]);

    let item = world.get::<Item>(scope).expect("Item");
    assert!(item.is_dropped());
    assert_eq!(world.get::<VisualState>(scope), Some(&VisualState::visible()));
    assert_eq!(
        world.get::<Transform>(scope).map(|t| t.translation),
        Some(Vec3::new(5.0, 5.0, 0.0))
    );

    // Aggregator видит только barrel
    let base = world.get::<BaseWeaponStats>(gun).expect("BaseWeaponStats");
    let barrel_modifier = *world.get::<AttachmentModifier>(barrel).expect("AttachmentModifier");
    assert_eq!(
        world.get::<EffectiveWeaponStats>(gun),
        Some(&aggregate(base, &[barrel_modifier]))
    );
}

#[test]
fn test_stale_detach_is_noop() {
    let (mut app, gun) = app_with_rifle();
    let scope = attachment_of(&app, gun, AttachmentType::Scope).expect("scope");
    let barrel = attachment_of(&app, gun, AttachmentType::Barrel).expect("barrel");

    // Не тот parent
    app.world_mut().send_event(RemoveAttachmentRequest {
        gun_entity: barrel,
        attachment_entity: scope,
    });
    // Несуществующий attachment
    let ghost = app.world_mut().spawn_empty().id();
    app.world_mut().despawn(ghost);
    app.world_mut().send_event(RemoveAttachmentRequest {
        gun_entity: gun,
        attachment_entity: ghost,
    });
    app.update();

    assert_eq!(attachments_of(&app, gun).len(), 2);

    // Повторный detach того же attachment
    for _ in 0..2 {
        app.world_mut().send_event(RemoveAttachmentRequest {
            gun_entity: gun,
            attachment_entity: scope,
        });
        app.update();
    }
    assert_eq!(attachments_of(&app, gun), vec![barrel]);
    assert!(app.world().get::<Item>(scope).expect("Item").is_dropped());
}

#[test]
fn test_fit_replaces_same_type() {
    let (mut app, gun) = app_with_rifle();
    let old_scope = attachment_of(&app, gun, AttachmentType::Scope).expect("scope");
    let long_scope = spawn_loose_attachment(&mut app, AttachmentType::Scope, 1);

    app.world_mut().send_event(AttachAttachmentRequest {
        gun_entity: gun,
        attachment_entity: long_scope,
    });
    app.update();

    let attached = attachments_of(&app, gun);
    assert_eq!(attached.len(), 2);
    assert!(attached.contains(&long_scope));
    assert!(!attached.contains(&old_scope));

    let world = app.world();
    let anchors = world.get::<AnchorPoints>(gun).expect("AnchorPoints");
    let item = world.get::<Item>(long_scope).expect("Item");
    assert!(item.is_equipped);
    assert!(!item.on_ground);
    assert_eq!(item.slot, NO_SLOT);
    assert_eq!(world.get::<VisualState>(long_scope), Some(&VisualState::hidden()));
    assert_eq!(world.get::<Transform>(long_scope), Some(&anchors.scope));

    assert!(world.get::<Item>(old_scope).expect("Item").is_dropped());
    assert_eq!(world.get::<VisualState>(old_scope), Some(&VisualState::visible()));
}

#[test]
fn test_fit_new_type_keeps_existing() {
    let (mut app, gun) = app_with_rifle();
    let grip = spawn_loose_attachment(&mut app, AttachmentType::Grip, 0);

    app.world_mut().send_event(AttachAttachmentRequest {
        gun_entity: gun,
        attachment_entity: grip,
    });
    app.update();

    assert_eq!(attachments_of(&app, gun).len(), 3);

    let world = app.world();
    let base = *world.get::<BaseWeaponStats>(gun).expect("BaseWeaponStats");
    let effective = *world.get::<EffectiveWeaponStats>(gun).expect("EffectiveWeaponStats");
    assert!(effective.recoil_amount < base.recoil_amount, "Grip + Heavy Barrel снижают recoil");
}

#[test]
fn test_equip_detach_flags_owner() {
    let (mut app, gun) = app_with_rifle();
    let actor = app.world_mut().spawn(Name::new("Player")).id();

    app.world_mut().send_event(EquipItemRequest {
        actor,
        item: gun,
        slot: 0,
    });
    app.update();

    let world = app.world();
    let item = world.get::<Item>(gun).expect("Item");
    assert_eq!(item.slot, 0);
    assert!(item.is_equipped);
    assert!(!item.on_ground);
    assert_eq!(world.get::<OwnedBy>(gun), Some(&OwnedBy(actor)));
    assert!(world.get::<OwnedItems>(actor).is_some_and(|items| items.contains(&gun)));
    assert!(world.get::<InventoryDirty>(actor).is_some());

    app.world_mut().entity_mut(actor).remove::<InventoryDirty>();
    let scope = attachment_of(&app, gun, AttachmentType::Scope).expect("scope");
    app.world_mut().send_event(RemoveAttachmentRequest {
        gun_entity: gun,
        attachment_entity: scope,
    });
    app.update();

    assert!(app.world().get::<InventoryDirty>(actor).is_some());
}

#[test]
fn test_drop_returns_item_to_ground() {
    let (mut app, gun) = app_with_rifle();
    let actor = app.world_mut().spawn_empty().id();

    app.world_mut().send_event(EquipItemRequest {
        actor,
        item: gun,
        slot: 2,
    });
    app.update();
    app.world_mut().entity_mut(actor).remove::<InventoryDirty>();

    app.world_mut().send_event(DropItemRequest {
        item: gun,
        position: Vec3::new(0.0, 9.0, 0.0),
    });
    app.update();

    let world = app.world();
    assert!(world.get::<Item>(gun).expect("Item").is_dropped());
    assert!(world.get::<OwnedBy>(gun).is_none());
    assert_eq!(world.get::<VisualState>(gun), Some(&VisualState::visible()));
    assert_eq!(
        world.get::<Transform>(gun).map(|t| t.translation),
        Some(Vec3::new(0.0, 9.0, 0.0))
    );
    assert!(world.get::<InventoryDirty>(actor).is_some());
}

#[test]
fn test_attached_attachment_cannot_be_equipped() {
    let (mut app, gun) = app_with_rifle();
    let actor = app.world_mut().spawn_empty().id();
    let barrel = attachment_of(&app, gun, AttachmentType::Barrel).expect("barrel");

    app.world_mut().send_event(EquipItemRequest {
        actor,
        item: barrel,
        slot: 1,
    });
    app.update();

    assert!(app.world().get::<OwnedBy>(barrel).is_none());
    assert_eq!(app.world().get::<AttachedTo>(barrel), Some(&AttachedTo(gun)));
}

#[test]
fn test_despawn_gun_despawns_attachments() {
    let (mut app, gun) = app_with_rifle();
    let attached = attachments_of(&app, gun);
    assert_eq!(attached.len(), 2);

    app.world_mut().despawn(gun);

    for entity in attached {
        assert!(app.world().get_entity(entity).is_err());
    }
}

#[test]
fn test_fits_in_one_tick_follow_last_request() {
    let (mut app, first) = app_with_rifle();
    let second = spawn_second_rifle(&mut app, first);
    let first_default = attachment_of(&app, first, AttachmentType::Scope).expect("scope");
    let second_default = attachment_of(&app, second, AttachmentType::Scope).expect("scope");
    let moved = spawn_loose_attachment(&mut app, AttachmentType::Scope, 1);
    let replacement = spawn_loose_attachment(&mut app, AttachmentType::Scope, 0);

    // Один тик: moved → first, moved → second, replacement → first
    fit(&mut app, first, moved);
    fit(&mut app, second, moved);
    fit(&mut app, first, replacement);
    app.update();

    assert_eq!(app.world().get::<AttachedTo>(moved), Some(&AttachedTo(second)));
    assert_eq!(app.world().get::<AttachedTo>(replacement), Some(&AttachedTo(first)));
    assert_eq!(attachment_of(&app, first, AttachmentType::Scope), Some(replacement));
    assert_eq!(attachment_of(&app, second, AttachmentType::Scope), Some(moved));
    assert_eq!(attachments_of(&app, first).len(), 2);
    assert_eq!(attachments_of(&app, second).len(), 2);

    let world = app.world();
    assert!(world.get::<Item>(moved).expect("Item").is_equipped);
    assert!(world.get::<Item>(first_default).expect("Item").is_dropped());
    assert!(world.get::<Item>(second_default).expect("Item").is_dropped());
}

#[test]
fn test_fit_back_in_same_tick() {
    let (mut app, first) = app_with_rifle();
    let second = spawn_second_rifle(&mut app, first);
    let scope = spawn_loose_attachment(&mut app, AttachmentType::Scope, 1);

    fit(&mut app, first, scope);
    fit(&mut app, second, scope);
    fit(&mut app, first, scope);
    app.update();

    assert_eq!(app.world().get::<AttachedTo>(scope), Some(&AttachedTo(first)));
    assert_eq!(attachment_of(&app, first, AttachmentType::Scope), Some(scope));
    // Default scope второго оружия уже снят вторым request'ом
    assert_eq!(attachment_of(&app, second, AttachmentType::Scope), None);
    assert_eq!(attachments_of(&app, second).len(), 1);
}

#[test]
fn test_negative_slot_refused() {
    let (mut app, gun) = app_with_rifle();
    let actor = app.world_mut().spawn_empty().id();

    equip(&mut app, actor, gun, NO_SLOT);
    app.update();

    let world = app.world();
    assert!(world.get::<Item>(gun).expect("Item").is_dropped());
    assert!(world.get::<OwnedBy>(gun).is_none());
    assert!(world.get::<InventoryDirty>(actor).is_none());
}

#[test]
fn test_occupied_slot_refused() {
    let (mut app, first) = app_with_rifle();
    let second = spawn_second_rifle(&mut app, first);
    let third = spawn_loose_attachment(&mut app, AttachmentType::Grip, 0);
    let actor = app.world_mut().spawn_empty().id();

    equip(&mut app, actor, first, 0);
    app.update();

    // Занят с прошлого тика; в этом тике первый request забирает slot 1
    equip(&mut app, actor, second, 0);
    equip(&mut app, actor, second, 1);
    equip(&mut app, actor, third, 1);
    app.update();

    let world = app.world();
    assert_eq!(world.get::<Item>(first).expect("Item").slot, 0);
    assert_eq!(world.get::<Item>(second).expect("Item").slot, 1);
    assert!(world.get::<Item>(third).expect("Item").is_dropped());
    assert!(world.get::<OwnedBy>(third).is_none());

    // Тот же item в тот же slot повторно: не конфликт с собой
    equip(&mut app, actor, first, 0);
    app.update();
    assert_eq!(app.world().get::<OwnedBy>(first), Some(&OwnedBy(actor)));
}
