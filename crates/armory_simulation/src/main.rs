//! Headless симуляция ARMORY
//!
//! Запускает Bevy App без рендера: loot drops каждые 50 тиков,
//! печатает собранные предметы. Опционально: путь к RON catalog.
//!
//! `armory_simulation [catalog.ron] [seed]`

use armory_simulation::{
    create_headless_app, log_info, EquipmentConfig, ItemAssembled, SimulationPlugin, SpawnFailed,
    SpawnLootRequest, DEFAULT_SEED,
};
use bevy::prelude::*;

fn main() {
    let mut args = std::env::args().skip(1);
    let catalog = args.next();
    let seed = args
        .next()
        .and_then(|raw| raw.parse::<u64>().ok())
        .unwrap_or(DEFAULT_SEED);

    let mut app = create_headless_app(seed);
    log_info(&format!("Starting ARMORY headless simulation (seed: {})", seed));

    let config = match catalog {
        Some(path) => EquipmentConfig::default().with_catalog(path),
        None => EquipmentConfig::default(),
    };
    app.insert_resource(config)
        .add_plugins(SimulationPlugin)
        .add_systems(Update, report_outcomes);

    for tick in 0..1000u32 {
        if tick % 50 == 0 {
            app.world_mut().send_event(SpawnLootRequest {
                position: Vec3::new(tick as f32 * 0.1, 0.0, 0.0),
                scale: 1.0,
            });
        }

        app.update();

        if tick % 100 == 0 {
            let entity_count = app.world().entities().len();
            log_info(&format!("Tick {}: {} entities", tick, entity_count));
        }
    }

    log_info("Simulation complete!");
}

fn report_outcomes(mut assembled: EventReader<ItemAssembled>, mut failed: EventReader<SpawnFailed>) {
    for event in assembled.read() {
        log_info(&format!("  + {:?} ({:?})", event.item_type, event.entity));
    }
    for event in failed.read() {
        log_info(&format!("  ! {}", event.error));
    }
}
