//! ARMORY Simulation Core
//!
//! Procedural equipment layer на Bevy 0.16 (headless ECS)
//!
//! - templates: каталог (TemplateStore) + registries per category
//! - loot: weighted roller + weighted loot selector
//! - equipment: assembler, attachment fitter/detacher, lifecycle, stat aggregator
//!
//! Rendering / physics / UI - внешние collaborators: читают компоненты
//! (`VisualState`, `InventoryDirty`, `EffectiveWeaponStats`), сюда не пишут.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod components;
pub mod config;
pub mod equipment;
pub mod logger;
pub mod loot;
pub mod templates;

// Re-export базовых типов для удобства
pub use components::*;
pub use config::EquipmentConfig;
pub use equipment::{
    EquipmentPlugin, EquipmentSet, ItemAssembled, SpawnError, SpawnFailed, SpawnGunRequest,
    SpawnLootRequest,
};
pub use logger::*;
pub use templates::{AttachmentType, CompositeKey, GunType, PassiveItemType, TemplateStore};

/// Seed по умолчанию (если app собран без `create_headless_app`)
pub const DEFAULT_SEED: u64 = 42;

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .add_plugins(EquipmentPlugin);
    }
}

/// Детерминистичный RNG resource (seeded)
///
/// Один поток случайности на мир: loot selection и stat rolls берут из него
/// в фиксированном порядке систем, поэтому одинаковый seed → одинаковые предметы.
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

/// Headless app: MinimalPlugins, seeded RNG, fixed 60Hz tick
///
/// Equipment plugin не добавляется: тесты и bin решают сами (config вставляется до него).
pub fn create_headless_app(seed: u64) -> App {
    init_logger();

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0));
    app
}

/// Байтовый отпечаток всех `T` в мире, упорядоченный по entity index
///
/// Два прогона с одним seed обязаны дать одинаковые отпечатки.
pub fn world_snapshot<T: Component + std::fmt::Debug>(world: &mut World) -> Vec<u8> {
    let mut rows: Vec<(u32, String)> = world
        .query::<(Entity, &T)>()
        .iter(world)
        .map(|(entity, component)| (entity.index(), format!("{component:?}")))
        .collect();
    rows.sort_unstable_by_key(|(index, _)| *index);

    rows.into_iter()
        .flat_map(|(index, debug)| index.to_le_bytes().into_iter().chain(debug.into_bytes()))
        .collect()
}
