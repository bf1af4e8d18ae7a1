//! Tests for weighted loot selection.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    use crate::loot::{select_loot, LootDrop, LootEntry, LootPool};
    use crate::templates::*;

    fn entry(kind: GunType, variant: u32, weight: f32) -> LootEntry {
        LootEntry {
            key: CompositeKey::of(kind, variant).unwrap(),
            template: TemplateId(Entity::from_raw(variant + kind.index() * 10)),
            weight,
        }
    }

    #[test]
    fn test_loot_proportionality() {
        let pool = vec![
            entry(GunType::Pistol, 0, 1.0),
            entry(GunType::Rifle, 0, 2.0),
            entry(GunType::Shotgun, 0, 3.0),
            entry(GunType::Sniper, 0, 4.0),
        ];
        let total: f32 = pool.iter().map(|e| e.weight).sum();

        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        const N: usize = 100_000;
        let mut counts: HashMap<CompositeKey, usize> = HashMap::new();
        for _ in 0..N {
            let winner = select_loot(&mut rng, &[&pool]).unwrap();
            *counts.entry(winner.key).or_default() += 1;
        }

        for e in &pool {
            let observed = counts.get(&e.key).copied().unwrap_or(0) as f64 / N as f64;
            let expected = (e.weight / total) as f64;
            assert!(
                (observed - expected).abs() < 0.01,
                "key {} observed {observed:.4} expected {expected:.4}",
                e.key
            );
        }
    }

    #[test]
    fn test_zero_weight_pool_is_empty() {
        let pool = vec![entry(GunType::Pistol, 0, 0.0), entry(GunType::Rifle, 0, 0.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..1000 {
            assert_eq!(select_loot(&mut rng, &[&pool]), None);
        }

        let empty: Vec<LootEntry> = Vec::new();
        assert_eq!(select_loot(&mut rng, &[&empty]), None);
        assert_eq!(select_loot(&mut rng, &[]), None);
    }

    #[test]
    fn test_zero_weight_entries_never_win() {
        let pool = vec![
            entry(GunType::Pistol, 0, 0.0),
            entry(GunType::Rifle, 0, 5.0),
            entry(GunType::Smg, 0, f32::NAN),
            entry(GunType::Sniper, 0, -3.0),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..1000 {
            let winner = select_loot(&mut rng, &[&pool]).unwrap();
            assert_eq!(winner.key, CompositeKey::of(GunType::Rifle, 0).unwrap());
        }
    }

    #[test]
    fn test_selection_independent_of_pool_order() {
        let forward = vec![
            entry(GunType::Pistol, 0, 1.0),
            entry(GunType::Rifle, 0, 2.0),
            entry(GunType::Shotgun, 0, 3.0),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let mut rng_a = ChaCha8Rng::seed_from_u64(77);
        let mut rng_b = ChaCha8Rng::seed_from_u64(77);
        for _ in 0..500 {
            assert_eq!(
                select_loot(&mut rng_a, &[&forward]),
                select_loot(&mut rng_b, &[&reversed])
            );
        }
    }

    #[test]
    fn test_registry_pool_skips_disabled() {
        let catalog = CatalogFile::default_catalog();
        let mut passives = PassiveItemRegistry::new();
        for (n, template) in catalog.passive_items.into_iter().enumerate() {
            passives.register(&TemplateRecord::PassiveItem(template), TemplateId(Entity::from_raw(n as u32)));
        }

        let entries = passives.loot_entries();
        let charm = CompositeKey::of(PassiveItemType::LuckyCharm, 0).unwrap();
        assert!(entries.iter().all(|e| e.key != charm));
        assert_eq!(entries.len(), passives.len() - 1);
    }

    #[test]
    fn test_loot_drop_decoding() {
        let gun = CompositeKey::of(GunType::Smg, 2).unwrap();
        let scope = CompositeKey::of(AttachmentType::Scope, 1).unwrap();
        let boots = CompositeKey::of(PassiveItemType::SwiftBoots, 0).unwrap();

        assert_eq!(LootDrop::from_key(gun), Some(LootDrop::Gun(GunType::Smg, 2)));
        assert_eq!(LootDrop::from_key(scope), Some(LootDrop::Attachment(AttachmentType::Scope, 1)));
        assert_eq!(
            LootDrop::from_key(boots),
            Some(LootDrop::PassiveItem(PassiveItemType::SwiftBoots, 0))
        );
    }
}
