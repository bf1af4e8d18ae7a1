//! Stat Aggregator - EffectiveWeaponStats = base + Σ attachment modifiers
//!
//! Пересчитывается каждый тик для каждого оружия (последний set в Update).
//! Float сумма не ассоциативна, поэтому дельты каждого поля складываются в
//! каноническом порядке (sort по значению, `total_cmp`): любая перестановка
//! списка attachments даёт bit-identical результат.

use bevy::prelude::*;

use crate::components::{AttachmentModifier, BaseWeaponStats, EffectiveWeaponStats, WeaponAttachments};

fn canonical_sum(base: f32, mut deltas: Vec<f32>) -> f32 {
    deltas.sort_by(f32::total_cmp);
    deltas.into_iter().fold(base, |acc, delta| acc + delta)
}

fn deltas(modifiers: &[AttachmentModifier], get: fn(&AttachmentModifier) -> f32) -> Vec<f32> {
    modifiers.iter().map(get).collect()
}

fn int_sum(base: i32, deltas: impl Iterator<Item = i32>) -> i32 {
    let total = deltas.fold(base as i64, |acc, delta| acc + delta as i64);
    total.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Чистая функция: base + модификаторы (порядок не важен)
pub fn aggregate(base: &BaseWeaponStats, modifiers: &[AttachmentModifier]) -> EffectiveWeaponStats {
    EffectiveWeaponStats {
        damage: canonical_sum(base.damage, deltas(modifiers, |m| m.damage)),
        accuracy: canonical_sum(base.accuracy, deltas(modifiers, |m| m.accuracy)),
        attack_rate: canonical_sum(base.attack_rate, deltas(modifiers, |m| m.attack_rate)),
        recoil_amount: canonical_sum(base.recoil_amount, deltas(modifiers, |m| m.recoil_amount)),
        spread_amount: canonical_sum(base.spread_amount, deltas(modifiers, |m| m.spread_amount)),
        bullets_per_shot: int_sum(base.bullets_per_shot, modifiers.iter().map(|m| m.bullets_per_shot)),
        piercing: base.piercing,
    }
}

/// System: пересчёт effective stats (parallel по оружию)
pub fn aggregate_weapon_stats(
    mut guns: Query<(&BaseWeaponStats, Option<&WeaponAttachments>, &mut EffectiveWeaponStats)>,
    modifiers: Query<&AttachmentModifier>,
) {
    guns.par_iter_mut().for_each(|(base, attached, mut effective)| {
        let collected: Vec<AttachmentModifier> = attached
            .map(|list| list.entities())
            .unwrap_or_default()
            .iter()
            .filter_map(|&entity| modifiers.get(entity).ok().copied())
            .collect();

        let next = aggregate(base, &collected);
        // Change detection только при реальном изменении
        if *effective != next {
            *effective = next;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn base() -> BaseWeaponStats {
        BaseWeaponStats {
            damage: 10.0,
            accuracy: 0.7,
            attack_rate: 4.0,
            recoil_amount: 1.5,
            spread_amount: 0.2,
            bullets_per_shot: 1,
            piercing: 2,
        }
    }

    fn random_modifier(rng: &mut ChaCha8Rng) -> AttachmentModifier {
        AttachmentModifier {
            damage: rng.gen_range(-3.0..3.0),
            accuracy: rng.gen_range(-0.1..0.1),
            attack_rate: rng.gen_range(-1.0..1.0),
            recoil_amount: rng.gen_range(-0.7..0.7),
            spread_amount: rng.gen_range(-0.05..0.05),
            bullets_per_shot: rng.gen_range(-1..=2),
        }
    }

    #[test]
    fn test_no_modifiers_is_base() {
        let effective = aggregate(&base(), &[]);
        assert_eq!(effective, EffectiveWeaponStats::from(&base()));
    }

    #[test]
    fn test_sums_modifiers() {
        let modifiers = [
            AttachmentModifier {
                damage: 2.0,
                bullets_per_shot: 1,
                ..Default::default()
            },
            AttachmentModifier {
                damage: 3.0,
                recoil_amount: -0.5,
                ..Default::default()
            },
        ];

        let effective = aggregate(&base(), &modifiers);
        assert_eq!(effective.damage, 15.0);
        assert_eq!(effective.recoil_amount, 1.0);
        assert_eq!(effective.bullets_per_shot, 2);
        assert_eq!(effective.piercing, 2);
    }

    #[test]
    fn test_order_independent_bitwise() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut modifiers: Vec<AttachmentModifier> = (0..6).map(|_| random_modifier(&mut rng)).collect();
        let reference = aggregate(&base(), &modifiers);

        for _ in 0..200 {
            // Fisher-Yates
            for i in (1..modifiers.len()).rev() {
                let j = rng.gen_range(0..=i);
                modifiers.swap(i, j);
            }
            let shuffled = aggregate(&base(), &modifiers);
            assert_eq!(shuffled.damage.to_bits(), reference.damage.to_bits());
            assert_eq!(shuffled.accuracy.to_bits(), reference.accuracy.to_bits());
            assert_eq!(shuffled.attack_rate.to_bits(), reference.attack_rate.to_bits());
            assert_eq!(shuffled.recoil_amount.to_bits(), reference.recoil_amount.to_bits());
            assert_eq!(shuffled.spread_amount.to_bits(), reference.spread_amount.to_bits());
            assert_eq!(shuffled.bullets_per_shot, reference.bullets_per_shot);
        }
    }

    #[test]
    fn test_idempotent() {
        let modifiers = [AttachmentModifier {
            accuracy: 0.05,
            ..Default::default()
        }];
        let first = aggregate(&base(), &modifiers);
        let second = aggregate(&base(), &modifiers);
        assert_eq!(first, second);
    }
}
