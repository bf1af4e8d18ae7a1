//! Weighted Loot Selector - один победитель из всех registries
//!
//! # Алгоритм
//! 1. Собрать enabled entries с weight > 0 из всех pools
//! 2. Отсортировать по CompositeKey (детерминированный порядок обхода)
//! 3. `r ~ U(0, total)`, идти накапливая weight, вернуть первый с cumulative ≥ r
//!
//! Пустой pool / total ≤ 0 → None ("no loot"), это не ошибка.

use rand::Rng;

use crate::templates::{
    AttachmentType, CompositeKey, GunType, PassiveItemType, TemplateId, TemplateKind, TemplateRegistry,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LootEntry {
    pub key: CompositeKey,
    pub template: TemplateId,
    pub weight: f32,
}

/// Источник weighted entries для selector'а
pub trait LootPool {
    fn loot_entries(&self) -> Vec<LootEntry>;
}

impl<K: TemplateKind> LootPool for TemplateRegistry<K> {
    fn loot_entries(&self) -> Vec<LootEntry> {
        self.sorted_entries()
            .into_iter()
            .filter(|(_, entry)| entry.enabled)
            .map(|(key, entry)| LootEntry {
                key,
                template: entry.template,
                weight: entry.loot_weight,
            })
            .collect()
    }
}

impl LootPool for Vec<LootEntry> {
    fn loot_entries(&self) -> Vec<LootEntry> {
        self.clone()
    }
}

pub fn select_loot<R: Rng + ?Sized>(rng: &mut R, pools: &[&dyn LootPool]) -> Option<LootEntry> {
    let mut candidates: Vec<LootEntry> = pools
        .iter()
        .flat_map(|pool| pool.loot_entries())
        .filter(|entry| entry.weight.is_finite() && entry.weight > 0.0)
        .collect();
    candidates.sort_by_key(|entry| entry.key);

    let total: f64 = candidates.iter().map(|entry| entry.weight as f64).sum();
    if candidates.is_empty() || total <= 0.0 {
        return None;
    }

    let roll = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    for entry in &candidates {
        cumulative += entry.weight as f64;
        if cumulative >= roll {
            return Some(*entry);
        }
    }

    // Float rounding: roll чуть больше итоговой суммы
    candidates.last().copied()
}

/// Победитель, раскодированный обратно в category-specific запрос
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LootDrop {
    Gun(GunType, u32),
    Attachment(AttachmentType, u32),
    PassiveItem(PassiveItemType, u32),
}

impl LootDrop {
    pub fn from_key(key: CompositeKey) -> Option<Self> {
        if let Some((gun_type, variant)) = key.decode::<GunType>() {
            return Some(LootDrop::Gun(gun_type, variant));
        }
        if let Some((attachment_type, variant)) = key.decode::<AttachmentType>() {
            return Some(LootDrop::Attachment(attachment_type, variant));
        }
        key.decode::<PassiveItemType>()
            .map(|(passive_type, variant)| LootDrop::PassiveItem(passive_type, variant))
    }
}
