//! CompositeKey - (category, type, variant) упакованные в u32
//!
//! Layout: `tag | (type * 1000 + variant)`, tag живёт в старших битах
//! (Attachment = 0x1, Gun = 0x2, PassiveItem = 0x3 сдвинутые на 28).
//! Три числовых пространства не пересекаются.

use bevy::prelude::*;

use super::record::{Category, TemplateKind};

/// Шаг variant внутри type (variant_id < 1000)
pub const VARIANT_STRIDE: u32 = 1000;

const TAG_SHIFT: u32 = 28;
const VALUE_MASK: u32 = (1 << TAG_SHIFT) - 1;

impl Category {
    pub fn tag(self) -> u32 {
        match self {
            Category::Attachment => 0x1 << TAG_SHIFT,
            Category::Gun => 0x2 << TAG_SHIFT,
            Category::PassiveItem => 0x3 << TAG_SHIFT,
        }
    }

    pub fn from_tag(tag: u32) -> Option<Self> {
        match tag >> TAG_SHIFT {
            0x1 => Some(Category::Attachment),
            0x2 => Some(Category::Gun),
            0x3 => Some(Category::PassiveItem),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct CompositeKey(u32);

impl CompositeKey {
    /// None если variant ≥ 1000 или значение залезает в tag биты
    pub fn new(category: Category, type_index: u32, variant_id: u32) -> Option<Self> {
        if variant_id >= VARIANT_STRIDE {
            return None;
        }

        let value = type_index
            .checked_mul(VARIANT_STRIDE)?
            .checked_add(variant_id)?;

        if value > VALUE_MASK {
            return None;
        }

        Some(Self(category.tag() | value))
    }

    pub fn of<K: TemplateKind>(kind: K, variant_id: u32) -> Option<Self> {
        Self::new(K::CATEGORY, kind.index(), variant_id)
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    pub fn category(self) -> Option<Category> {
        Category::from_tag(self.0 & !VALUE_MASK)
    }

    pub fn type_index(self) -> u32 {
        (self.0 & VALUE_MASK) / VARIANT_STRIDE
    }

    pub fn variant_id(self) -> u32 {
        (self.0 & VALUE_MASK) % VARIANT_STRIDE
    }

    /// Обратно в (kind, variant) - None если key другой категории
    pub fn decode<K: TemplateKind>(self) -> Option<(K, u32)> {
        if self.category()? != K::CATEGORY {
            return None;
        }
        Some((K::from_index(self.type_index())?, self.variant_id()))
    }
}

impl std::fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}
