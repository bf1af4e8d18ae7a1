//! ECS Components для equipment entity
//!
//! Организация по доменам:
//! - item: runtime state предмета (Item, ItemType), ownership (OwnedBy), VisualState
//! - weapon: собранное оружие (Gun, Ammo, Durability, Base/EffectiveWeaponStats, AnchorPoints)
//! - attachment: модификаторы (WeaponAttachment, AttachmentModifier, AttachedTo ↔ WeaponAttachments)
//! - passive: passive items (PassiveItem, PassiveEffect)

pub mod attachment;
pub mod item;
pub mod passive;
pub mod weapon;

// Re-exports для удобного импорта
pub use attachment::*;
pub use item::*;
pub use passive::*;
pub use weapon::*;
