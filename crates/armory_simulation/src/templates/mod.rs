//! Templates module - каталог предметов
//!
//! - `record` - TemplateRecord + stat ranges + anchor points
//! - `key` - CompositeKey (category tag | type * 1000 + variant)
//! - `store` - TemplateStore (RON / default catalog) + template entities
//! - `registry` - TemplateRegistry per category, freeze после init фазы

pub mod key;
pub mod record;
pub mod registry;
pub mod store;

pub use key::*;
pub use record::*;
pub use registry::*;
pub use store::*;
