use thiserror::Error;

use crate::templates::{Category, TemplateKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpawnError {
    #[error("{category} template not registered: {type_name} variant {variant_id}")]
    TemplateNotFound {
        category: Category,
        type_name: &'static str,
        variant_id: u32,
    },

    #[error("{category} {type_name} variant {variant_id} has no composite key")]
    InvalidKey {
        category: Category,
        type_name: &'static str,
        variant_id: u32,
    },
}

impl SpawnError {
    pub fn not_found<K: TemplateKind>(kind: K, variant_id: u32) -> Self {
        SpawnError::TemplateNotFound {
            category: K::CATEGORY,
            type_name: kind.name(),
            variant_id,
        }
    }

    pub fn invalid_key<K: TemplateKind>(kind: K, variant_id: u32) -> Self {
        SpawnError::InvalidKey {
            category: K::CATEGORY,
            type_name: kind.name(),
            variant_id,
        }
    }
}
