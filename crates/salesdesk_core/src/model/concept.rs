//! Sale concept (product or service line).

use crate::model::entity::{
    entity_identity, require_text, Collection, Entity, EntityId, EntityValidationError,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    #[serde(default)]
    pub id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Concept {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Entity for Concept {
    const COLLECTION: Collection = Collection::Concepts;

    entity_identity!();

    fn validate(&self) -> Result<(), EntityValidationError> {
        require_text("name", &self.name)
    }
}
