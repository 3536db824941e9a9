//! Client record.

use crate::model::entity::{
    check_email, entity_identity, require_text, Collection, Entity, EntityId,
    EntityValidationError,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Customer a sale is billed to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(default)]
    pub id: EntityId,
    pub name: String,
    /// Identity document number.
    pub document: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Client {
    pub fn new(name: impl Into<String>, document: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            document: document.into(),
            ..Self::default()
        }
    }
}

impl Entity for Client {
    const COLLECTION: Collection = Collection::Clients;

    entity_identity!();

    fn validate(&self) -> Result<(), EntityValidationError> {
        require_text("name", &self.name)?;
        require_text("document", &self.document)?;
        check_email(self.email.as_deref())
    }
}
