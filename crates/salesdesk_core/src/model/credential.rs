//! Login credential record.
//!
//! # Invariants
//! - `name` doubles as the login username.
//! - `password` is stored as plaintext and never logged or put in a session
//!   snapshot.

use crate::model::entity::{
    entity_identity, require_text, Collection, Entity, EntityId, EntityValidationError,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};

#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    #[serde(default)]
    pub id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Credential {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Case-insensitive username comparison used by login.
    pub fn matches_username(&self, username: &str) -> bool {
        self.name.to_lowercase() == username.to_lowercase()
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("description", &self.description)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl Entity for Credential {
    const COLLECTION: Collection = Collection::Credentials;

    entity_identity!();

    fn validate(&self) -> Result<(), EntityValidationError> {
        require_text("name", &self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::Credential;

    #[test]
    fn username_match_ignores_case() {
        let credential = Credential::new("Ana");
        assert!(credential.matches_username("ana"));
        assert!(credential.matches_username("ANA"));
        assert!(!credential.matches_username("anabel"));
    }

    #[test]
    fn debug_output_redacts_password() {
        let credential = Credential::new("Ana").with_password("s3cret");
        let rendered = format!("{credential:?}");
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }
}
