//! Shared entity contract.
//!
//! # Responsibility
//! - Map each record type to its store collection at compile time.
//! - Provide identity accessors used by the generic repository.
//! - Provide form-boundary validation rules.
//!
//! # Invariants
//! - An empty `id` means "not assigned yet"; the repository fills it.
//! - Validation is never run by the repository itself.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque record identifier, unique within one collection.
pub type EntityId = String;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Named record collections, one store entry each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Clients,
    Sellers,
    Concepts,
    Credentials,
    Sales,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Clients,
        Collection::Sellers,
        Collection::Concepts,
        Collection::Credentials,
        Collection::Sales,
    ];

    /// Inverse of `storage_key`; `None` for keys outside the collections.
    pub fn from_storage_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|collection| collection.storage_key() == key)
    }

    /// Key of the store entry holding this collection.
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::Clients => "sales-app-clients",
            Self::Sellers => "sales-app-sellers",
            Self::Concepts => "sales-app-concepts",
            Self::Credentials => "sales-app-credentials",
            Self::Sales => "sales-app-sales",
        }
    }

    /// Singular entity-type tag, used in log lines.
    pub fn entity_type(self) -> &'static str {
        match self {
            Self::Clients => "client",
            Self::Sellers => "seller",
            Self::Concepts => "concept",
            Self::Credentials => "credential",
            Self::Sales => "sale",
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.entity_type())
    }
}

/// Form-boundary validation failure.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityValidationError {
    /// Required text field is blank after trim.
    MissingField(&'static str),
    InvalidEmail(String),
    /// Amount is negative, NaN or infinite.
    InvalidAmount(f64),
}

impl Display for EntityValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "required field `{field}` is blank"),
            Self::InvalidEmail(value) => write!(f, "invalid email address `{value}`"),
            Self::InvalidAmount(value) => {
                write!(f, "amount must be a non-negative number, got {value}")
            }
        }
    }
}

impl Error for EntityValidationError {}

/// Record stored in one collection.
pub trait Entity: Serialize + DeserializeOwned + Clone {
    const COLLECTION: Collection;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: EntityId);
    fn created_at(&self) -> Option<DateTime<Utc>>;
    fn set_created_at(&mut self, created_at: DateTime<Utc>);

    /// Checks required fields the way the entry forms do.
    fn validate(&self) -> Result<(), EntityValidationError>;
}

/// Generates a fresh opaque id (random UUID v4, hyphenated).
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4().to_string()
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), EntityValidationError> {
    if value.trim().is_empty() {
        return Err(EntityValidationError::MissingField(field));
    }
    Ok(())
}

/// Blank optional emails are accepted: forms submit empty strings.
pub(crate) fn check_email(value: Option<&str>) -> Result<(), EntityValidationError> {
    match value.map(str::trim) {
        Some(email) if !email.is_empty() && !EMAIL_RE.is_match(email) => {
            Err(EntityValidationError::InvalidEmail(email.to_string()))
        }
        _ => Ok(()),
    }
}

/// Implements the identity half of [`Entity`] for structs with
/// `id: EntityId` and `created_at: Option<DateTime<Utc>>` fields.
macro_rules! entity_identity {
    () => {
        fn id(&self) -> &str {
            &self.id
        }

        fn set_id(&mut self, id: $crate::model::entity::EntityId) {
            self.id = id;
        }

        fn created_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
            self.created_at
        }

        fn set_created_at(&mut self, created_at: chrono::DateTime<chrono::Utc>) {
            self.created_at = Some(created_at);
        }
    };
}

pub(crate) use entity_identity;

#[cfg(test)]
mod tests {
    use super::{check_email, new_entity_id, require_text, Collection, EntityValidationError};
    use std::collections::HashSet;

    #[test]
    fn storage_keys_are_distinct() {
        let keys: HashSet<_> = Collection::ALL.iter().map(|c| c.storage_key()).collect();
        assert_eq!(keys.len(), Collection::ALL.len());
        assert_eq!(Collection::Sales.storage_key(), "sales-app-sales");
    }

    #[test]
    fn storage_key_maps_back_to_collection() {
        for collection in Collection::ALL {
            assert_eq!(
                Collection::from_storage_key(collection.storage_key()),
                Some(collection)
            );
        }
        assert_eq!(Collection::from_storage_key("currentUser"), None);
    }

    #[test]
    fn new_entity_id_is_unique_uuid_text() {
        let first = new_entity_id();
        let second = new_entity_id();
        assert_ne!(first, second);
        assert_eq!(first.len(), 36);
    }

    #[test]
    fn require_text_rejects_whitespace() {
        assert_eq!(
            require_text("name", "   "),
            Err(EntityValidationError::MissingField("name"))
        );
        assert!(require_text("name", "Ana").is_ok());
    }

    #[test]
    fn check_email_accepts_blank_and_rejects_malformed() {
        assert!(check_email(None).is_ok());
        assert!(check_email(Some("")).is_ok());
        assert!(check_email(Some("ana@example.com")).is_ok());
        assert!(matches!(
            check_email(Some("not-an-email")),
            Err(EntityValidationError::InvalidEmail(_))
        ));
    }
}
