//! Entity use-case service.
//!
//! # Responsibility
//! - Validate records before create/update, as the entry forms do.
//! - Turn the repository's silent update miss into an explicit error.
//!
//! # Invariants
//! - Invalid records never reach the store.
//! - Read paths are pass-through.

use crate::model::entity::{Entity, EntityId, EntityValidationError};
use crate::repo::entity_repo::{EntityRepository, RepoError, RepoResult};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

/// Errors from entity service operations.
#[derive(Debug)]
pub enum ServiceError {
    Validation(EntityValidationError),
    /// Update target does not exist.
    NotFound(EntityId),
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<EntityValidationError> for ServiceError {
    fn from(value: EntityValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Validating facade over an [`EntityRepository`].
pub struct EntityService<T, R> {
    repo: R,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity, R: EntityRepository<T>> EntityService<T, R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            _entity: PhantomData,
        }
    }

    /// Validates and stores a new record.
    pub fn create(&self, item: T) -> Result<T, ServiceError> {
        item.validate()?;
        let stored = self.repo.create(item)?;
        info!(
            "event=record_create module=service status=ok entity={}",
            T::COLLECTION
        );
        Ok(stored)
    }

    /// Validates and merges `item` over the stored record with the same id.
    ///
    /// # Errors
    /// - `NotFound` when no record has `item.id`; the store is untouched.
    pub fn update(&self, item: &T) -> Result<T, ServiceError> {
        item.validate()?;
        let merged = self
            .repo
            .update(item)?
            .ok_or_else(|| ServiceError::NotFound(item.id().to_string()))?;
        info!(
            "event=record_update module=service status=ok entity={}",
            T::COLLECTION
        );
        Ok(merged)
    }

    pub fn get(&self, id: &str) -> RepoResult<Option<T>> {
        self.repo.get_by_id(id)
    }

    pub fn list(&self) -> RepoResult<Vec<T>> {
        self.repo.get_all()
    }

    pub fn remove(&self, id: &str) -> RepoResult<()> {
        self.repo.remove(id)?;
        info!(
            "event=record_remove module=service status=ok entity={}",
            T::COLLECTION
        );
        Ok(())
    }
}
