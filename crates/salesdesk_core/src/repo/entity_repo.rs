//! Generic entity repository.
//!
//! # Responsibility
//! - CRUD over one JSON-array collection per entity type.
//! - Assign `id` and `createdAt` on create when absent.
//! - Shallow-merge updates over the stored record.
//!
//! # Invariants
//! - Collection order is insertion order.
//! - `id` is unique within a collection.
//! - Only records that decode back into `T` are written.
//! - `update` with an unknown id persists nothing.
//! - `remove` with an unknown id persists the unchanged collection.
//! - Corrupt collection JSON is reported, never overwritten by reads.

use crate::model::entity::{new_entity_id, Collection, Entity, EntityId};
use crate::store::{KeyValueStore, StoreError};
use chrono::Utc;
use log::{debug, warn};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for collection reads and writes.
#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    /// Stored collection value is not a JSON array of records.
    CorruptCollection { key: &'static str, message: String },
    /// A record could not be turned into a JSON object.
    Serialize(serde_json::Error),
    /// `create` was given an id already present in the collection.
    DuplicateId { key: &'static str, id: EntityId },
    /// Record JSON would not decode back into its type (for example a
    /// non-finite amount serialized as `null`). Nothing was written.
    UnreadableRecord { key: &'static str, message: String },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::CorruptCollection { key, message } => {
                write!(f, "corrupt collection `{key}`: {message}")
            }
            Self::Serialize(err) => write!(f, "failed to serialize record: {err}"),
            Self::DuplicateId { key, id } => {
                write!(f, "record `{id}` already exists in `{key}`")
            }
            Self::UnreadableRecord { key, message } => {
                write!(f, "record for `{key}` would not read back: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::CorruptCollection { .. } => None,
            Self::Serialize(err) => Some(err),
            Self::DuplicateId { .. } => None,
            Self::UnreadableRecord { .. } => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// CRUD contract for one entity collection.
pub trait EntityRepository<T: Entity> {
    fn get_all(&self) -> RepoResult<Vec<T>>;
    fn get_by_id(&self, id: &str) -> RepoResult<Option<T>>;
    fn create(&self, item: T) -> RepoResult<T>;
    /// Returns `None` when no record has `item.id`; nothing is written then.
    fn update(&self, item: &T) -> RepoResult<Option<T>>;
    fn remove(&self, id: &str) -> RepoResult<()>;
}

/// Repository storing collection `T::COLLECTION` as one JSON array value.
pub struct CollectionRepository<S, T> {
    store: S,
    _entity: PhantomData<fn() -> T>,
}

impl<S: KeyValueStore, T: Entity> CollectionRepository<S, T> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    fn key() -> &'static str {
        T::COLLECTION.storage_key()
    }

    fn load_raw(&self) -> RepoResult<Vec<Map<String, Value>>> {
        let Some(text) = self.store.get_item(Self::key())? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&text).map_err(|err| corrupt(T::COLLECTION, &err))
    }

    fn save_raw(&self, records: &[Map<String, Value>]) -> RepoResult<()> {
        let text = serde_json::to_string(records).map_err(RepoError::Serialize)?;
        self.store.set_item(Self::key(), &text)?;
        debug!(
            "event=collection_write module=repo status=ok entity={} count={}",
            T::COLLECTION,
            records.len()
        );
        Ok(())
    }

    fn decode(record: Map<String, Value>) -> RepoResult<T> {
        serde_json::from_value(Value::Object(record)).map_err(|err| corrupt(T::COLLECTION, &err))
    }

    /// Decodes a record about to be written; failure leaves the store untouched.
    fn read_back(record: &Map<String, Value>) -> RepoResult<T> {
        serde_json::from_value(Value::Object(record.clone())).map_err(|err| {
            warn!(
                "event=collection_write module=repo status=rejected entity={} error_code=unreadable_record",
                T::COLLECTION
            );
            RepoError::UnreadableRecord {
                key: Self::key(),
                message: err.to_string(),
            }
        })
    }
}

impl<S: KeyValueStore, T: Entity> EntityRepository<T> for CollectionRepository<S, T> {
    fn get_all(&self) -> RepoResult<Vec<T>> {
        self.load_raw()?.into_iter().map(Self::decode).collect()
    }

    fn get_by_id(&self, id: &str) -> RepoResult<Option<T>> {
        Ok(self.get_all()?.into_iter().find(|item| item.id() == id))
    }

    fn create(&self, mut item: T) -> RepoResult<T> {
        if item.id().is_empty() {
            item.set_id(new_entity_id());
        }
        if item.created_at().is_none() {
            item.set_created_at(Utc::now());
        }

        let mut records = self.load_raw()?;
        if records.iter().any(|record| record_id(record) == Some(item.id())) {
            warn!(
                "event=record_create module=repo status=rejected entity={} error_code=duplicate_id",
                T::COLLECTION
            );
            return Err(RepoError::DuplicateId {
                key: Self::key(),
                id: item.id().to_string(),
            });
        }

        let record = to_object(&item)?;
        let stored = Self::read_back(&record)?;
        records.push(record);
        self.save_raw(&records)?;
        Ok(stored)
    }

    fn update(&self, item: &T) -> RepoResult<Option<T>> {
        let mut records = self.load_raw()?;
        let Some(index) = records.iter().position(|record| record_id(record) == Some(item.id()))
        else {
            warn!(
                "event=record_update module=repo status=skipped entity={} reason=not_found",
                T::COLLECTION
            );
            return Ok(None);
        };

        for (field, value) in to_object(item)? {
            records[index].insert(field, value);
        }
        let merged = Self::read_back(&records[index])?;
        self.save_raw(&records)?;
        Ok(Some(merged))
    }

    fn remove(&self, id: &str) -> RepoResult<()> {
        let mut records = self.load_raw()?;
        records.retain(|record| record_id(record) != Some(id));
        self.save_raw(&records)
    }
}

fn to_object<T: Entity>(item: &T) -> RepoResult<Map<String, Value>> {
    match serde_json::to_value(item).map_err(RepoError::Serialize)? {
        Value::Object(map) => Ok(map),
        other => Err(corrupt(
            T::COLLECTION,
            &format!("record serialized to non-object `{other}`"),
        )),
    }
}

fn record_id(record: &Map<String, Value>) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

fn corrupt(collection: Collection, err: &dyn Display) -> RepoError {
    warn!(
        "event=collection_read module=repo status=error entity={} error_code=corrupt_collection",
        collection
    );
    RepoError::CorruptCollection {
        key: collection.storage_key(),
        message: err.to_string(),
    }
}
