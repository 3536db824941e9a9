//! Persistent key-value store.
//!
//! # Responsibility
//! - Hold one JSON document per key (entity collections, session snapshot).
//! - Hide SQLite details from repositories and services.
//!
//! # Invariants
//! - The store is type-agnostic: values are opaque strings.
//! - `set_item` replaces the whole value for a key.

mod kv_store;

pub use kv_store::{KeyValueStore, SqliteKeyValueStore, StoreError, StoreResult};

/// Store key for the authenticated session snapshot.
pub const SESSION_KEY: &str = "currentUser";
