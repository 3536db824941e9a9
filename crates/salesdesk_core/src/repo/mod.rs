//! Repository layer over the key-value store.
//!
//! # Responsibility
//! - Provide generic CRUD per entity collection.
//! - Keep JSON (de)serialization at the store boundary.
//!
//! # Invariants
//! - Every mutation rewrites the whole collection value.
//! - Repositories never validate records; the service layer does.

pub mod entity_repo;
