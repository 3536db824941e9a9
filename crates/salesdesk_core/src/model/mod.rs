//! Business records persisted by the store.
//!
//! # Responsibility
//! - Define the five entity schemas and their JSON shape.
//! - Tie each schema to its collection through the [`entity::Entity`] trait.
//!
//! # Invariants
//! - Every stored record carries a unique `id` and a `createdAt` timestamp.
//! - Sale references are plain ids; nothing enforces that they resolve.

pub mod client;
pub mod concept;
pub mod credential;
pub mod entity;
pub mod sale;
pub mod seller;
