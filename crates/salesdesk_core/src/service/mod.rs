//! Use-case services.
//!
//! # Responsibility
//! - Apply form-boundary validation above the repository layer.
//! - Seed first-run sample data.
//!
//! # Invariants
//! - Services reach storage only through repositories.

pub mod entity_service;
pub mod seed_service;
