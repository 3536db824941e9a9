//! First-run sample data.
//!
//! # Invariants
//! - A collection is seeded only while it is empty.
//! - Sales are never seeded.
//! - Running the seeder repeatedly leaves one seed per seeded collection.

use crate::model::client::Client;
use crate::model::concept::Concept;
use crate::model::credential::Credential;
use crate::model::entity::{Collection, Entity};
use crate::model::seller::Seller;
use crate::repo::entity_repo::{CollectionRepository, EntityRepository, RepoResult};
use crate::store::KeyValueStore;
use log::info;

/// Collections that received a seed record in one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub seeded: Vec<Collection>,
}

impl SeedReport {
    pub fn is_noop(&self) -> bool {
        self.seeded.is_empty()
    }
}

/// Inserts one sample record into each empty collection except sales.
pub fn seed_defaults<S: KeyValueStore>(store: &S) -> RepoResult<SeedReport> {
    let mut report = SeedReport::default();

    seed_if_empty(store, &mut report, || Client {
        phone: Some("987654321".to_string()),
        email: Some("cliente@ejemplo.com".to_string()),
        address: Some("Av. Ejemplo 123".to_string()),
        ..Client::new("Cliente Ejemplo", "12345678")
    })?;
    seed_if_empty(store, &mut report, || Seller {
        phone: Some("123456789".to_string()),
        email: Some("vendedor@ejemplo.com".to_string()),
        ..Seller::new("Vendedor Ejemplo", "87654321")
    })?;
    seed_if_empty(store, &mut report, || Concept {
        description: Some("Descripción del producto A".to_string()),
        ..Concept::new("Producto A")
    })?;
    seed_if_empty(store, &mut report, || Credential {
        description: Some("Descripción de la credencial".to_string()),
        ..Credential::new("Credencial Ejemplo")
    })?;

    info!(
        "event=seed_defaults module=service status=ok seeded_count={}",
        report.seeded.len()
    );
    Ok(report)
}

fn seed_if_empty<S: KeyValueStore, T: Entity>(
    store: &S,
    report: &mut SeedReport,
    make_seed: impl FnOnce() -> T,
) -> RepoResult<()> {
    let repo = CollectionRepository::<&S, T>::new(store);
    if !repo.get_all()?.is_empty() {
        return Ok(());
    }
    repo.create(make_seed())?;
    report.seeded.push(T::COLLECTION);
    Ok(())
}
