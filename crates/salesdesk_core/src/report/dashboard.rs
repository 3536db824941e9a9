//! Dashboard counters.

use crate::model::client::Client;
use crate::model::concept::Concept;
use crate::model::entity::Entity;
use crate::model::sale::Sale;
use crate::model::seller::Seller;
use crate::repo::entity_repo::{CollectionRepository, EntityRepository, RepoResult};
use crate::store::KeyValueStore;

/// Record counts and overall sales amount shown on the landing page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    pub client_count: usize,
    pub seller_count: usize,
    pub concept_count: usize,
    pub sale_count: usize,
    pub total_sales: f64,
}

impl DashboardStats {
    pub fn collect<S: KeyValueStore>(store: &S) -> RepoResult<Self> {
        let sales = CollectionRepository::<&S, Sale>::new(store).get_all()?;
        Ok(Self {
            client_count: count::<S, Client>(store)?,
            seller_count: count::<S, Seller>(store)?,
            concept_count: count::<S, Concept>(store)?,
            sale_count: sales.len(),
            total_sales: sales.iter().map(|sale| sale.amount).sum(),
        })
    }
}

fn count<S: KeyValueStore, T: Entity>(store: &S) -> RepoResult<usize> {
    Ok(CollectionRepository::<&S, T>::new(store).get_all()?.len())
}
