//! Id-to-name lookup for sale references.

use crate::model::client::Client;
use crate::model::concept::Concept;
use crate::model::seller::Seller;
use crate::repo::entity_repo::{CollectionRepository, EntityRepository, RepoResult};
use crate::store::KeyValueStore;
use std::collections::HashMap;

pub const CLIENT_NOT_FOUND: &str = "Cliente no encontrado";
pub const SELLER_NOT_FOUND: &str = "Vendedor no encontrado";
pub const CONCEPT_NOT_FOUND: &str = "Concepto no encontrado";

/// Display names for clients, sellers and concepts keyed by id.
#[derive(Debug, Clone, Default)]
pub struct NameDirectory {
    clients: HashMap<String, String>,
    client_documents: HashMap<String, String>,
    sellers: HashMap<String, String>,
    concepts: HashMap<String, String>,
}

impl NameDirectory {
    pub fn new(clients: &[Client], sellers: &[Seller], concepts: &[Concept]) -> Self {
        Self {
            clients: clients
                .iter()
                .map(|c| (c.id.clone(), c.name.clone()))
                .collect(),
            client_documents: clients
                .iter()
                .map(|c| (c.id.clone(), c.document.clone()))
                .collect(),
            sellers: sellers
                .iter()
                .map(|s| (s.id.clone(), s.name.clone()))
                .collect(),
            concepts: concepts
                .iter()
                .map(|c| (c.id.clone(), c.name.clone()))
                .collect(),
        }
    }

    /// Reads clients, sellers and concepts from `store`.
    pub fn load<S: KeyValueStore>(store: &S) -> RepoResult<Self> {
        let clients = CollectionRepository::<&S, Client>::new(store).get_all()?;
        let sellers = CollectionRepository::<&S, Seller>::new(store).get_all()?;
        let concepts = CollectionRepository::<&S, Concept>::new(store).get_all()?;
        Ok(Self::new(&clients, &sellers, &concepts))
    }

    pub fn client_name(&self, id: &str) -> &str {
        self.clients.get(id).map_or(CLIENT_NOT_FOUND, String::as_str)
    }

    pub fn client_document(&self, id: &str) -> Option<&str> {
        self.client_documents
            .get(id)
            .map(String::as_str)
            .filter(|document| !document.is_empty())
    }

    pub fn seller_name(&self, id: &str) -> &str {
        self.sellers.get(id).map_or(SELLER_NOT_FOUND, String::as_str)
    }

    pub fn concept_name(&self, id: &str) -> &str {
        self.concepts
            .get(id)
            .map_or(CONCEPT_NOT_FOUND, String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::{NameDirectory, CLIENT_NOT_FOUND, CONCEPT_NOT_FOUND};
    use crate::model::client::Client;
    use crate::model::concept::Concept;

    #[test]
    fn unknown_ids_fall_back_to_labels() {
        let mut client = Client::new("Ana", "123");
        client.id = "c1".to_string();
        let mut concept = Concept::new("Producto A");
        concept.id = "k1".to_string();
        let directory = NameDirectory::new(&[client], &[], &[concept]);

        assert_eq!(directory.client_name("c1"), "Ana");
        assert_eq!(directory.client_document("c1"), Some("123"));
        assert_eq!(directory.client_name("gone"), CLIENT_NOT_FOUND);
        assert_eq!(directory.client_document("gone"), None);
        assert_eq!(directory.concept_name("k1"), "Producto A");
        assert_eq!(directory.concept_name(""), CONCEPT_NOT_FOUND);
    }

    #[test]
    fn fallback_labels_use_spanish_wording() {
        let directory = NameDirectory::default();
        assert_eq!(directory.client_name("x"), "Cliente no encontrado");
        assert_eq!(directory.seller_name("x"), "Vendedor no encontrado");
        assert_eq!(directory.concept_name("x"), "Concepto no encontrado");
    }
}
