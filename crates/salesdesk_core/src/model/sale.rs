//! Sale record.
//!
//! # Invariants
//! - `client_id`, `seller_id` and `concept_id` are unchecked references.
//! - `amount` is a non-negative currency value once validated.

use crate::model::entity::{
    entity_identity, require_text, Collection, Entity, EntityId, EntityValidationError,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    #[serde(default)]
    pub id: EntityId,
    pub date: DateTime<Utc>,
    pub client_id: EntityId,
    pub seller_id: EntityId,
    pub concept_id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Sale {
    pub fn new(
        date: DateTime<Utc>,
        client_id: impl Into<EntityId>,
        seller_id: impl Into<EntityId>,
        concept_id: impl Into<EntityId>,
        amount: f64,
    ) -> Self {
        Self {
            date,
            client_id: client_id.into(),
            seller_id: seller_id.into(),
            concept_id: concept_id.into(),
            amount,
            ..Self::default()
        }
    }
}

impl Entity for Sale {
    const COLLECTION: Collection = Collection::Sales;

    entity_identity!();

    fn validate(&self) -> Result<(), EntityValidationError> {
        require_text("clientId", &self.client_id)?;
        require_text("sellerId", &self.seller_id)?;
        require_text("conceptId", &self.concept_id)?;
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(EntityValidationError::InvalidAmount(self.amount));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Sale;
    use crate::model::entity::{Entity, EntityValidationError};
    use chrono::{TimeZone, Utc};

    fn sale(amount: f64) -> Sale {
        let date = Utc.with_ymd_and_hms(2024, 2, 10, 9, 30, 0).unwrap();
        Sale::new(date, "c1", "s1", "k1", amount)
    }

    #[test]
    fn validate_rejects_negative_and_nan_amounts() {
        assert!(sale(0.0).validate().is_ok());
        assert!(matches!(
            sale(-1.0).validate(),
            Err(EntityValidationError::InvalidAmount(_))
        ));
        assert!(sale(f64::NAN).validate().is_err());
    }

    #[test]
    fn json_uses_camel_case_and_iso_dates() {
        let mut record = sale(100.5);
        record.id = "abc".to_string();
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["clientId"], "c1");
        assert_eq!(json["date"], "2024-02-10T09:30:00Z");
        assert!(json.get("observation").is_none());
        assert!(json.get("createdAt").is_none());

        let back: Sale = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
