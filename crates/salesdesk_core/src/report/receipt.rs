//! Receipt data handed to the print surface.

use crate::model::sale::Sale;
use crate::report::directory::NameDirectory;
use chrono::{DateTime, FixedOffset, Utc};

const RECEIPT_NUMBER_LEN: usize = 8;

/// Renders an amount the way receipts and totals show it: `S/ 1234.50`.
pub fn format_currency(amount: f64) -> String {
    format!("S/ {amount:.2}")
}

/// `dd/mm/yyyy HH:MM` in the given offset.
pub fn format_sale_date(date: DateTime<Utc>, offset: FixedOffset) -> String {
    date.with_timezone(&offset)
        .format("%d/%m/%Y %H:%M")
        .to_string()
}

/// Printable fields of one sale receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptData {
    /// First 8 characters of the sale id, uppercased.
    pub receipt_number: String,
    pub date: String,
    pub client: String,
    pub client_document: Option<String>,
    pub seller: String,
    pub concept: String,
    /// Empty when the sale has no observation.
    pub observation: String,
    pub amount: String,
}

impl ReceiptData {
    pub fn from_sale(sale: &Sale, directory: &NameDirectory, offset: FixedOffset) -> Self {
        Self {
            receipt_number: receipt_number(&sale.id),
            date: format_sale_date(sale.date, offset),
            client: directory.client_name(&sale.client_id).to_string(),
            client_document: directory.client_document(&sale.client_id).map(str::to_string),
            seller: directory.seller_name(&sale.seller_id).to_string(),
            concept: directory.concept_name(&sale.concept_id).to_string(),
            observation: sale.observation.clone().unwrap_or_default(),
            amount: format_currency(sale.amount),
        }
    }
}

fn receipt_number(sale_id: &str) -> String {
    sale_id
        .chars()
        .take(RECEIPT_NUMBER_LEN)
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::{format_currency, format_sale_date, receipt_number, ReceiptData};
    use crate::model::client::Client;
    use crate::model::sale::Sale;
    use crate::report::directory::{NameDirectory, SELLER_NOT_FOUND};
    use chrono::{FixedOffset, Offset, TimeZone, Utc};

    #[test]
    fn currency_has_two_decimals() {
        assert_eq!(format_currency(150.0), "S/ 150.00");
        assert_eq!(format_currency(0.5), "S/ 0.50");
    }

    #[test]
    fn receipt_number_is_uppercased_prefix() {
        assert_eq!(
            receipt_number("9f1c2ab7-0d4e-4b8f-9a61-3c2d1e0f5a6b"),
            "9F1C2AB7"
        );
        assert_eq!(receipt_number("abc"), "ABC");
    }

    #[test]
    fn sale_date_is_rendered_in_offset() {
        let lima = FixedOffset::west_opt(5 * 3600).unwrap();
        let at = Utc.with_ymd_and_hms(2024, 2, 1, 3, 15, 0).unwrap();
        assert_eq!(format_sale_date(at, lima), "31/01/2024 22:15");
    }

    #[test]
    fn receipt_resolves_names_with_fallbacks() {
        let mut client = Client::new("Cliente Ejemplo", "12345678");
        client.id = "c1".to_string();
        let directory = NameDirectory::new(&[client], &[], &[]);

        let mut sale = Sale::new(
            Utc.with_ymd_and_hms(2024, 2, 10, 9, 30, 0).unwrap(),
            "c1",
            "missing-seller",
            "missing-concept",
            99.9,
        );
        sale.id = "deadbeef-1234".to_string();

        let receipt = ReceiptData::from_sale(&sale, &directory, Utc.fix());
        assert_eq!(receipt.receipt_number, "DEADBEEF");
        assert_eq!(receipt.client, "Cliente Ejemplo");
        assert_eq!(receipt.client_document.as_deref(), Some("12345678"));
        assert_eq!(receipt.seller, SELLER_NOT_FOUND);
        assert_eq!(receipt.observation, "");
        assert_eq!(receipt.amount, "S/ 99.90");
        assert_eq!(receipt.date, "10/02/2024 09:30");
    }
}
