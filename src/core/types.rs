use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The invoice sender: own business, tax and bank details (`me.yml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuerProfile {
    /// Full name printed in the header, sender block and signature.
    pub name: String,
    /// Tax number (Steuernummer).
    pub tax_number: String,
    /// VAT identifier (e.g. "DE123456789").
    pub vat_id: String,
    /// Bank name shown in the payment block.
    pub bank: String,
    pub iban: String,
    pub bic: String,
    /// Postal address.
    pub address: Address,
}

/// Postal address as printed on the invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Street + house number.
    pub street: String,
    /// Postal code.
    pub zip: String,
    /// City.
    pub place: String,
}

impl Address {
    /// "zip place" line.
    pub fn city_line(&self) -> String {
        format!("{} {}", self.zip, self.place)
    }
}

/// One invoice run for one client (`client.yml`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientProfile {
    /// Billing period year.
    pub year: i32,
    /// Billing period month (1-12).
    pub month: u32,
    /// Sequence id appended to the date prefix of the invoice number.
    pub invoice_id: String,
    /// VAT percentage applied to the subtotal (e.g. 16 or 19).
    pub vat_percentage: rust_decimal::Decimal,
    /// Payment term in days.
    #[serde(default = "default_days_to_pay")]
    pub days_to_pay: u32,
    /// Invoice lines, in print order.
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// Billing details of the client company.
    pub company: CompanyDetails,
}

fn default_days_to_pay() -> u32 {
    14
}

/// Billing details of the invoiced company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyDetails {
    pub name: String,
    pub address: Address,
    /// VAT identifier of the client, printed when present.
    #[serde(default)]
    pub vat_id: Option<String>,
}

/// A single invoice line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Description per language code (e.g. "EN" -> "Consulting").
    pub description: BTreeMap<String, String>,
    /// Net price in EUR as a neutral-format decimal string ("1,234.50").
    pub price: String,
}

impl LineItem {
    pub fn new(price: impl Into<String>) -> Self {
        Self {
            description: BTreeMap::new(),
            price: price.into(),
        }
    }

    /// Add a description for one language.
    pub fn with_description(
        mut self,
        language: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.description.insert(language.into(), text.into());
        self
    }
}

/// Per-language label dictionary (`translations.yml`).
///
/// Maps language code to label key to localized string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationTable {
    pub languages: BTreeMap<String, BTreeMap<String, String>>,
}

/// Everything one run reads from disk. Shared read-only by all rendering tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceData {
    pub issuer: IssuerProfile,
    pub client: ClientProfile,
    pub translations: TranslationTable,
}
