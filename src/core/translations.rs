use std::collections::BTreeMap;

use super::error::InvoiceError;
use super::types::TranslationTable;

/// Label keys the invoice layout reads from the translation table.
pub mod keys {
    pub const SHOW_COUNTRY: &str = "SHOW_COUNTRY";
    pub const COUNTRY: &str = "COUNTRY";
    pub const TAX_NUMBER: &str = "TAX_NUMBER";
    pub const VAT_ID: &str = "VAT_ID";
    pub const INVOICE: &str = "INVOICE";
    pub const PERFORMANCE_PERIOD: &str = "PERFORMANCE_PERIOD";
    pub const DESCRIPTION: &str = "DESCRIPTION";
    pub const PRICE: &str = "PRICE";
    pub const SUBTOTAL: &str = "SUBTOTAL";
    pub const VAT: &str = "VAT";
    pub const TOTAL: &str = "TOTAL";
    pub const PLEASE_PAY: &str = "PLEASE_PAY";
    pub const BANK: &str = "BANK";
    pub const IBAN: &str = "IBAN";
    pub const BIC: &str = "BIC";
    pub const PAYMENT_REASON: &str = "PAYMENT_REASON";
    pub const THANK_YOU_NOTE: &str = "THANK_YOU_NOTE";
    pub const KIND_REGARDS: &str = "KIND_REGARDS";

    /// Every key a rendered invoice needs.
    pub const ALL: &[&str] = &[
        SHOW_COUNTRY,
        COUNTRY,
        TAX_NUMBER,
        VAT_ID,
        INVOICE,
        PERFORMANCE_PERIOD,
        DESCRIPTION,
        PRICE,
        SUBTOTAL,
        VAT,
        TOTAL,
        PLEASE_PAY,
        BANK,
        IBAN,
        BIC,
        PAYMENT_REASON,
        THANK_YOU_NOTE,
        KIND_REGARDS,
    ];
}

/// Strict view of the translation table for one language.
///
/// There is no fallback language: a missing key is an error.
#[derive(Debug, Clone, Copy)]
pub struct Labels<'a> {
    language: &'a str,
    entries: &'a BTreeMap<String, String>,
}

impl TranslationTable {
    /// Labels for `language`, or [`InvoiceError::MissingLanguage`].
    pub fn labels<'a>(&'a self, language: &'a str) -> Result<Labels<'a>, InvoiceError> {
        let entries = self
            .languages
            .get(language)
            .ok_or_else(|| InvoiceError::MissingLanguage(language.to_string()))?;
        Ok(Labels { language, entries })
    }

    /// Keys from [`keys::ALL`] that `language` lacks, in layout order.
    pub fn missing_keys(&self, language: &str) -> Vec<&'static str> {
        match self.languages.get(language) {
            Some(entries) => keys::ALL
                .iter()
                .copied()
                .filter(|key| !entries.contains_key(*key))
                .collect(),
            None => keys::ALL.to_vec(),
        }
    }
}

impl<'a> Labels<'a> {
    pub fn language(&self) -> &'a str {
        self.language
    }

    /// Label text for `key`.
    pub fn get(&self, key: &str) -> Result<&'a str, InvoiceError> {
        self.entries
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| InvoiceError::MissingTranslation {
                language: self.language.to_string(),
                key: key.to_string(),
            })
    }

    /// Label interpreted as a flag; only "true" (any case) is true.
    pub fn flag(&self, key: &str) -> Result<bool, InvoiceError> {
        Ok(self.get(key)?.trim().eq_ignore_ascii_case("true"))
    }

    /// Label with `{name}` placeholders replaced by the given values.
    /// Unknown placeholders are left as written.
    pub fn format(&self, key: &str, values: &[(&str, &str)]) -> Result<String, InvoiceError> {
        Ok(substitute(self.get(key)?, values))
    }
}

/// Replace each `{name}` in `template` with its value.
pub fn substitute(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
}
