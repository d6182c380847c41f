use thiserror::Error;

/// Errors that can occur while computing or rendering an invoice.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InvoiceError {
    /// A line item price is not a neutral-format decimal string.
    #[error("invalid price '{value}': {reason}")]
    InvalidPrice { value: String, reason: String },

    /// Billing period month is outside 1..=12 or the year is out of range.
    #[error("invalid billing period {year}-{month:02}")]
    InvalidPeriod { year: i32, month: u32 },

    /// Invoice totals exceed the decimal range.
    #[error("arithmetic error: {0}")]
    Arithmetic(String),

    /// The translation table has no entry for the requested language.
    #[error("no translations for language '{0}'")]
    MissingLanguage(String),

    /// A label key is missing for the requested language.
    #[error("translation key '{key}' missing for language '{language}'")]
    MissingTranslation { language: String, key: String },

    /// A line item has no description in the requested language.
    #[error("line item {item} has no description for language '{language}'")]
    MissingDescription { language: String, item: usize },

    /// PDF assembly or serialization error.
    #[error("PDF error: {0}")]
    Pdf(String),
}
