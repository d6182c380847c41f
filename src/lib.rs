//! # invoicegen
//!
//! Multi-language PDF invoices from three YAML documents: the issuer
//! profile, the client profile with its line items, and a translation table.
//!
//! All monetary values use [`rust_decimal::Decimal`]; amounts are only
//! rounded to cents when they are formatted for a language.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use invoicegen::core::*;
//! use rust_decimal_macros::dec;
//!
//! let items = vec![
//!     LineItem::new("100.00").with_description("EN", "Consulting"),
//!     LineItem::new("50.00").with_description("EN", "Review"),
//! ];
//! let totals = InvoiceTotals::calculate(&items, dec!(16)).unwrap();
//! assert_eq!(totals.total, dec!(174.00));
//!
//! let de = Locale::for_language("DE");
//! assert_eq!(de.format_amount(totals.total), "174,00");
//!
//! let period = BillingPeriod::new(2024, 2).unwrap();
//! assert_eq!(period.describe(&de), "1 - 29 Februar 2024");
//!
//! let number = InvoiceNumber::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), "7");
//! assert_eq!(number.as_str(), "20240301-7");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` | Domain types, totals, locales, periods, numbering, translations |
//! | `config` | Config directory bootstrap and YAML loading |
//! | `pdf` | PDF rendering and multi-language generation |
//! | `cli` (default) | The `invoicegen` binary |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "config")]
pub mod config;

#[cfg(feature = "pdf")]
pub mod pdf;

#[cfg(feature = "pdf")]
pub mod generate;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
