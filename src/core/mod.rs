//! Core invoice types and computation.
//!
//! Domain records loaded from the YAML documents, the totals calculator,
//! locale-aware formatting, billing periods, invoice numbering and strict
//! translation lookup.

mod error;
mod invoice;
pub mod locale;
mod numbering;
mod period;
mod totals;
pub mod translations;
mod types;

pub use error::*;
pub use invoice::Invoice;
pub use locale::Locale;
pub use numbering::*;
pub use period::*;
pub use totals::*;
pub use translations::{Labels, keys};
pub use types::*;

/// The only currency invoices are issued in.
pub const CURRENCY: &str = "EUR";
