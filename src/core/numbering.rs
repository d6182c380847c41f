use std::fmt;

use chrono::{Days, NaiveDate};

/// Invoice number derived from the issue date and the client's sequence id,
/// in the format `{YYYYMMDD}-{invoice_id}`, e.g. "20241001-7".
///
/// Computed once per run and shared by every language rendered in that run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
    pub fn new(issue_date: NaiveDate, invoice_id: &str) -> Self {
        Self(format!("{}-{}", issue_date.format("%Y%m%d"), invoice_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Date payment is due: `days_to_pay` days after the issue date.
/// Saturates at the issue date if the result is out of range.
pub fn due_date(issue_date: NaiveDate, days_to_pay: u32) -> NaiveDate {
    issue_date
        .checked_add_days(Days::new(u64::from(days_to_pay)))
        .unwrap_or(issue_date)
}
