use chrono::NaiveDate;

use super::error::InvoiceError;
use super::numbering::{InvoiceNumber, due_date};
use super::period::BillingPeriod;
use super::totals::InvoiceTotals;
use super::types::InvoiceData;

/// One invoice run: the loaded documents plus everything derived from them
/// that does not depend on the output language.
#[derive(Debug, Clone)]
pub struct Invoice<'a> {
    pub data: &'a InvoiceData,
    pub number: InvoiceNumber,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub period: BillingPeriod,
    pub totals: InvoiceTotals,
}

impl<'a> Invoice<'a> {
    /// Derive number, due date, billing period and totals for `issue_date`.
    pub fn new(data: &'a InvoiceData, issue_date: NaiveDate) -> Result<Self, InvoiceError> {
        let client = &data.client;
        Ok(Self {
            data,
            number: InvoiceNumber::new(issue_date, &client.invoice_id),
            issue_date,
            due_date: due_date(issue_date, client.days_to_pay),
            period: BillingPeriod::new(client.year, client.month)?,
            totals: InvoiceTotals::calculate(&client.items, client.vat_percentage)?,
        })
    }
}
