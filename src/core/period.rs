use chrono::{Datelike, NaiveDate};

use super::error::InvoiceError;
use super::locale::Locale;

/// The calendar month an invoice covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingPeriod {
    first: NaiveDate,
    last: NaiveDate,
}

impl BillingPeriod {
    /// Period for month 1-12 of `year`.
    pub fn new(year: i32, month: u32) -> Result<Self, InvoiceError> {
        let invalid = || InvoiceError::InvalidPeriod { year, month };
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let last = next_month.and_then(|d| d.pred_opt()).ok_or_else(invalid)?;
        Ok(Self { first, last })
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last
    }

    /// Number of days in the month (28-31).
    pub fn days(&self) -> u32 {
        self.last.day()
    }

    /// "1 - 29 February 2024", with the month name in the locale's language.
    pub fn describe(&self, locale: &Locale) -> String {
        let month = locale.month_name(self.first.month()).unwrap_or_default();
        format!("1 - {} {} {}", self.days(), month, self.first.year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn february_leap_years() {
        assert_eq!(BillingPeriod::new(2024, 2).unwrap().days(), 29);
        assert_eq!(BillingPeriod::new(2023, 2).unwrap().days(), 28);
        assert_eq!(BillingPeriod::new(1900, 2).unwrap().days(), 28);
        assert_eq!(BillingPeriod::new(2000, 2).unwrap().days(), 29);
    }

    #[test]
    fn december_rolls_into_next_year() {
        let period = BillingPeriod::new(2023, 12).unwrap();
        assert_eq!(period.last_day(), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert_eq!(period.first_day(), NaiveDate::from_ymd_opt(2023, 12, 1).unwrap());
    }

    #[test]
    fn invalid_month() {
        assert!(matches!(
            BillingPeriod::new(2024, 13),
            Err(InvoiceError::InvalidPeriod { year: 2024, month: 13 })
        ));
        assert!(BillingPeriod::new(2024, 0).is_err());
    }

    #[test]
    fn localized_description() {
        let period = BillingPeriod::new(2024, 2).unwrap();
        assert_eq!(period.describe(&Locale::for_language("EN")), "1 - 29 February 2024");
        assert_eq!(period.describe(&Locale::for_language("DE")), "1 - 29 Februar 2024");
    }
}
