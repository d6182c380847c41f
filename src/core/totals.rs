use std::str::FromStr;

use rust_decimal::Decimal;

use super::error::InvoiceError;
use super::types::LineItem;

/// Computed invoice amounts. Values are exact; rounding to cents happens
/// only when they are formatted for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceTotals {
    /// Sum of all line prices.
    pub subtotal: Decimal,
    /// VAT percentage the amounts were computed with.
    pub vat_percentage: Decimal,
    /// subtotal * vat_percentage / 100.
    pub vat_amount: Decimal,
    /// subtotal + vat_amount.
    pub total: Decimal,
}

impl InvoiceTotals {
    /// Sum the item prices and apply VAT.
    ///
    /// ```
    /// use invoicegen::core::*;
    /// use rust_decimal_macros::dec;
    ///
    /// let items = vec![LineItem::new("100.00"), LineItem::new("50.00")];
    /// let totals = InvoiceTotals::calculate(&items, dec!(16)).unwrap();
    /// assert_eq!(totals.subtotal, dec!(150.00));
    /// assert_eq!(totals.vat_amount, dec!(24.00));
    /// assert_eq!(totals.total, dec!(174.00));
    /// ```
    pub fn calculate(items: &[LineItem], vat_percentage: Decimal) -> Result<Self, InvoiceError> {
        let subtotal = items.iter().try_fold(Decimal::ZERO, |sum, item| {
            let price = parse_price(&item.price)?;
            sum.checked_add(price)
                .ok_or_else(|| overflow("sum of item prices"))
        })?;
        Self::from_subtotal(subtotal, vat_percentage)
    }

    /// Apply VAT to an already known subtotal.
    pub fn from_subtotal(subtotal: Decimal, vat_percentage: Decimal) -> Result<Self, InvoiceError> {
        let vat_amount = subtotal
            .checked_mul(vat_percentage)
            .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
            .ok_or_else(|| overflow("VAT amount"))?;
        let total = subtotal
            .checked_add(vat_amount)
            .ok_or_else(|| overflow("total"))?;
        Ok(Self {
            subtotal,
            vat_percentage,
            vat_amount,
            total,
        })
    }
}

fn overflow(what: &str) -> InvoiceError {
    InvoiceError::Arithmetic(format!("{what} exceeds the supported range"))
}

/// Parse a price written in the neutral source format: `-`? digits with
/// optional `,` grouping in threes, then an optional `.` fraction.
///
/// The format is fixed regardless of the output language so that "1,000"
/// always means one thousand.
pub fn parse_price(value: &str) -> Result<Decimal, InvoiceError> {
    let invalid = |reason: &str| InvoiceError::InvalidPrice {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = value.trim();
    let unsigned = trimmed.strip_prefix('-').unwrap_or(trimmed);
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    if integer.is_empty() {
        return Err(invalid("missing integer part"));
    }
    if fraction.is_some_and(|f| f.is_empty() || !f.chars().all(|c| c.is_ascii_digit())) {
        return Err(invalid("fraction must be digits"));
    }

    let groups: Vec<&str> = integer.split(',').collect();
    let (first, rest) = groups.split_first().ok_or_else(|| invalid("empty"))?;
    let valid_first = !first.is_empty()
        && first.chars().all(|c| c.is_ascii_digit())
        && (rest.is_empty() || first.len() <= 3);
    let valid_rest = rest
        .iter()
        .all(|g| g.len() == 3 && g.chars().all(|c| c.is_ascii_digit()));
    if !valid_first || !valid_rest {
        return Err(invalid("expected digits with optional ',' thousands grouping"));
    }

    let mut normalized = String::with_capacity(trimmed.len());
    if trimmed.starts_with('-') {
        normalized.push('-');
    }
    normalized.extend(groups);
    if let Some(fraction) = fraction {
        normalized.push('.');
        normalized.push_str(fraction);
    }

    Decimal::from_str(&normalized).map_err(|e| invalid(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_plain_and_grouped() {
        assert_eq!(parse_price("100.00").unwrap(), dec!(100.00));
        assert_eq!(parse_price("1,234.5").unwrap(), dec!(1234.5));
        assert_eq!(parse_price("1,234,567").unwrap(), dec!(1234567));
        assert_eq!(parse_price(" 42 ").unwrap(), dec!(42));
        assert_eq!(parse_price("-12.30").unwrap(), dec!(-12.30));
    }

    #[test]
    fn rejects_locale_formatted_and_garbage() {
        for bad in ["", "abc", "1.234,50", "12,34", "1,2345", "10.", ".50", "1 000", "€10"] {
            assert!(parse_price(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn empty_items_are_zero() {
        let totals = InvoiceTotals::calculate(&[], dec!(19)).unwrap();
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.vat_amount, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn vat_is_not_rounded() {
        let totals = InvoiceTotals::calculate(&[LineItem::new("10.01")], dec!(19)).unwrap();
        assert_eq!(totals.vat_amount, dec!(1.9019));
        assert_eq!(totals.total, dec!(11.9119));
    }

    #[test]
    fn overflow_is_an_error() {
        let items = [LineItem::new("79228162514264337593543950335"), LineItem::new("1")];
        assert!(matches!(
            InvoiceTotals::calculate(&items, dec!(19)),
            Err(InvoiceError::Arithmetic(_))
        ));
    }

    #[test]
    fn bad_price_fails_whole_calculation() {
        let items = [LineItem::new("10.00"), LineItem::new("ten")];
        let err = InvoiceTotals::calculate(&items, dec!(19)).unwrap_err();
        assert!(matches!(err, InvoiceError::InvalidPrice { ref value, .. } if value == "ten"));
    }
}
