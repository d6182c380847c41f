//! Property-based tests for the invoice calculator and formatting.

use invoicegen::core::*;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ── Proptest Strategies ─────────────────────────────────────────────────────

/// Generate a reasonable price in cents (0.00 to 999999.99).
fn arb_cents() -> impl Strategy<Value = i64> {
    0i64..100_000_000i64
}

/// Write cents the way prices appear in the source documents, with or
/// without thousands grouping.
fn source_price(cents: i64, grouped: bool) -> String {
    let value = Decimal::new(cents, 2);
    if grouped {
        Locale::neutral().format_amount(value)
    } else {
        value.to_string()
    }
}

/// Generate 0-8 items with their exact values.
fn arb_items() -> impl Strategy<Value = (Vec<LineItem>, Decimal)> {
    prop::collection::vec((arb_cents(), any::<bool>()), 0..=8).prop_map(|prices| {
        let sum: Decimal = prices
            .iter()
            .map(|(cents, _)| Decimal::new(*cents, 2))
            .sum();
        let items: Vec<LineItem> = prices
            .into_iter()
            .map(|(cents, grouped)| LineItem::new(source_price(cents, grouped)))
            .collect();
        (items, sum)
    })
}

/// VAT percentages from 0 to 100 with up to one decimal place.
fn arb_percentage() -> impl Strategy<Value = Decimal> {
    (0i64..=1000i64).prop_map(|tenths| Decimal::new(tenths, 1))
}

// ── Property Tests ──────────────────────────────────────────────────────────

proptest! {
    /// Subtotal is the exact sum of the parsed prices.
    #[test]
    fn subtotal_is_exact_sum((items, sum) in arb_items(), pct in arb_percentage()) {
        let totals = InvoiceTotals::calculate(&items, pct).unwrap();
        prop_assert_eq!(totals.subtotal, sum);
    }

    /// VAT = subtotal * pct / 100 and total = subtotal + VAT.
    #[test]
    fn vat_and_total_relations((items, _) in arb_items(), pct in arb_percentage()) {
        let totals = InvoiceTotals::calculate(&items, pct).unwrap();
        prop_assert_eq!(totals.vat_amount, totals.subtotal * pct / dec!(100));
        prop_assert_eq!(totals.total, totals.subtotal + totals.vat_amount);
        prop_assert!(totals.total >= totals.subtotal);
    }

    /// Neutral formatting parses back to the cent-rounded value.
    #[test]
    fn neutral_format_parses_back(cents in arb_cents()) {
        let value = Decimal::new(cents, 2);
        let formatted = Locale::neutral().format_amount(value);
        prop_assert_eq!(parse_price(&formatted).unwrap(), value);
    }

    /// German output differs from English only in its separators.
    #[test]
    fn locales_share_digits(cents in arb_cents()) {
        let value = Decimal::new(cents, 2);
        let digits = |s: String| s.chars().filter(char::is_ascii_digit).collect::<String>();
        prop_assert_eq!(
            digits(Locale::for_language("EN").format_amount(value)),
            digits(Locale::for_language("DE").format_amount(value))
        );
    }

    /// Every month of every year has a last day between 28 and 31.
    #[test]
    fn period_length_in_range(year in 1900i32..2200, month in 1u32..=12) {
        let days = BillingPeriod::new(year, month).unwrap().days();
        prop_assert!((28..=31).contains(&days));
    }
}
