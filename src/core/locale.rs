//! Language-specific number and date formatting.
//!
//! Covers the languages invoices are usually sent in. Unknown language codes
//! format like English; label lookup is unaffected by this fallback.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

/// Formatting rules for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    /// Upper-case language code this locale was resolved for.
    pub code: &'static str,
    pub decimal_separator: char,
    pub grouping_separator: char,
    months: [&'static str; 12],
    date_style: DateStyle,
}

/// Order and connectors of a long date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateStyle {
    /// "October 19, 2026"
    MonthDayYear,
    /// "19. Oktober 2026"
    DayDotMonthYear,
    /// "19 octobre 2026"
    DayMonthYear,
    /// "19 de octubre de 2026"
    DayDeMonthDeYear,
}

const ENGLISH: Locale = Locale {
    code: "EN",
    decimal_separator: '.',
    grouping_separator: ',',
    months: [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ],
    date_style: DateStyle::MonthDayYear,
};

const LOCALES: &[Locale] = &[
    ENGLISH,
    Locale {
        code: "DE",
        decimal_separator: ',',
        grouping_separator: '.',
        months: [
            "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September",
            "Oktober", "November", "Dezember",
        ],
        date_style: DateStyle::DayDotMonthYear,
    },
    Locale {
        code: "FR",
        decimal_separator: ',',
        grouping_separator: '\u{a0}',
        months: [
            "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
            "octobre", "novembre", "décembre",
        ],
        date_style: DateStyle::DayMonthYear,
    },
    Locale {
        code: "ES",
        decimal_separator: ',',
        grouping_separator: '.',
        months: [
            "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto",
            "septiembre", "octubre", "noviembre", "diciembre",
        ],
        date_style: DateStyle::DayDeMonthDeYear,
    },
    Locale {
        code: "IT",
        decimal_separator: ',',
        grouping_separator: '.',
        months: [
            "gennaio", "febbraio", "marzo", "aprile", "maggio", "giugno", "luglio", "agosto",
            "settembre", "ottobre", "novembre", "dicembre",
        ],
        date_style: DateStyle::DayMonthYear,
    },
    Locale {
        code: "NL",
        decimal_separator: ',',
        grouping_separator: '.',
        months: [
            "januari", "februari", "maart", "april", "mei", "juni", "juli", "augustus",
            "september", "oktober", "november", "december",
        ],
        date_style: DateStyle::DayMonthYear,
    },
    Locale {
        code: "PT",
        decimal_separator: ',',
        grouping_separator: '.',
        months: [
            "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto",
            "setembro", "outubro", "novembro", "dezembro",
        ],
        date_style: DateStyle::DayDeMonthDeYear,
    },
];

impl Locale {
    /// Resolve a language code (case-insensitive, "de-AT" resolves to DE).
    /// Returns `None` for languages without formatting rules.
    pub fn lookup(language: &str) -> Option<Self> {
        let primary = language.split(['-', '_']).next().unwrap_or(language);
        LOCALES
            .iter()
            .find(|locale| locale.code.eq_ignore_ascii_case(primary))
            .copied()
    }

    /// Resolve a language code, falling back to English formatting.
    pub fn for_language(language: &str) -> Self {
        Self::lookup(language).unwrap_or_else(|| {
            log::warn!("No number/date format for language '{language}', using English");
            ENGLISH
        })
    }

    /// The neutral locale source prices are written in.
    pub fn neutral() -> Self {
        ENGLISH
    }

    /// Format an amount with two fractional digits and this locale's
    /// separators, e.g. `1234.5` -> "1.234,50" for DE.
    pub fn format_amount(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp(2);
        let plain = format!("{:.2}", rounded.abs());
        let (integer, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

        let mut out = String::with_capacity(plain.len() + plain.len() / 3 + 1);
        if rounded.is_sign_negative() && !rounded.is_zero() {
            out.push('-');
        }
        for (i, digit) in integer.chars().enumerate() {
            if i > 0 && (integer.len() - i) % 3 == 0 {
                out.push(self.grouping_separator);
            }
            out.push(digit);
        }
        out.push(self.decimal_separator);
        out.push_str(fraction);
        out
    }

    /// Full month name for month 1-12.
    pub fn month_name(&self, month: u32) -> Option<&'static str> {
        let index = usize::try_from(month).ok()?.checked_sub(1)?;
        self.months.get(index).copied()
    }

    /// Long date as written in running text, e.g. "19. Oktober 2026".
    pub fn long_date(&self, date: NaiveDate) -> String {
        let day = date.day();
        let year = date.year();
        let month = self.month_name(date.month()).unwrap_or_default();
        match self.date_style {
            DateStyle::MonthDayYear => format!("{month} {day}, {year}"),
            DateStyle::DayDotMonthYear => format!("{day}. {month} {year}"),
            DateStyle::DayMonthYear => format!("{day} {month} {year}"),
            DateStyle::DayDeMonthDeYear => format!("{day} de {month} de {year}"),
        }
    }
}
