use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal_macros::dec;

use invoicegen::config::{TEMPLATES, from_yaml_str};
use invoicegen::core::*;
use invoicegen::{generate, pdf};

fn issue_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn template_data() -> InvoiceData {
    let [(_, issuer), (_, client), (_, translations)] = TEMPLATES;
    InvoiceData {
        issuer: from_yaml_str(issuer).unwrap(),
        client: from_yaml_str(client).unwrap(),
        translations: from_yaml_str(translations).unwrap(),
    }
}

fn with_items(n: usize) -> InvoiceData {
    let mut data = template_data();
    data.client.items = (1..=n)
        .map(|i| {
            LineItem::new(format!("{i},{:03}.50", i % 1000))
                .with_description("EN", format!("Consulting block {i}"))
                .with_description("DE", format!("Beratungsblock {i}"))
        })
        .collect();
    data
}

fn bench_totals(c: &mut Criterion) {
    let items = with_items(100).client.items;
    c.bench_function("totals_100_items", |b| {
        b.iter(|| InvoiceTotals::calculate(black_box(&items), dec!(19)).unwrap())
    });
}

fn bench_format(c: &mut Criterion) {
    let de = Locale::for_language("DE");
    c.bench_function("format_amount_de", |b| {
        b.iter(|| de.format_amount(black_box(dec!(1234567.891))))
    });
}

fn bench_render(c: &mut Criterion) {
    let data = with_items(10);
    let invoice = Invoice::new(&data, issue_date()).unwrap();
    c.bench_function("render_pdf_en_10_items", |b| {
        b.iter(|| pdf::render(black_box(&invoice), "EN").unwrap())
    });
}

fn bench_render_all(c: &mut Criterion) {
    let data = with_items(10);
    let invoice = Invoice::new(&data, issue_date()).unwrap();
    let languages = generate::parse_languages("EN,DE").unwrap();
    c.bench_function("render_all_en_de", |b| {
        b.iter(|| generate::render_all(black_box(&invoice), &languages).unwrap())
    });
}

criterion_group!(
    benches,
    bench_totals,
    bench_format,
    bench_render,
    bench_render_all
);
criterion_main!(benches);
