//! Invoice page layout.
//!
//! All positions are in PDF points on a US Letter page with the origin at the
//! bottom left. The item table and the payment block continue on new pages
//! when they would cross the bottom margin; continuation pages repeat the
//! table header.

use super::canvas::{Canvas, Color};
use super::font::{Font, FontSet, wrap};
use crate::core::{CURRENCY, Invoice, InvoiceError, Labels, Locale, keys};

pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;

const PAGE_TOP: f32 = 730.0;
const MARGIN_LEFT: f32 = 50.0;
const CONTENT_RIGHT: f32 = 560.0;
const SENDER_LEFT: f32 = 350.0;
/// Nothing is drawn below this line.
pub const BOTTOM_MARGIN: f32 = 36.0;

const BODY_SIZE: f32 = 11.0;
const BLOCK_LEADING: f32 = 16.0;

const TABLE_TOP: f32 = PAGE_TOP - 310.0;
const TABLE_WIDTH: f32 = CONTENT_RIGHT - MARGIN_LEFT;
const DESCRIPTION_WIDTH: f32 = TABLE_WIDTH * 0.8;
const CELL_PADDING: f32 = 5.0;
const TABLE_SIZE: f32 = 10.0;
const TOTAL_SIZE: f32 = 13.0;
const PAYMENT_TOP: f32 = PAGE_TOP - 480.0;
const PAYMENT_GAP: f32 = 30.0;

/// Pages laid out so far; drawing always goes to the last one.
struct Flow<'f> {
    fonts: &'f FontSet,
    done: Vec<Canvas<'f>>,
    current: Canvas<'f>,
}

impl<'f> Flow<'f> {
    fn new(fonts: &'f FontSet) -> Self {
        Self {
            fonts,
            done: Vec::new(),
            current: blank_page(fonts),
        }
    }

    fn page(&mut self) -> &mut Canvas<'f> {
        &mut self.current
    }

    fn break_page(&mut self) {
        let next = blank_page(self.fonts);
        self.done.push(std::mem::replace(&mut self.current, next));
    }

    fn into_pages(mut self) -> Vec<Canvas<'f>> {
        self.done.push(self.current);
        self.done
    }
}

fn blank_page(fonts: &FontSet) -> Canvas<'_> {
    let mut canvas = Canvas::new(fonts);
    canvas.line_width(0.5);
    canvas.stroke_color(Color::BLACK);
    canvas
}

/// Lay out the full invoice for one language, one canvas per page.
pub fn layout<'f>(
    invoice: &Invoice<'_>,
    labels: &Labels<'_>,
    locale: &Locale,
    fonts: &'f FontSet,
) -> Result<Vec<Canvas<'f>>, InvoiceError> {
    let mut flow = Flow::new(fonts);

    header(flow.page(), invoice);
    recipient_block(flow.page(), invoice, labels)?;
    sender_block(flow.page(), invoice, labels)?;
    title(flow.page(), invoice, labels, locale)?;
    let table_bottom = item_table(&mut flow, invoice, labels, locale)?;
    payment_block(&mut flow, invoice, labels, locale, table_bottom)?;
    Ok(flow.into_pages())
}

fn header(canvas: &mut Canvas<'_>, invoice: &Invoice<'_>) {
    let issuer = &invoice.data.issuer;
    let name = format!("{} • ", issuer.name);
    let street = format!("{} • ", issuer.address.street);
    let city = issuer.address.city_line();
    canvas.spans(
        MARGIN_LEFT,
        PAGE_TOP,
        BODY_SIZE,
        &[
            (Font::Bold, name.as_str()),
            (Font::Regular, street.as_str()),
            (Font::Regular, city.as_str()),
        ],
    );
}

fn recipient_block(
    canvas: &mut Canvas<'_>,
    invoice: &Invoice<'_>,
    labels: &Labels<'_>,
) -> Result<(), InvoiceError> {
    let company = &invoice.data.client.company;
    let city = company.address.city_line();
    let mut lines = vec![
        vec![(Font::Bold, company.name.as_str())],
        vec![(Font::Regular, company.address.street.as_str())],
        vec![(Font::Regular, city.as_str())],
    ];
    let vat_label = format!("{} ", labels.get(keys::VAT_ID)?);
    if let Some(vat_id) = &company.vat_id {
        lines.push(vec![]);
        lines.push(vec![
            (Font::Bold, vat_label.as_str()),
            (Font::Regular, vat_id.as_str()),
        ]);
    }
    canvas.lines(MARGIN_LEFT, PAGE_TOP - 50.0, BODY_SIZE, BLOCK_LEADING, &lines);
    Ok(())
}

fn sender_block(
    canvas: &mut Canvas<'_>,
    invoice: &Invoice<'_>,
    labels: &Labels<'_>,
) -> Result<(), InvoiceError> {
    let issuer = &invoice.data.issuer;
    let city = issuer.address.city_line();
    let tax_label = format!("{} ", labels.get(keys::TAX_NUMBER)?);
    let vat_label = format!("{} ", labels.get(keys::VAT_ID)?);
    let country = labels.get(keys::COUNTRY)?;

    let mut lines = vec![
        vec![(Font::Regular, issuer.name.as_str())],
        vec![(Font::Regular, issuer.address.street.as_str())],
        vec![(Font::Regular, city.as_str())],
    ];
    if labels.flag(keys::SHOW_COUNTRY)? {
        lines.push(vec![(Font::Regular, country)]);
    }
    lines.push(vec![]);
    lines.push(vec![
        (Font::Bold, tax_label.as_str()),
        (Font::Regular, issuer.tax_number.as_str()),
    ]);
    lines.push(vec![
        (Font::Bold, vat_label.as_str()),
        (Font::Regular, issuer.vat_id.as_str()),
    ]);
    canvas.lines(SENDER_LEFT, PAGE_TOP - 50.0, BODY_SIZE, BLOCK_LEADING, &lines);
    Ok(())
}

fn title(
    canvas: &mut Canvas<'_>,
    invoice: &Invoice<'_>,
    labels: &Labels<'_>,
    locale: &Locale,
) -> Result<(), InvoiceError> {
    let place_and_date = format!(
        "{}, {}",
        invoice.data.issuer.address.place,
        locale.long_date(invoice.issue_date)
    );
    canvas.text_right(
        CONTENT_RIGHT,
        PAGE_TOP - 270.0,
        Font::Regular,
        BODY_SIZE,
        &place_and_date,
    );

    let heading = format!("{} #{}", labels.get(keys::INVOICE)?, invoice.number);
    canvas.text(MARGIN_LEFT, PAGE_TOP - 270.0, Font::Bold, 18.0, &heading);

    let period_label = format!("{} ", labels.get(keys::PERFORMANCE_PERIOD)?);
    let period = invoice.period.describe(locale);
    canvas.spans(
        MARGIN_LEFT,
        PAGE_TOP - 295.0,
        BODY_SIZE,
        &[
            (Font::Bold, period_label.as_str()),
            (Font::Regular, period.as_str()),
        ],
    );
    Ok(())
}

/// A table row: description cell text (already wrapped) and amount cell text.
struct Row {
    description: Vec<String>,
    amount: String,
    font: Font,
    size: f32,
    align_right: bool,
    fill: Option<Color>,
    borders: bool,
    min_height: f32,
}

impl Row {
    fn new(description: Vec<String>, amount: String) -> Self {
        Self {
            description,
            amount,
            font: Font::Regular,
            size: TABLE_SIZE,
            align_right: false,
            fill: None,
            borders: true,
            min_height: 18.0,
        }
    }

    fn height(&self) -> f32 {
        let leading = self.size + 2.0;
        let text = leading * self.description.len().max(1) as f32 + 2.0 * CELL_PADDING;
        text.max(self.min_height)
    }
}

/// Draw the item table and return the y coordinate of its bottom edge on
/// the last page it occupies.
fn item_table(
    flow: &mut Flow<'_>,
    invoice: &Invoice<'_>,
    labels: &Labels<'_>,
    locale: &Locale,
) -> Result<f32, InvoiceError> {
    let text_width = DESCRIPTION_WIDTH - 2.0 * CELL_PADDING;
    let fonts = flow.fonts;
    let regular = fonts.get(Font::Regular);

    let mut header = Row::new(
        vec![labels.get(keys::DESCRIPTION)?.to_string()],
        labels.get(keys::PRICE)?.to_string(),
    );
    header.font = Font::Bold;
    header.min_height = 20.0;

    let mut rows = Vec::new();
    for (index, item) in invoice.data.client.items.iter().enumerate() {
        let description = item.description.get(labels.language()).ok_or_else(|| {
            InvoiceError::MissingDescription {
                language: labels.language().to_string(),
                item: index + 1,
            }
        })?;
        let price = crate::core::parse_price(&item.price)?;
        rows.push(Row::new(
            wrap(description, regular, TABLE_SIZE, text_width),
            locale.format_amount(price),
        ));
    }

    let mut spacer = Row::new(Vec::new(), String::new());
    spacer.borders = false;
    spacer.min_height = 20.0;
    rows.push(spacer);

    let totals = &invoice.totals;
    let mut subtotal = Row::new(
        vec![labels.get(keys::SUBTOTAL)?.to_string()],
        locale.format_amount(totals.subtotal),
    );
    subtotal.align_right = true;
    rows.push(subtotal);

    let vat_text = format!(
        "{} {}%",
        labels.get(keys::VAT)?,
        totals.vat_percentage.normalize()
    );
    let mut vat = Row::new(vec![vat_text], locale.format_amount(totals.vat_amount));
    vat.align_right = true;
    rows.push(vat);

    let mut total = Row::new(
        vec![labels.get(keys::TOTAL)?.to_string()],
        locale.format_amount(totals.total),
    );
    total.align_right = true;
    total.font = Font::Bold;
    total.size = TOTAL_SIZE;
    total.fill = Some(Color::rgb8(235, 233, 228));
    total.min_height = 22.0;
    rows.push(total);

    let mut top = draw_row(flow.page(), &header, TABLE_TOP);
    for row in &rows {
        if top - row.height() < BOTTOM_MARGIN {
            flow.break_page();
            top = draw_row(flow.page(), &header, PAGE_TOP);
            if !row.borders {
                continue;
            }
        }
        top = draw_row(flow.page(), row, top);
    }
    Ok(top)
}

fn draw_row(canvas: &mut Canvas<'_>, row: &Row, top: f32) -> f32 {
    let height = row.height();
    let bottom = top - height;
    let amount_left = MARGIN_LEFT + DESCRIPTION_WIDTH;
    let amount_width = TABLE_WIDTH - DESCRIPTION_WIDTH;

    if let Some(fill) = row.fill {
        canvas.fill_rect(MARGIN_LEFT, bottom, TABLE_WIDTH, height, fill);
    }
    if row.borders {
        canvas.stroke_rect(MARGIN_LEFT, bottom, DESCRIPTION_WIDTH, height);
        canvas.stroke_rect(amount_left, bottom, amount_width, height);
    }

    let leading = row.size + 2.0;
    let mut baseline = top - CELL_PADDING - row.size;
    for line in &row.description {
        if row.align_right {
            canvas.text_right(amount_left - CELL_PADDING, baseline, row.font, row.size, line);
        } else {
            canvas.text(MARGIN_LEFT + CELL_PADDING, baseline, row.font, row.size, line);
        }
        baseline -= leading;
    }
    if !row.amount.is_empty() {
        canvas.text_right(
            MARGIN_LEFT + TABLE_WIDTH - CELL_PADDING,
            top - CELL_PADDING - row.size,
            row.font,
            row.size,
            &row.amount,
        );
    }
    bottom
}

fn payment_block(
    flow: &mut Flow<'_>,
    invoice: &Invoice<'_>,
    labels: &Labels<'_>,
    locale: &Locale,
    table_bottom: f32,
) -> Result<(), InvoiceError> {
    let issuer = &invoice.data.issuer;
    let amount = locale.format_amount(invoice.totals.total);
    let days = invoice.data.client.days_to_pay.to_string();
    let due = locale.long_date(invoice.due_date);
    let please_pay = labels.format(
        keys::PLEASE_PAY,
        &[
            ("amount", amount.as_str()),
            ("currency", CURRENCY),
            ("days", days.as_str()),
            ("due_date", due.as_str()),
        ],
    )?;
    let bank = format!("{} ", labels.get(keys::BANK)?);
    let iban = format!("{} ", labels.get(keys::IBAN)?);
    let bic = format!("{} ", labels.get(keys::BIC)?);
    let reason = format!("{} ", labels.get(keys::PAYMENT_REASON)?);
    let number = invoice.number.to_string();
    let thanks = labels.get(keys::THANK_YOU_NOTE)?;
    let regards = labels.get(keys::KIND_REGARDS)?;

    let fonts = flow.fonts;
    let wrapped = wrap(&please_pay, fonts.get(Font::Regular), BODY_SIZE, TABLE_WIDTH);
    let mut lines: Vec<Vec<(Font, &str)>> = wrapped
        .iter()
        .map(|line| vec![(Font::Regular, line.as_str())])
        .collect();
    lines.extend([
        vec![],
        vec![(Font::Regular, issuer.name.as_str())],
        vec![(Font::Bold, bank.as_str()), (Font::Regular, issuer.bank.as_str())],
        vec![(Font::Bold, iban.as_str()), (Font::Regular, issuer.iban.as_str())],
        vec![(Font::Bold, bic.as_str()), (Font::Regular, issuer.bic.as_str())],
        vec![(Font::Bold, reason.as_str()), (Font::Regular, number.as_str())],
        vec![],
        vec![(Font::Regular, thanks)],
        vec![],
        vec![(Font::Regular, regards)],
        vec![(Font::Regular, issuer.name.as_str())],
    ]);

    let mut top = PAYMENT_TOP.min(table_bottom - PAYMENT_GAP);
    let last_baseline = |top: f32| top - BLOCK_LEADING * (lines.len() - 1) as f32;
    if last_baseline(top) < BOTTOM_MARGIN {
        log::debug!(
            "Invoice {} ({}): payment block continues on a new page",
            invoice.number,
            labels.language()
        );
        flow.break_page();
        top = PAGE_TOP;
    }
    flow.page().lines(MARGIN_LEFT, top, BODY_SIZE, BLOCK_LEADING, &lines);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_height_grows_with_wrapped_lines() {
        let one = Row::new(vec!["a".into()], "1.00".into());
        let three = Row::new(vec!["a".into(), "b".into(), "c".into()], "1.00".into());
        assert!((one.height() - 22.0).abs() < f32::EPSILON);
        assert!((three.height() - 46.0).abs() < f32::EPSILON);
    }

    #[test]
    fn flow_keeps_every_page() {
        let fonts = FontSet::load().unwrap();
        let mut flow = Flow::new(&fonts);
        flow.page().text(MARGIN_LEFT, PAGE_TOP, Font::Regular, BODY_SIZE, "one");
        flow.break_page();
        flow.page().text(MARGIN_LEFT, PAGE_TOP, Font::Regular, BODY_SIZE, "two");
        assert_eq!(flow.into_pages().len(), 2);
    }
}
