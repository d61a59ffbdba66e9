//! Line-item table location and row segmentation.
//!
//! Rows are recovered in two phases: the item section is split into
//! row-chunks on leading two-digit row numbers, then each chunk is flattened
//! to a single line and decomposed with independent regex passes. Flattening
//! keeps the parser indifferent to how the source wrapped long rows.

use rust_decimal::Decimal;
use tracing::debug;

use super::amounts::{last_amount, parse_money};
use super::collapse_whitespace;
use super::patterns::{
    ITEM_HEADER, MONEY_PATTERN, PREFERRED_PRICING, ROW_NUMBER, ROW_START, SKU_PATTERN,
    SMALL_INTEGER, TOTALS_BLOCK, TRAILING_NA, UNIT_PRICE_PATTERN,
};
use crate::models::invoice::LineItem;

/// Text between the item table's column header and the start of the totals
/// block, or to the end of the document when no totals keyword follows.
///
/// Returns `None` when no header row is found.
pub fn find_item_section(text: &str) -> Option<&str> {
    let header = ITEM_HEADER.find(text)?;
    let start = header.end();

    let end = TOTALS_BLOCK
        .find(&text[start..])
        .map_or(text.len(), |m| start + m.start());

    Some(&text[start..end])
}

/// Line items of the document; empty when there is no item section.
pub fn parse_line_items(text: &str) -> Vec<LineItem> {
    match find_item_section(text) {
        Some(section) => parse_section(section),
        None => {
            debug!("No item table header found");
            Vec::new()
        }
    }
}

/// Decompose every row-chunk of an item section.
pub fn parse_section(section: &str) -> Vec<LineItem> {
    let rows = split_rows(section);
    let items: Vec<LineItem> = rows.into_iter().map(parse_row).collect();

    debug!("Parsed {} line items", items.len());
    items
}

/// Split a section into trimmed row-chunks, each beginning with a two-digit
/// row number. Residue before the first row is discarded.
pub fn split_rows(section: &str) -> Vec<&str> {
    let mut starts: Vec<usize> = ROW_START.find_iter(section).map(|m| m.start()).collect();
    if starts.first() != Some(&0) {
        starts.insert(0, 0);
    }

    let ends = starts.iter().skip(1).copied().chain(std::iter::once(section.len()));

    starts
        .iter()
        .zip(ends)
        .map(|(&start, end)| section[start..end].trim())
        .filter(|chunk| ROW_NUMBER.is_match(chunk))
        .collect()
}

/// Decompose one row-chunk. Fields that cannot be recovered stay absent.
pub fn parse_row(chunk: &str) -> LineItem {
    let cleaned = PREFERRED_PRICING.replace_all(chunk, "");
    let flat = collapse_whitespace(&cleaned);
    let flat = ROW_NUMBER.replace(&flat, "");

    let sku_match = SKU_PATTERN.captures(&flat).and_then(|caps| caps.get(1));
    let sku = sku_match.map(|m| m.as_str().to_string());

    let unit_price = UNIT_PRICE_PATTERN
        .captures(&flat)
        .and_then(|caps| parse_money(&caps[1]));

    // The last dollar figure on a row is taken as the extended price.
    let subtotal = last_amount(&flat);

    let description = match sku_match {
        Some(m) => &flat[..m.start()],
        None => &flat[..],
    };
    let description = collapse_whitespace(&TRAILING_NA.replace(description, ""));

    LineItem {
        description,
        qty: extract_quantity(&flat, sku.as_deref()),
        sku,
        model: None,
        unit_price,
        subtotal,
    }
}

/// Rightmost standalone integer in 1..=999 once amounts and the SKU are
/// removed from the row.
fn extract_quantity(flat: &str, sku: Option<&str>) -> Option<Decimal> {
    let mut remainder = MONEY_PATTERN.replace_all(flat, "").into_owned();
    if let Some(sku) = sku {
        remainder = remainder.replace(sku, "");
    }

    SMALL_INTEGER
        .captures_iter(&remainder)
        .filter_map(|caps| caps[1].parse::<u32>().ok())
        .filter(|qty| (1..=999).contains(qty))
        .last()
        .map(Decimal::from)
}
