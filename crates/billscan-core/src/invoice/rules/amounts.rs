//! Amount extraction for receipts and invoices.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

use super::patterns::{MONEY_PATTERN, SUBTOTAL_AMOUNT, TAX_AMOUNT, TOTAL_AMOUNTS};
use super::first_capture;
use crate::models::invoice::Totals;

/// Last dollar amount in `text`, left to right.
///
/// Absent when there is none or when that last token is malformed; earlier
/// amounts are never used as a fallback.
pub fn last_amount(text: &str) -> Option<Decimal> {
    MONEY_PATTERN
        .captures_iter(text)
        .last()
        .and_then(|caps| parse_money(&caps[1]))
}

/// Extract subtotal, tax and total from the full document text.
///
/// Each amount is independent; a malformed number leaves that amount absent.
pub fn extract_totals(text: &str) -> Totals {
    let total_patterns: Vec<_> = TOTAL_AMOUNTS.iter().collect();

    let totals = Totals {
        subtotal: first_capture(&[&*SUBTOTAL_AMOUNT], text).and_then(|s| parse_money(&s)),
        tax: first_capture(&[&*TAX_AMOUNT], text).and_then(|s| parse_money(&s)),
        total: first_capture(&total_patterns, text).and_then(|s| parse_money(&s)),
    };

    debug!(
        "Totals: subtotal={:?} tax={:?} total={:?}",
        totals.subtotal, totals.tax, totals.total
    );

    totals
}

/// Parse a US-formatted amount (e.g., "1,234.56").
pub fn parse_money(s: &str) -> Option<Decimal> {
    let cleaned = s.trim().replace(',', "");
    Decimal::from_str(&cleaned).ok()
}
