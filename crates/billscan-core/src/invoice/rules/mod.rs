//! Rule-based field extractors for receipts and invoices.

pub mod amounts;
pub mod dates;
pub mod fields;
pub mod items;
pub mod location;
pub mod patterns;
pub mod vendor;

pub use amounts::{extract_totals, last_amount, parse_money};
pub use dates::{normalize_date, DateExtractor};
pub use fields::{
    extract_document_type, extract_job_name, extract_po_number, extract_sales_person,
    extract_store_number, extract_store_phone, extract_time,
};
pub use items::{find_item_section, parse_line_items, split_rows};
pub use location::extract_vendor_location;
pub use vendor::{VendorIdentifier, VendorPattern};

use regex::Regex;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}

/// Try `patterns` in order and return the first capture of the first one that
/// matches, trimmed.
///
/// For patterns built as an alternation of groups, the first group that
/// participated in the match is used. Blank captures count as absent.
pub fn first_capture(patterns: &[&Regex], text: &str) -> Option<String> {
    patterns.iter().find_map(|pattern| {
        let caps = pattern.captures(text)?;
        let value = caps.iter().skip(1).flatten().next()?.as_str().trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// Collapse every whitespace run, newlines included, to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    patterns::WHITESPACE.replace_all(text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_capture_respects_pattern_order() {
        let late = Regex::new(r"b=(\d)").unwrap();
        let early = Regex::new(r"a=(\d)").unwrap();
        let text = "a=1 b=2";

        assert_eq!(first_capture(&[&late, &early], text), Some("2".to_string()));
        assert_eq!(first_capture(&[&early, &late], text), Some("1".to_string()));
    }

    #[test]
    fn test_first_capture_uses_participating_group() {
        let pattern = Regex::new(r"x=(\d)|y=(\d)").unwrap();
        assert_eq!(first_capture(&[&pattern], "y=7"), Some("7".to_string()));
    }

    #[test]
    fn test_first_capture_blank_is_absent() {
        let pattern = Regex::new(r"name:([ ]*)$").unwrap();
        assert_eq!(first_capture(&[&pattern], "name:   "), None);
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\t b  c "), "a b c");
    }
}
