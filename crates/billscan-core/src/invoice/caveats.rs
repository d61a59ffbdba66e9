//! Assumptions and questions raised by a finished record.

use crate::models::invoice::InvoiceRecord;

/// Caveats for one record, each tagged with the record's source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caveats {
    pub assumptions: Vec<String>,
    pub questions: Vec<String>,
}

/// Apply the low-confidence rules to a record.
///
/// Every rule is independent; each contributes at most one entry.
pub fn generate_caveats(record: &InvoiceRecord) -> Caveats {
    let source = &record.source_file;
    let mut caveats = Caveats::default();

    if record.vendor_name.is_none() {
        caveats
            .assumptions
            .push(format!("{source}: vendor could not be identified from known patterns."));
        caveats
            .questions
            .push(format!("{source}: What vendor issued this invoice?"));
    }

    if record.line_items.is_empty() {
        caveats.questions.push(format!(
            "{source}: No line items detected — manual review recommended."
        ));
    }

    if record.invoice_date.is_none() {
        caveats
            .questions
            .push(format!("{source}: Could not extract an invoice date."));
    }

    if record.totals.total.is_none() {
        caveats
            .questions
            .push(format!("{source}: Could not extract an order total."));
    }

    caveats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::invoice::LineItem;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    #[test]
    fn test_empty_record_raises_everything() {
        let caveats = generate_caveats(&InvoiceRecord::new("blank.txt"));

        assert_eq!(
            caveats.assumptions,
            vec!["blank.txt: vendor could not be identified from known patterns."]
        );
        assert_eq!(
            caveats.questions,
            vec![
                "blank.txt: What vendor issued this invoice?",
                "blank.txt: No line items detected — manual review recommended.",
                "blank.txt: Could not extract an invoice date.",
                "blank.txt: Could not extract an order total.",
            ]
        );
    }

    #[test]
    fn test_complete_record_raises_nothing() {
        let mut record = InvoiceRecord::new("full.txt");
        record.vendor_name = Some("Menards".to_string());
        record.invoice_date = Some("2024-03-14".to_string());
        record.totals.total = Some(Decimal::new(324, 2));
        record.line_items.push(LineItem::default());

        assert_eq!(generate_caveats(&record), Caveats::default());
    }

    #[test]
    fn test_rules_are_independent() {
        let mut record = InvoiceRecord::new("partial.txt");
        record.vendor_name = Some("Menards".to_string());
        record.line_items.push(LineItem::default());

        let caveats = generate_caveats(&record);

        assert!(caveats.assumptions.is_empty());
        assert_eq!(
            caveats.questions,
            vec![
                "partial.txt: Could not extract an invoice date.",
                "partial.txt: Could not extract an order total.",
            ]
        );
    }
}
