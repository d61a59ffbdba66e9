//! Heuristic invoice parser running every rule over one document.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::clock::Clock;
use crate::error::Result;
use crate::models::config::{ExtractionConfig, VendorEntry};
use crate::models::document::Document;
use crate::models::invoice::InvoiceRecord;

use super::caveats::generate_caveats;
use super::rules::{
    amounts::extract_totals,
    dates::DateExtractor,
    fields::{
        extract_document_type, extract_job_name, extract_po_number, extract_sales_person,
        extract_store_number, extract_store_phone, extract_time,
    },
    items::parse_line_items,
    location::extract_vendor_location,
    vendor::VendorIdentifier,
    FieldExtractor,
};

/// Result of parsing one document.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionResult {
    /// Extracted record.
    pub record: InvoiceRecord,
    /// Stated limitations of the extraction.
    pub assumptions: Vec<String>,
    /// Requests for human clarification.
    pub questions: Vec<String>,
}

/// Trait for invoice parsing.
pub trait InvoiceParser {
    /// Parse one document. Never fails: unmatched fields are absent and
    /// surfaced as caveats.
    fn parse(&self, document: &Document) -> ExtractionResult;
}

/// Ordered-pattern parser for receipts, invoices and purchase orders.
#[derive(Debug, Clone)]
pub struct HeuristicInvoiceParser {
    /// Characters of source text kept in the record excerpt.
    excerpt_len: usize,
    vendors: VendorIdentifier,
    dates: DateExtractor,
}

impl HeuristicInvoiceParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self {
            excerpt_len: ExtractionConfig::default().excerpt_len,
            vendors: VendorIdentifier::new(),
            dates: DateExtractor::new(),
        }
    }

    /// Build a parser from extraction configuration.
    ///
    /// Fails only when a configured vendor pattern does not compile.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        Self::new()
            .with_excerpt_len(config.excerpt_len)
            .with_extra_vendors(&config.extra_vendors)
    }

    /// Set the excerpt length.
    pub fn with_excerpt_len(mut self, excerpt_len: usize) -> Self {
        self.excerpt_len = excerpt_len;
        self
    }

    /// Append vendors after the built-in table.
    pub fn with_extra_vendors(mut self, entries: &[VendorEntry]) -> Result<Self> {
        self.vendors = self.vendors.with_entries(entries)?;
        Ok(self)
    }

    /// Set the clock used for dates printed without a year.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.dates = DateExtractor::with_clock(clock);
        self
    }

    fn excerpt(&self, text: &str) -> String {
        text.chars().take(self.excerpt_len).collect()
    }

    /// Build the record without caveats.
    pub fn extract_record(&self, document: &Document) -> InvoiceRecord {
        let text = document.text.as_str();

        let vendor_name = self.vendors.extract(text);
        debug!("Vendor: {:?}", vendor_name);

        let line_items = parse_line_items(text);
        let totals = extract_totals(text);

        InvoiceRecord {
            source_file: document.source.clone(),
            vendor_name,
            vendor_location: extract_vendor_location(text),
            invoice_type: extract_document_type(text),
            invoice_date: self.dates.extract(text),
            invoice_time: extract_time(text),
            job_name: extract_job_name(text),
            po_number: extract_po_number(text),
            sales_person: extract_sales_person(text),
            store_number: extract_store_number(text),
            store_phone: extract_store_phone(text),
            line_items,
            totals,
            raw_text_excerpt: self.excerpt(text),
        }
    }
}

impl Default for HeuristicInvoiceParser {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceParser for HeuristicInvoiceParser {
    fn parse(&self, document: &Document) -> ExtractionResult {
        let start = Instant::now();

        info!(
            "Parsing {} from {} characters of text",
            document.source,
            document.text.len()
        );

        let record = self.extract_record(document);
        let caveats = generate_caveats(&record);

        debug!(
            "Extracted {} line items from {} with {} question(s) in {:?}",
            record.line_items.len(),
            record.source_file,
            caveats.questions.len(),
            start.elapsed()
        );

        ExtractionResult {
            record,
            assumptions: caveats.assumptions,
            questions: caveats.questions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::invoice::{DocumentType, LineItem, Totals};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    const SPECIAL_ORDER: &str = "THE HOME DEPOT
Special Order Receipt
Location: Springfield North #4521
Store # 4521  Store Phone # (555) 010-2233
Sales Person JDOE42
PO / Job Name KITCHEN REMODEL
Order # H4521-118733
03/14/2024 2:45 PM
ITEM # DESCRIPTION SKU # UNIT PRICE QTY SUBTOTAL
01 WIDGET A 123456 $1.00 /each 3 $3.00
02 HINGE SET N/A 778899 $4.50 /pkg 2 $9.00
® PREFERRED PRICING -$0.45
SUBTOTAL $12.00
SALES TAX $0.96
ORDER TOTAL $12.96
";

    #[test]
    fn test_parse_special_order() {
        let parser = HeuristicInvoiceParser::new();
        let result = parser.parse(&Document::new("special.txt", SPECIAL_ORDER));
        let record = &result.record;

        assert_eq!(record.source_file, "special.txt");
        assert_eq!(record.vendor_name.as_deref(), Some("The Home Depot"));
        assert_eq!(record.vendor_location.as_deref(), Some("Springfield North #4521"));
        assert_eq!(record.invoice_type, Some(DocumentType::Receipt));
        assert_eq!(record.invoice_date.as_deref(), Some("2024-03-14"));
        assert_eq!(record.invoice_time.as_deref(), Some("2:45 PM"));
        assert_eq!(record.store_number.as_deref(), Some("4521"));
        assert_eq!(record.store_phone.as_deref(), Some("(555) 010-2233"));
        assert_eq!(record.sales_person.as_deref(), Some("JDOE42"));
        assert_eq!(record.job_name.as_deref(), Some("KITCHEN REMODEL"));
        assert_eq!(record.po_number.as_deref(), Some("H4521-118733"));

        assert_eq!(record.line_items.len(), 2);
        assert_eq!(record.line_items[1].description, "HINGE SET");
        assert_eq!(record.line_items[1].unit_price, Some(dec("4.50")));
        assert_eq!(record.line_items[1].subtotal, Some(dec("9.00")));

        assert_eq!(
            record.totals,
            Totals {
                subtotal: Some(dec("12.00")),
                tax: Some(dec("0.96")),
                total: Some(dec("12.96")),
            }
        );
        assert!(result.assumptions.is_empty());
        assert!(result.questions.is_empty());
    }

    #[test]
    fn test_widget_scenario() {
        let text = "ITEM # SKU UNIT PRICE QTY SUBTOTAL\n\
                    01 WIDGET A 123456 $1.00 /each 3 $3.00\n\
                    SUBTOTAL $3.00\nTAX $0.24\nTOTAL $3.24";
        let result = HeuristicInvoiceParser::new().parse(&Document::new("w.txt", text));

        assert_eq!(
            result.record.line_items,
            vec![LineItem {
                description: "WIDGET A".to_string(),
                sku: Some("123456".to_string()),
                model: None,
                unit_price: Some(dec("1.00")),
                qty: Some(dec("3.0")),
                subtotal: Some(dec("3.00")),
            }]
        );
        assert_eq!(
            result.record.totals,
            Totals {
                subtotal: Some(dec("3.00")),
                tax: Some(dec("0.24")),
                total: Some(dec("3.24")),
            }
        );
    }

    #[test]
    fn test_unrecognizable_document() {
        let text = "handwritten note\nplease call back\n";
        let result = HeuristicInvoiceParser::new().parse(&Document::new("note.txt", text));
        let record = &result.record;

        assert_eq!(record.vendor_name, None);
        assert_eq!(record.invoice_date, None);
        assert_eq!(record.totals, Totals::default());
        assert!(record.line_items.is_empty());
        assert_eq!(result.assumptions.len(), 1);
        assert_eq!(result.questions.len(), 4);
        assert_eq!(
            result
                .questions
                .iter()
                .filter(|q| q.contains("manual review recommended"))
                .count(),
            1
        );
    }

    #[test]
    fn test_parse_is_deterministic() {
        let parser = HeuristicInvoiceParser::new();
        let document = Document::new("special.txt", SPECIAL_ORDER);

        let first = serde_json::to_string(&parser.parse(&document).record).unwrap();
        let second = serde_json::to_string(&parser.parse(&document).record).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_excerpt_is_char_bounded() {
        let parser = HeuristicInvoiceParser::new().with_excerpt_len(5);
        let record = parser.extract_record(&Document::new("u.txt", "Café ®ceipt"));

        assert_eq!(record.raw_text_excerpt, "Café ");
    }

    #[test]
    fn test_from_config_with_clock() {
        let config = ExtractionConfig {
            excerpt_len: 10,
            extra_vendors: vec![VendorEntry {
                pattern: r"acme\s+supply".to_string(),
                name: "Acme Supply".to_string(),
            }],
        };
        let today = NaiveDate::from_ymd_opt(2030, 1, 5).unwrap();
        let parser = HeuristicInvoiceParser::from_config(&config)
            .unwrap()
            .with_clock(Arc::new(FixedClock::new(today)));

        let record = parser.extract_record(&Document::new(
            "acme.txt",
            "ACME SUPPLY CO\nInvoice Date: March 14\n",
        ));

        assert_eq!(record.vendor_name.as_deref(), Some("Acme Supply"));
        assert_eq!(record.invoice_date.as_deref(), Some("2030-03-14"));
        assert_eq!(record.invoice_type, Some(DocumentType::Invoice));
        assert_eq!(record.raw_text_excerpt, "ACME SUPPL");
    }

    #[test]
    fn test_blank_configured_vendor_name_is_rejected() {
        let config = ExtractionConfig {
            extra_vendors: vec![VendorEntry {
                pattern: "acme".to_string(),
                name: "  ".to_string(),
            }],
            ..ExtractionConfig::default()
        };

        assert!(matches!(
            HeuristicInvoiceParser::from_config(&config),
            Err(crate::error::BillscanError::Config(_))
        ));
    }
}
