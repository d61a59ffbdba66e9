//! Extracted record models.
//!
//! Absent values serialize as explicit `null` rather than being omitted, so
//! downstream consumers always see the full field set.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One structured result per source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Source identifier of the document this record was built from.
    pub source_file: String,

    /// Canonical vendor name from the vendor table.
    pub vendor_name: Option<String>,

    /// Store or vendor address, whitespace collapsed.
    pub vendor_location: Option<String>,

    /// Kind of business document.
    pub invoice_type: Option<DocumentType>,

    /// Invoice date as `YYYY-MM-DD`, or the raw capture when it could not be
    /// normalized.
    pub invoice_date: Option<String>,

    /// Invoice time exactly as printed.
    pub invoice_time: Option<String>,

    /// Job name.
    pub job_name: Option<String>,

    /// Purchase-order number.
    pub po_number: Option<String>,

    /// Salesperson identifier.
    pub sales_person: Option<String>,

    /// Store number.
    pub store_number: Option<String>,

    /// Store phone number.
    pub store_phone: Option<String>,

    /// Line items in document order.
    pub line_items: Vec<LineItem>,

    /// Document totals.
    pub totals: Totals,

    /// Leading excerpt of the source text, kept for audit.
    pub raw_text_excerpt: String,
}

impl InvoiceRecord {
    /// Create an empty record for the given source.
    pub fn new(source_file: impl Into<String>) -> Self {
        Self {
            source_file: source_file.into(),
            vendor_name: None,
            vendor_location: None,
            invoice_type: None,
            invoice_date: None,
            invoice_time: None,
            job_name: None,
            po_number: None,
            sales_person: None,
            store_number: None,
            store_phone: None,
            line_items: Vec::new(),
            totals: Totals::default(),
            raw_text_excerpt: String::new(),
        }
    }
}

/// Fixed vocabulary of document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Receipt,
    Invoice,
    Estimate,
    Quote,
    PurchaseOrder,
    DeliveryTicket,
    WorkOrder,
}

impl DocumentType {
    /// Map a matched keyword (any case, any inner whitespace) to a type.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let normalized = keyword
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
            .to_lowercase();

        match normalized.as_str() {
            "receipt" => Some(Self::Receipt),
            "invoice" => Some(Self::Invoice),
            "estimate" => Some(Self::Estimate),
            "quote" => Some(Self::Quote),
            "purchase_order" => Some(Self::PurchaseOrder),
            "delivery_ticket" => Some(Self::DeliveryTicket),
            "work_order" => Some(Self::WorkOrder),
            _ => None,
        }
    }

    /// Snake-case name, as serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Receipt => "receipt",
            Self::Invoice => "invoice",
            Self::Estimate => "estimate",
            Self::Quote => "quote",
            Self::PurchaseOrder => "purchase_order",
            Self::DeliveryTicket => "delivery_ticket",
            Self::WorkOrder => "work_order",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single line item from the item table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Text preceding the SKU. Empty when nothing could be recovered.
    pub description: String,

    /// Numeric SKU of six or more digits.
    pub sku: Option<String>,

    /// Model number. Not extracted by the heuristic parser.
    pub model: Option<String>,

    /// Per-unit price.
    pub unit_price: Option<Decimal>,

    /// Quantity, always within 1..=999 when present.
    pub qty: Option<Decimal>,

    /// Extended row price.
    pub subtotal: Option<Decimal>,
}

/// Document-level amounts. No arithmetic relationship is enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Option<Decimal>,
    pub tax: Option<Decimal>,
    pub total: Option<Decimal>,
}

impl Totals {
    /// Number of the three amounts that were found.
    pub fn found(&self) -> usize {
        [self.subtotal, self.tax, self.total]
            .iter()
            .filter(|v| v.is_some())
            .count()
    }
}

/// Output of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Records in processing order.
    pub invoices: Vec<InvoiceRecord>,

    /// Deduplicated assumptions, first occurrence first.
    pub assumptions: Vec<String>,

    /// Deduplicated questions, first occurrence first.
    pub questions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_document_type_from_keyword() {
        assert_eq!(DocumentType::from_keyword("RECEIPT"), Some(DocumentType::Receipt));
        assert_eq!(
            DocumentType::from_keyword("Purchase   Order"),
            Some(DocumentType::PurchaseOrder)
        );
        assert_eq!(
            DocumentType::from_keyword("delivery\nticket"),
            Some(DocumentType::DeliveryTicket)
        );
        assert_eq!(DocumentType::from_keyword("statement"), None);
    }

    #[test]
    fn test_absent_fields_serialize_as_null() {
        let mut record = InvoiceRecord::new("a.txt");
        record.invoice_type = Some(DocumentType::WorkOrder);
        record.line_items.push(LineItem {
            description: "WIDGET".to_string(),
            qty: Some(Decimal::from(3)),
            ..LineItem::default()
        });

        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["vendor_name"], serde_json::Value::Null);
        assert_eq!(json["invoice_type"], "work_order");
        assert_eq!(json["totals"]["total"], serde_json::Value::Null);
        assert_eq!(json["line_items"][0]["model"], serde_json::Value::Null);
        assert_eq!(json["line_items"][0]["sku"], serde_json::Value::Null);
        assert_eq!(json.as_object().unwrap().len(), 14);
    }

    #[test]
    fn test_run_result_round_trips() {
        let mut record = InvoiceRecord::new("a.txt");
        record.totals.total = Some(Decimal::new(324, 2));
        let run = RunResult {
            invoices: vec![record],
            assumptions: vec!["a".to_string()],
            questions: vec![],
        };

        let json = serde_json::to_string(&run).unwrap();
        let back: RunResult = serde_json::from_str(&json).unwrap();

        assert_eq!(back, run);
        assert_eq!(back.invoices[0].totals.total.unwrap().to_string(), "3.24");
    }

    #[test]
    fn test_totals_found() {
        let totals = Totals {
            subtotal: Some(Decimal::new(300, 2)),
            tax: None,
            total: Some(Decimal::new(324, 2)),
        };
        assert_eq!(totals.found(), 2);
        assert_eq!(Totals::default().found(), 0);
    }
}
