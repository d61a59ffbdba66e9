//! Common regex patterns and ordered tables for receipt/invoice extraction.
//!
//! Every table here is evaluated first-match-wins, so entry order is part of
//! the behaviour.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Known vendors. Brand-specific entries precede marketplace names.
    pub static ref KNOWN_VENDORS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"(?i)home\s+depot").unwrap(), "The Home Depot"),
        (Regex::new(r"(?i)homedepot\.com").unwrap(), "The Home Depot"),
        (Regex::new(r"(?i)lowe['’]?s").unwrap(), "Lowe's"),
        (Regex::new(r"(?i)menards").unwrap(), "Menards"),
        (Regex::new(r"(?i)ace\s+hardware").unwrap(), "Ace Hardware"),
        (Regex::new(r"(?i)harbor\s+freight").unwrap(), "Harbor Freight"),
        (Regex::new(r"(?i)grainger").unwrap(), "Grainger"),
        (Regex::new(r"(?i)fastenal").unwrap(), "Fastenal"),
        (Regex::new(r"(?i)amazon").unwrap(), "Amazon"),
    ];

    // Document type keywords
    pub static ref DOCUMENT_TYPE: Regex = Regex::new(
        r"(?i)\b(receipt|invoice|estimate|quote|purchase\s+order|delivery\s+ticket|work\s+order)\b"
    ).unwrap();

    // Dates: MM/DD/YY(YY), YYYY-MM-DD, "Month DD, YYYY"
    pub static ref DATE_PATTERN: Regex = Regex::new(
        r"\b(\d{1,2}/\d{1,2}/\d{2,4})\b|\b(\d{4}-\d{2}-\d{2})\b|\b([A-Z][a-z]+ \d{1,2},?\s*\d{4})\b"
    ).unwrap();

    // Labeled date without a year ("Date: March 14")
    pub static ref DATE_WITHOUT_YEAR: Regex = Regex::new(
        r"(?i)\bdate\s*[:#]?\s*([A-Z][a-z]+\.?\s+\d{1,2})\b"
    ).unwrap();

    // Shapes gating each normalization format, in trial order.
    pub static ref DATE_FORMATS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").unwrap(), "%m/%d/%Y"),
        (Regex::new(r"^\d{1,2}/\d{1,2}/\d{2}$").unwrap(), "%m/%d/%y"),
        (Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap(), "%Y-%m-%d"),
        (Regex::new(r"^[A-Za-z]+ \d{1,2},\s*\d{4}$").unwrap(), "%B %d, %Y"),
        (Regex::new(r"^[A-Za-z]+ \d{1,2}\s*\d{4}$").unwrap(), "%B %d %Y"),
    ];

    // Time: 2:45 PM, 14:05:09 pm EST. The zone must sit on the same line.
    pub static ref TIME_PATTERN: Regex = Regex::new(
        r"\b(\d{1,2}:\d{2}(?::\d{2})?\s*(?:AM|PM|am|pm)(?:[ \t]*[A-Z]{2,4})?)\b"
    ).unwrap();

    // Dollar amount: $1,234.56
    pub static ref MONEY_PATTERN: Regex = Regex::new(
        r"\$\s*([\d,]+\.\d{2})"
    ).unwrap();

    // SKU: 6+ digit numeric run
    pub static ref SKU_PATTERN: Regex = Regex::new(
        r"\b(\d{6,})\b"
    ).unwrap();

    // Unit price: $X.XX / each|box|roll|...
    pub static ref UNIT_PRICE_PATTERN: Regex = Regex::new(
        r"(?i)\$\s*([\d,]+\.\d{2})\s*/\s*(?:each|box|roll|sheet|pkg|bag|pair|ft|sq\.?\s*ft|linear|lin\.?\s*ft|pc|pcs|unit)"
    ).unwrap();

    // Quantity candidates: 1..=999 as a standalone number
    pub static ref SMALL_INTEGER: Regex = Regex::new(
        r"\b([1-9]\d{0,2})\b"
    ).unwrap();

    // Labeled store fields
    pub static ref STORE_NUMBER: Regex = Regex::new(
        r"(?i)(?:store\s*#|store\s+no\.?)\s*(\w+)"
    ).unwrap();

    pub static ref STORE_PHONE: Regex = Regex::new(
        r"(?i)store\s+phone\s*#?\s*([\(\d][\d\s\-\.\(\)]{7,})"
    ).unwrap();

    pub static ref SALES_PERSON: Regex = Regex::new(
        r"(?i)sales\s+person\s+(\S+)"
    ).unwrap();

    // "ofdler" is a recurring OCR misread of "order"
    pub static ref PO_NUMBER: Regex = Regex::new(
        r"(?i)(?:order\s*#|po\s*#|po\s+number|ofdler\s*#|order\s+no\.?)\s*([A-Z0-9\-]+)"
    ).unwrap();

    pub static ref JOB_NAME: Regex = Regex::new(
        r"(?i)(?:po\s*/\s*job\s+name|job\s+name|job\s+#)\s+(.+?)(?:\n|$)"
    ).unwrap();

    // Vendor location
    pub static ref LOCATION_LABEL: Regex = Regex::new(
        r"(?i)location\s*[§#@:»]\s*(.+?)(?:\n|$)"
    ).unwrap();

    pub static ref STREET_ADDRESS: Regex = Regex::new(
        r"(?i)(\d+\s+[A-Z][A-Z\s]+(?:STREET|ST|AVENUE|AVE|ROAD|RD|BLVD|DR|DRIVE|WAY|LANE|LN|COURT|CT)[^\n]*\n[^\n]*[A-Z]{2}\s+\d{5})"
    ).unwrap();

    // Item table header: item/model #, SKU, unit price, qty, subtotal
    pub static ref ITEM_HEADER: Regex = Regex::new(
        r"(?i)(?:model\s*#|item\s*#|#\s*item).*?(?:sku\s*#|sku|item).*?(?:unit\s*price|price).*?(?:qty|quantity).*?(?:subtotal|total)"
    ).unwrap();

    // Start of the totals block
    pub static ref TOTALS_BLOCK: Regex = Regex::new(
        r"(?i)\b(?:subtotal|sub-total|order\s+total|grand\s+total)\b"
    ).unwrap();

    // Item rows start with a two-digit row number
    pub static ref ROW_START: Regex = Regex::new(
        r"(?m)^\d{2}\s"
    ).unwrap();

    pub static ref ROW_NUMBER: Regex = Regex::new(
        r"^\d{2}\s+"
    ).unwrap();

    // Discount annotations printed under a row
    pub static ref PREFERRED_PRICING: Regex = Regex::new(
        r"[®©*]?\s*PREFERRED PRICING[^\n]*\n?"
    ).unwrap();

    pub static ref TRAILING_NA: Regex = Regex::new(
        r"(?i)\s+N/A\s*$"
    ).unwrap();

    pub static ref WHITESPACE: Regex = Regex::new(
        r"\s+"
    ).unwrap();

    // Totals
    pub static ref SUBTOTAL_AMOUNT: Regex = Regex::new(
        r"(?i)sub[\s-]?total\s*\$?\s*([\d,]+\.\d{2})"
    ).unwrap();

    pub static ref TAX_AMOUNT: Regex = Regex::new(
        r"(?i)(?:sales\s+)?tax\s*\$?\s*([\d,]+\.\d{2})"
    ).unwrap();

    // Total, in priority order. The bare form must not follow a word character.
    pub static ref TOTAL_AMOUNTS: Vec<Regex> = vec![
        Regex::new(r"(?i)order\s+total\s*\$?\s*([\d,]+\.\d{2})").unwrap(),
        Regex::new(r"(?i)grand\s+total\s*\$?\s*([\d,]+\.\d{2})").unwrap(),
        Regex::new(r"(?i)(?:^|[^\w])total\s*\$?\s*([\d,]+\.\d{2})").unwrap(),
    ];
}
