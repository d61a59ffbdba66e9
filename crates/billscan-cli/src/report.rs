//! Run report, review listing and summary CSV.

use std::path::Path;

use billscan_core::invoice::FileStats;
use billscan_core::models::invoice::RunResult;

/// Fields every serialized invoice record must carry.
const REQUIRED_INVOICE_FIELDS: [&str; 14] = [
    "source_file",
    "vendor_name",
    "vendor_location",
    "invoice_type",
    "invoice_date",
    "invoice_time",
    "job_name",
    "po_number",
    "sales_person",
    "store_number",
    "store_phone",
    "line_items",
    "totals",
    "raw_text_excerpt",
];

/// Names used in the Plan section.
pub struct ReportContext<'a> {
    pub json_file: &'a str,
    pub report_file: &'a str,
    pub log_file: Option<&'a Path>,
    pub ran_at: &'a str,
}

/// A single verification check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub passed: bool,
    pub label: String,
}

impl Check {
    fn new(passed: bool, label: impl Into<String>) -> Self {
        Self {
            passed,
            label: label.into(),
        }
    }
}

/// Structural checks over the serialized run result.
pub fn verify(run: &RunResult) -> Vec<Check> {
    let mut checks = Vec::new();

    let parsed = serde_json::to_string(run)
        .and_then(|s| serde_json::from_str::<serde_json::Value>(&s));
    let value = match parsed {
        Ok(value) => {
            checks.push(Check::new(true, "JSON serialises and parses without error"));
            value
        }
        Err(e) => {
            checks.push(Check::new(false, format!("JSON validity: {}", e)));
            return checks;
        }
    };

    for key in ["invoices", "assumptions", "questions"] {
        checks.push(Check::new(
            value.get(key).is_some(),
            format!("Top-level key `{}` present", key),
        ));
    }

    let invoices = value
        .get("invoices")
        .and_then(|v| v.as_array())
        .cloned()
        .unwrap_or_default();

    let missing: Vec<String> = invoices
        .iter()
        .filter(|inv| {
            REQUIRED_INVOICE_FIELDS
                .iter()
                .any(|field| inv.get(field).is_none())
        })
        .map(source_of)
        .collect();
    checks.push(Check::new(
        missing.is_empty(),
        if missing.is_empty() {
            "All invoices have required schema fields".to_string()
        } else {
            format!("All invoices have required schema fields (missing in: {})", missing.join(", "))
        },
    ));

    let empty: Vec<String> = run
        .invoices
        .iter()
        .filter(|inv| inv.line_items.is_empty())
        .map(|inv| inv.source_file.clone())
        .collect();
    checks.push(Check::new(
        empty.is_empty(),
        if empty.is_empty() {
            "All invoices have at least one line item".to_string()
        } else {
            format!("All invoices have at least one line item (empty: {})", empty.join(", "))
        },
    ));

    checks
}

fn source_of(invoice: &serde_json::Value) -> String {
    invoice
        .get("source_file")
        .and_then(|v| v.as_str())
        .unwrap_or("?")
        .to_string()
}

/// Render the Markdown report with Plan, Execution and Verification sections.
pub fn render_report(run: &RunResult, stats: &[FileStats], ctx: &ReportContext<'_>) -> String {
    let mut lines: Vec<String> = vec![
        "# billscan report".to_string(),
        String::new(),
        format!("_Generated: {}_", ctx.ran_at),
        String::new(),
        "## Plan".to_string(),
        String::new(),
        "- **Discover** all `.txt` files in the inbox, sorted by name.".to_string(),
        "- **Parse** each file with ordered pattern tables: vendor, labeled fields, \
         numbered line items and totals."
            .to_string(),
        "- **Best-effort**: set `null` when a field cannot be reliably extracted.".to_string(),
        "- **Merge** invoices, assumptions and questions across all files; deduplicate."
            .to_string(),
        format!("- **Write** `{}` and `{}`.", ctx.json_file, ctx.report_file),
    ];
    if let Some(log_file) = ctx.log_file {
        lines.push(format!("- **Append** a run entry to `{}`.", log_file.display()));
    }

    lines.push(String::new());
    lines.push("## Execution".to_string());
    lines.push(String::new());
    for stat in stats {
        lines.push(format!(
            "- `{}`: {} line item(s) extracted, {}/3 totals fields found",
            stat.file, stat.line_items, stat.totals_found
        ));
    }
    lines.push(format!("- **Total invoices**: {}", run.invoices.len()));
    lines.push(format!("- **Assumptions**: {}", run.assumptions.len()));
    lines.push(format!("- **Questions**: {}", run.questions.len()));
    lines.push(format!("- Run timestamp: `{}`", ctx.ran_at));

    lines.push(String::new());
    lines.push("## Verification".to_string());
    lines.push(String::new());
    let checks = verify(run);
    for check in &checks {
        let mark = if check.passed { "- [x]" } else { "- [ ]" };
        lines.push(format!("{} {}", mark, check.label));
    }
    let overall = if checks.iter().all(|c| c.passed) {
        "all checks passed"
    } else {
        "one or more checks FAILED"
    };
    lines.push(String::new());
    lines.push(format!("**Overall**: {}", overall));

    let mut report = lines.join("\n");
    report.push('\n');
    report
}

fn or_null<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "null".to_string(), |v| v.to_string())
}

/// Concise listing printed before asking to write outputs.
pub fn render_review(run: &RunResult) -> String {
    let mut out = String::new();

    out.push_str("\n── Invoices ──\n");
    for inv in &run.invoices {
        out.push_str(&format!("  {}\n", inv.source_file));
        out.push_str(&format!("    vendor:  {}\n", or_null(inv.vendor_name.as_deref())));
        out.push_str(&format!(
            "    date:    {}  time: {}\n",
            or_null(inv.invoice_date.as_deref()),
            or_null(inv.invoice_time.as_deref())
        ));
        out.push_str(&format!(
            "    job:     {}   PO: {}\n",
            or_null(inv.job_name.as_deref()),
            or_null(inv.po_number.as_deref())
        ));
        out.push_str(&format!("    items:   {}\n", inv.line_items.len()));
        out.push_str(&format!(
            "    totals:  sub={}  tax={}  total={}\n",
            or_null(inv.totals.subtotal),
            or_null(inv.totals.tax),
            or_null(inv.totals.total)
        ));
    }

    out.push_str("\n── Assumptions ──\n");
    for assumption in &run.assumptions {
        out.push_str(&format!("  • {}\n", assumption));
    }

    out.push_str("\n── Questions ──\n");
    for question in &run.questions {
        out.push_str(&format!("  ? {}\n", question));
    }

    out
}

/// Write per-file stats as CSV. The header is written even for an empty run.
pub fn write_summary(path: &Path, stats: &[FileStats]) -> anyhow::Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
    wtr.write_record(["file", "line_items", "totals_found"])?;
    for stat in stats {
        wtr.serialize(stat)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use billscan_core::models::invoice::{InvoiceRecord, LineItem};
    use pretty_assertions::assert_eq;

    fn record_with_item(source: &str) -> InvoiceRecord {
        let mut record = InvoiceRecord::new(source);
        record.vendor_name = Some("Menards".to_string());
        record.line_items.push(LineItem::default());
        record
    }

    fn context() -> ReportContext<'static> {
        ReportContext {
            json_file: "invoices.json",
            report_file: "report.md",
            log_file: None,
            ran_at: "2024-03-14T12:00:00Z",
        }
    }

    #[test]
    fn test_verify_passes_for_complete_run() {
        let run = RunResult {
            invoices: vec![record_with_item("a.txt")],
            ..RunResult::default()
        };

        let checks = verify(&run);

        assert_eq!(checks.len(), 6);
        assert!(checks.iter().all(|c| c.passed));
    }

    #[test]
    fn test_verify_flags_empty_line_items() {
        let run = RunResult {
            invoices: vec![record_with_item("a.txt"), InvoiceRecord::new("b.txt")],
            ..RunResult::default()
        };

        let failed: Vec<Check> = verify(&run).into_iter().filter(|c| !c.passed).collect();

        assert_eq!(
            failed,
            vec![Check::new(
                false,
                "All invoices have at least one line item (empty: b.txt)"
            )]
        );
    }

    #[test]
    fn test_render_report_sections() {
        let record = record_with_item("a.txt");
        let stats = vec![FileStats::from_record(&record)];
        let run = RunResult {
            invoices: vec![record],
            assumptions: vec![],
            questions: vec!["a.txt: Could not extract an order total.".to_string()],
        };

        let report = render_report(&run, &stats, &context());

        assert!(report.starts_with("# billscan report\n"));
        assert!(report.contains("## Plan"));
        assert!(report.contains("## Execution"));
        assert!(report.contains("## Verification"));
        assert!(report.contains("- `a.txt`: 1 line item(s) extracted, 0/3 totals fields found"));
        assert!(report.contains("- **Questions**: 1"));
        assert!(report.contains("**Overall**: all checks passed"));
        assert!(!report.contains("**Append**"));
    }

    #[test]
    fn test_render_review_shows_nulls() {
        let run = RunResult {
            invoices: vec![InvoiceRecord::new("n.txt")],
            assumptions: vec!["n.txt: vendor could not be identified from known patterns.".to_string()],
            questions: vec![],
        };

        let review = render_review(&run);

        assert!(review.contains("    vendor:  null\n"));
        assert!(review.contains("    totals:  sub=null  tax=null  total=null\n"));
        assert!(review.contains("  • n.txt: vendor could not be identified"));
    }

    #[test]
    fn test_write_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        let stats = vec![FileStats::from_record(&record_with_item("a.txt"))];

        write_summary(&path, &stats).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "file,line_items,totals_found\na.txt,1,0\n");
    }
}
