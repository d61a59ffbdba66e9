//! Run-level aggregation of per-document extraction results.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::parser::{ExtractionResult, InvoiceParser};
use crate::models::document::Document;
use crate::models::invoice::{InvoiceRecord, RunResult};

/// Folds extraction results into a [`RunResult`].
///
/// Records are kept in push order. Assumption and question strings are
/// deduplicated across the run, keeping the first occurrence.
#[derive(Debug, Default)]
pub struct RunAggregator {
    result: RunResult,
    seen_assumptions: HashSet<String>,
    seen_questions: HashSet<String>,
}

impl RunAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, extraction: ExtractionResult) {
        let ExtractionResult {
            record,
            assumptions,
            questions,
        } = extraction;

        self.result.invoices.push(record);

        for assumption in assumptions {
            if self.seen_assumptions.insert(assumption.clone()) {
                self.result.assumptions.push(assumption);
            }
        }
        for question in questions {
            if self.seen_questions.insert(question.clone()) {
                self.result.questions.push(question);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.result.invoices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.result.invoices.is_empty()
    }

    pub fn finish(self) -> RunResult {
        self.result
    }
}

/// Merge results that may have completed in any order.
///
/// Results are ordered by source identifier before folding so the run
/// output does not depend on completion order. Results sharing a source are
/// ordered by their serialized record.
pub fn aggregate(results: Vec<ExtractionResult>) -> RunResult {
    let mut keyed: Vec<(String, ExtractionResult)> = results
        .into_iter()
        .map(|result| (tie_break_key(&result), result))
        .collect();
    keyed.sort_by(|(ka, a), (kb, b)| {
        a.record
            .source_file
            .cmp(&b.record.source_file)
            .then_with(|| ka.cmp(kb))
    });
    let results = keyed.into_iter().map(|(_, result)| result);

    let mut aggregator = RunAggregator::new();
    for result in results {
        aggregator.push(result);
    }
    aggregator.finish()
}

fn tie_break_key(result: &ExtractionResult) -> String {
    // Records hold only strings, decimals and vectors, so this cannot fail.
    serde_json::to_string(&result.record).unwrap_or_default()
}

/// Parse `documents` in the given order and fold the results.
pub fn process_documents<P: InvoiceParser>(parser: &P, documents: &[Document]) -> RunResult {
    let mut aggregator = RunAggregator::new();
    for document in documents {
        aggregator.push(parser.parse(document));
    }

    let run = aggregator.finish();
    info!(
        "Processed {} documents: {} assumption(s), {} question(s)",
        run.invoices.len(),
        run.assumptions.len(),
        run.questions.len()
    );
    run
}

/// Per-document counts used by reports and summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStats {
    pub file: String,
    pub line_items: usize,
    /// How many of subtotal, tax and total were found (0 to 3).
    pub totals_found: usize,
}

impl FileStats {
    pub fn from_record(record: &InvoiceRecord) -> Self {
        Self {
            file: record.source_file.clone(),
            line_items: record.line_items.len(),
            totals_found: record.totals.found(),
        }
    }
}
