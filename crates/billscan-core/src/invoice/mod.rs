//! Invoice field extraction module.

pub mod aggregate;
pub mod caveats;
mod parser;
pub mod rules;

pub use aggregate::{aggregate, process_documents, FileStats, RunAggregator};
pub use caveats::{generate_caveats, Caveats};
pub use parser::{ExtractionResult, HeuristicInvoiceParser, InvoiceParser};
