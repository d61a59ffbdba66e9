//! Core library for heuristic receipt and invoice extraction.
//!
//! This crate provides:
//! - Ordered pattern tables for vendors, document types, dates and amounts
//! - Labeled-field extractors (date, time, store, salesperson, PO, job, location)
//! - Line-item section location and row segmentation
//! - Totals extraction and low-confidence caveat generation
//! - Run-level aggregation of per-document records
//!
//! The library consumes already-decoded text and performs no I/O during
//! extraction.

pub mod clock;
pub mod error;
pub mod invoice;
pub mod models;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{BillscanError, Result};
pub use invoice::{
    aggregate, process_documents, ExtractionResult, FileStats, HeuristicInvoiceParser,
    InvoiceParser, RunAggregator,
};
pub use models::config::BillscanConfig;
pub use models::document::Document;
pub use models::invoice::{DocumentType, InvoiceRecord, LineItem, RunResult, Totals};
