//! Single-value labeled fields: document type, time, store and order details.

use super::first_capture;
use super::patterns::{
    DOCUMENT_TYPE, JOB_NAME, PO_NUMBER, SALES_PERSON, STORE_NUMBER, STORE_PHONE, TIME_PATTERN,
};
use crate::models::invoice::DocumentType;

/// First document-type keyword in the text.
pub fn extract_document_type(text: &str) -> Option<DocumentType> {
    first_capture(&[&*DOCUMENT_TYPE], text).and_then(|k| DocumentType::from_keyword(&k))
}

pub fn extract_time(text: &str) -> Option<String> {
    first_capture(&[&*TIME_PATTERN], text)
}

pub fn extract_store_number(text: &str) -> Option<String> {
    first_capture(&[&*STORE_NUMBER], text)
}

pub fn extract_store_phone(text: &str) -> Option<String> {
    first_capture(&[&*STORE_PHONE], text)
}

pub fn extract_sales_person(text: &str) -> Option<String> {
    first_capture(&[&*SALES_PERSON], text)
}

/// Purchase-order number, also accepting the "ofdler #" OCR misread.
pub fn extract_po_number(text: &str) -> Option<String> {
    first_capture(&[&*PO_NUMBER], text)
}

/// Job name: the rest of the line after the label.
pub fn extract_job_name(text: &str) -> Option<String> {
    first_capture(&[&*JOB_NAME], text)
}
