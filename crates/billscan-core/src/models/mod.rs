//! Data models for documents, extracted records and configuration.

pub mod config;
pub mod document;
pub mod invoice;
