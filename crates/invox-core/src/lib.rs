//! Core library for invoice CSV extraction.
//!
//! This crate provides:
//! - The analyzed-document model (key/value pairs and tables)
//! - Heuristics locating the invoice date and the line-item table
//! - CSV export with a synthesized "Date" column
//! - The capability trait for the external document-analysis service

pub mod analysis;
pub mod error;
pub mod export;
pub mod invoice;
pub mod models;

pub use analysis::DocumentAnalyzer;
pub use error::{AnalysisError, ExportError, InvoxError, Result};
pub use export::{export_table, export_table_to_path};
pub use invoice::{locate_invoice_date, locate_invoice_table, parse_invoice_date};
pub use models::config::InvoxConfig;
pub use models::document::{Document, KeyValue, Table, TableGrid};
