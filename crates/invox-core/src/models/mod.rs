//! Data models for analyzed documents and configuration.

pub mod config;
pub mod document;

pub use config::InvoxConfig;
pub use document::{Document, KeyValue, Table, TableGrid};
