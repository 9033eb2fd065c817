//! Core Document Model
//!
//! The parsed program and its metadata table.

pub mod config_table;
pub mod document;

pub use config_table::ConfigTable;
pub use document::ProgramDocument;
