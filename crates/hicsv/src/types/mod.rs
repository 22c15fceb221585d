//! Core types for hicsv document handling.

mod column;
mod document;
mod options;

pub use column::{Column, ColumnData, ColumnKind};
pub use document::Document;
pub use options::WriterOptions;
