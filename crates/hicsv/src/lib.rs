//! Reader and writer for the hicsv (header-included CSV) text format.
//!
//! A hicsv file is a plain Unicode text file combining two human-editable
//! parts: a run of `#`-prefixed lines at the top holding one JSON object of
//! metadata plus the column-key line, and a restricted CSV table below it in
//! which every column is homogeneously typed and all columns share one
//! length.
//!
//! # Features
//!
//! - Whole-file load into a typed in-memory [`Document`]
//! - Per-column type inference: integer, float, or text
//! - Order-preserving JSON metadata, editable at any time
//! - Diff-friendly output: stable key order, fixed indent, padded columns
//! - Import of generic delimited text files via [`import_delimited`]
//!
//! # Example
//!
//! ```
//! use hicsv::{Document, parse_hicsv, render_document, WriterOptions};
//!
//! let mut doc = Document::new();
//! doc.header_set("sample", "C6F6");
//! doc.append_column("wavelength", vec![400.0, 500.0, 600.0]).unwrap();
//! doc.append_column("counts", vec![12i64, 40, 31]).unwrap();
//!
//! let text = render_document(&doc, &WriterOptions::default()).unwrap();
//! let reloaded = parse_hicsv(&text).unwrap();
//!
//! let counts = reloaded.get_column("counts").unwrap();
//! assert_eq!(counts.data.as_int().unwrap(), [12, 40, 31]);
//! assert_eq!(
//!     reloaded.header_get("sample").and_then(|v| v.as_str()),
//!     Some("C6F6"),
//! );
//! ```
//!
//! # Reading and writing files
//!
//! ```no_run
//! use std::path::Path;
//! use hicsv::{read_hicsv, write_hicsv};
//!
//! let doc = read_hicsv(Path::new("measurement.txt")).unwrap();
//! let cols = doc.get_columns(&["1st column", "2nd column"]).unwrap();
//! println!("{} rows, first column is {}", doc.row_count(), cols[0].kind());
//! write_hicsv(Path::new("copy.txt"), &doc).unwrap();
//! ```
//!
//! # Format quirks
//!
//! The tokenizer strips leading and trailing whitespace from every cell,
//! even quoted ones, so `"spam"` and `"  spam  "` read back identically.
//! This deviation from strict RFC 4180 is what makes padded (prettified)
//! output round-trip.

mod cells;
mod convert;
mod error;
mod header;
mod infer;
mod reader;
mod types;
mod writer;

// Re-export error types
pub use error::{HicsvError, Result};

// Re-export core types
pub use types::{Column, ColumnData, ColumnKind, Document, WriterOptions};

// Re-export inference
pub use infer::infer_kind;

// Re-export reader functionality
pub use reader::{HicsvReader, parse_hicsv, read_hicsv};

// Re-export writer functionality
pub use writer::{HicsvWriter, render_document, write_hicsv, write_hicsv_with_options};

// Re-export delimited-text import
pub use convert::{ImportOptions, import_delimited, import_delimited_file};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version of the hicsv format specification this crate implements.
pub const HICSV_VERSION: &str = "20220812";
