//! Error types for hicsv file operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading, writing, or mutating hicsv documents.
#[derive(Debug, Error)]
pub enum HicsvError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// A body row contains an unterminated quoted cell.
    #[error("malformed row at line {line}: {message}")]
    MalformedRow { line: usize, message: String },

    /// The comment-prefixed header block could not be decoded.
    #[error("invalid header: {message}")]
    HeaderDecode { message: String },

    /// A body row's cell count disagrees with the column-key count.
    #[error("row at line {line} has {actual} cells, expected {expected}")]
    RowWidthMismatch {
        line: usize,
        expected: usize,
        actual: usize,
    },

    /// An appended column's length disagrees with the current row count.
    #[error("column '{name}' has length {actual}, expected {expected}")]
    ColumnLengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// Column name already in use.
    #[error("duplicate column: {name}")]
    DuplicateColumn { name: String },

    /// Column name not found.
    #[error("unknown column: {name}")]
    UnknownColumn { name: String },

    /// A column key or text cell contains a line break, which the line-based
    /// format cannot represent.
    #[error("column '{name}' contains a line break and cannot be saved")]
    EmbeddedLineBreak { name: String },

    /// Column position out of range.
    #[error("column position {position} out of range (column count {count})")]
    PositionOutOfRange { position: usize, count: usize },

    /// Column values could not be converted to the inferred kind.
    ///
    /// Reserved: text is the universal fallback, so this only surfaces if a
    /// cell cannot be represented at all.
    #[error("type inference failed for column '{name}': {message}")]
    TypeInference { name: String, message: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for hicsv operations.
pub type Result<T> = std::result::Result<T, HicsvError>;

impl HicsvError {
    /// Create a MalformedRow error.
    pub fn malformed_row(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedRow {
            line,
            message: message.into(),
        }
    }

    /// Create a HeaderDecode error.
    pub fn header_decode(message: impl Into<String>) -> Self {
        Self::HeaderDecode {
            message: message.into(),
        }
    }

    /// Create a DuplicateColumn error.
    pub fn duplicate_column(name: impl Into<String>) -> Self {
        Self::DuplicateColumn { name: name.into() }
    }

    /// Create an UnknownColumn error.
    pub fn unknown_column(name: impl Into<String>) -> Self {
        Self::UnknownColumn { name: name.into() }
    }

    /// Create a ColumnLengthMismatch error.
    pub fn column_length_mismatch(name: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::ColumnLengthMismatch {
            name: name.into(),
            expected,
            actual,
        }
    }

    /// Create an EmbeddedLineBreak error.
    pub fn embedded_line_break(name: impl Into<String>) -> Self {
        Self::EmbeddedLineBreak { name: name.into() }
    }

    /// Create a TypeInference error.
    pub fn type_inference(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TypeInference {
            name: name.into(),
            message: message.into(),
        }
    }
}
