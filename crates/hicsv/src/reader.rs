//! hicsv file reader.
//!
//! Loads a whole file into memory, decodes the comment-prefixed header,
//! tokenizes the CSV body, and assembles a typed [`Document`].

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::cells::{SEPARATOR, split_cells};
use crate::error::{HicsvError, Result};
use crate::header::decode_header;
use crate::infer::convert_cells;
use crate::types::Document;

/// hicsv file reader.
pub struct HicsvReader<R: Read> {
    reader: BufReader<R>,
}

impl<R: Read> HicsvReader<R> {
    /// Create a new reader over any byte source.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
        }
    }

    /// Read the entire source into memory and parse it.
    pub fn read_document(mut self) -> Result<Document> {
        let mut text = String::new();
        self.reader.read_to_string(&mut text)?;
        parse_hicsv(&text)
    }
}

impl HicsvReader<File> {
    /// Open a hicsv file for reading.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                HicsvError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                HicsvError::Io(e)
            }
        })?;
        Ok(Self::new(file))
    }
}

/// Read a hicsv file from a path.
///
/// Convenience wrapper that opens and reads the file in one call.
pub fn read_hicsv(path: &Path) -> Result<Document> {
    HicsvReader::open(path)?.read_document()
}

/// Parse hicsv text that is already in memory.
///
/// Accepts both `\n` and `\r\n` line endings and an optional BOM.
pub fn parse_hicsv(text: &str) -> Result<Document> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let lines: Vec<&str> = text.lines().collect();

    let decoded = decode_header(&lines)?;

    let mut doc = Document::new();
    *doc.header_mut() = decoded.metadata;

    // Metadata-only file: nothing below the header.
    if decoded.keys.is_empty() {
        tracing::debug!(header_keys = doc.header().len(), "parsed metadata-only hicsv document");
        return Ok(doc);
    }

    let rows = tokenize_body(&lines[decoded.body_start..], decoded.body_start, decoded.keys.len())?;
    let row_count = rows.len();

    // Transpose rows into per-column cell runs, then infer one kind per
    // column.
    let mut raw_columns: Vec<Vec<String>> = decoded
        .keys
        .iter()
        .map(|_| Vec::with_capacity(row_count))
        .collect();
    for row in rows {
        for (raw_column, cell) in raw_columns.iter_mut().zip(row) {
            raw_column.push(cell);
        }
    }

    for (key, cells) in decoded.keys.into_iter().zip(raw_columns) {
        let data = convert_cells(&key, cells)?;
        doc.append_column(key, data)?;
    }

    tracing::debug!(
        rows = row_count,
        columns = doc.columns().len(),
        "parsed hicsv document"
    );
    Ok(doc)
}

/// Tokenize the body lines, enforcing the key-line cell count on every row.
///
/// Blank lines are skipped; `body_start` is the 0-based index of the first
/// body line, used to report 1-based line numbers.
fn tokenize_body(lines: &[&str], body_start: usize, width: usize) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    for (offset, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let line_number = body_start + offset + 1;
        let cells = split_cells(line, SEPARATOR).map_err(|err| match err {
            HicsvError::MalformedRow { message, .. } => HicsvError::MalformedRow {
                line: line_number,
                message,
            },
            other => other,
        })?;
        if cells.len() != width {
            return Err(HicsvError::RowWidthMismatch {
                line: line_number,
                expected: width,
                actual: cells.len(),
            });
        }
        rows.push(cells);
    }
    Ok(rows)
}
