//! hicsv file writer.
//!
//! Renders the whole document to a string first and only then writes, so a
//! failing save never produces partial output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::Value;

use crate::cells::{SEPARATOR, quote_cell};
use crate::error::{HicsvError, Result};
use crate::header::{MARKER, encode_key_cells, encode_metadata};
use crate::types::{ColumnData, Document, WriterOptions};
use crate::{HICSV_VERSION, VERSION};

/// Line ending used by saved files, matching the format's reference output.
const LINE_ENDING: &str = "\r\n";

/// hicsv file writer.
pub struct HicsvWriter<W: Write> {
    writer: BufWriter<W>,
    options: WriterOptions,
}

impl<W: Write> HicsvWriter<W> {
    /// Create a new writer with default options.
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, WriterOptions::default())
    }

    /// Create a new writer with options.
    pub fn with_options(writer: W, options: WriterOptions) -> Self {
        Self {
            writer: BufWriter::new(writer),
            options,
        }
    }

    /// Write a document to the destination.
    pub fn write_document(mut self, doc: &Document) -> Result<()> {
        let rendered = render_document(doc, &self.options)?;
        self.writer.write_all(rendered.as_bytes())?;
        self.writer.flush()?;
        tracing::debug!(
            rows = doc.row_count(),
            columns = doc.columns().len(),
            "wrote hicsv document"
        );
        Ok(())
    }
}

impl HicsvWriter<File> {
    /// Create a hicsv file for writing.
    pub fn create(path: &Path) -> Result<Self> {
        Ok(Self::new(File::create(path)?))
    }

    /// Create a hicsv file with options.
    pub fn create_with_options(path: &Path, options: WriterOptions) -> Result<Self> {
        Ok(Self::with_options(File::create(path)?, options))
    }
}

/// Write a document to a hicsv file with default options.
pub fn write_hicsv(path: &Path, doc: &Document) -> Result<()> {
    HicsvWriter::create(path)?.write_document(doc)
}

/// Write a document to a hicsv file with options.
pub fn write_hicsv_with_options(
    path: &Path,
    doc: &Document,
    options: WriterOptions,
) -> Result<()> {
    HicsvWriter::create_with_options(path, options)?.write_document(doc)
}

/// Render a document to hicsv text.
///
/// Re-checks the document invariants before producing anything.
pub fn render_document(doc: &Document, options: &WriterOptions) -> Result<String> {
    doc.validate()?;

    // Quoting cannot hide a line break from the line-based reader, so a key
    // or text cell containing one must fail here, not on the next load.
    for column in doc.columns() {
        let has_break = column.name.contains(['\n', '\r'])
            || matches!(&column.data, ColumnData::Text(values)
                if values.iter().any(|v| v.contains(['\n', '\r'])));
        if has_break {
            return Err(HicsvError::embedded_line_break(&column.name));
        }
    }

    let mut metadata = doc.header().clone();
    if options.version_info {
        metadata.insert("hicsv-rust version".to_string(), Value::from(VERSION));
        metadata.insert("hicsv version".to_string(), Value::from(HICSV_VERSION));
    }

    let mut out = String::new();
    for line in encode_metadata(&metadata)? {
        out.push_str(&line);
        out.push_str(LINE_ENDING);
    }

    if doc.columns().is_empty() {
        return Ok(out);
    }

    // One cell run per column: the quoted key first, then the formatted
    // values. The marker is glued onto the first key cell so the key line
    // pads together with the table.
    let key_cells = encode_key_cells(doc.column_names());
    let mut grid: Vec<Vec<String>> = Vec::with_capacity(doc.columns().len());
    for (key_cell, column) in key_cells.into_iter().zip(doc.columns()) {
        let mut cells = Vec::with_capacity(column.len() + 1);
        cells.push(key_cell);
        format_values(&column.data, &mut cells);
        grid.push(cells);
    }
    grid[0][0].insert(0, MARKER);

    if options.prettify {
        for cells in &mut grid {
            let width = cells.iter().map(|c| c.chars().count()).max().unwrap_or(0);
            for cell in cells.iter_mut() {
                let padding = width - cell.chars().count();
                cell.push_str(&" ".repeat(padding));
            }
        }
    }

    let mut lines = Vec::with_capacity(doc.row_count() + 1);
    for row_idx in 0..=doc.row_count() {
        let row: Vec<&str> = grid.iter().map(|cells| cells[row_idx].as_str()).collect();
        let mut line = String::new();
        for (idx, cell) in row.iter().enumerate() {
            if idx > 0 {
                line.push(SEPARATOR);
            }
            line.push_str(cell);
        }
        lines.push(line);
    }
    out.push_str(&lines.join(LINE_ENDING));

    Ok(out)
}

/// Format a column's typed values into their canonical cell strings.
fn format_values(data: &ColumnData, cells: &mut Vec<String>) {
    match data {
        ColumnData::Int(values) => {
            cells.extend(values.iter().map(|v| v.to_string()));
        }
        ColumnData::Float(values) => {
            cells.extend(values.iter().map(|v| format_float(*v)));
        }
        ColumnData::Text(values) => {
            cells.extend(values.iter().map(|v| quote_cell(v)));
        }
    }
}

/// Shortest-round-trip float formatting that keeps a decimal point.
///
/// An integral float must not serialize as a bare integer literal, or the
/// column would reload as an integer column.
fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColumnData;

    #[test]
    fn test_format_float_keeps_decimal_point() {
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(-2.0), "-2.0");
        assert_eq!(format_float(0.5), "0.5");
        assert_eq!(format_float(f64::NAN), "NaN");
        assert_eq!(format_float(f64::INFINITY), "inf");
    }

    #[test]
    fn test_render_header_then_table() {
        let mut doc = Document::new();
        doc.header_set("title", "demo");
        doc.append_column("n", vec![1i64, 22]).unwrap();

        let text = render_document(&doc, &WriterOptions::new().without_version_info()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "#{");
        assert_eq!(lines[1], "#    \"title\": \"demo\"");
        assert_eq!(lines[2], "#}");
        // Padded to the widest cell, the marker-prefixed key "#\"n\"".
        assert_eq!(lines[3], "#\"n\"");
        assert_eq!(lines[4], "1   ");
        assert_eq!(lines[5], "22  ");
    }

    #[test]
    fn test_render_without_padding() {
        let mut doc = Document::new();
        doc.append_column("n", vec![1i64, 22]).unwrap();
        let options = WriterOptions::new().without_padding().without_version_info();
        let text = render_document(&doc, &options).unwrap();
        assert!(text.ends_with("#\"n\"\r\n1\r\n22"));
    }

    #[test]
    fn test_render_metadata_only() {
        let mut doc = Document::new();
        doc.header_set("only", "metadata");
        let options = WriterOptions::new().without_version_info();
        let text = render_document(&doc, &options).unwrap();
        assert!(text.lines().all(|line| line.starts_with('#')));
    }

    #[test]
    fn test_version_info_keys() {
        let doc = Document::new();
        let text = render_document(&doc, &WriterOptions::default()).unwrap();
        assert!(text.contains("\"hicsv version\": \"20220812\""));
        assert!(text.contains("\"hicsv-rust version\""));
    }

    #[test]
    fn test_rejects_text_cell_with_line_break() {
        let mut doc = Document::new();
        doc.append_column("s", ColumnData::text(["a\nb", "c"])).unwrap();
        let err = render_document(&doc, &WriterOptions::default()).unwrap_err();
        assert!(matches!(err, HicsvError::EmbeddedLineBreak { name } if name == "s"));
    }

    #[test]
    fn test_rejects_column_key_with_line_break() {
        let mut doc = Document::new();
        doc.append_column("bad\rkey", vec![1i64]).unwrap();
        let err = render_document(&doc, &WriterOptions::default()).unwrap_err();
        assert!(matches!(err, HicsvError::EmbeddedLineBreak { .. }));
    }

    #[test]
    fn test_text_cells_are_quoted() {
        let mut doc = Document::new();
        doc.append_column("s", ColumnData::text(["e, f", "g\"h"]))
            .unwrap();
        let options = WriterOptions::new().without_padding().without_version_info();
        let text = render_document(&doc, &options).unwrap();
        assert!(text.contains("\"e, f\""));
        assert!(text.contains("\"g\"\"h\""));
    }
}
