//! Import of generic delimited text files into hicsv documents.
//!
//! Useful for pulling instrument exports that carry no header block into a
//! [`Document`], after which metadata can be attached and the table saved as
//! hicsv.

use std::fs;
use std::path::Path;

use crate::cells::{SEPARATOR, split_cells};
use crate::error::{HicsvError, Result};
use crate::infer::convert_cells;
use crate::types::Document;

/// Options for importing a delimited text file.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Cell separator of the input (default: comma).
    pub separator: char,
    /// 0-based line numbers to skip entirely, e.g. preamble junk.
    pub ignore_lines: Vec<usize>,
    /// 0-based line number holding the column keys. The line is consumed and
    /// not treated as data. Ignored when `keys` is non-empty.
    pub key_line: Option<usize>,
    /// Explicit column keys; must match the table width when given. When
    /// neither `keys` nor `key_line` is set, keys are auto-generated as
    /// `"0"`, `"1"`, ...
    pub keys: Vec<String>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            separator: SEPARATOR,
            ignore_lines: Vec::new(),
            key_line: None,
            keys: Vec::new(),
        }
    }
}

impl ImportOptions {
    /// Create import options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cell separator.
    #[must_use]
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Skip the given 0-based lines.
    #[must_use]
    pub fn ignore_lines(mut self, lines: impl IntoIterator<Item = usize>) -> Self {
        self.ignore_lines.extend(lines);
        self
    }

    /// Read the column keys from the given 0-based line.
    #[must_use]
    pub fn with_key_line(mut self, line: usize) -> Self {
        self.key_line = Some(line);
        self
    }

    /// Use the given column keys verbatim.
    #[must_use]
    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }
}

/// Import delimited text into a document with an empty header.
pub fn import_delimited(text: &str, options: &ImportOptions) -> Result<Document> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let lines: Vec<&str> = text.lines().collect();

    let mut keys = options.keys.clone();
    let mut skip = options.ignore_lines.clone();

    if keys.is_empty()
        && let Some(key_line) = options.key_line
    {
        let line = lines.get(key_line).ok_or(HicsvError::PositionOutOfRange {
            position: key_line,
            count: lines.len(),
        })?;
        keys = split_row(line, options.separator, key_line + 1)?;
        skip.push(key_line);
    }

    // Tokenize everything that is neither skipped nor blank; all rows must
    // share one width.
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut first_row_line = 0;
    for (idx, line) in lines.iter().enumerate() {
        if skip.contains(&idx) || line.is_empty() {
            continue;
        }
        let line_number = idx + 1;
        let cells = split_row(line, options.separator, line_number)?;
        if let Some(first) = rows.first()
            && cells.len() != first.len()
        {
            return Err(HicsvError::RowWidthMismatch {
                line: line_number,
                expected: first.len(),
                actual: cells.len(),
            });
        }
        if rows.is_empty() {
            first_row_line = line_number;
        }
        rows.push(cells);
    }

    // With no data rows there is no table width to check the keys against;
    // explicit keys then yield empty text columns, like a hicsv key line
    // with nothing below it.
    let width = rows.first().map_or(0, Vec::len);
    if keys.is_empty() {
        keys = (0..width).map(|idx| idx.to_string()).collect();
    } else if !rows.is_empty() && keys.len() != width {
        return Err(HicsvError::RowWidthMismatch {
            line: first_row_line,
            expected: keys.len(),
            actual: width,
        });
    }

    let mut raw_columns: Vec<Vec<String>> = keys
        .iter()
        .map(|_| Vec::with_capacity(rows.len()))
        .collect();
    for row in rows {
        for (raw_column, cell) in raw_columns.iter_mut().zip(row) {
            raw_column.push(cell);
        }
    }

    let mut doc = Document::new();
    for (key, cells) in keys.into_iter().zip(raw_columns) {
        let data = convert_cells(&key, cells)?;
        doc.append_column(key, data)?;
    }
    Ok(doc)
}

/// Import a delimited text file from a path.
pub fn import_delimited_file(path: &Path, options: &ImportOptions) -> Result<Document> {
    let text = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            HicsvError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            HicsvError::Io(e)
        }
    })?;
    import_delimited(&text, options)
}

fn split_row(line: &str, separator: char, line_number: usize) -> Result<Vec<String>> {
    split_cells(line, separator).map_err(|err| match err {
        HicsvError::MalformedRow { message, .. } => HicsvError::MalformedRow {
            line: line_number,
            message,
        },
        other => other,
    })
}
