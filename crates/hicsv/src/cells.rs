//! CSV cell tokenizing and formatting.
//!
//! One quirk of the hicsv format is preserved here deliberately: leading and
//! trailing whitespace is stripped from every cell, even when the cell is
//! quoted. `"spam"` and `"  spam  "` tokenize to the same value.

use crate::error::{HicsvError, Result};

/// Cell separator used by the hicsv format itself.
pub const SEPARATOR: char = ',';

/// Quote character for cells containing separators or quotes.
pub const QUOTE: char = '"';

/// Split one non-header line into raw string cells.
///
/// Quoted cells may contain the separator; a doubled `""` inside quotes is an
/// escaped literal quote. Every cell is whitespace-trimmed after unquoting.
pub fn split_cells(line: &str, separator: char) -> Result<Vec<String>> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            QUOTE if !in_quotes => {
                in_quotes = true;
            }
            QUOTE if in_quotes => {
                // Check for escaped quote ("")
                if chars.peek() == Some(&QUOTE) {
                    current.push(QUOTE);
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            _ if c == separator && !in_quotes => {
                cells.push(current.trim().to_string());
                current.clear();
            }
            _ => {
                current.push(c);
            }
        }
    }

    if in_quotes {
        // Line numbers are only known to the caller; it rewraps this error.
        return Err(HicsvError::malformed_row(0, "unterminated quoted cell"));
    }

    cells.push(current.trim().to_string());
    Ok(cells)
}

/// Format a text cell or column key for output.
///
/// Keys and text cells are always quoted, with embedded quotes doubled. This
/// matches the format's writer convention and keeps embedded separators and
/// surrounding whitespace unambiguous on disk.
pub fn quote_cell(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(QUOTE);
    for c in value.chars() {
        if c == QUOTE {
            out.push(QUOTE);
        }
        out.push(c);
    }
    out.push(QUOTE);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(line: &str) -> Vec<String> {
        split_cells(line, SEPARATOR).unwrap()
    }

    #[test]
    fn test_split_simple() {
        assert_eq!(split("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_quoted_separator() {
        assert_eq!(split("\"hello, world\",b"), vec!["hello, world", "b"]);
    }

    #[test]
    fn test_split_escaped_quotes() {
        assert_eq!(
            split("\"he said \"\"hello\"\"\",b"),
            vec!["he said \"hello\"", "b"]
        );
    }

    #[test]
    fn test_split_strips_whitespace_even_when_quoted() {
        assert_eq!(split("\"spam\", \"  spam  \""), vec!["spam", "spam"]);
    }

    #[test]
    fn test_split_empty_cells() {
        assert_eq!(split(",a,"), vec!["", "a", ""]);
        assert_eq!(split("\"\""), vec![""]);
    }

    #[test]
    fn test_split_alternate_separator() {
        assert_eq!(split_cells("a\tb\tc", '\t').unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_unterminated_quote() {
        let err = split_cells("\"abc", SEPARATOR).unwrap_err();
        assert!(matches!(err, HicsvError::MalformedRow { .. }));
    }

    #[test]
    fn test_quote_cell() {
        assert_eq!(quote_cell("plain"), "\"plain\"");
        assert_eq!(quote_cell("a\"b"), "\"a\"\"b\"");
        assert_eq!(quote_cell("e, f"), "\"e, f\"");
    }

    #[test]
    fn test_quote_cell_round_trips() {
        let cells = split(&[quote_cell("a\"b"), quote_cell("e, f")].join(","));
        assert_eq!(cells, vec!["a\"b", "e, f"]);
    }
}
