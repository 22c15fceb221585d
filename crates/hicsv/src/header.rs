//! Header codec for the comment-prefixed JSON metadata block.
//!
//! A hicsv file starts with a run of `#`-prefixed lines. The last of those is
//! the column-key line; the lines before it, markers stripped and re-joined,
//! form one JSON object of metadata.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value};

use crate::cells::{SEPARATOR, quote_cell, split_cells};
use crate::error::{HicsvError, Result};

/// Comment marker that introduces every header line.
pub const MARKER: char = '#';

/// Decoded header block: metadata, column keys, and the index of the first
/// body line.
#[derive(Debug)]
pub struct DecodedHeader {
    pub metadata: Map<String, Value>,
    pub keys: Vec<String>,
    pub body_start: usize,
}

/// Decode the maximal `#`-prefixed prefix of `lines`.
///
/// A file consisting entirely of marker lines may be metadata-only (no key
/// line, no columns); that is detected by first trying to parse the whole
/// stripped prefix as JSON.
pub fn decode_header(lines: &[&str]) -> Result<DecodedHeader> {
    let stripped: Vec<&str> = lines
        .iter()
        .map_while(|line| line.strip_prefix(MARKER))
        .collect();

    if stripped.is_empty() {
        return Err(HicsvError::header_decode(
            "no comment-prefixed header lines",
        ));
    }

    if stripped.len() == lines.len()
        && let Ok(Value::Object(metadata)) = serde_json::from_str(&stripped.join("\n"))
    {
        return Ok(DecodedHeader {
            metadata,
            keys: Vec::new(),
            body_start: stripped.len(),
        });
    }

    let (key_line, json_lines) = stripped
        .split_last()
        .expect("header prefix checked non-empty");
    let metadata = parse_metadata(&json_lines.join("\n"))?;

    let keys = split_cells(key_line, SEPARATOR).map_err(|err| match err {
        HicsvError::MalformedRow { message, .. } => HicsvError::MalformedRow {
            line: stripped.len(),
            message,
        },
        other => other,
    })?;

    Ok(DecodedHeader {
        metadata,
        keys,
        body_start: stripped.len(),
    })
}

fn parse_metadata(text: &str) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| HicsvError::header_decode(format!("header is not valid JSON: {e}")))?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(HicsvError::header_decode(format!(
            "header JSON top level must be an object, got {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Encode the metadata mapping as marker-prefixed, 4-space-indented JSON
/// lines. Key order follows insertion order so saved files diff cleanly.
pub fn encode_metadata(metadata: &Map<String, Value>) -> Result<Vec<String>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    metadata
        .serialize(&mut serializer)
        .map_err(|e| HicsvError::header_decode(format!("header is not JSON-serializable: {e}")))?;

    let json = String::from_utf8_lossy(&buf);
    Ok(json
        .lines()
        .map(|line| format!("{MARKER}{line}"))
        .collect())
}

/// Format the column keys as quoted cells for the column-key line.
///
/// The writer glues the marker onto the first cell so the key line pads and
/// aligns with the table below it.
pub fn encode_key_cells<'a, I>(keys: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    keys.into_iter().map(quote_cell).collect()
}
