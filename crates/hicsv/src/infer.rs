//! Whole-column scalar type inference.
//!
//! The kind of a column is decided once, from all of its raw cells, by trying
//! integer, then float, then text. A single cell that fails to parse demotes
//! the entire column to the next kind. There is no per-cell mixing.

use crate::error::{HicsvError, Result};
use crate::types::{ColumnData, ColumnKind};

/// Decide the narrowest kind shared by all cells.
///
/// An empty column is text by convention. Float literals follow the usual
/// decimal/exponent grammar and include `nan` and `inf`.
#[must_use]
pub fn infer_kind(cells: &[String]) -> ColumnKind {
    if cells.is_empty() {
        return ColumnKind::Text;
    }
    if cells.iter().all(|cell| cell.parse::<i64>().is_ok()) {
        return ColumnKind::Integer;
    }
    if cells.iter().all(|cell| cell.parse::<f64>().is_ok()) {
        return ColumnKind::Float;
    }
    ColumnKind::Text
}

/// Convert one column's raw cells into a typed array.
///
/// `name` is only used for error context. Since text is the universal
/// fallback the conversion cannot fail in practice; a parse failure after a
/// successful inference pass would be a bug and surfaces as `TypeInference`.
pub fn convert_cells(name: &str, cells: Vec<String>) -> Result<ColumnData> {
    match infer_kind(&cells) {
        ColumnKind::Integer => cells
            .iter()
            .map(|cell| {
                cell.parse::<i64>()
                    .map_err(|e| HicsvError::type_inference(name, e.to_string()))
            })
            .collect::<Result<Vec<i64>>>()
            .map(ColumnData::Int),
        ColumnKind::Float => cells
            .iter()
            .map(|cell| {
                cell.parse::<f64>()
                    .map_err(|e| HicsvError::type_inference(name, e.to_string()))
            })
            .collect::<Result<Vec<f64>>>()
            .map(ColumnData::Float),
        ColumnKind::Text => Ok(ColumnData::Text(cells)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_all_integers() {
        assert_eq!(infer_kind(&cells(&["1", "2", "3"])), ColumnKind::Integer);
        assert_eq!(infer_kind(&cells(&["-4", "+5", "0"])), ColumnKind::Integer);
    }

    #[test]
    fn test_one_float_demotes_column() {
        assert_eq!(infer_kind(&cells(&["1", "2.5", "3"])), ColumnKind::Float);
        assert_eq!(infer_kind(&cells(&["1e3", "2", "3"])), ColumnKind::Float);
    }

    #[test]
    fn test_one_text_cell_demotes_column() {
        assert_eq!(infer_kind(&cells(&["1", "x", "3"])), ColumnKind::Text);
        assert_eq!(infer_kind(&cells(&["1.5", "", "3"])), ColumnKind::Text);
    }

    #[test]
    fn test_nan_and_inf_are_floats() {
        assert_eq!(
            infer_kind(&cells(&["NaN", "nan", "inf", "-inf", "0.5"])),
            ColumnKind::Float
        );
    }

    #[test]
    fn test_integer_overflow_demotes_to_float() {
        assert_eq!(
            infer_kind(&cells(&["1", "99999999999999999999"])),
            ColumnKind::Float
        );
    }

    #[test]
    fn test_empty_column_is_text() {
        assert_eq!(infer_kind(&[]), ColumnKind::Text);
        assert_eq!(convert_cells("empty", Vec::new()).unwrap().kind(), ColumnKind::Text);
    }

    #[test]
    fn test_convert_values() {
        let data = convert_cells("c", cells(&["1", "-2", "3"])).unwrap();
        assert_eq!(data.as_int().unwrap(), [1, -2, 3]);

        let data = convert_cells("c", cells(&["0.5", "2"])).unwrap();
        assert_eq!(data.as_float().unwrap(), [0.5, 2.0]);

        let data = convert_cells("c", cells(&["a", "2"])).unwrap();
        assert_eq!(data.as_text().unwrap(), ["a", "2"]);
    }
}
