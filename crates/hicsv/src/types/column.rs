//! Column types.

/// Scalar kind of a column.
///
/// Every cell of a column holds the same kind; the kind is decided for the
/// whole column at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// 64-bit signed integers.
    Integer,
    /// 64-bit floating-point numbers.
    Float,
    /// Unicode text, the universal fallback.
    Text,
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// Typed cell values of one column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Int(Vec<i64>),
    Float(Vec<f64>),
    Text(Vec<String>),
}

impl ColumnData {
    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Int(values) => values.len(),
            Self::Float(values) => values.len(),
            Self::Text(values) => values.len(),
        }
    }

    /// True when the column holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Scalar kind of the stored values.
    #[must_use]
    pub fn kind(&self) -> ColumnKind {
        match self {
            Self::Int(_) => ColumnKind::Integer,
            Self::Float(_) => ColumnKind::Float,
            Self::Text(_) => ColumnKind::Text,
        }
    }

    /// Build a text column from anything yielding string-likes.
    pub fn text<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Text(values.into_iter().map(Into::into).collect())
    }

    /// Integer values, if this is an integer column.
    #[must_use]
    pub fn as_int(&self) -> Option<&[i64]> {
        match self {
            Self::Int(values) => Some(values),
            _ => None,
        }
    }

    /// Float values, if this is a float column.
    #[must_use]
    pub fn as_float(&self) -> Option<&[f64]> {
        match self {
            Self::Float(values) => Some(values),
            _ => None,
        }
    }

    /// Text values, if this is a text column.
    #[must_use]
    pub fn as_text(&self) -> Option<&[String]> {
        match self {
            Self::Text(values) => Some(values),
            _ => None,
        }
    }
}

impl From<Vec<i64>> for ColumnData {
    fn from(values: Vec<i64>) -> Self {
        Self::Int(values)
    }
}

impl From<Vec<f64>> for ColumnData {
    fn from(values: Vec<f64>) -> Self {
        Self::Float(values)
    }
}

impl From<Vec<String>> for ColumnData {
    fn from(values: Vec<String>) -> Self {
        Self::Text(values)
    }
}

impl From<Vec<&str>> for ColumnData {
    fn from(values: Vec<&str>) -> Self {
        ColumnData::text(values)
    }
}

/// A named, homogeneously typed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    /// Create a column from a name and typed values.
    pub fn new(name: impl Into<String>, data: impl Into<ColumnData>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the column holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Scalar kind of the stored values.
    #[must_use]
    pub fn kind(&self) -> ColumnKind {
        self.data.kind()
    }
}
