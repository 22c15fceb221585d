//! Writer options.

/// Options for writing hicsv files.
#[derive(Debug, Clone)]
pub struct WriterOptions {
    /// Pad every cell of a column to the column's widest cell so the saved
    /// table lines up visually (default: true). Padding is whitespace and is
    /// stripped again on read.
    pub prettify: bool,
    /// Record the library and format versions in the saved header
    /// (default: true).
    pub version_info: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            prettify: true,
            version_info: true,
        }
    }
}

impl WriterOptions {
    /// Create writer options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit unpadded cells.
    #[must_use]
    pub fn without_padding(mut self) -> Self {
        self.prettify = false;
        self
    }

    /// Do not add version keys to the saved header.
    #[must_use]
    pub fn without_version_info(mut self) -> Self {
        self.version_info = false;
        self
    }
}
