//! On-disk text format settings.

use serde::{Deserialize, Serialize};

/// UTF-8 byte-order mark. Spreadsheet tools use it to detect UTF-8.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Text encoding of the inventory file.
///
/// Fixed per deployment; never auto-detected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextEncoding {
    /// UTF-8 with a byte-order mark written on save.
    #[default]
    Utf8Bom,
    /// Plain UTF-8. A BOM found on load is still stripped.
    Utf8,
    /// Legacy single-byte Windows-1252.
    Windows1252,
}

impl TextEncoding {
    /// Bytes written before the header row.
    pub fn preamble(self) -> &'static [u8] {
        match self {
            Self::Utf8Bom => UTF8_BOM,
            Self::Utf8 | Self::Windows1252 => &[],
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8Bom => "UTF-8 (BOM)",
            Self::Utf8 => "UTF-8",
            Self::Windows1252 => "Windows-1252",
        }
    }
}

/// How the inventory file is encoded and delimited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileFormat {
    /// Text encoding.
    pub encoding: TextEncoding,
    /// Field delimiter. Must be a single ASCII character.
    pub delimiter: char,
    /// Value of the found column for scanned items. Anything else is "not yet".
    pub found_marker: String,
    /// Accept structurally invalid but recoverable quoting.
    pub lazy_quotes: bool,
}

impl Default for FileFormat {
    fn default() -> Self {
        Self {
            encoding: TextEncoding::Utf8Bom,
            delimiter: ';',
            found_marker: "ja".to_string(),
            lazy_quotes: true,
        }
    }
}

impl FileFormat {
    /// Delimiter as the byte the CSV reader and writer expect.
    ///
    /// Non-ASCII delimiters fall back to `;`.
    pub fn delimiter_byte(&self) -> u8 {
        if self.delimiter.is_ascii() {
            self.delimiter as u8
        } else {
            b';'
        }
    }
}
