//! Byte-level decoding before CSV splitting.

use std::borrow::Cow;
use std::path::Path;

use encoding_rs::{UTF_8, WINDOWS_1252};
use inv_model::{TextEncoding, UTF8_BOM};

use crate::error::{IngestError, Result};

/// Strips a leading UTF-8 BOM, if any.
pub fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

/// Decodes raw file bytes into text.
///
/// The BOM is stripped regardless of the configured encoding. UTF-8 input
/// with invalid sequences is rejected rather than replaced, so a save can
/// never write replacement characters over the operator's data.
pub fn decode_text<'a>(bytes: &'a [u8], encoding: TextEncoding, path: &Path) -> Result<Cow<'a, str>> {
    let bytes = strip_bom(bytes);
    match encoding {
        TextEncoding::Utf8Bom | TextEncoding::Utf8 => UTF_8
            .decode_without_bom_handling_and_without_replacement(bytes)
            .ok_or_else(|| IngestError::InvalidEncoding {
                path: path.to_path_buf(),
                encoding: encoding.label(),
            }),
        TextEncoding::Windows1252 => {
            let (text, had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
            if had_errors {
                return Err(IngestError::InvalidEncoding {
                    path: path.to_path_buf(),
                    encoding: encoding.label(),
                });
            }
            Ok(text)
        }
    }
}
