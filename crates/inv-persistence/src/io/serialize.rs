//! Inventory serialization.

use encoding_rs::WINDOWS_1252;
use inv_model::{ColumnLayout, FileFormat, Record, TextEncoding};

use crate::error::{PersistenceError, Result};

/// Which records to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFilter {
    /// Every record. Used for the authoritative save.
    All,
    /// Only records not yet found. Used for exports.
    Unscanned,
}

impl RecordFilter {
    fn includes(self, record: &Record) -> bool {
        match self {
            Self::All => true,
            Self::Unscanned => !record.found,
        }
    }
}

/// Serialize records to the on-disk format.
///
/// Format:
/// - encoding preamble (BOM for [`TextEncoding::Utf8Bom`])
/// - the layout's canonical header row
/// - one row per included record, fields in original column order
///
/// The found column is written as the found marker for found records and
/// left as read otherwise.
pub fn serialize_inventory(
    records: &[Record],
    layout: &ColumnLayout,
    format: &FileFormat,
    filter: RecordFilter,
) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(format.delimiter_byte())
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(&layout.header).map_err(serialization)?;
    for record in records.iter().filter(|record| filter.includes(record)) {
        let fields = record.fields.iter().enumerate().map(|(index, value)| {
            if record.found && index == layout.found {
                format.found_marker.as_str()
            } else {
                value.as_str()
            }
        });
        writer.write_record(fields).map_err(serialization)?;
    }

    let text = writer.into_inner().map_err(|e| PersistenceError::Serialization {
        source: Box::new(e.into_error()),
    })?;
    encode(text, format.encoding)
}

fn serialization(source: csv::Error) -> PersistenceError {
    PersistenceError::Serialization {
        source: Box::new(source),
    }
}

fn encode(text: Vec<u8>, encoding: TextEncoding) -> Result<Vec<u8>> {
    match encoding {
        TextEncoding::Utf8Bom => {
            let mut output = Vec::with_capacity(encoding.preamble().len() + text.len());
            output.extend_from_slice(encoding.preamble());
            output.extend_from_slice(&text);
            Ok(output)
        }
        TextEncoding::Utf8 => Ok(text),
        TextEncoding::Windows1252 => {
            let text = String::from_utf8(text).map_err(|e| PersistenceError::Serialization {
                source: Box::new(e),
            })?;
            let (bytes, _, had_errors) = WINDOWS_1252.encode(&text);
            if had_errors {
                let mut buffer = [0u8; 4];
                let character = text
                    .chars()
                    .find(|c| WINDOWS_1252.encode(c.encode_utf8(&mut buffer)).2)
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                return Err(PersistenceError::Unencodable {
                    character,
                    encoding: encoding.label(),
                });
            }
            Ok(bytes.into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inv_model::UTF8_BOM;

    fn layout() -> ColumnLayout {
        ColumnLayout {
            header: ["Titel", "Etikett", "Placering", "Hylla", "Datum", "Skannad"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            title: 0,
            barcode: 1,
            placement: 2,
            shelf: 3,
            date: 4,
            found: 5,
        }
    }

    fn record(title: &str, barcode: &str, found: bool) -> Record {
        let fields = vec![title.to_string(), barcode.to_string()];
        Record::from_fields(fields, 6, found)
    }

    fn body(bytes: &[u8]) -> String {
        String::from_utf8(bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes).to_vec()).unwrap()
    }

    #[test]
    fn test_full_save_layout() {
        let records = vec![
            record("Mio, min Mio", "A1", false),
            record("Ronja; rövardotter", "A2", true),
            record("Emil", "A3", false),
        ];
        let bytes =
            serialize_inventory(&records, &layout(), &FileFormat::default(), RecordFilter::All)
                .unwrap();

        assert!(bytes.starts_with(UTF8_BOM));
        insta::assert_snapshot!(body(&bytes), @r#"
        Titel;Etikett;Placering;Hylla;Datum;Skannad
        Mio, min Mio;A1;;;;
        "Ronja; rövardotter";A2;;;;ja
        Emil;A3;;;;
        "#);
    }

    #[test]
    fn test_unscanned_filter_skips_found() {
        let records = vec![
            record("Mio", "A1", false),
            record("Ronja", "A2", true),
            record("Emil", "A3", false),
        ];
        let bytes = serialize_inventory(
            &records,
            &layout(),
            &FileFormat::default(),
            RecordFilter::Unscanned,
        )
        .unwrap();
        let text = body(&bytes);
        assert!(text.contains(";A1;"));
        assert!(!text.contains(";A2;"));
        assert!(text.contains(";A3;"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_unfound_marker_text_is_preserved() {
        let mut fields = vec![String::new(); 6];
        fields[1] = "A1".to_string();
        fields[5] = "nej".to_string();
        let records = vec![Record::from_fields(fields, 6, false)];
        let bytes =
            serialize_inventory(&records, &layout(), &FileFormat::default(), RecordFilter::All)
                .unwrap();
        assert!(body(&bytes).ends_with(";A1;;;;nej\n"));
    }

    #[test]
    fn test_extra_columns_are_written() {
        let mut fields = vec![String::new(); 8];
        fields[1] = "A1".to_string();
        fields[7] = "extra".to_string();
        let records = vec![Record::from_fields(fields, 6, false)];
        let bytes =
            serialize_inventory(&records, &layout(), &FileFormat::default(), RecordFilter::All)
                .unwrap();
        assert!(body(&bytes).ends_with(";A1;;;;;;extra\n"));
    }

    #[test]
    fn test_windows_1252_output() {
        let format = FileFormat {
            encoding: TextEncoding::Windows1252,
            ..FileFormat::default()
        };
        let records = vec![record("Bröderna", "A1", false)];
        let bytes = serialize_inventory(&records, &layout(), &format, RecordFilter::All).unwrap();
        assert!(!bytes.starts_with(UTF8_BOM));
        assert!(bytes.windows(8).any(|w| w == b"Br\xF6derna"));
    }

    #[test]
    fn test_windows_1252_rejects_unencodable() {
        let format = FileFormat {
            encoding: TextEncoding::Windows1252,
            ..FileFormat::default()
        };
        let records = vec![record("漢字", "A1", false)];
        let result = serialize_inventory(&records, &layout(), &format, RecordFilter::All);
        assert!(matches!(
            result,
            Err(PersistenceError::Unencodable { character: '漢', .. })
        ));
    }
}
