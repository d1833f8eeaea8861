//! Inventory records and their display projection.

use serde::{Deserialize, Serialize};

use crate::layout::ColumnLayout;

/// One catalogued item.
///
/// `fields` holds every column exactly as read, including columns the scanner
/// never looks at. The found state lives in `found`; the found column's text
/// is only consulted on load and rewritten on save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Raw field values in file order.
    pub fields: Vec<String>,
    /// Whether the item has been scanned.
    pub found: bool,
}

impl Record {
    /// Creates a record from raw fields, padding to `min_columns`.
    pub fn from_fields(mut fields: Vec<String>, min_columns: usize, found: bool) -> Self {
        if fields.len() < min_columns {
            fields.resize(min_columns, String::new());
        }
        Self { fields, found }
    }

    /// Returns the field at `index`, or `""` if the row is shorter.
    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).map_or("", String::as_str)
    }

    pub fn barcode(&self, layout: &ColumnLayout) -> &str {
        self.field(layout.barcode)
    }

    pub fn title(&self, layout: &ColumnLayout) -> &str {
        self.field(layout.title)
    }

    pub fn shelf(&self, layout: &ColumnLayout) -> &str {
        self.field(layout.shelf)
    }

    pub fn placement(&self, layout: &ColumnLayout) -> &str {
        self.field(layout.placement)
    }

    /// Due/expiry date, `None` when the column is empty.
    pub fn date(&self, layout: &ColumnLayout) -> Option<&str> {
        let date = self.field(layout.date);
        (!date.is_empty()).then_some(date)
    }

    /// Sets the found flag. Returns `true` if it was not already set.
    pub fn mark_found(&mut self) -> bool {
        let changed = !self.found;
        self.found = true;
        changed
    }

    /// Projects the columns shown in the scanned list.
    pub fn scanned_row(&self, layout: &ColumnLayout) -> ScannedRow {
        ScannedRow {
            barcode: self.barcode(layout).to_string(),
            title: self.title(layout).to_string(),
            shelf: self.shelf(layout).to_string(),
            placement: self.placement(layout).to_string(),
            date: self.field(layout.date).to_string(),
        }
    }
}

/// A row of the scanned view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedRow {
    pub barcode: String,
    pub title: String,
    pub shelf: String,
    pub placement: String,
    pub date: String,
}

impl ScannedRow {
    /// Column labels for display, in field order.
    pub const LABELS: [&'static str; 5] = ["Barcode", "Title", "Shelf", "Placement", "Due date"];

    /// Field values in the same order as [`Self::LABELS`].
    pub fn values(&self) -> [&str; 5] {
        [
            &self.barcode,
            &self.title,
            &self.shelf,
            &self.placement,
            &self.date,
        ]
    }
}
