//! Column layout of the inventory file.

use serde::{Deserialize, Serialize};

/// Header row written by the library system export this tool consumes.
///
/// Only six of these columns are interpreted; the rest are carried through
/// load and save untouched.
pub const DEFAULT_HEADER: [&str; 32] = [
    "Nr",
    "Huvuduppslag",
    "Etikettnr.",
    "Lån",
    "Avdelning",
    "Placering",
    "Cirk. kat.",
    "Hylla",
    "Annan lånetid",
    "Giltig t.o.m",
    "Avdelning",
    "Placering",
    "Cirk. kat.",
    "Hylla",
    "Status",
    "Lok.dat.",
    "Omlok.dat.",
    "Förf. datum",
    "Publ. nr.",
    "Extern anm.",
    "Anmärkning",
    "Trans.dat.",
    "Id",
    "Namn",
    "Kategori",
    "Grupp",
    "Enhet/Skola",
    "Klass",
    "Extra 1",
    "Personnummer",
    "Adress",
    "Skannad",
];

/// Canonical header plus the positions of the semantically interpreted columns.
///
/// The header is always re-emitted on save; the file's own header row is not
/// validated against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    /// Header labels, in file order.
    pub header: Vec<String>,
    /// Item title.
    pub title: usize,
    /// Barcode label number; the lookup key.
    pub barcode: usize,
    /// Placement within the department.
    pub placement: usize,
    /// Shelf.
    pub shelf: usize,
    /// Due/expiry date. Empty means no date.
    pub date: usize,
    /// Found marker column.
    pub found: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER.iter().map(|label| (*label).to_string()).collect(),
            title: 1,
            barcode: 2,
            placement: 5,
            shelf: 13,
            date: 17,
            found: 31,
        }
    }
}

impl ColumnLayout {
    /// Minimum number of fields every loaded record is padded to.
    ///
    /// Never smaller than what is needed to address every semantic column,
    /// even if a custom header is shorter.
    pub fn min_columns(&self) -> usize {
        let highest = [
            self.title,
            self.barcode,
            self.placement,
            self.shelf,
            self.date,
            self.found,
        ]
        .into_iter()
        .max()
        .unwrap_or(0);
        self.header.len().max(highest + 1)
    }
}
