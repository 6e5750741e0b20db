//! Raw workbook access: every sheet as a header row plus typed cells.
//!
//! The reader does no interpretation beyond cell typing: headers are
//! trimmed and lowercased, fully blank rows are dropped, and row numbers
//! are kept as they appear in the spreadsheet (1-based) so skipped rows
//! can be reported against the source file.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use serde::{Deserialize, Serialize};

use super::LoadError;
use crate::domain::DatasetHash;

/// A single typed cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Excel serial date (days since 1899-12-30, fractional part is time of day).
    DateTime(f64),
    Error(String),
}

impl CellValue {
    /// Build a cell from user-entered text; blank text becomes `Empty`.
    pub fn text(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(trimmed.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Stable textual form used for fingerprinting and diagnostics.
    pub fn render(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::DateTime(serial) => format!("#date:{serial}"),
            CellValue::Error(e) => format!("#error:{e}"),
        }
    }
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::text(s),
            Data::Int(i) => CellValue::Int(*i),
            Data::Float(f) => CellValue::Float(*f),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) => CellValue::DateTime(dt.as_f64()),
            Data::DateTimeIso(s) => CellValue::text(s),
            Data::DurationIso(s) => CellValue::text(s),
            Data::Error(e) => CellValue::Error(format!("{e:?}")),
        }
    }
}

/// A data row with its spreadsheet row number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    pub number: usize,
    pub cells: Vec<CellValue>,
}

impl RawRow {
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(CellValue::is_empty)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSheet {
    pub name: String,
    /// Trimmed, lowercased header cells. Empty for a sheet with no content.
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

static EMPTY: CellValue = CellValue::Empty;

impl RawSheet {
    /// Assemble a sheet from a header row and data rows, dropping blank rows.
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<RawRow>) -> Self {
        Self {
            name: name.into(),
            headers: headers.iter().map(|h| h.trim().to_lowercase()).collect(),
            rows: rows.into_iter().filter(|r| !r.is_blank()).collect(),
        }
    }

    /// Sheet whose cells are all entered as text. Data rows are numbered
    /// from 2, below the header.
    pub fn from_text<S: AsRef<str>>(name: &str, headers: &[&str], rows: &[Vec<S>]) -> Self {
        let rows = rows
            .iter()
            .enumerate()
            .map(|(i, cells)| RawRow {
                number: i + 2,
                cells: cells.iter().map(|c| CellValue::text(c.as_ref())).collect(),
            })
            .collect();
        Self::new(name, headers.iter().map(|h| h.to_string()).collect(), rows)
    }

    fn from_range(name: &str, range: &Range<Data>) -> Self {
        let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
        let mut rows = range.rows();
        let headers = match rows.next() {
            Some(header) => header
                .iter()
                .map(|cell| CellValue::from(cell).render())
                .collect(),
            None => Vec::new(),
        };
        let rows = rows
            .enumerate()
            .map(|(i, cells)| RawRow {
                // +1 for the header row, +1 for 1-based numbering
                number: first_row + i + 2,
                cells: cells.iter().map(CellValue::from).collect(),
            })
            .collect();
        Self::new(name, headers, rows)
    }

    pub fn has_header(&self) -> bool {
        self.headers.iter().any(|h| !h.is_empty())
    }

    /// Index of a column by (case-insensitive) header name.
    pub fn column(&self, name: &str) -> Option<usize> {
        let name = name.trim().to_lowercase();
        self.headers.iter().position(|h| *h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Cell at `(row, column)`; missing columns and short rows read as `Empty`.
    pub fn cell<'a>(&self, row: &'a RawRow, column: &str) -> &'a CellValue {
        match self.column(column) {
            Some(idx) => row.cells.get(idx).unwrap_or(&EMPTY),
            None => &EMPTY,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// All sheets of a workbook, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawWorkbook {
    pub sheets: Vec<RawSheet>,
}

impl RawWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, sheet: RawSheet) -> Self {
        self.sheets.push(sheet);
        self
    }

    /// Sheet lookup; names compare case-insensitively after trimming.
    pub fn sheet(&self, name: &str) -> Option<&RawSheet> {
        let name = name.trim();
        self.sheets
            .iter()
            .find(|s| s.name.trim().eq_ignore_ascii_case(name))
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// BLAKE3 over sheet names, headers and rendered cells.
    pub fn fingerprint(&self) -> DatasetHash {
        let mut hasher = blake3::Hasher::new();
        for sheet in &self.sheets {
            hasher.update(b"\x1esheet\x1f");
            hasher.update(sheet.name.as_bytes());
            for header in &sheet.headers {
                hasher.update(b"\x1f");
                hasher.update(header.as_bytes());
            }
            for row in &sheet.rows {
                hasher.update(b"\x1e");
                for cell in &row.cells {
                    hasher.update(cell.render().as_bytes());
                    hasher.update(b"\x1f");
                }
            }
        }
        DatasetHash::from_hash(hasher.finalize().to_hex().as_str())
    }
}

/// Read every sheet of the workbook at `path`.
///
/// Any format calamine recognizes by extension is accepted (xlsx, xlsm, xlsb, xls, ods).
pub fn read_workbook(path: &Path) -> Result<RawWorkbook, LoadError> {
    if !path.is_file() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let mut workbook = open_workbook_auto(path)?;
    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&name)?;
        sheets.push(RawSheet::from_range(&name, &range));
    }
    Ok(RawWorkbook { sheets })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_rows_are_dropped() {
        let sheet = RawSheet::from_text(
            "Teams",
            &["Team_ID", " team_name "],
            &[vec!["T1", "Alpha"], vec!["", "  "], vec!["T2", "Bravo"]],
        );
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.rows[1].number, 4);
        assert_eq!(sheet.headers, ["team_id", "team_name"]);
    }

    #[test]
    fn missing_column_reads_empty() {
        let sheet = RawSheet::from_text("Teams", &["team_id"], &[vec!["T1"]]);
        let row = &sheet.rows[0];
        assert_eq!(sheet.cell(row, "TEAM_ID"), &CellValue::Text("T1".into()));
        assert_eq!(sheet.cell(row, "team_name"), &CellValue::Empty);
    }

    #[test]
    fn sheet_lookup_ignores_case() {
        let wb = RawWorkbook::new().with_sheet(RawSheet::from_text::<&str>("Teams", &["team_id"], &[]));
        assert!(wb.sheet("teams").is_some());
        assert!(wb.sheet("Players").is_none());
    }

    #[test]
    fn fingerprint_tracks_content() {
        let a = RawWorkbook::new().with_sheet(RawSheet::from_text("Teams", &["team_id"], &[vec!["T1"]]));
        let b = RawWorkbook::new().with_sheet(RawSheet::from_text("Teams", &["team_id"], &[vec!["T2"]]));
        assert_eq!(a.fingerprint(), a.clone().fingerprint());
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = read_workbook(Path::new("/definitely/not/here.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }
}
