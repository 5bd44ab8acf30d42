//! Shared types passed between the sheet loader, the value normalizer and
//! the page generation driver.

use std::fmt;

/// A single spreadsheet cell, kept typed until the value normalizer
/// decides what it means.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for CellValue {
    /// The string form a cell would have when the sheet is read as text:
    /// whole floats print without a fractional part (`3.0` → `3`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(x) => write!(f, "{x}"),
            CellValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

/// One data row of the page sheet.
///
/// Each field is `None` when the column is absent from the sheet entirely,
/// and `Some(CellValue::Empty)` when the column exists but the cell is blank.
/// The value normalizer treats both as missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetRow {
    pub page_id: Option<CellValue>,
    pub title: Option<CellValue>,
    pub layout: Option<CellValue>,
    pub lang_code: Option<CellValue>,
    pub parent_id: Option<CellValue>,
    pub has_children: Option<CellValue>,
    pub display_order: Option<CellValue>,
}
