//! Spreadsheet loading.
//!
//! Reads the page sheet from a workbook (`.xlsx`, `.xlsm`, `.xls`, `.ods`)
//! into [`SheetRow`]s. The first row is the header; columns are matched by
//! trimmed name and may appear in any order.
//!
//! | Column | Required | Meaning |
//! |--------|----------|---------|
//! | `page_id` | yes | `NNNNNNNN_lang` identity, also the output file name |
//! | `title` | yes | page title |
//! | `layout` | no | theme layout |
//! | `lang_code` | no | language code |
//! | `parent_id` | no | `page_id` of the parent page, blank for top level |
//! | `has_children` | no | hub page flag |
//! | `display_order` | no | sibling position in navigation |
//!
//! Cells keep their workbook type here. Interpreting them (trimming,
//! "nan" handling, number parsing) is the job of [`crate::values`].

use crate::types::{CellValue, SheetRow};
use calamine::{Data, Range, Reader, open_workbook_auto};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Spreadsheet not found: {0}")]
    NotFound(PathBuf),
    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("Sheet '{name}' not found. Available: {}", .available.join(", "))]
    SheetNotFound { name: String, available: Vec<String> },
    #[error("Workbook has no worksheets")]
    NoWorksheet,
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Column positions resolved from the header row.
#[derive(Debug, Default, PartialEq)]
struct Columns {
    page_id: Option<usize>,
    title: Option<usize>,
    layout: Option<usize>,
    lang_code: Option<usize>,
    parent_id: Option<usize>,
    has_children: Option<usize>,
    display_order: Option<usize>,
}

impl Columns {
    fn from_header(header: &[Data]) -> Self {
        let mut columns = Columns::default();
        for (idx, cell) in header.iter().enumerate() {
            let slot = match cell.to_string().trim() {
                "page_id" => &mut columns.page_id,
                "title" => &mut columns.title,
                "layout" => &mut columns.layout,
                "lang_code" => &mut columns.lang_code,
                "parent_id" => &mut columns.parent_id,
                "has_children" => &mut columns.has_children,
                "display_order" => &mut columns.display_order,
                _ => continue,
            };
            // First occurrence wins for repeated headers
            slot.get_or_insert(idx);
        }
        columns
    }

    fn missing_required(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.page_id.is_none() {
            missing.push("page_id".to_string());
        }
        if self.title.is_none() {
            missing.push("title".to_string());
        }
        missing.sort();
        missing
    }
}

/// Load page rows from a workbook.
///
/// Uses `sheet` when given, otherwise the first worksheet.
pub fn load_rows(path: &Path, sheet: Option<&str>) -> Result<Vec<SheetRow>, SheetError> {
    if !path.is_file() {
        return Err(SheetError::NotFound(path.to_path_buf()));
    }
    let mut workbook = open_workbook_auto(path)?;

    let range = match sheet {
        Some(name) => {
            let available = workbook.sheet_names();
            if !available.iter().any(|n| n == name) {
                return Err(SheetError::SheetNotFound {
                    name: name.to_string(),
                    available,
                });
            }
            workbook.worksheet_range(name)?
        }
        None => workbook
            .worksheet_range_at(0)
            .ok_or(SheetError::NoWorksheet)??,
    };

    rows_from_range(&range)
}

/// Map a worksheet range to rows, using its first row as the header.
pub fn rows_from_range(range: &Range<Data>) -> Result<Vec<SheetRow>, SheetError> {
    let mut rows = range.rows();
    let columns = rows
        .next()
        .map(Columns::from_header)
        .unwrap_or_default();

    let missing = columns.missing_required();
    if !missing.is_empty() {
        return Err(SheetError::MissingColumns(missing));
    }

    Ok(rows.map(|cells| row_from_cells(cells, &columns)).collect())
}

fn row_from_cells(cells: &[Data], columns: &Columns) -> SheetRow {
    let cell = |col: Option<usize>| {
        col.map(|idx| cells.get(idx).map(cell_value).unwrap_or(CellValue::Empty))
    };
    SheetRow {
        page_id: cell(columns.page_id),
        title: cell(columns.title),
        layout: cell(columns.layout),
        lang_code: cell(columns.lang_code),
        parent_id: cell(columns.parent_id),
        has_children: cell(columns.has_children),
        display_order: cell(columns.display_order),
    }
}

/// Convert a workbook cell. Error cells (`#N/A`, `#REF!`) count as blank.
pub fn cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(x) => CellValue::Float(*x),
        Data::Bool(b) => CellValue::Bool(*b),
        other => CellValue::Text(other.to_string()),
    }
}
