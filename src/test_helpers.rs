//! Shared test utilities for the sheetdocs test suite.
//!
//! Row builders stand in for a loaded workbook, so driver tests run on
//! plain values and a temp directory.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let out = tmp.path().join("generated");
//! generate(&sample_rows(), &test_config(&out)).unwrap();
//!
//! let page = read_page(&out, "01010000_en");
//! assert!(page.contains("parent: Getting Started"));
//! ```

use std::path::Path;

use crate::config::GeneratorConfig;
use crate::types::{CellValue, SheetRow};

// =========================================================================
// Row builders
// =========================================================================

/// A row with the required columns plus `parent_id`; other columns absent.
pub fn row(page_id: &str, title: &str, parent_id: &str) -> SheetRow {
    SheetRow {
        page_id: Some(CellValue::from(page_id)),
        title: Some(CellValue::from(title)),
        parent_id: Some(CellValue::from(parent_id)),
        ..Default::default()
    }
}

/// Set the `display_order` cell as text.
pub fn with_order(mut row: SheetRow, order: &str) -> SheetRow {
    row.display_order = Some(CellValue::from(order));
    row
}

/// Three levels under a root page:
///
/// ```text
/// 00000000_en  00 Welcome        (root, skipped)
/// 01000000_en  Getting Started
/// 01010000_en  Installation
/// 01010100_en  Linux
/// ```
pub fn sample_rows() -> Vec<SheetRow> {
    vec![
        row("00000000_en", "00 Welcome", ""),
        row("01000000_en", "Getting Started", "00000000_en"),
        row("01010000_en", "Installation", "01000000_en"),
        row("01010100_en", "Linux", "01010000_en"),
    ]
}

// =========================================================================
// Config and filesystem
// =========================================================================

/// Default config writing into `output_dir`.
pub fn test_config(output_dir: &Path) -> GeneratorConfig {
    GeneratorConfig {
        output_dir: output_dir.to_string_lossy().into_owned(),
        ..Default::default()
    }
}

/// Read `<page_id>.md` from `dir`. Panics with the directory listing on miss.
pub fn read_page(dir: &Path, page_id: &str) -> String {
    let path = dir.join(format!("{page_id}.md"));
    std::fs::read_to_string(&path).unwrap_or_else(|_| {
        let names: Vec<String> = std::fs::read_dir(dir)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        panic!("page '{page_id}' not found in {}. Available: {names:?}", dir.display())
    })
}
