//! CLI output formatting.
//!
//! Each command has a `format_*` function returning `Vec<String>` for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Generate
//!
//! ```text
//! 01000000_en Getting Started → 01000000_en.md (updated)
//! 01010000_en Installation → 01010000_en.md (created)
//!
//! Generated 2 pages in generated (1 created, 1 updated)
//! Skipped 1 root row (page_id=00000000_en)
//! Source spreadsheet: handbook.xlsx
//! ```
//!
//! ## Check
//!
//! ```text
//! 01000000_en Getting Started
//!     Parent: Welcome
//! 01010000_en Installation
//!     Parent: Getting Started
//!     Grand parent: Welcome
//!
//! Warnings
//!     01020000_en: parent 99999999_en has no title
//!
//! 2 pages, 1 root row skipped, 1 row without page_id ignored
//! Source spreadsheet: handbook.xlsx
//! ```

use crate::generate::{GenerateReport, Plan, PlannedPage};
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 page`, `3 pages`.
fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

fn page_header(page_id: &str, title: &str) -> String {
    format!("{page_id} {title}")
}

// ============================================================================
// Generate
// ============================================================================

/// Format the result of a `generate` run.
pub fn format_generate_output(report: &GenerateReport, source: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    for page in &report.written {
        let file = page
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        lines.push(format!(
            "{} → {} ({})",
            page_header(&page.page_id, &page.title),
            file,
            page.outcome
        ));
    }
    if !report.written.is_empty() {
        lines.push(String::new());
    }

    lines.push(format!(
        "Generated {} in {} ({} created, {} updated)",
        plural(report.written.len(), "page"),
        report.output_dir.display(),
        report.created(),
        report.updated()
    ));
    lines.push(format!(
        "Skipped {} (page_id={})",
        plural(report.skipped_root, "root row"),
        report.root_page_id
    ));
    if !report.invalid_ids.is_empty() {
        lines.push(format!(
            "Ignored {} with invalid page_id: {}",
            plural(report.invalid_ids.len(), "row"),
            report.invalid_ids.join(", ")
        ));
    }
    lines.push(format!("Source spreadsheet: {}", source.display()));
    lines
}

pub fn print_generate_output(report: &GenerateReport, source: &Path) {
    for line in format_generate_output(report, source) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

fn planned_page_lines(page: &PlannedPage) -> Vec<String> {
    let mut lines = vec![page_header(&page.page_id, page.title())];
    let fm = &page.frontmatter;
    if let Some(parent) = &fm.parent {
        lines.push(format!("{}Parent: {}", indent(1), parent));
    }
    if let Some(grand_parent) = &fm.grand_parent {
        lines.push(format!("{}Grand parent: {}", indent(1), grand_parent));
    }
    lines
}

/// Warnings about sheet content that still generates, but probably not as
/// intended.
fn plan_warnings(plan: &Plan) -> Vec<String> {
    let mut warnings = Vec::new();
    for orphan in &plan.orphans {
        warnings.push(format!(
            "{}: parent {} has no title",
            orphan.page_id, orphan.parent_id
        ));
    }
    for (page_id, count) in &plan.duplicates {
        warnings.push(format!("{page_id}: appears on {count} rows, last row wins"));
    }
    for page_id in &plan.invalid_ids {
        warnings.push(format!("{page_id}: not a valid file name, row ignored"));
    }
    warnings
}

/// Format the resolved plan shown by `check`.
pub fn format_check_output(plan: &Plan, source: &Path) -> Vec<String> {
    let mut lines: Vec<String> = plan.pages.iter().flat_map(planned_page_lines).collect();

    let warnings = plan_warnings(plan);
    if !warnings.is_empty() {
        lines.push(String::new());
        lines.push("Warnings".to_string());
        lines.extend(warnings.into_iter().map(|w| format!("{}{}", indent(1), w)));
    }

    lines.push(String::new());
    let mut summary = format!(
        "{}, {} skipped",
        plural(plan.pages.len(), "page"),
        plural(plan.skipped_root, "root row")
    );
    if plan.blank_ids > 0 {
        summary.push_str(&format!(
            ", {} without page_id ignored",
            plural(plan.blank_ids, "row")
        ));
    }
    lines.push(summary);
    lines.push(format!("Source spreadsheet: {}", source.display()));
    lines
}

pub fn print_check_output(plan: &Plan, source: &Path) {
    for line in format_check_output(plan, source) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{OrphanRef, WrittenPage, plan_pages};
    use crate::test_helpers::*;
    use crate::types::SheetRow;
    use crate::upsert::UpsertOutcome;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn report(written: Vec<WrittenPage>) -> GenerateReport {
        GenerateReport {
            written,
            skipped_root: 1,
            root_page_id: "00000000_en".into(),
            invalid_ids: vec![],
            output_dir: PathBuf::from("generated"),
        }
    }

    fn written(page_id: &str, title: &str, outcome: UpsertOutcome) -> WrittenPage {
        WrittenPage {
            page_id: page_id.into(),
            title: title.into(),
            path: PathBuf::from("generated").join(format!("{page_id}.md")),
            outcome,
        }
    }

    #[test]
    fn generate_output_lists_pages_and_summary() {
        let r = report(vec![
            written("01000000_en", "Getting Started", UpsertOutcome::Updated),
            written("01010000_en", "Installation", UpsertOutcome::Created),
        ]);
        let lines = format_generate_output(&r, Path::new("handbook.xlsx"));
        assert_eq!(
            lines,
            vec![
                "01000000_en Getting Started → 01000000_en.md (updated)",
                "01010000_en Installation → 01010000_en.md (created)",
                "",
                "Generated 2 pages in generated (1 created, 1 updated)",
                "Skipped 1 root row (page_id=00000000_en)",
                "Source spreadsheet: handbook.xlsx",
            ]
        );
    }

    #[test]
    fn generate_output_with_no_pages() {
        let mut r = report(vec![]);
        r.skipped_root = 0;
        let lines = format_generate_output(&r, Path::new("x.xlsx"));
        assert_eq!(lines[0], "Generated 0 pages in generated (0 created, 0 updated)");
        assert_eq!(lines[1], "Skipped 0 root rows (page_id=00000000_en)");
    }

    #[test]
    fn generate_output_mentions_invalid_ids() {
        let mut r = report(vec![]);
        r.invalid_ids = vec!["../x".into()];
        let lines = format_generate_output(&r, Path::new("x.xlsx"));
        assert!(lines.contains(&"Ignored 1 row with invalid page_id: ../x".to_string()));
    }

    #[test]
    fn check_output_shows_hierarchy() {
        let plan = plan_pages(&sample_rows(), &test_config(Path::new("out")));
        let lines = format_check_output(&plan, Path::new("handbook.xlsx"));
        assert_eq!(
            lines,
            vec![
                "01000000_en Getting Started",
                "    Parent: Welcome",
                "01010000_en Installation",
                "    Parent: Getting Started",
                "    Grand parent: Welcome",
                "01010100_en Linux",
                "    Parent: Installation",
                "    Grand parent: Getting Started",
                "",
                "3 pages, 1 root row skipped",
                "Source spreadsheet: handbook.xlsx",
            ]
        );
    }

    #[test]
    fn check_summary_counts_rows_without_page_id() {
        let mut rows = sample_rows();
        rows.push(SheetRow::default());
        rows.push(SheetRow::default());
        let plan = plan_pages(&rows, &test_config(Path::new("out")));
        let lines = format_check_output(&plan, Path::new("handbook.xlsx"));
        assert!(lines.contains(
            &"3 pages, 1 root row skipped, 2 rows without page_id ignored".to_string()
        ));
    }

    #[test]
    fn check_output_lists_warnings() {
        let mut plan = Plan::default();
        plan.orphans.push(OrphanRef {
            page_id: "01020000_en".into(),
            parent_id: "99999999_en".into(),
        });
        plan.duplicates.push(("01000000_en".into(), 2));
        let lines = format_check_output(&plan, Path::new("handbook.xlsx"));
        assert!(lines.contains(&"Warnings".to_string()));
        assert!(lines.contains(&"    01020000_en: parent 99999999_en has no title".to_string()));
        assert!(lines.contains(&"    01000000_en: appears on 2 rows, last row wins".to_string()));
    }
}
