//! Page generation.
//!
//! Turns sheet rows into page files. Work is split in two so the `check`
//! command can show exactly what `generate` would do without touching disk:
//!
//! 1. [`plan_pages`] normalizes every row, builds the [`PageIndex`] once,
//!    and resolves front matter for each page. Pure; no I/O.
//! 2. [`generate`] renders each planned page and hands it to
//!    [`upsert_page`](crate::upsert::upsert_page).
//!
//! ## Row handling
//!
//! - Blank `page_id`: ignored.
//! - `page_id` equal to the configured root: counted as skipped.
//! - `page_id` containing a path separator: reported as invalid, not written.
//! - Everything else: one `<page_id>.md` in the output directory.
//!
//! Rows are processed in sheet order. When a `page_id` repeats, each row is
//! written in turn, so the last one wins on disk as it does in the index.

use crate::config::GeneratorConfig;
use crate::frontmatter::{
    FrontMatter, FrontmatterError, PageFields, PageIndex, build_frontmatter, render_frontmatter,
};
use crate::types::SheetRow;
use crate::upsert::{UpsertOutcome, upsert_page};
use crate::values::{as_bool, as_int, clean_str};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Front matter error: {0}")]
    Frontmatter(#[from] FrontmatterError),
}

/// A page resolved from one row, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedPage {
    pub page_id: String,
    pub parent_id: String,
    pub lang_code: String,
    pub frontmatter: FrontMatter,
}

impl PlannedPage {
    pub fn title(&self) -> &str {
        &self.frontmatter.title
    }

    pub fn file_name(&self) -> String {
        format!("{}.md", self.page_id)
    }

    /// Body used when the page file does not exist yet.
    ///
    /// The hidden comments keep the row identity visible to editors of the
    /// generated file.
    pub fn stub_body(&self) -> String {
        format!(
            "<!-- page_id: {} -->\n<!-- parent_id: {} -->\n<!-- lang_code: {} -->\n\n# {}\n\n",
            self.page_id,
            self.parent_id,
            self.lang_code,
            self.title()
        )
    }
}

/// A row whose `parent_id` does not resolve to a titled page.
#[derive(Debug, Clone, PartialEq)]
pub struct OrphanRef {
    pub page_id: String,
    pub parent_id: String,
}

/// Everything [`plan_pages`] found in the sheet.
#[derive(Debug, Clone, Default)]
pub struct Plan {
    pub pages: Vec<PlannedPage>,
    /// Rows skipped because they are the root page.
    pub skipped_root: usize,
    /// Rows with no `page_id`.
    pub blank_ids: usize,
    /// `page_id`s that cannot be used as file names.
    pub invalid_ids: Vec<String>,
    pub orphans: Vec<OrphanRef>,
    /// `page_id`s appearing on more than one row, with their row count.
    pub duplicates: Vec<(String, usize)>,
}

/// One page written by [`generate`].
#[derive(Debug, Clone)]
pub struct WrittenPage {
    pub page_id: String,
    pub title: String,
    pub path: PathBuf,
    pub outcome: UpsertOutcome,
}

/// Result of a [`generate`] run.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub written: Vec<WrittenPage>,
    pub skipped_root: usize,
    pub root_page_id: String,
    pub invalid_ids: Vec<String>,
    pub output_dir: PathBuf,
}

impl GenerateReport {
    pub fn created(&self) -> usize {
        self.count(UpsertOutcome::Created)
    }

    pub fn updated(&self) -> usize {
        self.count(UpsertOutcome::Updated)
    }

    fn count(&self, outcome: UpsertOutcome) -> usize {
        self.written.iter().filter(|p| p.outcome == outcome).count()
    }
}

/// Build the id → title and id → parent lookups from every row.
///
/// Titles are stored as written in the sheet (trimmed, blank when missing);
/// unlike page titles they do not fall back to the id, so a reference to an
/// untitled page resolves to nothing.
pub fn build_index(rows: &[SheetRow]) -> PageIndex {
    let mut index = PageIndex::new();
    for row in rows {
        let page_id = clean_str(row.page_id.as_ref(), "");
        if page_id.is_empty() {
            continue;
        }
        index.insert(
            &page_id,
            &clean_str(row.title.as_ref(), ""),
            &clean_str(row.parent_id.as_ref(), ""),
        );
    }
    index
}

/// Resolve every row into a page without writing anything.
pub fn plan_pages(rows: &[SheetRow], config: &GeneratorConfig) -> Plan {
    let index = build_index(rows);
    let defaults = &config.defaults;
    let mut plan = Plan::default();
    let mut seen: BTreeMap<String, usize> = BTreeMap::new();

    for row in rows {
        let page_id = clean_str(row.page_id.as_ref(), "");
        if page_id.is_empty() {
            plan.blank_ids += 1;
            continue;
        }
        if page_id == config.root_page_id {
            debug!(%page_id, "skipping root page");
            plan.skipped_root += 1;
            continue;
        }
        if !is_valid_page_id(&page_id) {
            warn!(%page_id, "page_id is not a valid file name");
            plan.invalid_ids.push(page_id);
            continue;
        }
        *seen.entry(page_id.clone()).or_default() += 1;

        let title = clean_str(row.title.as_ref(), &page_id);
        let layout = clean_str(row.layout.as_ref(), &defaults.layout);
        let lang_code = clean_str(row.lang_code.as_ref(), &defaults.lang_code);
        let parent_id = clean_str(row.parent_id.as_ref(), "");
        let has_children = as_bool(row.has_children.as_ref());
        let nav_order = match as_int(row.display_order.as_ref(), 0) {
            n if n <= 0 => defaults.nav_order,
            n => n,
        };

        if !parent_id.is_empty() && index.nav_title(&parent_id).is_none() {
            plan.orphans.push(OrphanRef {
                page_id: page_id.clone(),
                parent_id: parent_id.clone(),
            });
        }

        let frontmatter = build_frontmatter(
            &PageFields {
                title: &title,
                layout: &layout,
                nav_order,
                has_children,
                parent_id: &parent_id,
            },
            &index,
        );

        plan.pages.push(PlannedPage {
            page_id,
            parent_id,
            lang_code,
            frontmatter,
        });
    }

    plan.duplicates = seen.into_iter().filter(|(_, n)| *n > 1).collect();
    plan
}

/// A page id is used verbatim as a file name, so it must stay inside the
/// output directory.
fn is_valid_page_id(page_id: &str) -> bool {
    !page_id.contains(['/', '\\']) && page_id != "." && page_id != ".."
}

/// Write every page for `rows` into the configured output directory.
///
/// Creates the directory if needed. Stops at the first I/O error; pages
/// already written stay on disk.
pub fn generate(rows: &[SheetRow], config: &GeneratorConfig) -> Result<GenerateReport, GenerateError> {
    let output_dir = config.output_path();
    let plan = plan_pages(rows, config);
    info!(
        pages = plan.pages.len(),
        output = %output_dir.display(),
        "generating pages"
    );

    fs::create_dir_all(output_dir)?;

    let mut written = Vec::with_capacity(plan.pages.len());
    for page in &plan.pages {
        written.push(write_page(page, output_dir)?);
    }

    Ok(GenerateReport {
        written,
        skipped_root: plan.skipped_root,
        root_page_id: config.root_page_id.clone(),
        invalid_ids: plan.invalid_ids,
        output_dir: output_dir.to_path_buf(),
    })
}

fn write_page(page: &PlannedPage, output_dir: &Path) -> Result<WrittenPage, GenerateError> {
    let block = render_frontmatter(&page.frontmatter)?;
    let path = output_dir.join(page.file_name());
    let outcome = upsert_page(&path, &block, &page.stub_body())?;
    debug!(page_id = %page.page_id, path = %path.display(), %outcome, "wrote page");
    Ok(WrittenPage {
        page_id: page.page_id.clone(),
        title: page.title().to_string(),
        path,
        outcome,
    })
}
