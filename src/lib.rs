//! # sheetdocs
//!
//! Generates the markdown pages of a static documentation site from a
//! spreadsheet. Each row is one page: its id, title, place in the
//! hierarchy, and position among its siblings.
//!
//! # Pipeline
//!
//! ```text
//! 1. Load       workbook  →  rows          (typed cells, header-mapped)
//! 2. Plan       rows      →  pages         (normalized values, resolved hierarchy)
//! 3. Write      pages     →  <page_id>.md  (regenerated front matter, kept body)
//! ```
//!
//! Planning is pure, which is what lets `check` show exactly what `generate`
//! would do.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`sheet`] | Reads the workbook and maps header names to [`types::SheetRow`]s |
//! | [`values`] | Uniform "missing" handling and string/bool/int coercion of cells |
//! | [`frontmatter`] | Builds and renders the fixed front matter schema, resolving parent titles |
//! | [`footer`] | Strips stale footer variants from the end of a body and appends the canonical one |
//! | [`upsert`] | Splits existing pages, keeps their body, writes front matter + body |
//! | [`generate`] | Plans pages from rows and drives the upsert for each |
//! | [`config`] | Layered `sheetdocs.toml` loading, merging, and validation |
//! | [`output`] | CLI output formatting for `generate` and `check` |
//! | [`types`] | Cell and row types shared by the stages |
//!
//! # Design Decisions
//!
//! ## The Body Belongs to the Editor
//!
//! Once a page exists, the tool owns only two parts of it: the front matter
//! at the top and the footer at the bottom. Everything between is kept
//! byte-for-byte, so writers can edit generated pages freely and the sheet
//! can be re-run at any time.
//!
//! ## Two Pure Transforms
//!
//! Regeneration is `render_frontmatter(page) + normalize_footer(body)`.
//! Neither transform looks at the other's output, and each is idempotent on
//! its own, so the composition is too. There is no in-place patching.
//!
//! ## Titles, Never Ids
//!
//! The site theme builds navigation from `parent` and `grand_parent`
//! titles. The sheet stores ids. Ids are resolved through an index built
//! once from all rows; anything that does not resolve to a non-empty title
//! is left out rather than written as an id or an empty value.

pub mod config;
pub mod footer;
pub mod frontmatter;
pub mod generate;
pub mod output;
pub mod sheet;
pub mod types;
pub mod upsert;
pub mod values;

#[cfg(test)]
pub(crate) mod test_helpers;
