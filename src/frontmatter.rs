//! Front matter construction and rendering.
//!
//! Every generated page starts with a YAML block that the static-site theme
//! reads for navigation:
//!
//! ```yaml
//! ---
//! title: Installation
//! layout: home
//! nav_order: 2
//! has_children: true
//! has_toc: false
//! parent: Getting Started
//! grand_parent: Welcome
//! ---
//! ```
//!
//! The sheet stores hierarchy as ids (`parent_id`), but the theme wants
//! titles. [`build_frontmatter`] resolves the parent's title, and the
//! grandparent's title one hop further up, through a [`PageIndex`].
//! A key whose title cannot be resolved is omitted; ids are never written.
//!
//! Field order is fixed by the [`FrontMatter`] struct, so serialization is
//! deterministic and never alphabetized.

use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// The fixed front matter schema, in output order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrontMatter {
    pub title: String,
    pub layout: String,
    pub nav_order: i64,
    pub has_children: bool,
    /// Hub pages list their children, so the theme's own TOC is turned off.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_toc: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grand_parent: Option<String>,
}

/// Read-only lookups built once from every row of the sheet.
#[derive(Debug, Clone, Default)]
pub struct PageIndex {
    /// page id → title
    titles: HashMap<String, String>,
    /// page id → that page's parent id
    parents: HashMap<String, String>,
}

impl PageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a page. Later inserts for the same id replace earlier ones.
    pub fn insert(&mut self, page_id: &str, title: &str, parent_id: &str) {
        self.titles.insert(page_id.to_string(), title.to_string());
        self.parents
            .insert(page_id.to_string(), parent_id.to_string());
    }

    pub fn title(&self, page_id: &str) -> Option<&str> {
        self.titles.get(page_id).map(String::as_str)
    }

    pub fn parent(&self, page_id: &str) -> Option<&str> {
        self.parents.get(page_id).map(String::as_str)
    }

    /// Normalized title of `page_id`, or `None` if unknown or blank.
    pub fn nav_title(&self, page_id: &str) -> Option<String> {
        let title = normalize_nav_title(self.title(page_id)?);
        (!title.is_empty()).then_some(title)
    }
}

/// Per-page inputs to [`build_frontmatter`], already normalized.
#[derive(Debug, Clone)]
pub struct PageFields<'a> {
    pub title: &'a str,
    pub layout: &'a str,
    pub nav_order: i64,
    pub has_children: bool,
    pub parent_id: &'a str,
}

/// Rewrite legacy navigation labels to their current form.
///
/// All other titles pass through trimmed.
pub fn normalize_nav_title(title: &str) -> String {
    match title.trim() {
        "00 Welcome" => "Welcome".to_string(),
        t => t.to_string(),
    }
}

/// Assemble the front matter for one page.
pub fn build_frontmatter(fields: &PageFields<'_>, index: &PageIndex) -> FrontMatter {
    let mut fm = FrontMatter {
        title: fields.title.to_string(),
        layout: fields.layout.to_string(),
        nav_order: fields.nav_order,
        has_children: fields.has_children,
        has_toc: fields.has_children.then_some(false),
        parent: None,
        grand_parent: None,
    };

    let parent_id = fields.parent_id.trim();
    if parent_id.is_empty() {
        return fm;
    }

    // Grandparent only resolves through a parent that itself resolved.
    if let Some(parent_title) = index.nav_title(parent_id) {
        fm.parent = Some(parent_title);
        fm.grand_parent = index
            .parent(parent_id)
            .map(str::trim)
            .filter(|gp| !gp.is_empty())
            .and_then(|gp| index.nav_title(gp));
    }

    fm
}

/// Serialize front matter as a fenced block, followed by one blank line.
pub fn render_frontmatter(fm: &FrontMatter) -> Result<String, FrontmatterError> {
    let yaml = serde_yaml::to_string(fm)?;
    Ok(format!("---\n{yaml}---\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fields<'a>(title: &'a str, parent_id: &'a str) -> PageFields<'a> {
        PageFields {
            title,
            layout: "home",
            nav_order: 1,
            has_children: false,
            parent_id,
        }
    }

    /// Welcome ← Getting Started ← Installation
    fn sample_index() -> PageIndex {
        let mut index = PageIndex::new();
        index.insert("00000000_en", "00 Welcome", "");
        index.insert("01000000_en", "Getting Started", "00000000_en");
        index.insert("01010000_en", "Installation", "01000000_en");
        index
    }

    // =========================================================================
    // normalize_nav_title
    // =========================================================================

    #[test]
    fn legacy_welcome_title_is_rewritten() {
        assert_eq!(normalize_nav_title("00 Welcome"), "Welcome");
        assert_eq!(normalize_nav_title("  00 Welcome "), "Welcome");
    }

    #[test]
    fn other_titles_pass_through_trimmed() {
        assert_eq!(normalize_nav_title(" Installation "), "Installation");
        assert_eq!(normalize_nav_title("01 Welcome"), "01 Welcome");
        assert_eq!(normalize_nav_title(""), "");
    }

    // =========================================================================
    // build_frontmatter
    // =========================================================================

    #[test]
    fn root_page_has_no_hierarchy_keys() {
        let fm = build_frontmatter(&fields("Welcome", ""), &sample_index());
        assert_eq!(fm.parent, None);
        assert_eq!(fm.grand_parent, None);
        assert_eq!(fm.has_toc, None);
    }

    #[test]
    fn resolves_parent_and_grand_parent_titles() {
        let index = sample_index();
        let fm = build_frontmatter(&fields("Linux", "01010000_en"), &index);
        assert_eq!(fm.parent.as_deref(), Some("Installation"));
        assert_eq!(fm.grand_parent.as_deref(), Some("Getting Started"));
    }

    #[test]
    fn grand_parent_title_is_normalized() {
        let fm = build_frontmatter(&fields("Installation", "01000000_en"), &sample_index());
        assert_eq!(fm.parent.as_deref(), Some("Getting Started"));
        assert_eq!(fm.grand_parent.as_deref(), Some("Welcome"));
    }

    #[test]
    fn parent_of_top_level_page_has_no_grand_parent() {
        let fm = build_frontmatter(&fields("Getting Started", "00000000_en"), &sample_index());
        assert_eq!(fm.parent.as_deref(), Some("Welcome"));
        assert_eq!(fm.grand_parent, None);
    }

    #[test]
    fn unknown_parent_id_is_omitted() {
        let fm = build_frontmatter(&fields("Orphan", "99999999_en"), &sample_index());
        assert_eq!(fm.parent, None);
        assert_eq!(fm.grand_parent, None);
    }

    #[test]
    fn blank_parent_title_is_omitted() {
        let mut index = sample_index();
        index.insert("02000000_en", "   ", "01000000_en");
        let fm = build_frontmatter(&fields("Child", "02000000_en"), &index);
        assert_eq!(fm.parent, None);
        assert_eq!(fm.grand_parent, None, "grand_parent needs a resolved parent");
    }

    #[test]
    fn dangling_grand_parent_is_omitted() {
        let mut index = PageIndex::new();
        index.insert("02000000_en", "Section", "77777777_en");
        let fm = build_frontmatter(&fields("Child", "02000000_en"), &index);
        assert_eq!(fm.parent.as_deref(), Some("Section"));
        assert_eq!(fm.grand_parent, None);
    }

    #[test]
    fn resolution_is_exactly_one_hop() {
        let mut index = sample_index();
        index.insert("01010100_en", "Linux", "01010000_en");
        let fm = build_frontmatter(&fields("Debian", "01010100_en"), &index);
        assert_eq!(fm.parent.as_deref(), Some("Linux"));
        assert_eq!(fm.grand_parent.as_deref(), Some("Installation"));
    }

    #[test]
    fn has_toc_only_for_hub_pages() {
        let mut f = fields("Hub", "");
        f.has_children = true;
        let fm = build_frontmatter(&f, &sample_index());
        assert_eq!(fm.has_toc, Some(false));
    }

    // =========================================================================
    // render_frontmatter
    // =========================================================================

    #[test]
    fn renders_keys_in_fixed_order() {
        let mut f = fields("Linux", "01010000_en");
        f.nav_order = 3;
        f.has_children = true;
        let fm = build_frontmatter(&f, &sample_index());
        let out = render_frontmatter(&fm).unwrap();
        assert_eq!(
            out,
            "---\n\
             title: Linux\n\
             layout: home\n\
             nav_order: 3\n\
             has_children: true\n\
             has_toc: false\n\
             parent: Installation\n\
             grand_parent: Getting Started\n\
             ---\n\n"
        );
    }

    #[test]
    fn omitted_keys_are_absent_not_null() {
        let fm = build_frontmatter(&fields("Orphan", "99999999_en"), &sample_index());
        let out = render_frontmatter(&fm).unwrap();
        assert!(!out.contains("parent"));
        assert!(!out.contains("has_toc"));
        assert!(!out.contains("null"));
        assert!(!out.contains("99999999_en"));
    }

    #[test]
    fn renders_unicode_titles_verbatim() {
        let fm = build_frontmatter(&fields("Über uns", ""), &PageIndex::new());
        let out = render_frontmatter(&fm).unwrap();
        assert!(out.contains("title: Über uns\n"), "got: {out}");
    }

    #[test]
    fn rendered_block_parses_back() {
        let fm = build_frontmatter(&fields("Linux: Setup", "01010000_en"), &sample_index());
        let out = render_frontmatter(&fm).unwrap();
        let inner = out
            .strip_prefix("---\n")
            .and_then(|s| s.strip_suffix("---\n\n"))
            .unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(inner).unwrap();
        assert_eq!(value["title"].as_str(), Some("Linux: Setup"));
        assert_eq!(value["grand_parent"].as_str(), Some("Getting Started"));
    }
}
