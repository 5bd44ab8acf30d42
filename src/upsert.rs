//! Idempotent page writes.
//!
//! A page file is two independent parts: a front matter block that is always
//! regenerated from the sheet, and a body that belongs to whoever edits the
//! page. [`upsert_page`] composes the two pure transforms,
//! [`render_frontmatter`](crate::frontmatter::render_frontmatter) (done by the
//! caller) and [`normalize_footer`], around a single read and write:
//!
//! ```text
//! existing file  →  split_frontmatter  →  (discarded, body)  →  normalize_footer  ┐
//!                                                                                  ├→ block + body
//! no file        →  stub body  ────────────────────────────→  normalize_footer  ┘
//! ```
//!
//! Running it again with the same inputs produces the same file.

use crate::footer::normalize_footer;
use regex::Regex;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::LazyLock;

/// A leading `---` fenced block. The closing fence may end the file.
static FRONTMATTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A\x{feff}?---[ \t]*\r?\n(?:.*?\r?\n)?---[ \t]*(?:\r?\n|\z)").unwrap()
});

/// What [`upsert_page`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// The file did not exist and was written from the stub body.
    Created,
    /// The file existed; its front matter was replaced and its body kept.
    Updated,
}

impl fmt::Display for UpsertOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpsertOutcome::Created => f.write_str("created"),
            UpsertOutcome::Updated => f.write_str("updated"),
        }
    }
}

/// Split markdown into `(front_matter_block, body)`.
///
/// The block includes both fences. Leading blank lines of the body belong
/// to neither part, so re-rendering with a fresh block never accumulates
/// them. Without a leading fence, the block is empty and the body is the
/// rest of the text.
pub fn split_frontmatter(text: &str) -> (&str, &str) {
    let (block, rest) = match FRONTMATTER_RE.find(text) {
        Some(m) => (m.as_str(), &text[m.end()..]),
        None => ("", text),
    };
    (block, rest.trim_start_matches(['\r', '\n']))
}

/// Compose a page from a rendered front matter block and a body.
pub fn compose_page(frontmatter_block: &str, body: &str) -> String {
    format!("{frontmatter_block}{}", normalize_footer(body))
}

/// Create or update the page at `path`.
///
/// - Existing file: the old front matter is replaced with
///   `frontmatter_block`; the body is kept, with its footer normalized.
/// - New file: `stub_body` is used as the body.
///
/// The parent directory must exist. I/O errors are returned unchanged.
pub fn upsert_page(
    path: &Path,
    frontmatter_block: &str,
    stub_body: &str,
) -> io::Result<UpsertOutcome> {
    let (contents, outcome) = if path.exists() {
        let old = fs::read_to_string(path)?;
        let (_, body) = split_frontmatter(&old);
        (compose_page(frontmatter_block, body), UpsertOutcome::Updated)
    } else {
        (
            compose_page(frontmatter_block, stub_body),
            UpsertOutcome::Created,
        )
    };
    fs::write(path, contents)?;
    Ok(outcome)
}
