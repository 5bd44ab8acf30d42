//! Canonical footer enforcement.
//!
//! Every page ends with the same funding attribution block. Pages are
//! regenerated many times and some were hand-edited under older footer
//! formats, so the footer is never patched in place. Instead,
//! [`normalize_footer`] runs two phases:
//!
//! 1. **Strip**: repeatedly remove any known footer variant sitting at the
//!    very end of the body ([`strip_trailing_footer`]).
//! 2. **Append**: add the canonical [`FOOTER_BLOCK`] after one blank line.
//!
//! ## Recognized variants
//!
//! | Variant | Recognized by | Extent |
//! |---------|---------------|--------|
//! | [`FooterVariant::Marker`] | the `<!-- EU_FUNDING_FOOTER -->` comment | marker to end of text |
//! | [`FooterVariant::Table`] | trailing `<table>` element referencing [`FOOTER_IMAGE`] | the balanced element, plus separators before it |
//! | [`FooterVariant::Div`] | trailing `<div>` element referencing [`FOOTER_IMAGE`] | the balanced element, plus separators before it |
//!
//! "Separators" are an `<hr>` element and/or a markdown thematic break
//! (`---`, `***`, `___`) on its own line after a blank line. They are only
//! consumed together with a legacy block. The marker variant carries its
//! own `<hr>` after the marker and never consumes anything before it, which
//! keeps `normalize_footer(normalize_footer(b)) == normalize_footer(b)` for
//! every body, including ones that legitimately end with a thematic break.
//!
//! Footer-looking content that is not the last element of the body is user
//! content and is left alone.

use regex::Regex;
use std::sync::LazyLock;

/// Comment that opens the current footer block.
pub const FOOTER_MARKER: &str = "<!-- EU_FUNDING_FOOTER -->";

/// Image path every footer generation has referenced.
pub const FOOTER_IMAGE: &str = "eu-funded.jpg";

/// The canonical footer, including its trailing newline.
pub const FOOTER_BLOCK: &str = r#"<!-- EU_FUNDING_FOOTER -->
<hr style="margin:0.4rem 0;">

<div style="
  display:flex;
  align-items:center;
  gap:0.75rem;
  font-size:0.6rem;
  line-height:1.35;
">
  <div style="flex:0 0 160px; text-align:center;">
    <img src='{{ "/assets/images/eu-funded.jpg" | relative_url }}'
         alt="Co-funded by the European Union"
         style="max-width:160px; height:auto;">
  </div>
  <div style="flex:1; text-align:justify; hyphens:auto;">
    This project is co-funded by the European Union. However, the views and opinions
    expressed are solely those of the author(s) and do not necessarily reflect those
    of the European Union or the National Agency DAAD. Neither the European Union nor
    the granting authority can be held responsible for them.
  </div>
</div>
"#;

static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<!--\s*EU_FUNDING_FOOTER\s*-->").unwrap());

static TABLE_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(/?)table\b[^>]*>").unwrap());

static DIV_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(/?)div\b[^>]*>").unwrap());

static TRAILING_HR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<hr\b[^>]*>\z").unwrap());

/// A thematic break on its own line, preceded by a blank line or the start
/// of the text. Without the blank line `---` is a setext heading underline.
static TRAILING_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\A|\n[ \t]*\n)[ \t]*(?:-{3,}|\*{3,}|_{3,})[ \t]*\z").unwrap());

/// Footer generations recognized at the end of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterVariant {
    Marker,
    Table,
    Div,
}

impl FooterVariant {
    /// Checked in this order on every strip pass.
    pub const ALL: [FooterVariant; 3] =
        [FooterVariant::Marker, FooterVariant::Table, FooterVariant::Div];

    /// Byte offset where this variant starts, if it ends `body`.
    ///
    /// `body` must already be trimmed of trailing whitespace.
    fn locate(self, body: &str) -> Option<usize> {
        match self {
            FooterVariant::Marker => MARKER_RE.find_iter(body).last().map(|m| m.start()),
            FooterVariant::Table => trailing_element(body, &TABLE_TAG_RE)
                .filter(|&start| references_footer_image(&body[start..]))
                .map(|start| strip_separators(&body[..start]).len()),
            FooterVariant::Div => trailing_element(body, &DIV_TAG_RE)
                .filter(|&start| references_footer_image(&body[start..]))
                .map(|start| strip_separators(&body[..start]).len()),
        }
    }
}

/// Ensure `body` ends with exactly one canonical footer.
pub fn normalize_footer(body: &str) -> String {
    let content = strip_footers(body);
    if content.is_empty() {
        FOOTER_BLOCK.to_string()
    } else {
        format!("{content}\n\n{FOOTER_BLOCK}")
    }
}

/// Remove every footer variant stacked at the end of `body`.
///
/// The result is trimmed of trailing whitespace.
pub fn strip_footers(body: &str) -> &str {
    let mut rest = body.trim_end();
    while let Some((_, stripped)) = strip_trailing_footer(rest) {
        rest = stripped;
    }
    rest
}

/// Remove a single footer variant from the end of `body`.
///
/// Returns the variant that matched and the remaining text, trimmed of
/// trailing whitespace, or `None` if the body does not end in a footer.
pub fn strip_trailing_footer(body: &str) -> Option<(FooterVariant, &str)> {
    let body = body.trim_end();
    FooterVariant::ALL.into_iter().find_map(|variant| {
        variant
            .locate(body)
            .map(|start| (variant, body[..start].trim_end()))
    })
}

fn references_footer_image(block: &str) -> bool {
    block.to_ascii_lowercase().contains(FOOTER_IMAGE)
}

/// Start of the outermost element that closes at the very end of `text`.
///
/// `tag_re` matches the element's opening and closing tags, with the `/`
/// captured in group 1. Nested elements of the same name are balanced.
fn trailing_element(text: &str, tag_re: &Regex) -> Option<usize> {
    let tags: Vec<_> = tag_re.captures_iter(text).collect();
    let last = tags.last()?;
    let closes_at_end = last.get(0).is_some_and(|m| m.end() == text.len());
    if !closes_at_end || last.get(1).is_none_or(|slash| slash.is_empty()) {
        return None;
    }

    let mut depth = 0usize;
    for caps in tags.iter().rev() {
        let tag = caps.get(0)?;
        let closing = caps.get(1).is_some_and(|slash| !slash.is_empty());
        if closing {
            depth += 1;
        } else {
            depth -= 1;
            if depth == 0 {
                return Some(tag.start());
            }
        }
    }
    None
}

/// Drop an `<hr>` and then a thematic break from the end of `text`.
fn strip_separators(text: &str) -> &str {
    let mut text = text.trim_end();
    if let Some(m) = TRAILING_HR_RE.find(text) {
        text = text[..m.start()].trim_end();
    }
    if let Some(m) = TRAILING_BREAK_RE.find(text) {
        text = text[..m.start()].trim_end();
    }
    text
}
