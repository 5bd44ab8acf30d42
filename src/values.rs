//! Spreadsheet value normalization.
//!
//! Spreadsheet cells arrive in whatever shape the workbook stored them:
//! blank, typed numbers, typed booleans, or free text that may itself say
//! `"nan"` after a round trip through another tool. Everything downstream
//! goes through these four functions so "missing" means the same thing
//! everywhere:
//!
//! - [`is_missing`] — absent, blank, NaN, or the text `nan` in any case
//! - [`clean_str`] — trimmed string form, or a default
//! - [`as_bool`] — typed `true`, or a small truthy vocabulary
//! - [`as_int`] — float-then-truncate parsing (`"3.0"` → `3`), or a default
//!
//! None of these fail. Unparseable input degrades to the default.

use crate::types::CellValue;

/// Text forms accepted as `true` by [`as_bool`], compared lower-cased.
const TRUTHY: &[&str] = &["true", "1", "yes", "y", "on"];

/// True for an absent value, a blank cell, a NaN float, an empty or
/// whitespace-only string, or the literal `nan` (case-insensitive).
pub fn is_missing(value: Option<&CellValue>) -> bool {
    match value {
        None | Some(CellValue::Empty) => true,
        Some(CellValue::Float(x)) => x.is_nan(),
        Some(CellValue::Text(s)) => {
            let s = s.trim();
            s.is_empty() || s.eq_ignore_ascii_case("nan")
        }
        Some(CellValue::Int(_)) | Some(CellValue::Bool(_)) => false,
    }
}

/// Trimmed string form of `value`, or `default` when it is missing.
pub fn clean_str(value: Option<&CellValue>, default: &str) -> String {
    match value {
        Some(v) if !is_missing(Some(v)) => v.to_string().trim().to_string(),
        _ => default.to_string(),
    }
}

/// Parse a spreadsheet flag.
///
/// Typed booleans are taken as-is. Anything else is compared, trimmed and
/// lower-cased, against [`TRUTHY`]. Missing values are `false`.
pub fn as_bool(value: Option<&CellValue>) -> bool {
    match value {
        Some(CellValue::Bool(b)) => *b,
        v if is_missing(v) => false,
        Some(v) => {
            let s = v.to_string().trim().to_lowercase();
            TRUTHY.contains(&s.as_str())
        }
        None => false,
    }
}

/// Parse an integer the way numeric spreadsheet cells need it: as a float
/// first, then truncated toward zero. `"3.0"` → `3`, `"-2.9"` → `-2`.
///
/// Missing input, unparseable text, and non-finite results give `default`.
pub fn as_int(value: Option<&CellValue>, default: i64) -> i64 {
    let parsed = match value {
        v if is_missing(v) => return default,
        Some(CellValue::Int(i)) => return *i,
        Some(CellValue::Float(x)) => *x,
        Some(v) => match v.to_string().trim().parse::<f64>() {
            Ok(x) => x,
            Err(_) => return default,
        },
        None => return default,
    };
    if parsed.is_finite() {
        parsed.trunc() as i64
    } else {
        default
    }
}
