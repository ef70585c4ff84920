//! Normalization of untrusted custom-field values.
//!
//! Every function here is total: any input string maps to a safe output, and
//! malformed values degrade to a documented fallback instead of failing.

use ec_core::{Alignment, ImageSize};
use regex::Regex;
use std::sync::LazyLock;

static DISALLOWED_CSS_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^a-zA-Z0-9_\- \t\n\x0B\x0C\r]").expect("css class filter pattern is valid")
});

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[ \t\n\x0B\x0C\r]+").expect("whitespace pattern is valid")
});

/// Reduces a free-form value to a safe CSS class list.
///
/// Drops every character outside ASCII letters, digits, `-`, `_` and ASCII
/// whitespace, collapses whitespace runs to a single space and trims.
///
/// ```
/// use resolution::sanitize_css_class;
///
/// assert_eq!(sanitize_css_class("  foo   bar  "), "foo bar");
/// assert_eq!(sanitize_css_class("a<script>b"), "ascriptb");
/// ```
pub fn sanitize_css_class(raw: &str) -> String {
    let filtered = DISALLOWED_CSS_CHARS.replace_all(raw, "");
    let collapsed = WHITESPACE_RUN.replace_all(&filtered, " ");
    collapsed.trim().to_string()
}

/// Returns `raw` when it is one of `allowed`, otherwise `fallback`.
///
/// Matching is exact and case-sensitive.
pub fn sanitize_choice<'a>(raw: &str, allowed: &[&'a str], fallback: &'a str) -> &'a str {
    allowed
        .iter()
        .copied()
        .find(|candidate| *candidate == raw)
        .unwrap_or(fallback)
}

pub fn sanitize_image_size(raw: &str) -> ImageSize {
    sanitize_choice(raw, &ImageSize::ALLOWED, ImageSize::FALLBACK)
        .parse()
        .unwrap_or_default()
}

pub fn sanitize_alignment(raw: &str) -> Alignment {
    sanitize_choice(raw, &Alignment::ALLOWED, Alignment::FALLBACK)
        .parse()
        .unwrap_or_default()
}
