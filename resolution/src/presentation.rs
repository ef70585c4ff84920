//! Mappings from sanitized choices to CSS values.
//!
//! Each function accepts the raw choice string so the default branch stays
//! reachable for values that bypassed sanitization.

use ec_core::Alignment;

/// `max-width` for the empty-category image.
pub fn image_max_width(image_size: &str) -> &'static str {
    match image_size {
        "small" => "150px",
        "large" => "400px",
        _ => "250px"
    }
}

/// Flexbox `justify-content` value for an alignment choice.
pub fn flex_justify(alignment: &str) -> &'static str {
    match alignment {
        "left" => "flex-start",
        "right" => "flex-end",
        _ => "center"
    }
}

/// `text-align` value; an empty choice reads as centered.
pub fn text_align_css(alignment: &str) -> &str {
    if alignment.is_empty() { Alignment::FALLBACK } else { alignment }
}
