//! # Display Configuration
//!
//! The resolved, sanitized empty-category configuration handed to the
//! presentation layer.

use ec_core::{Alignment, ImageSize};
use serde::Serialize;
use serde_json::{Value, json};

use crate::presentation::{flex_justify, image_max_width, text_align_css};

/// Resolved empty-category message with its display options.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Immutable value produced by the resolver. Only the message body is
/// trusted HTML; every other field has already been sanitized.
///
/// ## Usage
/// ```rust
/// use ec_core::{Alignment, ImageSize};
/// use resolution::DisplayConfig;
///
/// let config = DisplayConfig::new("<p>Nothing here yet</p>", "", "notice")
///     .with_image_size(ImageSize::Large)
///     .with_text_align(Alignment::Left);
///
/// assert!(config.has_content());
/// assert_eq!(config.image_max_width(), "400px");
/// assert_eq!(config.text_align_css(), "left");
/// ```
///
/// ## Fields
/// - `message`: Raw HTML body, empty when nothing resolved
/// - `side_data_url`: Image URL of the owning node, empty when unavailable
/// - `css_class`: Sanitized class list
/// - `image_size`, `image_align`, `text_align`: Sanitized layout choices
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayConfig {
    message: String,
    side_data_url: String,
    css_class: String,
    image_size: ImageSize,
    image_align: Alignment,
    text_align: Alignment
}

impl DisplayConfig {
    pub fn new(
        message: impl Into<String>,
        side_data_url: impl Into<String>,
        css_class: impl Into<String>
    ) -> Self {
        Self {
            message: message.into(),
            side_data_url: side_data_url.into(),
            css_class: css_class.into(),
            ..Self::default()
        }
    }

    /// The configuration produced when nothing resolves.
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_image_size(mut self, image_size: ImageSize) -> Self {
        self.image_size = image_size;
        self
    }

    #[must_use]
    pub fn with_image_align(mut self, image_align: Alignment) -> Self {
        self.image_align = image_align;
        self
    }

    #[must_use]
    pub fn with_text_align(mut self, text_align: Alignment) -> Self {
        self.text_align = text_align;
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn side_data_url(&self) -> &str {
        &self.side_data_url
    }

    pub fn css_class(&self) -> &str {
        &self.css_class
    }

    pub fn image_size(&self) -> ImageSize {
        self.image_size
    }

    pub fn image_align(&self) -> Alignment {
        self.image_align
    }

    pub fn text_align(&self) -> Alignment {
        self.text_align
    }

    pub fn has_message(&self) -> bool {
        !self.message.is_empty()
    }

    pub fn has_side_data(&self) -> bool {
        !self.side_data_url.is_empty()
    }

    /// Alias of [`Self::has_side_data`]; side data is the category image.
    pub fn has_image(&self) -> bool {
        self.has_side_data()
    }

    pub fn has_content(&self) -> bool {
        self.has_message() || self.has_side_data()
    }

    pub fn image_max_width(&self) -> &'static str {
        image_max_width(self.image_size.as_ref())
    }

    pub fn image_justify(&self) -> &'static str {
        flex_justify(self.image_align.as_ref())
    }

    pub fn text_align_css(&self) -> &str {
        text_align_css(self.text_align.as_ref())
    }

    /// Flat key/value view consumed by templates.
    ///
    /// Carries the stored fields plus the derived CSS values and content
    /// predicates, so templates never re-derive them.
    pub fn template_context(&self) -> Value {
        json!({
            "message": self.message,
            "side_data_url": self.side_data_url,
            "css_class": self.css_class,
            "image_size": self.image_size,
            "image_align": self.image_align,
            "text_align": self.text_align,
            "image_max_width": self.image_max_width(),
            "image_justify": self.image_justify(),
            "text_align_css": self.text_align_css(),
            "has_message": self.has_message(),
            "has_image": self.has_image(),
            "has_content": self.has_content()
        })
    }
}
