//! Persisted custom-field names.
//!
//! The storage layer and the admin surface must use these names verbatim.

/// Rich-text message shown for an empty category.
pub const MESSAGE: &str = "message";

/// Identifier of the side-data record (image) to show with the message.
pub const SIDE_DATA_REF: &str = "side_data_ref";

/// Extra CSS classes for the message container.
pub const CSS_CLASS: &str = "css_class";

/// Image size choice: `small`, `medium` or `large`.
pub const IMAGE_SIZE: &str = "image_size";

/// Image alignment choice: `left`, `center` or `right`.
pub const IMAGE_ALIGN: &str = "image_align";

/// Text alignment choice: `left`, `center` or `right`.
pub const TEXT_ALIGN: &str = "text_align";

/// Inherit from the parent category when no own message is set.
pub const INHERIT: &str = "inherit";

pub const ALL: [&str; 7] = [
    MESSAGE,
    SIDE_DATA_REF,
    CSS_CLASS,
    IMAGE_SIZE,
    IMAGE_ALIGN,
    TEXT_ALIGN,
    INHERIT
];
