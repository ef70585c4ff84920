//! Description of the custom-field set attached to categories.
//!
//! Installing the schema into a host system is a one-time migration owned by
//! the host. This module only describes it so that storage backends and admin
//! surfaces agree on names, kinds and allowed options.

use serde::Serialize;
use strum::{Display, EnumString};

use crate::fields;
use crate::types::{Alignment, ImageSize};

/// Editor kind of a custom field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FieldKind {
    Html,
    Media,
    Select,
    Text,
    Bool
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDefinition {
    pub name: &'static str,
    pub kind: FieldKind,
    pub label: &'static str,
    pub help: &'static str,
    /// Allowed values for `Select` fields; empty otherwise.
    pub options: &'static [&'static str],
    /// Sort position in the admin form.
    pub position: u16
}

/// Name of the custom-field set holding all fields.
pub const FIELD_SET_NAME: &str = "empty_category";

pub fn field_definitions() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition {
            name: fields::MESSAGE,
            kind: FieldKind::Html,
            label: "Empty category message",
            help: "HTML text shown when no products exist in this category.",
            options: &[],
            position: 10
        },
        FieldDefinition {
            name: fields::SIDE_DATA_REF,
            kind: FieldKind::Media,
            label: "Image",
            help: "Optional image shown when the category is empty.",
            options: &[],
            position: 20
        },
        FieldDefinition {
            name: fields::IMAGE_SIZE,
            kind: FieldKind::Select,
            label: "Image size",
            help: "Maximum width of the image.",
            options: &ImageSize::ALLOWED,
            position: 25
        },
        FieldDefinition {
            name: fields::IMAGE_ALIGN,
            kind: FieldKind::Select,
            label: "Image alignment",
            help: "",
            options: &Alignment::ALLOWED,
            position: 26
        },
        FieldDefinition {
            name: fields::TEXT_ALIGN,
            kind: FieldKind::Select,
            label: "Text alignment",
            help: "",
            options: &Alignment::ALLOWED,
            position: 27
        },
        FieldDefinition {
            name: fields::CSS_CLASS,
            kind: FieldKind::Text,
            label: "CSS classes",
            help: "Additional CSS classes for custom styling (e.g. \"my-class another-class\").",
            options: &[],
            position: 30
        },
        FieldDefinition {
            name: fields::INHERIT,
            kind: FieldKind::Bool,
            label: "Inherit from parent category",
            help: "If enabled and no own text is defined, the parent category text is used.",
            options: &[],
            position: 40
        }
    ]
}
