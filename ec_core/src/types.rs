use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use strum::{AsRefStr, Display, EnumString};

use crate::fields;

/// Image size choice for the empty-category image.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ImageSize {
    Small,
    #[default]
    Medium,
    Large
}

impl ImageSize {
    /// Raw values accepted from the `image_size` field.
    pub const ALLOWED: [&'static str; 3] = ["small", "medium", "large"];

    /// Raw value substituted for anything outside [`Self::ALLOWED`].
    pub const FALLBACK: &'static str = "medium";
}

/// Horizontal alignment used for both the image and the message text.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right
}

impl Alignment {
    /// Raw values accepted from the `image_align` and `text_align` fields.
    pub const ALLOWED: [&'static str; 3] = ["left", "center", "right"];

    /// Raw value substituted for anything outside [`Self::ALLOWED`].
    pub const FALLBACK: &'static str = "center";
}

/// Raw, untrusted custom fields of a category.
///
/// Values are untyped JSON. The accessors never fail: absent or wrongly typed
/// values read as the default for the field's type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawFields(Map<String, Value>);

impl RawFields {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builds fields from any JSON value; non-objects (including `null`) yield
    /// an empty set.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::new()
        }
    }

    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<Value>) {
        self.0.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// String value of `name`, or `""` when absent or not a string.
    pub fn text(&self, name: &str) -> &str {
        self.0.get(name).and_then(Value::as_str).unwrap_or("")
    }

    /// `true` only when `name` holds exactly the JSON boolean `true`.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.0.get(name), Some(Value::Bool(true)))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

fn fields_or_empty<'de, D>(deserializer: D) -> Result<RawFields, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(RawFields::from_value(Value::deserialize(deserializer)?))
}

/// Auxiliary record referenced from a node's `side_data_ref` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideDataRecord {
    pub id: String,
    pub url: String
}

impl SideDataRecord {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into()
        }
    }
}

/// One category in the tree.
///
/// `parent` and `side_data` are transient: they are never persisted and are
/// only populated by the chain loader for the duration of a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,

    #[serde(default)]
    pub parent_id: Option<String>,

    /// Ancestor ids from the root to the immediate parent, e.g. `|a|b|c|`.
    #[serde(default)]
    pub path: Option<String>,

    #[serde(default, deserialize_with = "fields_or_empty")]
    pub fields: RawFields,

    #[serde(skip)]
    pub parent: Option<Box<Node>>,

    /// Side-data records keyed by the reference found in `fields`.
    #[serde(skip)]
    pub side_data: HashMap<String, SideDataRecord>
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_fields(mut self, fields: RawFields) -> Self {
        self.fields = fields;
        self
    }

    /// Materializes `parent` and keeps `parent_id` consistent with it.
    #[must_use]
    pub fn with_parent(mut self, parent: Node) -> Self {
        self.parent_id = Some(parent.id.clone());
        self.parent = Some(Box::new(parent));
        self
    }

    pub fn parent(&self) -> Option<&Node> {
        self.parent.as_deref()
    }

    pub fn message(&self) -> &str {
        self.fields.text(fields::MESSAGE)
    }

    pub fn side_data_ref(&self) -> &str {
        self.fields.text(fields::SIDE_DATA_REF)
    }

    pub fn inherits(&self) -> bool {
        self.fields.flag(fields::INHERIT)
    }

    pub fn attach_side_data(&mut self, record: SideDataRecord) {
        self.side_data.insert(record.id.clone(), record);
    }

    pub fn attached_side_data(&self, reference: &str) -> Option<&SideDataRecord> {
        self.side_data.get(reference)
    }

    /// Non-empty segments of the ancestor path, root first.
    pub fn path_segments(&self, delimiter: &str) -> Vec<String> {
        match self.path.as_deref() {
            Some(path) if !path.is_empty() => path
                .split(delimiter)
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
            _ => Vec::new()
        }
    }

    /// Iterates over this node and its materialized ancestors, leaf first.
    pub fn chain(&self) -> impl Iterator<Item = &Node> {
        std::iter::successors(Some(self), |node| node.parent())
    }
}
