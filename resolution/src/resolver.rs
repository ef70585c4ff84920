//! # Message Resolver
//!
//! Walks a materialized ancestor chain to find the node that owns the
//! empty-category message and builds its [`DisplayConfig`].

use config::ResolverConfig;
use ec_core::{Node, fields};
use tracing::{debug, trace};

use crate::message::DisplayConfig;
use crate::sanitizer::{sanitize_alignment, sanitize_css_class, sanitize_image_size};
use crate::telemetry::Telemetry;

/// Maximum number of inheritance hops followed above the starting node.
pub const MAX_DEPTH: usize = 10;

/// Resolves the effective empty-category configuration of a node.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Ownership beats inheritance: the first node on the chain with a non-empty
/// message owns the whole configuration, including image, classes and
/// alignment. Inheritance is followed only while the current node carries
/// the inherit flag and has a materialized parent.
///
/// ## Usage
/// ```rust
/// use ec_core::{Node, RawFields, fields};
/// use resolution::Resolver;
///
/// let parent = Node::new("shoes").with_fields(
///     RawFields::new().with(fields::MESSAGE, "<p>Back soon</p>")
/// );
/// let leaf = Node::new("sandals")
///     .with_fields(RawFields::new().with(fields::INHERIT, true))
///     .with_parent(parent);
///
/// let config = Resolver::default().resolve(&leaf);
/// assert_eq!(config.message(), "<p>Back soon</p>");
/// ```
///
/// ## Guarantees
/// - Never fails and never panics; every dead end yields [`DisplayConfig::empty`]
/// - Examines at most `max_depth + 1` nodes
/// - Pure: the same chain always resolves to the same configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolver {
    max_depth: usize
}

impl Default for Resolver {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH
        }
    }
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::with_max_depth(config.max_depth)
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn resolve(&self, node: &Node) -> DisplayConfig {
        let mut current = node;
        let mut depth = 0;

        loop {
            if depth >= self.max_depth {
                debug!(
                    node_id = %node.id,
                    max_depth = self.max_depth,
                    "Inheritance depth limit reached, using empty message"
                );
                Telemetry::record_depth_limit();
                Telemetry::record_resolution("depth_limit");
                return DisplayConfig::empty();
            }

            if !current.message().is_empty() {
                trace!(node_id = %node.id, owner_id = %current.id, depth, "Resolved empty-category message");
                Telemetry::record_resolution(if depth == 0 { "owned" } else { "inherited" });
                return build_config(current);
            }

            match current.parent() {
                Some(parent) if current.inherits() => {
                    current = parent;
                    depth += 1;
                }
                _ => {
                    Telemetry::record_resolution("empty");
                    return DisplayConfig::empty();
                }
            }
        }
    }

    /// Resolves an optional node; `None` yields the empty configuration.
    pub fn resolve_optional(&self, node: Option<&Node>) -> DisplayConfig {
        match node {
            Some(node) => self.resolve(node),
            None => DisplayConfig::empty()
        }
    }
}

fn build_config(owner: &Node) -> DisplayConfig {
    let raw = &owner.fields;

    DisplayConfig::new(
        owner.message(),
        side_data_url(owner),
        sanitize_css_class(raw.text(fields::CSS_CLASS))
    )
    .with_image_size(sanitize_image_size(raw.text(fields::IMAGE_SIZE)))
    .with_image_align(sanitize_alignment(raw.text(fields::IMAGE_ALIGN)))
    .with_text_align(sanitize_alignment(raw.text(fields::TEXT_ALIGN)))
}

/// URL of the side data attached to `owner`, empty when it was never loaded.
fn side_data_url(owner: &Node) -> &str {
    let reference = owner.side_data_ref();
    if reference.is_empty() {
        return "";
    }

    owner
        .attached_side_data(reference)
        .map_or("", |record| record.url.as_str())
}
