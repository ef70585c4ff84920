//! # Empty-Category Core
//!
//! Shared types and traits for resolving the message a storefront shows when
//! a category has no products.
//!
//! This crate provides:
//! - The in-memory category tree node (`Node`) with its raw custom fields
//! - Side-data records (image metadata) attached to nodes out-of-band
//! - The stable field-name contract and the field schema description
//! - Async collaborator traits for batch-fetching nodes and side-data
//!
//! # Best Practices
//!
//! - Uses Rust Edition 2024
//! - Absent or mistyped raw fields read as their documented default

pub mod fields;
pub mod schema;
pub mod traits;
pub mod types;

// Re-export commonly used types for convenience
pub use schema::{FieldDefinition, FieldKind, field_definitions};
pub use traits::{NodeRepository, SideDataRepository};
pub use types::{Alignment, ImageSize, Node, RawFields, SideDataRecord};
