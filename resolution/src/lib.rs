//! # Empty-Category Resolution
//!
//! Resolves the message a storefront shows for a category without products.
//!
//! - [`ChainLoader`] batch-fetches the ancestors and side data of a leaf
//! - [`Resolver`] walks the loaded chain and returns a [`DisplayConfig`]
//! - [`sanitizer`] and [`presentation`] normalize untrusted field values
//!
//! Resolution never fails. Only the loader's collaborator calls can return
//! an error.

pub mod loader;
pub mod message;
pub mod presentation;
pub mod resolver;
pub mod sanitizer;
pub mod service;
pub mod telemetry;

pub use loader::{ChainLoader, LoadReport, is_relevant};
pub use message::DisplayConfig;
pub use presentation::{flex_justify, image_max_width, text_align_css};
pub use resolver::{MAX_DEPTH, Resolver};
pub use sanitizer::{sanitize_choice, sanitize_css_class};
pub use service::EmptyCategoryService;
pub use telemetry::Telemetry;
