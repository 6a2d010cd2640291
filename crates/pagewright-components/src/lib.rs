//! Document components for pagewright.
//!
//! Documents can use a fixed set of components by tag name (`<Warning>`,
//! `<Note>`, `<Deprecated>`, `<Badge />`). This crate scans raw markup for
//! those tags and renders them to static HTML.

pub mod builtin;
pub mod inline;
pub mod registry;
pub mod traits;

pub use builtin::{Badge, Callout, Deprecated};
pub use inline::{find_jsx_tags, html_escape, JsxTag, PropValue, Props, TagKind};
pub use registry::ComponentRegistry;
pub use traits::{Component, ComponentError};
