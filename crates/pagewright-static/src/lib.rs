//! Page resolution, rendering and static site generation for pagewright.
//!
//! Resolves documents under a docs root, compiles them into page props, and
//! pre-renders every document into a static site.

pub mod assets;
pub mod builder;
pub mod paths;
pub mod pipeline;
pub mod resolve;
pub mod templates;

pub use assets::AssetPipeline;
pub use builder::{page_dir, BuildConfig, BuildError, BuildResult, StaticBuilder};
pub use paths::{static_paths, url_path, url_segments, PathsError, StaticPaths};
pub use pipeline::{Compiler, PageProps, PageRenderer, RenderError, RenderedSource, NOT_FOUND_MESSAGE};
pub use resolve::{is_valid_segment, DocFormat, DocsRoot, Document, ReadError};
pub use templates::{build_navigation, NavItem, Site, TemplateEngine};
