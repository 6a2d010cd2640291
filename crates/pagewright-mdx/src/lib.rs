//! MDX document parsing for pagewright.
//!
//! This crate splits YAML frontmatter from a document body, builds an
//! in-memory syntax tree from the markdown, and provides the text transforms
//! run over it before rendering: admonition containers, colour spans and
//! heading anchors.

pub mod admonition;
pub mod colour;
pub mod frontmatter;
pub mod parser;
pub mod toc;
pub mod tree;

pub use admonition::expand_admonitions;
pub use colour::apply_colour_spans;
pub use frontmatter::{FrontMatter, FrontmatterError};
pub use parser::{parse_mdx, ParseError, ParsedDoc};
pub use toc::{table_of_contents, TocEntry};
pub use tree::{Node, Tree};
