//! MDX document parser.

use crate::admonition::expand_admonitions;
use crate::frontmatter::{extract_frontmatter, FrontMatter, FrontmatterError};
use crate::tree::Tree;

/// A parsed MDX document.
#[derive(Debug, Clone)]
pub struct ParsedDoc {
    /// Parsed frontmatter (empty when the document has none)
    pub frontmatter: FrontMatter,

    /// Markdown content (without frontmatter, admonitions expanded)
    pub content: String,
}

impl ParsedDoc {
    /// Build the syntax tree of the body.
    pub fn tree(&self) -> Tree<'_> {
        Tree::parse(&self.content)
    }
}

/// Errors that can occur when parsing MDX.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] FrontmatterError),
}

/// Parse an MDX document.
///
/// Splits the frontmatter from the body, then rewrites admonition
/// containers so the body is ready for the markdown parser.
pub fn parse_mdx(source: &str) -> Result<ParsedDoc, ParseError> {
    let (frontmatter, content) = extract_frontmatter(source)?;

    Ok(ParsedDoc {
        frontmatter,
        content: expand_admonitions(content).into_owned(),
    })
}
