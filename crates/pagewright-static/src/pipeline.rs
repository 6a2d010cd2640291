//! Page render pipeline.
//!
//! Resolves a document, splits its frontmatter, compiles the body with the
//! fixed plugin set, and packages the result as page props.

use std::path::{Path, PathBuf};

use serde::Serialize;

use pagewright_components::{ComponentError, ComponentRegistry};
use pagewright_mdx::{apply_colour_spans, parse_mdx, table_of_contents, FrontMatter, ParseError, TocEntry};

use crate::paths::{static_paths, PathsError, StaticPaths};
use crate::resolve::DocsRoot;

/// Message shown when no document exists for a path.
pub const NOT_FOUND_MESSAGE: &str = "Not found";

/// Props handed to the page template.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PageProps {
    /// A rendered document and its frontmatter.
    Rendered {
        source: RenderedSource,
        data: FrontMatter,
    },

    /// A user-visible error message.
    Error { error: String },
}

impl PageProps {
    /// Props for a path with no document.
    pub fn not_found() -> Self {
        Self::Error {
            error: NOT_FOUND_MESSAGE.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Error { error } if error == NOT_FOUND_MESSAGE)
    }
}

/// Compiled document body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedSource {
    /// Rendered HTML body
    pub html: String,

    /// Headings of the body, in document order
    pub toc: Vec<TocEntry>,
}

/// Errors that can occur while rendering a page.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    #[error(transparent)]
    Paths(#[from] PathsError),
}

/// Markdown/MDX compiler with a fixed plugin set.
///
/// Admonitions are expanded while parsing; the tree then goes through the
/// colour span transform, component expansion and heading anchors.
#[derive(Debug)]
pub struct Compiler {
    components: ComponentRegistry,
}

impl Compiler {
    pub fn new() -> Self {
        Self {
            components: ComponentRegistry::builtin(),
        }
    }

    /// Compile a full document source into props.
    pub fn compile(&self, source: &str) -> Result<(RenderedSource, FrontMatter), RenderError> {
        let doc = parse_mdx(source)?;

        let mut tree = doc.tree();
        let spans = apply_colour_spans(&mut tree);
        let components = self.components.expand(&mut tree)?;
        let toc = table_of_contents(&mut tree);

        tracing::debug!(
            "Compiled document: {} colour spans, {} component nodes, {} headings",
            spans,
            components,
            toc.len()
        );

        let html = tree.to_html();
        Ok((RenderedSource { html, toc }, doc.frontmatter))
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders pages from a docs directory.
#[derive(Debug)]
pub struct PageRenderer {
    docs: DocsRoot,
    compiler: Compiler,
}

impl PageRenderer {
    pub fn new(docs_dir: impl Into<PathBuf>) -> Self {
        Self {
            docs: DocsRoot::new(docs_dir),
            compiler: Compiler::new(),
        }
    }

    pub fn docs_dir(&self) -> &Path {
        self.docs.path()
    }

    /// Compute the props of the page at `segments`.
    ///
    /// A missing document is not an error: it yields
    /// [`PageProps::not_found`]. Read, frontmatter and compile failures
    /// are returned as errors.
    pub fn static_props<S: AsRef<str>>(&self, segments: &[S]) -> Result<PageProps, RenderError> {
        let document = self.docs.resolve(segments).map_err(|e| RenderError::Io {
            path: e.path.display().to_string(),
            source: e.source,
        })?;

        let Some(document) = document else {
            return Ok(PageProps::not_found());
        };

        let (source, data) = self.compiler.compile(&document.source)?;
        Ok(PageProps::Rendered { source, data })
    }

    /// Enumerate the pages to pre-render.
    pub fn static_paths(&self) -> Result<StaticPaths, RenderError> {
        Ok(static_paths(self.docs.path())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn renders_document_with_all_plugins() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("colours.mdx"),
            r#"---
title: Colour Lists
---

## Usage

This is {yellow}(#ffff00) text!

:::tip
Use <Badge text="hex" /> values.
:::

<Warning>

Keep alpha in mind.

</Warning>
"#,
        )
        .unwrap();

        let renderer = PageRenderer::new(temp.path());
        let props = renderer.static_props(&["colours"]).unwrap();

        let PageProps::Rendered { source, data } = props else {
            panic!("expected rendered props");
        };

        assert_eq!(data.title(), Some("Colour Lists"));
        assert!(source
            .html
            .contains(r#"This is <span style="color: #ffff00">yellow</span> text!"#));
        assert!(source.html.contains("admonition-tip"));
        assert!(source.html.contains(r#"<span class="badge">hex</span>"#));
        assert!(source.html.contains("callout-warning"));
        assert!(source.html.contains(r#"<h2 id="usage">Usage</h2>"#));
        assert_eq!(source.toc.len(), 1);
    }

    #[test]
    fn missing_document_yields_error_props() {
        let temp = tempdir().unwrap();

        let renderer = PageRenderer::new(temp.path());
        let props = renderer.static_props(&["does", "not", "exist"]).unwrap();

        assert!(props.is_not_found());
        assert_eq!(
            serde_json::to_value(&props).unwrap(),
            json!({ "error": "Not found" })
        );
    }

    #[test]
    fn serializes_rendered_props() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.md"), "---\ntitle: A\n---\nhi\n").unwrap();

        let renderer = PageRenderer::new(temp.path());
        let props = renderer.static_props(&["a"]).unwrap();

        assert_eq!(
            serde_json::to_value(&props).unwrap(),
            json!({
                "source": { "html": "<p>hi</p>\n", "toc": [] },
                "data": { "title": "A" }
            })
        );
    }

    #[test]
    fn frontmatter_errors_propagate() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("broken.md"), "---\ntitle: [oops\n---\n").unwrap();

        let renderer = PageRenderer::new(temp.path());
        let result = renderer.static_props(&["broken"]);

        assert!(matches!(result, Err(RenderError::Parse(_))));
    }

    #[test]
    fn read_errors_carry_the_document_path() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("binary.mdx"), [0xff, 0xfe, 0x00]).unwrap();

        let renderer = PageRenderer::new(temp.path());

        match renderer.static_props(&["binary"]) {
            Err(RenderError::Io { path, .. }) => assert!(path.ends_with("binary.mdx")),
            other => panic!("expected read error, got {:?}", other),
        }
    }

    #[test]
    fn component_errors_propagate() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("badge.mdx"), "A <Badge /> here\n").unwrap();

        let renderer = PageRenderer::new(temp.path());
        let result = renderer.static_props(&["badge"]);

        assert!(matches!(result, Err(RenderError::Component(_))));
    }
}
