//! Table of contents extraction.

use std::collections::HashMap;

use pulldown_cmark::Tag;
use serde::Serialize;

use crate::tree::Tree;

/// A table of contents entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TocEntry {
    /// Heading text
    pub title: String,
    /// Anchor ID
    pub id: String,
    /// Heading level (1-6)
    pub level: u8,
}

/// Collect headings and give each one a unique anchor id.
///
/// Headings that already carry an explicit id keep it. Repeated slugs get a
/// numeric suffix (`usage`, `usage-1`, ...).
pub fn table_of_contents(tree: &mut Tree<'_>) -> Vec<TocEntry> {
    let mut toc = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    tree.visit_elements_mut(|tag, children| {
        let Tag::Heading { level, id, .. } = tag else {
            return;
        };

        let title: String = children.iter().map(|c| c.text_content()).collect();
        let existing = id.as_ref().map(|s| s.to_string());
        let anchor = match existing {
            Some(existing) => existing,
            None => {
                let base = slugify(&title);
                let count = seen.entry(base.clone()).or_insert(0);
                let anchor = if *count == 0 {
                    base
                } else {
                    format!("{base}-{count}")
                };
                *count += 1;
                *id = Some(anchor.clone().into());
                anchor
            }
        };

        toc.push(TocEntry {
            title,
            id: anchor,
            level: *level as u8,
        });
    });

    toc
}

/// Convert a heading to a URL-safe slug.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_headings_and_assigns_ids() {
        let mut tree = Tree::parse("# GetPlayerName\n\n## Parameters\n\ntext\n\n### Returns `1`\n");

        let toc = table_of_contents(&mut tree);

        assert_eq!(toc.len(), 3);
        assert_eq!(toc[0].title, "GetPlayerName");
        assert_eq!(toc[0].id, "getplayername");
        assert_eq!(toc[0].level, 1);
        assert_eq!(toc[2].title, "Returns 1");
        assert_eq!(toc[2].level, 3);

        let html = tree.to_html();
        assert!(html.contains(r#"<h2 id="parameters">Parameters</h2>"#));
    }

    #[test]
    fn deduplicates_repeated_slugs() {
        let mut tree = Tree::parse("## Example\n\n## Example\n\n## Example\n");

        let ids: Vec<_> = table_of_contents(&mut tree)
            .into_iter()
            .map(|e| e.id)
            .collect();

        assert_eq!(ids, ["example", "example-1", "example-2"]);
    }

    #[test]
    fn slugify_works() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("API Reference"), "api-reference");
        assert_eq!(slugify("Button (Primary)"), "button-primary");
        assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
    }
}
