//! Component registry for looking up components by tag name.
//!
//! The registry expands component tags found in raw markup nodes of a
//! document tree into the static HTML each component renders to.

use std::collections::HashMap;
use std::fmt;

use pulldown_cmark::Event;

use pagewright_mdx::Tree;

use crate::builtin::{Badge, Callout, Deprecated};
use crate::inline::{find_jsx_tags, TagKind};
use crate::traits::{Component, ComponentError};

/// A registry of components, keyed by their case-sensitive tag name.
#[derive(Default)]
pub struct ComponentRegistry {
    components: HashMap<&'static str, Box<dyn Component>>,
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("components", &self.names())
            .finish()
    }
}

impl ComponentRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the components every document can use.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Callout::new("Warning", "warning"));
        registry.register(Callout::new("Note", "note"));
        registry.register(Deprecated);
        registry.register(Badge);
        registry
    }

    /// Add a component, replacing any with the same name.
    pub fn register(&mut self, component: impl Component + 'static) {
        self.components
            .insert(component.name(), Box::new(component));
    }

    /// Look up a component by name.
    pub fn get(&self, name: &str) -> Option<&dyn Component> {
        self.components.get(name).map(|c| c.as_ref())
    }

    /// Check if a component exists.
    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// Get all registered component names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.components.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Replace registered component tags in a markup fragment.
    ///
    /// Returns `None` when the fragment holds no registered tag. Tags of
    /// unknown components are left as they are.
    pub fn render_markup(&self, markup: &str) -> Result<Option<String>, ComponentError> {
        let mut out = String::with_capacity(markup.len());
        let mut last = 0;
        let mut replaced = false;

        for tag in find_jsx_tags(markup) {
            let Some(component) = self.get(&tag.component) else {
                continue;
            };

            out.push_str(&markup[last..tag.range.start]);
            match tag.kind {
                TagKind::Open => out.push_str(&component.open(&tag.props)?),
                TagKind::Close => out.push_str(component.close()),
                TagKind::SelfClosing => {
                    out.push_str(&component.open(&tag.props)?);
                    out.push_str(component.close());
                }
            }
            last = tag.range.end;
            replaced = true;
        }

        if !replaced {
            return Ok(None);
        }

        out.push_str(&markup[last..]);
        Ok(Some(out))
    }

    /// Expand component tags in every raw markup node of the tree.
    ///
    /// Returns the number of nodes rewritten.
    pub fn expand(&self, tree: &mut Tree<'_>) -> Result<usize, ComponentError> {
        let mut rewritten = 0;

        tree.try_visit_leaves_mut(|event| {
            let rendered = match event {
                Event::Html(markup) | Event::InlineHtml(markup) => self.render_markup(markup)?,
                _ => None,
            };

            if let Some(rendered) = rendered {
                *event = match event {
                    Event::Html(_) => Event::Html(rendered.into()),
                    _ => Event::InlineHtml(rendered.into()),
                };
                rewritten += 1;
            }

            Ok::<_, ComponentError>(())
        })?;

        Ok(rewritten)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_registry_has_components() {
        let registry = ComponentRegistry::builtin();

        assert_eq!(registry.names(), ["Badge", "Deprecated", "Note", "Warning"]);
        assert!(registry.contains("Warning"));
        assert!(!registry.contains("warning"));
    }

    #[test]
    fn renders_markup_fragment() {
        let registry = ComponentRegistry::builtin();

        let out = registry
            .render_markup(r#"before <Badge text="new" /> <Unknown /> after"#)
            .unwrap();

        assert_eq!(
            out.as_deref(),
            Some(r#"before <span class="badge">new</span> <Unknown /> after"#)
        );
    }

    #[test]
    fn leaves_unregistered_markup_alone() {
        let registry = ComponentRegistry::builtin();

        assert_eq!(registry.render_markup("<div><Custom></div>").unwrap(), None);
    }

    #[test]
    fn expands_block_components_in_tree() {
        let registry = ComponentRegistry::builtin();
        let source = "<Warning>\n\nDo **not** call this in a loop.\n\n</Warning>\n";

        let mut tree = Tree::parse(source);
        let rewritten = registry.expand(&mut tree).unwrap();
        let html = tree.to_html();

        assert_eq!(rewritten, 2);
        assert!(html.starts_with(r#"<div class="callout callout-warning">"#));
        assert!(html.contains("<p>Do <strong>not</strong> call this in a loop.</p>"));
        assert!(html.trim_end().ends_with("</div>"));
    }

    #[test]
    fn expands_inline_components_in_tree() {
        let registry = ComponentRegistry::builtin();

        let mut tree = Tree::parse(r#"Status: <Badge text="stable" /> today"#);
        registry.expand(&mut tree).unwrap();

        assert_eq!(
            tree.to_html(),
            "<p>Status: <span class=\"badge\">stable</span> today</p>\n"
        );
    }

    #[test]
    fn propagates_component_errors() {
        let registry = ComponentRegistry::builtin();

        let mut tree = Tree::parse("A <Badge /> without text");
        let result = registry.expand(&mut tree);

        assert!(matches!(result, Err(ComponentError::MissingProp { .. })));
    }

    #[test]
    fn empty_registry_changes_nothing() {
        let registry = ComponentRegistry::new();

        let mut tree = Tree::parse("<Warning>\n\ntext\n\n</Warning>\n");
        assert_eq!(registry.expand(&mut tree).unwrap(), 0);
    }
}
