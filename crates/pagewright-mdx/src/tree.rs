//! In-memory syntax tree built from markdown events.
//!
//! The tree only lives for one render: it is built from the parser's event
//! stream, rewritten in place by transform passes, then flattened back into
//! events for the HTML writer.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd, TextMergeStream};

/// A node of the syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<'a> {
    /// A container (paragraph, heading, emphasis, list item, ...).
    Element {
        tag: Tag<'a>,
        end: TagEnd,
        children: Vec<Node<'a>>,
    },

    /// Anything without children: text, inline code, raw markup, breaks.
    Leaf(Event<'a>),
}

impl<'a> Node<'a> {
    /// Plain text leaf.
    pub fn text(value: impl Into<CowStr<'a>>) -> Self {
        Self::Leaf(Event::Text(value.into()))
    }

    /// Raw inline markup leaf, written to the output without escaping.
    pub fn inline_html(value: impl Into<CowStr<'a>>) -> Self {
        Self::Leaf(Event::InlineHtml(value.into()))
    }

    /// Paragraph container.
    pub fn paragraph(children: Vec<Node<'a>>) -> Self {
        Self::Element {
            tag: Tag::Paragraph,
            end: TagEnd::Paragraph,
            children,
        }
    }

    /// Text value if this is a text leaf.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Leaf(Event::Text(text)) => Some(&**text),
            _ => None,
        }
    }

    /// Children of a container; empty for leaves.
    pub fn children(&self) -> &[Node<'a>] {
        match self {
            Self::Element { children, .. } => children.as_slice(),
            Self::Leaf(_) => &[],
        }
    }

    /// Concatenated text content of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Leaf(Event::Text(text) | Event::Code(text)) => out.push_str(text),
            Self::Leaf(_) => {}
            Self::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }
}

/// Root of a parsed document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tree<'a> {
    pub children: Vec<Node<'a>>,
}

impl<'a> Tree<'a> {
    /// Parse markdown into a tree.
    pub fn parse(content: &'a str) -> Self {
        let parser = Parser::new_ext(content, markdown_options());
        Self::from_events(TextMergeStream::new(parser))
    }

    /// Build a tree from an event stream.
    ///
    /// Stray end events are dropped; containers left open when the stream
    /// ends have their children spliced into the parent.
    pub fn from_events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = Event<'a>>,
    {
        let mut stack: Vec<(Tag<'a>, Vec<Node<'a>>)> = Vec::new();
        let mut root: Vec<Node<'a>> = Vec::new();

        for event in events {
            match event {
                Event::Start(tag) => stack.push((tag, Vec::new())),
                Event::End(end) => {
                    let Some((tag, children)) = stack.pop() else {
                        continue;
                    };
                    let node = Node::Element { tag, end, children };
                    match stack.last_mut() {
                        Some((_, parent)) => parent.push(node),
                        None => root.push(node),
                    }
                }
                other => match stack.last_mut() {
                    Some((_, parent)) => parent.push(Node::Leaf(other)),
                    None => root.push(Node::Leaf(other)),
                },
            }
        }

        while let Some((_, children)) = stack.pop() {
            match stack.last_mut() {
                Some((_, parent)) => parent.extend(children),
                None => root.extend(children),
            }
        }

        Self { children: root }
    }

    /// Call `f` with the tag and children of every container, parents first.
    pub fn visit_elements_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Tag<'a>, &mut Vec<Node<'a>>),
    {
        visit_elements(&mut self.children, &mut f);
    }

    /// Call `f` on every leaf event, stopping at the first error.
    pub fn try_visit_leaves_mut<F, E>(&mut self, mut f: F) -> Result<(), E>
    where
        F: FnMut(&mut Event<'a>) -> Result<(), E>,
    {
        visit_leaves(&mut self.children, &mut f)
    }

    /// Flatten back into an event stream.
    pub fn into_events(self) -> Vec<Event<'a>> {
        let mut events = Vec::new();
        flatten(self.children, &mut events);
        events
    }

    /// Render the tree to HTML.
    pub fn to_html(self) -> String {
        let mut out = String::new();
        html::push_html(&mut out, self.into_events().into_iter());
        out
    }
}

/// Parser options shared by every render.
pub fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
}

fn visit_elements<'a, F>(nodes: &mut [Node<'a>], f: &mut F)
where
    F: FnMut(&mut Tag<'a>, &mut Vec<Node<'a>>),
{
    for node in nodes.iter_mut() {
        if let Node::Element { tag, children, .. } = node {
            f(tag, children);
            visit_elements(children, f);
        }
    }
}

fn visit_leaves<'a, F, E>(nodes: &mut [Node<'a>], f: &mut F) -> Result<(), E>
where
    F: FnMut(&mut Event<'a>) -> Result<(), E>,
{
    for node in nodes.iter_mut() {
        match node {
            Node::Leaf(event) => f(event)?,
            Node::Element { children, .. } => visit_leaves(children, f)?,
        }
    }
    Ok(())
}

fn flatten<'a>(nodes: Vec<Node<'a>>, out: &mut Vec<Event<'a>>) {
    for node in nodes {
        match node {
            Node::Leaf(event) => out.push(event),
            Node::Element { tag, end, children } => {
                out.push(Event::Start(tag));
                flatten(children, out);
                out.push(Event::End(end));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builds_paragraph_with_merged_text() {
        let tree = Tree::parse("Hello {warn}(#ff0000) world");

        assert_eq!(
            tree.children,
            vec![Node::paragraph(vec![Node::text("Hello {warn}(#ff0000) world")])]
        );
    }

    #[test]
    fn nests_inline_containers() {
        let tree = Tree::parse("a *b* c");

        let paragraph = &tree.children[0];
        assert_eq!(paragraph.children().len(), 3);
        assert_eq!(paragraph.children()[0].as_text(), Some("a "));
        assert_eq!(paragraph.children()[1].text_content(), "b");
        assert_eq!(paragraph.children()[2].as_text(), Some(" c"));
    }

    #[test]
    fn round_trips_to_same_html() {
        let source = "# Title\n\n- one\n- two `code`\n\n> quoted **bold**\n";

        let mut expected = String::new();
        html::push_html(&mut expected, Parser::new_ext(source, markdown_options()));

        assert_eq!(Tree::parse(source).to_html(), expected);
    }

    #[test]
    fn visits_nested_paragraphs() {
        let mut tree = Tree::parse("para\n\n- item\n\n  second para in item\n\n> quote\n");

        let mut paragraphs = 0;
        tree.visit_elements_mut(|tag, _| {
            if matches!(tag, Tag::Paragraph) {
                paragraphs += 1;
            }
        });

        assert_eq!(paragraphs, 4);
    }

    #[test]
    fn tolerates_unbalanced_events() {
        let tree = Tree::from_events(vec![
            Event::End(TagEnd::Paragraph),
            Event::Start(Tag::Paragraph),
            Event::Text("dangling".into()),
        ]);

        assert_eq!(tree.children, vec![Node::text("dangling")]);
    }
}
