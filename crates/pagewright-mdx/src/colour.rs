//! Colour span transform.
//!
//! Rewrites inline markers of the form `{label}(#rrggbb)` inside paragraphs
//! into a styled span around the label:
//!
//! ```text
//! This is {yellow}(#ffff00) text!
//! ```

use std::sync::LazyLock;

use pulldown_cmark::{Event, Tag};
use regex::Regex;

use crate::tree::{Node, Tree};

/// Marker pattern. Only six lowercase hex digits are accepted.
static COLOUR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(.+?)\}\(#([a-f0-9]{6})\)").expect("Invalid colour marker regex")
});

/// Markup closing a colour span.
pub const SPAN_CLOSE: &str = "</span>";

/// Markup opening a colour span for `hex` (six digits, no `#`).
pub fn span_open(hex: &str) -> String {
    format!(r##"<span style="color: #{hex}">"##)
}

/// Apply the colour transform to every paragraph in the tree.
///
/// Tight list items hold their inline content directly, without a
/// paragraph, so their text children are transformed as well.
///
/// Returns the number of markers replaced.
pub fn apply_colour_spans(tree: &mut Tree<'_>) -> usize {
    let mut replaced = 0;
    tree.visit_elements_mut(|tag, children| {
        if matches!(tag, Tag::Paragraph | Tag::Item) {
            replaced += splice_colour_spans(children);
        }
    });
    replaced
}

/// Replace markers in the text children of one paragraph.
///
/// Each matching text child is swapped for its expansion and the cursor
/// moves past every inserted node, so a later child always lands after the
/// nodes inserted for an earlier one and inserted nodes are never scanned.
pub fn splice_colour_spans<'a>(children: &mut Vec<Node<'a>>) -> usize {
    let mut replaced = 0;
    let mut index = 0;

    while index < children.len() {
        let expansion = match &children[index] {
            Node::Leaf(Event::Text(text)) => expand_markers(text),
            _ => None,
        };

        match expansion {
            Some((nodes, count)) => {
                let inserted = nodes.len();
                children.splice(index..=index, nodes);
                index += inserted;
                replaced += count;
            }
            None => index += 1,
        }
    }

    replaced
}

/// Expand every marker in `text`, left to right.
///
/// Returns `None` when the text holds no marker.
fn expand_markers<'a>(text: &str) -> Option<(Vec<Node<'a>>, usize)> {
    let mut nodes = Vec::new();
    let mut last = 0;
    let mut count = 0;

    for caps in COLOUR_RE.captures_iter(text) {
        let (Some(whole), Some(label), Some(hex)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };

        push_text(&mut nodes, &text[last..whole.start()]);
        nodes.push(Node::inline_html(span_open(hex.as_str())));
        nodes.push(Node::text(label.as_str().to_string()));
        nodes.push(Node::inline_html(SPAN_CLOSE));

        last = whole.end();
        count += 1;
    }

    if count == 0 {
        return None;
    }

    push_text(&mut nodes, &text[last..]);
    Some((nodes, count))
}

fn push_text<'a>(nodes: &mut Vec<Node<'a>>, text: &str) {
    if !text.is_empty() {
        nodes.push(Node::text(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn transform(source: &str) -> (Vec<Node<'_>>, usize) {
        let mut tree = Tree::parse(source);
        let count = apply_colour_spans(&mut tree);
        (tree.children, count)
    }

    #[test]
    fn wraps_single_marker() {
        let (nodes, count) = transform("Hello {warn}(#ff0000) world");

        assert_eq!(count, 1);
        assert_eq!(
            nodes,
            vec![Node::paragraph(vec![
                Node::text("Hello "),
                Node::inline_html(r#"<span style="color: #ff0000">"#),
                Node::text("warn"),
                Node::inline_html("</span>"),
                Node::text(" world"),
            ])]
        );
    }

    #[test]
    fn wraps_multiple_markers_in_order() {
        let (nodes, count) = transform("{a}(#000000) and {b}(#ffffff)!");

        assert_eq!(count, 2);
        assert_eq!(
            nodes,
            vec![Node::paragraph(vec![
                Node::inline_html(r#"<span style="color: #000000">"#),
                Node::text("a"),
                Node::inline_html("</span>"),
                Node::text(" and "),
                Node::inline_html(r#"<span style="color: #ffffff">"#),
                Node::text("b"),
                Node::inline_html("</span>"),
                Node::text("!"),
            ])]
        );
    }

    #[test]
    fn later_children_stay_after_insertions() {
        let (nodes, count) = transform("{x}(#123abc) *mid* {y}(#abc123) end");

        assert_eq!(count, 2);
        let paragraph = nodes[0].children();
        assert_eq!(paragraph.len(), 10);
        assert_eq!(paragraph[1].as_text(), Some("x"));
        assert_eq!(paragraph[3].as_text(), Some(" "));
        assert_eq!(paragraph[4].text_content(), "mid");
        assert_eq!(paragraph[5].as_text(), Some(" "));
        assert_eq!(paragraph[7].as_text(), Some("y"));
        assert_eq!(paragraph[8], Node::inline_html("</span>"));
        assert_eq!(paragraph[9].as_text(), Some(" end"));
    }

    #[test]
    fn malformed_markers_pass_through() {
        for source in [
            "{short}(#fffff)",
            "{long}(#fffffff)",
            "{open}(#ffffff",
            "{upper}(#FFFFFF)",
            "{nohash}(ffffff)",
        ] {
            let (nodes, count) = transform(source);

            assert_eq!(count, 0, "{source}");
            assert_eq!(nodes, vec![Node::paragraph(vec![Node::text(source)])]);
        }
    }

    #[test]
    fn ignores_code_and_headings() {
        let (nodes, count) = transform("# {h}(#ff0000)\n\n`{c}(#ff0000)`");

        assert_eq!(count, 0);
        assert_eq!(nodes[0].text_content(), "{h}(#ff0000)");
    }

    #[test]
    fn reaches_paragraphs_in_lists() {
        let source = "- {item}(#00ff00)\n\n  more\n";

        let mut tree = Tree::parse(source);
        let count = apply_colour_spans(&mut tree);

        assert_eq!(count, 1);
        assert!(tree.to_html().contains(r#"<span style="color: #00ff00">item</span>"#));
    }

    #[test]
    fn reaches_tight_list_items() {
        let mut tree = Tree::parse("- {red}(#ff0000)\n- plain\n");
        let count = apply_colour_spans(&mut tree);

        assert_eq!(count, 1);
        assert_eq!(
            tree.to_html(),
            "<ul>\n<li><span style=\"color: #ff0000\">red</span></li>\n<li>plain</li>\n</ul>\n"
        );
    }

    #[test]
    fn reaches_tight_items_with_nested_lists() {
        let mut tree = Tree::parse("- {outer}(#000000)\n  - {inner}(#ffffff)\n");
        let count = apply_colour_spans(&mut tree);
        let html = tree.to_html();

        assert_eq!(count, 2);
        assert!(html.contains(r#"<span style="color: #000000">outer</span>"#));
        assert!(html.contains(r#"<span style="color: #ffffff">inner</span>"#));
    }

    #[test]
    fn renders_escaped_label() {
        let mut tree = Tree::parse("{a & b}(#ff0000)");
        apply_colour_spans(&mut tree);

        assert_eq!(
            tree.to_html(),
            "<p><span style=\"color: #ff0000\">a &amp; b</span></p>\n"
        );
    }
}
