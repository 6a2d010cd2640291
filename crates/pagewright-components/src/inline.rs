//! JSX tag scanner for raw markup in documents.
//!
//! Finds component tags like `<Warning>`, `</Warning>` and
//! `<Badge text="new" />` inside HTML fragments and extracts their props.

use regex::Regex;
use std::collections::HashMap;
use std::ops::Range;
use std::sync::LazyLock;

/// Shape of a component tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `<Name ...>`
    Open,
    /// `</Name>`
    Close,
    /// `<Name ... />`
    SelfClosing,
}

/// A component tag found in a markup fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct JsxTag {
    /// Tag shape
    pub kind: TagKind,

    /// Component name (e.g., "Warning")
    pub component: String,

    /// Props as key-value pairs
    pub props: Props,

    /// Byte range of the whole tag in the scanned fragment
    pub range: Range<usize>,
}

/// Props of a component tag.
pub type Props = HashMap<String, PropValue>;

/// A prop value from JSX.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// String literal: since="0.3.7"
    String(String),
    /// Boolean (presence): inline
    Boolean(bool),
    /// Expression: colour={theme.red}
    Expression(String),
}

impl PropValue {
    /// Get as string if it's a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Find every component tag in `source`, in order.
///
/// Only capitalised names are component tags; lowercase names are plain
/// HTML and are skipped.
pub fn find_jsx_tags(source: &str) -> Vec<JsxTag> {
    static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(
            r#"<(/?)([A-Z][a-zA-Z0-9]*)((?:\s+(?:[^<>"'{}/]|"[^"]*"|'[^']*'|\{[^}]*\})*)?)\s*(/?)>"#,
        )
        .expect("Invalid component tag regex")
    });

    let mut tags = Vec::new();

    for caps in TAG_RE.captures_iter(source) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(2)) else {
            continue;
        };
        let closing = caps.get(1).is_some_and(|m| !m.is_empty());
        let self_closing = caps.get(4).is_some_and(|m| !m.is_empty());

        let kind = match (closing, self_closing) {
            (true, false) => TagKind::Close,
            (false, true) => TagKind::SelfClosing,
            (false, false) => TagKind::Open,
            // `</Name />` is not a tag
            (true, true) => continue,
        };

        let props = match kind {
            TagKind::Close => Props::new(),
            _ => parse_props(caps.get(3).map(|m| m.as_str()).unwrap_or("")),
        };

        tags.push(JsxTag {
            kind,
            component: name.as_str().to_string(),
            props,
            range: whole.range(),
        });
    }

    tags
}

/// Parse props from a props string.
fn parse_props(props_str: &str) -> Props {
    let mut props = Props::new();
    let props_str = props_str.trim();

    if props_str.is_empty() {
        return props;
    }

    // Match: name="value" or name='value' or name={expr} or name (boolean)
    static PROP_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r#"([a-zA-Z][a-zA-Z0-9-]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|\{([^}]*)\}))?"#)
            .expect("Invalid prop regex")
    });

    for caps in PROP_RE.captures_iter(props_str) {
        let Some(name) = caps.get(1) else {
            continue;
        };

        let value = if let Some(m) = caps.get(2) {
            // Double-quoted string
            PropValue::String(m.as_str().to_string())
        } else if let Some(m) = caps.get(3) {
            // Single-quoted string
            PropValue::String(m.as_str().to_string())
        } else if let Some(m) = caps.get(4) {
            // Expression; a quoted literal inside braces is still a string
            let expr = m.as_str().trim();
            match unquote(expr) {
                Some(literal) => PropValue::String(literal.to_string()),
                None => PropValue::Expression(expr.to_string()),
            }
        } else {
            // Boolean (just the prop name)
            PropValue::Boolean(true)
        };

        props.insert(name.as_str().to_string(), value);
    }

    props
}

fn unquote(expr: &str) -> Option<&str> {
    ['"', '\'', '`']
        .iter()
        .find_map(|q| expr.strip_prefix(*q)?.strip_suffix(*q))
}

/// Escape HTML special characters including single quotes for XSS prevention.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_open_and_close_tags() {
        let tags = find_jsx_tags("<Warning>\n</Warning>");

        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].kind, TagKind::Open);
        assert_eq!(tags[0].component, "Warning");
        assert_eq!(tags[0].range, 0..9);
        assert_eq!(tags[1].kind, TagKind::Close);
        assert_eq!(tags[1].range, 10..20);
    }

    #[test]
    fn finds_self_closing_with_props() {
        let tags = find_jsx_tags(r##"<Badge text="new" colour="#ff0000" />"##);

        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].kind, TagKind::SelfClosing);
        assert_eq!(
            tags[0].props.get("text"),
            Some(&PropValue::String("new".to_string()))
        );
        assert_eq!(tags[0].props.get("colour").and_then(|p| p.as_str()), Some("#ff0000"));
    }

    #[test]
    fn finds_compact_self_closing() {
        let tags = find_jsx_tags("<Deprecated/>");

        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].kind, TagKind::SelfClosing);
        assert!(tags[0].props.is_empty());
    }

    #[test]
    fn skips_lowercase_html() {
        let tags = find_jsx_tags(r#"<div class="x"><span>hi</span></div>"#);

        assert!(tags.is_empty());
    }

    #[test]
    fn parses_boolean_props() {
        let tags = find_jsx_tags("<Note inline>");

        assert_eq!(tags[0].props.get("inline"), Some(&PropValue::Boolean(true)));
    }

    #[test]
    fn parses_expression_props() {
        let tags = find_jsx_tags(r#"<Deprecated since={"0.3.7"} replacement={other} />"#);

        assert_eq!(
            tags[0].props.get("since"),
            Some(&PropValue::String("0.3.7".to_string()))
        );
        assert_eq!(
            tags[0].props.get("replacement"),
            Some(&PropValue::Expression("other".to_string()))
        );
    }

    #[test]
    fn escapes_html() {
        assert_eq!(html_escape(r#"<a href="x">'"#), "&lt;a href=&quot;x&quot;&gt;&#x27;");
    }
}
