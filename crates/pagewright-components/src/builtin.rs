//! Components available to every document.

use std::sync::LazyLock;

use regex::Regex;

use crate::inline::{html_escape, Props};
use crate::traits::{Component, ComponentError};

/// Boxed callout: `<Warning>`, `<Note>`.
///
/// An optional `title` prop adds a heading line.
pub struct Callout {
    name: &'static str,
    class: &'static str,
}

impl Callout {
    pub const fn new(name: &'static str, class: &'static str) -> Self {
        Self { name, class }
    }
}

impl Component for Callout {
    fn name(&self) -> &'static str {
        self.name
    }

    fn open(&self, props: &Props) -> Result<String, ComponentError> {
        let title = props
            .get("title")
            .and_then(|p| p.as_str())
            .map(|t| format!(r#"<p class="callout-title">{}</p>"#, html_escape(t)))
            .unwrap_or_default();

        Ok(format!(
            r#"<div class="callout callout-{}">{title}"#,
            self.class
        ))
    }

    fn close(&self) -> &'static str {
        "</div>"
    }
}

/// Deprecation notice: `<Deprecated since="0.3.7">`.
pub struct Deprecated;

impl Component for Deprecated {
    fn name(&self) -> &'static str {
        "Deprecated"
    }

    fn open(&self, props: &Props) -> Result<String, ComponentError> {
        let heading = match props.get("since").and_then(|p| p.as_str()) {
            Some(since) => format!("Deprecated since {}", html_escape(since)),
            None => "Deprecated".to_string(),
        };

        Ok(format!(
            r#"<div class="deprecated"><p class="deprecated-title">{heading}</p>"#
        ))
    }

    fn close(&self) -> &'static str {
        "</div>"
    }
}

/// Inline label: `<Badge text="new" colour="#2ecc71" />`.
pub struct Badge;

impl Component for Badge {
    fn name(&self) -> &'static str {
        "Badge"
    }

    fn open(&self, props: &Props) -> Result<String, ComponentError> {
        static HEX_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("Invalid hex colour regex")
        });

        let text = props
            .get("text")
            .and_then(|p| p.as_str())
            .ok_or(ComponentError::MissingProp {
                component: "Badge",
                prop: "text",
            })?;

        let style = match props.get("colour").and_then(|p| p.as_str()) {
            Some(colour) if HEX_RE.is_match(colour) => {
                format!(r#" style="background-color: {colour}""#)
            }
            Some(colour) => {
                return Err(ComponentError::InvalidProp {
                    component: "Badge",
                    prop: "colour",
                    value: colour.to_string(),
                })
            }
            None => String::new(),
        };

        Ok(format!(
            r#"<span class="badge"{style}>{}"#,
            html_escape(text)
        ))
    }

    fn close(&self) -> &'static str {
        "</span>"
    }
}
