//! Trait definitions for document components.

use crate::inline::Props;

/// Errors that can occur while rendering a component.
#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    #[error("<{component}> is missing required prop `{prop}`")]
    MissingProp {
        component: &'static str,
        prop: &'static str,
    },

    #[error("<{component}> prop `{prop}` has an invalid value: {value}")]
    InvalidProp {
        component: &'static str,
        prop: &'static str,
        value: String,
    },
}

/// A component that can be used by name inside document bodies.
///
/// Components render to static markup: the opening tag becomes
/// [`open`](Self::open), the closing tag [`close`](Self::close), and a
/// self-closing tag both, back to back.
pub trait Component: Send + Sync {
    /// Tag name used in documents (e.g., "Warning")
    fn name(&self) -> &'static str;

    /// Markup emitted for the opening tag.
    fn open(&self, props: &Props) -> Result<String, ComponentError>;

    /// Markup emitted for the closing tag.
    fn close(&self) -> &'static str;
}
