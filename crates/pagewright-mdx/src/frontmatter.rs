//! Frontmatter extraction and parsing.

use serde::Serialize;
use serde_json::{Map, Value};

/// Metadata block from the top of a document.
///
/// Keys are strings, values are arbitrary YAML converted to JSON values so
/// they can be handed to templates and serialized into page props as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FrontMatter(Map<String, Value>);

impl FrontMatter {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Page title, if the `title` key holds a string.
    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    /// Look up a raw value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Insert or replace a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Borrow the underlying map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for FrontMatter {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Extract frontmatter from document source.
///
/// The block must open with a `---` line and close with the next `---` line.
/// Sources without a block yield an empty mapping and the untouched source.
/// Returns the parsed frontmatter and the body after the block.
pub fn extract_frontmatter(source: &str) -> Result<(FrontMatter, &str), FrontmatterError> {
    let trimmed = source.trim_start();

    let Some(after_open) = trimmed.strip_prefix("---") else {
        return Ok((FrontMatter::new(), source));
    };

    // `----` or `--- text` is markdown, not a delimiter
    let rest_of_line = after_open.split('\n').next().unwrap_or("");
    if !rest_of_line.trim().is_empty() {
        return Ok((FrontMatter::new(), source));
    }

    let Some(newline) = after_open.find('\n') else {
        return Err(FrontmatterError::Unclosed);
    };
    let block = &after_open[newline + 1..];

    // Only a line holding exactly `---` closes the block
    let mut offset = 0;
    let mut close = None;
    for line in block.split_inclusive('\n') {
        if line.trim_end() == "---" {
            close = Some((offset, offset + line.len()));
            break;
        }
        offset += line.len();
    }

    let Some((close_start, close_end)) = close else {
        return Err(FrontmatterError::Unclosed);
    };

    let yaml_content = block[..close_start].trim();
    let remaining = &block[close_end..];

    Ok((parse_yaml(yaml_content)?, remaining.trim_start()))
}

fn parse_yaml(yaml: &str) -> Result<FrontMatter, FrontmatterError> {
    if yaml.is_empty() {
        return Ok(FrontMatter::new());
    }

    let value: Value =
        serde_yaml::from_str(yaml).map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?;

    match value {
        Value::Null => Ok(FrontMatter::new()),
        Value::Object(map) => Ok(FrontMatter(map)),
        _ => Err(FrontmatterError::NotAMapping),
    }
}

/// Errors that can occur when parsing frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed frontmatter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in frontmatter: {0}")]
    InvalidYaml(String),

    #[error("Frontmatter must be a mapping of keys to values")]
    NotAMapping,
}
